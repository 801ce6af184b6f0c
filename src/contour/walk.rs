use super::lattice::{Lattice, LatticeVertex, Passage};
use crate::{Direction, WalkError};

use ilattice::glam::IVec2;

/// Resolves the passage taken through `vertex` when entering `at` from
/// `arrival`.
pub fn step(
    at: IVec2,
    arrival: Direction,
    vertex: Option<LatticeVertex>,
) -> Result<Passage, WalkError> {
    let vertex = vertex.ok_or(WalkError::Unclassified(at))?;
    vertex
        .passage_from(arrival)
        .ok_or(WalkError::Mismatch { at, arrival })
}

/// Follows one contour from `start` until it returns there from the same
/// side, collecting its outline points.
pub fn walk(
    lattice: &mut Lattice,
    start: IVec2,
    start_arrival: Direction,
) -> Result<Vec<IVec2>, WalkError> {
    let budget = 4 * lattice.num_points() + 4;
    let mut points = Vec::new();
    let (mut at, mut arrival) = (start, start_arrival);
    for _ in 0..budget {
        let passage = step(at, arrival, lattice.get(at))?;
        lattice.mark_visited(at, arrival);
        passage.emit(at, &mut points);

        at += passage.to.offset();
        arrival = passage.to.opposite();
        if at == start && arrival == start_arrival {
            return Ok(points);
        }
    }
    Err(WalkError::Unterminated(start))
}

/// Walks every contour of the lattice once. Broken walks are logged and
/// skipped.
pub fn walk_all(lattice: &mut Lattice) -> Vec<Vec<IVec2>> {
    let mut loops = Vec::new();
    for (start, arrival) in lattice.starts() {
        if lattice.is_visited(start, arrival) {
            continue;
        }
        match walk(lattice, start, arrival) {
            Ok(points) => loops.push(points),
            Err(e) => log::warn!("abandoning contour loop: {e}"),
        }
    }
    loops
}
