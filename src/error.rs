use crate::Direction;

use ilattice::glam::IVec2;
use thiserror::Error;

/// Failure of [`try_generate_mesh`](crate::try_generate_mesh).
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("invalid mesh parameters: {0}")]
    InvalidParams(String),
    #[error("triangulation failed: {0}")]
    Triangulation(#[from] TriangulationError),
}

/// Failure of a [`Triangulator`](crate::Triangulator).
#[derive(Debug, Error)]
pub enum TriangulationError {
    #[error("could not insert point ({x}, {y}): {reason}")]
    Insertion { x: f32, y: f32, reason: String },
    #[error("polygon has no boundary")]
    EmptyPolygon,
}

/// Why a contour walk was abandoned. Only the affected loop is lost.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum WalkError {
    #[error("lattice point {0} is not on a contour")]
    Unclassified(IVec2),
    #[error("entered lattice point {at} from {arrival:?}, which none of its passages accepts")]
    Mismatch { at: IVec2, arrival: Direction },
    #[error("walk from {0} did not close within the lattice budget")]
    Unterminated(IVec2),
}
