//! Outlines of the walls in one bucket layer.
//!
//! A layer is the XY slice `z` of a [`Bucket`]. Its walls are traced on the
//! `(sx + 1) x (sy + 1)` lattice of cell corners: every lattice point is
//! classified from the four cells around it, then a walker follows the
//! boundary counter-clockwise around solid regions, emitting a point at every
//! turn. Corners whose cell leans diagonally toward them are cut across the
//! cell, which is where a layer meets the diagonal faces of its edge buckets.

mod lattice;
mod walk;

pub use lattice::{classify_point, Lattice, LatticeVertex, LayerMask, Passage};
pub use walk::{step, walk, walk_all};

use crate::Bucket;

use ilattice::glam::IVec2;
use std::collections::HashSet;

/// The outlines of one layer, ready to become a polygon.
#[derive(Clone, Debug)]
pub struct TracedLayer {
    pub mask: LayerMask,
    /// Simple, counter-clockwise loops of at least three points.
    pub loops: Vec<Vec<IVec2>>,
}

impl TracedLayer {
    #[inline]
    pub fn z(&self) -> i32 {
        self.mask.z()
    }
}

pub fn trace_layer(bucket: &Bucket, z: i32) -> TracedLayer {
    let mask = LayerMask::new(bucket, z);
    let mut lattice = Lattice::new(&mask);
    let loops = walk_all(&mut lattice)
        .iter()
        .flat_map(|points| split_self_intersections(points))
        .map(|points| remove_collinear(&points))
        .filter(|points| points.len() >= 3)
        .collect();
    TracedLayer { mask, loops }
}

/// Cuts a closed point sequence at every repeated point.
///
/// Points are pushed onto a stack. When a point repeats, everything above and
/// including its earlier occurrence is popped and emitted, in order, as its own
/// loop; the point is then pushed again so the outer loop stays connected.
/// What remains at the end is the last loop. Loops may come out shorter than
/// three points.
pub fn split_self_intersections(points: &[IVec2]) -> Vec<Vec<IVec2>> {
    let mut loops = Vec::new();
    let mut stack: Vec<IVec2> = Vec::with_capacity(points.len());
    let mut on_stack = HashSet::new();

    for &p in points {
        if on_stack.contains(&p) {
            let mut popped = Vec::new();
            while let Some(q) = stack.pop() {
                on_stack.remove(&q);
                popped.push(q);
                if q == p {
                    break;
                }
            }
            popped.reverse();
            loops.push(popped);
        }
        stack.push(p);
        on_stack.insert(p);
    }
    loops.push(stack);
    loops
}

fn is_collinear(a: IVec2, b: IVec2, c: IVec2) -> bool {
    let (u, v) = (b - a, c - b);
    u.x * v.y - u.y * v.x == 0
}

/// Drops points that do not turn the outline, treating it as closed.
/// Repeated points and back-and-forth spikes count as not turning.
fn remove_collinear(points: &[IVec2]) -> Vec<IVec2> {
    let mut out: Vec<IVec2> = Vec::with_capacity(points.len());
    for &p in points {
        while out.len() >= 2 && is_collinear(out[out.len() - 2], out[out.len() - 1], p) {
            out.pop();
        }
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    loop {
        let n = out.len();
        if n < 3 {
            break;
        }
        if is_collinear(out[n - 2], out[n - 1], out[0]) {
            out.pop();
        } else if is_collinear(out[n - 1], out[0], out[1]) {
            out.remove(0);
        } else {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, partition, BucketKey, Face, Voxel, VoxelSet};
    use ilattice::glam::IVec3;

    fn back_bucket(points: &[[i32; 3]], smooth: bool) -> Bucket {
        let voxels: VoxelSet = points
            .iter()
            .map(|p| (IVec3::from(*p), Voxel { smooth }))
            .collect();
        let buckets = partition(&voxels, &classify(&voxels));
        buckets.get(BucketKey::Face(Face::Back)).unwrap().clone()
    }

    fn pts(points: &[[i32; 2]]) -> Vec<IVec2> {
        points.iter().map(|p| IVec2::from(*p)).collect()
    }

    #[test]
    fn lone_cell_is_a_square() {
        let layer = trace_layer(&back_bucket(&[[0, 0, 0]], true), 0);
        assert_eq!(layer.loops, vec![pts(&[[0, 0], [1, 0], [1, 1], [0, 1]])]);
    }

    #[test]
    fn straight_runs_collapse() {
        let layer = trace_layer(&back_bucket(&[[0, 0, 0], [1, 0, 0], [2, 0, 0]], false), 0);
        assert_eq!(layer.loops, vec![pts(&[[0, 0], [3, 0], [3, 1], [0, 1]])]);
    }

    #[test]
    fn staircase_outline_is_chamfered() {
        let bucket = back_bucket(
            &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [0, 1, 0], [1, 1, 0], [0, 2, 0]],
            true,
        );
        let layer = trace_layer(&bucket, 0);
        assert_eq!(
            layer.loops,
            vec![pts(&[
                [0, 1],
                [1, 0],
                [3, 0],
                [3, 1],
                [2, 1],
                [1, 2],
                [1, 3],
                [0, 3]
            ])]
        );
    }

    #[test]
    fn diagonal_neighbors_get_separate_loops() {
        let layer = trace_layer(&back_bucket(&[[0, 0, 0], [1, 1, 0]], false), 0);
        assert_eq!(
            layer.loops,
            vec![
                pts(&[[0, 0], [1, 0], [1, 1], [0, 1]]),
                pts(&[[2, 1], [2, 2], [1, 2], [1, 1]]),
            ]
        );
    }

    #[test]
    fn cell_bounded_only_by_pinches_is_traced() {
        let layer = trace_layer(
            &back_bucket(
                &[[0, 0, 0], [2, 0, 0], [1, 1, 0], [0, 2, 0], [2, 2, 0]],
                false,
            ),
            0,
        );
        assert_eq!(layer.loops.len(), 5);
        assert!(layer.loops.iter().all(|l| l.len() == 4));
    }

    #[test]
    fn hole_gets_its_own_clockwise_loop() {
        let ring: Vec<[i32; 3]> = (0..3)
            .flat_map(|x| (0..3).map(move |y| [x, y, 0]))
            .filter(|p| *p != [1, 1, 0])
            .collect();
        let layer = trace_layer(&back_bucket(&ring, false), 0);
        assert_eq!(layer.loops.len(), 2);
        assert!(layer.loops.contains(&pts(&[[0, 0], [3, 0], [3, 3], [0, 3]])));
        assert!(layer.loops.contains(&pts(&[[1, 1], [1, 2], [2, 2], [2, 1]])));
    }

    #[test]
    fn repeated_points_split_into_loops() {
        let [a, b, c, d] = [[0, 0], [1, 0], [1, 1], [0, 1]].map(IVec2::from);
        assert_eq!(
            split_self_intersections(&[a, b, c, b, d]),
            vec![vec![b, c], vec![a, b, d]]
        );
        assert_eq!(split_self_intersections(&[a, b, c]), vec![vec![a, b, c]]);
    }

    #[test]
    fn figure_eight_splits_into_two_squares() {
        let eight = pts(&[
            [0, 0], [1, 0], [1, 1], [2, 1], [2, 2], [1, 2], [1, 1], [0, 1],
        ]);
        let loops = split_self_intersections(&eight);
        assert_eq!(
            loops,
            vec![
                pts(&[[1, 1], [2, 1], [2, 2], [1, 2]]),
                pts(&[[0, 0], [1, 0], [1, 1], [0, 1]]),
            ]
        );
    }

    #[test]
    fn collinear_and_spike_points_are_removed() {
        let cleaned = remove_collinear(&pts(&[
            [0, 0], [1, 0], [2, 0], [2, 2], [2, 3], [2, 2], [0, 2], [0, 1],
        ]));
        assert_eq!(cleaned, pts(&[[0, 0], [2, 0], [2, 2], [0, 2]]));
    }
}
