use crate::{Axis, Cover, Face, Normal, VoxelSet};

use ilattice::glam::IVec3;
use std::collections::HashMap;

/// Smoothing classification of a single voxel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SmoothNormal {
    /// The first-pass result, before corners are reconciled with their
    /// neighbors.
    pub raw: Normal,
    /// The final smooth normal. Empty, or spanning two or three axes. This is
    /// what decides the voxel's solid and its buckets.
    pub refined: Normal,
}

/// The [`SmoothNormal`] of every voxel in a [`VoxelSet`].
#[derive(Clone, Debug, Default)]
pub struct SmoothNormals {
    normals: HashMap<IVec3, SmoothNormal>,
}

impl SmoothNormals {
    /// Returns the default (empty) classification for points outside the set.
    #[inline]
    pub fn get(&self, p: IVec3) -> SmoothNormal {
        self.normals.get(&p).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec3, SmoothNormal)> + '_ {
        self.normals.iter().map(|(p, n)| (*p, *n))
    }

    pub fn len(&self) -> usize {
        self.normals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }
}

/// Derives the smooth normal of every voxel from occupancy and the per-voxel
/// smooth flag.
///
/// The first pass looks at each axis of a smooth voxel. When exactly one of the
/// two face neighbors on that axis is occupied, the axis contributes the face
/// pointing away from it. Two or more contributing axes form a candidate, which
/// is dropped if the diagonal neighbor it points at is occupied.
///
/// The second pass only touches three-axis candidates. They survive if all
/// three neighbors they lean on are themselves smoothed. Otherwise the corner
/// adopts the two-axis wedge of the first neighbor, checked in X, Z, Y order,
/// that agrees with it on both remaining axes, or loses its smoothing.
///
/// The third pass demotes smoothed voxels, from the back of the sprite to the
/// front, until every exposed part of every face can be traced on its layer.
pub fn classify(voxels: &VoxelSet) -> SmoothNormals {
    let mut normals = unsettled(voxels);
    let demoted = settle(&mut normals.normals);
    if demoted > 0 {
        log::debug!("settling demoted {demoted} smoothed voxels");
    }
    normals
}

/// The first two passes of [`classify`].
fn unsettled(voxels: &VoxelSet) -> SmoothNormals {
    let raw: HashMap<IVec3, Normal> = voxels
        .iter()
        .map(|(p, voxel)| {
            let normal = if voxel.smooth {
                directional_normal(voxels, p)
            } else {
                Normal::EMPTY
            };
            (p, normal)
        })
        .collect();

    let normals = raw
        .iter()
        .map(|(p, candidate)| {
            let refined = refine_corner(voxels, &raw, *p, *candidate);
            (
                *p,
                SmoothNormal {
                    raw: *candidate,
                    refined,
                },
            )
        })
        .collect();

    SmoothNormals { normals }
}

fn directional_normal(voxels: &VoxelSet, p: IVec3) -> Normal {
    let mut normal = Normal::EMPTY;
    for axis in Axis::ALL {
        let pos = Face::new(1, axis);
        let neg = Face::new(-1, axis);
        let has_pos = voxels.contains(p + pos.get_unit_vector());
        let has_neg = voxels.contains(p + neg.get_unit_vector());
        match (has_neg, has_pos) {
            (true, false) => normal.insert(pos),
            (false, true) => normal.insert(neg),
            _ => {}
        }
    }

    if !normal.is_smoothed() {
        return Normal::EMPTY;
    }
    // An occupied diagonal means the "corner" is actually interior.
    if voxels.contains(p + normal.to_vector()) {
        return Normal::EMPTY;
    }
    normal
}

const CORNER_PRIORITY: [Axis; 3] = [Axis::X, Axis::Z, Axis::Y];

fn refine_corner(
    voxels: &VoxelSet,
    raw: &HashMap<IVec3, Normal>,
    p: IVec3,
    candidate: Normal,
) -> Normal {
    if !candidate.is_corner() {
        return candidate;
    }

    // The neighbor on the occupied side of each axis.
    let neighbors = CORNER_PRIORITY.map(|axis| {
        let face = candidate.face_on(axis)?;
        let q = p - face.get_unit_vector();
        if voxels.contains(q) {
            raw.get(&q).copied()
        } else {
            None
        }
    });

    if neighbors
        .iter()
        .all(|n| n.map_or(false, |n| !n.is_empty()))
    {
        return candidate;
    }

    for (axis, neighbor) in CORNER_PRIORITY.into_iter().zip(neighbors) {
        let Some(neighbor) = neighbor else {
            continue;
        };
        let shared = neighbor & candidate;
        if shared == candidate.without_axis(axis) {
            return shared;
        }
    }
    Normal::EMPTY
}

/// The part of `p`'s `face` that no neighbor covers, or `None` if what is left
/// is a quarter of the face.
fn exposure(normals: &HashMap<IVec3, SmoothNormal>, p: IVec3, face: Face) -> Option<Cover> {
    let Some(front) = normals.get(&p) else {
        return Some(Cover::Empty);
    };
    let across = normals
        .get(&(p + face.get_unit_vector()))
        .map_or(Cover::Empty, |q| Cover::of(q.refined, face.opposite()));
    Cover::of(front.refined, face).minus(across)
}

/// The voxel to demote if `p`'s `face` cannot be outlined on its layer's
/// lattice.
///
/// A half-exposed face is outlined by cutting one corner off its cell, which
/// needs the two cells beside that corner to show nothing on the same side.
fn conflict(normals: &HashMap<IVec3, SmoothNormal>, p: IVec3, face: Face) -> Option<IVec3> {
    let q = p + face.get_unit_vector();
    let across_is_half = normals
        .get(&q)
        .map_or(false, |n| matches!(Cover::of(n.refined, face.opposite()), Cover::Half(_)));
    let culprit = if across_is_half { q } else { p };

    let blocked = match exposure(normals, p, face) {
        None => true,
        Some(Cover::Half(corner)) => corner
            .faces()
            .any(|side| exposure(normals, p + side.get_unit_vector(), face) != Some(Cover::Empty)),
        Some(_) => false,
    };
    blocked.then_some(culprit)
}

/// Pass three: drops smoothing until every face of every voxel can be traced.
///
/// A voxel that keeps the full square of a face next to a neighbor whose
/// diagonal cuts the other side exposes a corner triangle. Two such triangles
/// in adjacent cells of one layer, or a triangle beside any other visible
/// cell, meet in a way a corner cut cannot describe, and two crossing
/// diagonals leave a quarter of a face. Each conflict demotes the voxel whose
/// diagonal caused it. Voxels are visited from the highest Z down, so when the
/// front and back layers of a sprite disagree the front (facing -Z) keeps its
/// bevels. Repeats until nothing changes and returns the number of demotions.
fn settle(normals: &mut HashMap<IVec3, SmoothNormal>) -> usize {
    let mut order: Vec<IVec3> = normals.keys().copied().collect();
    order.sort_by_key(|p| (-p.z, p.y, p.x));

    let mut demoted = 0;
    loop {
        let mut changed = false;
        for p in order.iter() {
            for face in Face::ALL {
                let Some(culprit) = conflict(normals, *p, face) else {
                    continue;
                };
                let Some(normal) = normals.get_mut(&culprit) else {
                    continue;
                };
                if !normal.refined.is_empty() {
                    normal.refined = Normal::EMPTY;
                    demoted += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            return demoted;
        }
    }
}
