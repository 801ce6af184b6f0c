//! Smoothed, UV-mapped triangle meshes from voxelized sprites.
//!
//! A sprite is extruded into a sparse set of voxels, each optionally marked as
//! smooth. Smooth voxels on a staircase-like silhouette get their corners cut
//! along the diagonal, so pixel art turns into a solid with beveled edges
//! instead of a pile of cubes.
//!
//! The pipeline:
//! 1. [`classify`] derives a smooth normal for every voxel from its neighbors
//! 2. [`partition`] sorts the voxels into 26 buckets (6 faces, 12 edges, 8
//!    corners), each expressed in its own frame
//! 3. [`trace_layer`] outlines the walls in every layer of a face or edge
//!    bucket, and [`build_polygon`] turns the outlines into a polygon with holes
//! 4. a [`Triangulator`] fills each polygon, while [`corner_fan`] emits one
//!    triangle per voxel of a corner bucket
//! 5. the triangles are mapped back into the sprite's frame, optionally welded,
//!    placed and UV-mapped onto the sprite's cell of the texture atlas
//!
//! Run [`fill_empty_spaces`] first if the voxels may enclose cavities that
//! should not produce inner walls.
//!
//! # Example Code
//!
//! ```
//! use sprite_mesh::glam::{IVec3, UVec2};
//! use sprite_mesh::{fill_empty_spaces, generate_mesh, MeshParams, Voxel, VoxelSet};
//!
//! // A 16x16 pixel disc, two voxels deep.
//! let mut voxels = VoxelSet::new();
//! for y in 0..16 {
//!     for x in 0..16 {
//!         let (dx, dy) = (x as f32 - 7.5, y as f32 - 7.5);
//!         if dx * dx + dy * dy < 56.0 {
//!             for z in 0..2 {
//!                 voxels.insert(IVec3::new(x, y, z), Voxel::SMOOTH);
//!             }
//!         }
//!     }
//! }
//! fill_empty_spaces(&mut voxels);
//!
//! let params = MeshParams::new(UVec2::splat(16)).with_optimize_normals(true);
//! let mesh = generate_mesh(&voxels, &params).unwrap();
//!
//! assert!(mesh.num_triangles() > 0);
//! assert_eq!(mesh.uvs.len(), mesh.vertices.len());
//! ```

mod bounds;
mod bucket;
mod buffer;
mod contour;
mod corner;
mod error;
mod fill;
pub mod geometry;
mod mesh;
mod params;
mod polygon;
mod smooth;
mod triangulate;

pub use bounds::*;
pub use bucket::*;
pub use buffer::*;
pub use contour::*;
pub use corner::{corner_fan, CORNER_TRIANGLES};
pub use error::*;
pub use fill::*;
#[doc(inline)]
pub use geometry::*;
pub use mesh::*;
pub use params::*;
pub use polygon::*;
pub use smooth::*;
pub use triangulate::*;

pub use ilattice;
pub use ilattice::glam;
pub use ndshape;

use ilattice::glam::IVec3;
use ilattice::prelude::Extent;
use std::collections::HashMap;

/// One voxel of a sprite.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Voxel {
    /// Whether this voxel may be beveled where the silhouette steps
    /// diagonally.
    pub smooth: bool,
}

impl Voxel {
    pub const SOLID: Self = Self { smooth: false };
    pub const SMOOTH: Self = Self { smooth: true };
}

/// A sparse set of voxels keyed by cell. Cell `p` spans `[p, p + 1]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelSet {
    voxels: HashMap<IVec3, Voxel>,
}

impl VoxelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the voxel previously at `p`, if any.
    pub fn insert(&mut self, p: IVec3, voxel: Voxel) -> Option<Voxel> {
        self.voxels.insert(p, voxel)
    }

    pub fn remove(&mut self, p: IVec3) -> Option<Voxel> {
        self.voxels.remove(&p)
    }

    #[inline]
    pub fn get(&self, p: IVec3) -> Option<Voxel> {
        self.voxels.get(&p).copied()
    }

    #[inline]
    pub fn contains(&self, p: IVec3) -> bool {
        self.voxels.contains_key(&p)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec3, Voxel)> + '_ {
        self.voxels.iter().map(|(p, v)| (*p, *v))
    }

    /// The smallest extent holding every voxel, or `None` if the set is empty.
    pub fn extent(&self) -> Option<Extent<IVec3>> {
        let mut cells = self.voxels.keys();
        let first = *cells.next()?;
        let (min, max) = cells.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Extent::from_min_and_max(min, max))
    }
}

impl FromIterator<(IVec3, Voxel)> for VoxelSet {
    fn from_iter<I: IntoIterator<Item = (IVec3, Voxel)>>(iter: I) -> Self {
        Self {
            voxels: iter.into_iter().collect(),
        }
    }
}

impl Extend<(IVec3, Voxel)> for VoxelSet {
    fn extend<I: IntoIterator<Item = (IVec3, Voxel)>>(&mut self, iter: I) {
        self.voxels.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voxel_set_basics() {
        let mut voxels = VoxelSet::new();
        assert!(voxels.extent().is_none());
        assert_eq!(voxels.insert(IVec3::new(1, 2, 3), Voxel::SOLID), None);
        assert_eq!(voxels.insert(IVec3::new(1, 2, 3), Voxel::SMOOTH), Some(Voxel::SOLID));
        voxels.insert(IVec3::new(-1, 0, 5), Voxel::SOLID);
        assert_eq!(voxels.len(), 2);

        let extent = voxels.extent().unwrap();
        assert_eq!(extent.minimum, IVec3::new(-1, 0, 3));
        assert_eq!(extent.shape, IVec3::new(3, 3, 3));

        assert_eq!(voxels.remove(IVec3::new(1, 2, 3)), Some(Voxel::SMOOTH));
        assert!(!voxels.contains(IVec3::new(1, 2, 3)));
        assert_eq!(voxels.get(IVec3::new(-1, 0, 5)), Some(Voxel::SOLID));
    }
}
