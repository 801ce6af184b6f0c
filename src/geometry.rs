//! Voxel geometry and coordinate frames.
//!
//! # Global Frame
//!
//! Voxels live on an integer grid. The voxel at `[x, y, z]` is the unit cube
//! spanning `[x, x + 1] × [y, y + 1] × [z, z + 1]`, so mesh vertices always land
//! on integer **lattice points** before placement.
//!
//! ```text
//!       +Y (Up)
//!       | +Z (Forward)
//!       |/
//! -X____O____+X (Right)
//! (Left)/|
//!     /  |
//!   -Z   -Y (Down)
//! (Back)
//! ```
//!
//! Triangles are wound counterclockwise when viewed from outside the solid,
//! as per convention for a right-handed frame.
//!
//! # Buckets
//!
//! Every visible surface of a smoothed voxel set points in one of 26
//! directions: along one of the 6 cube [`Face`]s, diagonally across one of the
//! 12 cube [`Edge`]s, or diagonally across one of the 8 cube corners
//! ([`Octant`]). A [`BucketKey`] names one of those directions and owns a
//! coordinate frame for it.
//!
//! ```text
//!   face bucket          edge bucket            corner bucket
//!   O--------O               O                      O
//!   |        |             / |                    /  \
//!   |  -Z    |           /   |                  /      \
//!   |        |         O     |                O----------O
//!   O--------O         |     O
//!                      |   /
//!                      | /
//!                      O
//! ```
//!
//! Face frames are proper rotations that send the face's outward normal to
//! `Back` (-Z). Edge frames shear the diagonal plane of the edge into an XY
//! layer whose local Z is the plane's offset. In both cases the surfaces of a
//! bucket end up as unit cells in XY layers, which is what the
//! [`trace_layer`](crate::trace_layer) walks.
//!
//! # Smooth Normals
//!
//! A [`Normal`] is a set of [`Face`]s. Attached to a voxel it says which of
//! the voxel's faces have been cut away by a diagonal: two faces make a wedge,
//! three faces make a corner. See [`classify`](crate::classify). What is left
//! of each cube face once the diagonal is cut is a [`Cover`].

mod axis;
mod cover;
mod direction;
mod frame;
mod normal;

pub use axis::*;
pub use cover::*;
pub use direction::*;
pub use frame::*;
pub use normal::*;
