use crate::{Axis, Face};

use core::ops::{BitAnd, BitOr, BitOrAssign};
use ilattice::glam::IVec3;

/// A set of [`Face`] directions.
///
/// The same bitset describes two things:
/// - the **smooth normal** of a voxel: the outward directions that blend into a
///   diagonal surface instead of meeting at a hard 90° edge
/// - the raw orientation of a surface, before it is resolved into a
///   [`BucketKey`](crate::BucketKey)
///
/// A well-formed normal has at most one bit per axis.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Normal(u8);

impl Normal {
    pub const EMPTY: Self = Self(0);
    pub const UP: Self = Self::from_face(Face::Up);
    pub const DOWN: Self = Self::from_face(Face::Down);
    pub const FORWARD: Self = Self::from_face(Face::Forward);
    pub const BACK: Self = Self::from_face(Face::Back);
    pub const LEFT: Self = Self::from_face(Face::Left);
    pub const RIGHT: Self = Self::from_face(Face::Right);

    #[inline]
    pub const fn from_face(face: Face) -> Self {
        Self(1 << face as u8)
    }

    #[inline]
    pub fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn contains(&self, face: Face) -> bool {
        self.0 & Self::from_face(face).0 != 0
    }

    #[inline]
    pub fn insert(&mut self, face: Face) {
        self.0 |= Self::from_face(face).0;
    }

    pub fn faces(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |face| self.contains(*face))
    }

    /// The bits of this normal that lie on `axis`.
    #[inline]
    pub fn on_axis(&self, axis: Axis) -> Normal {
        *self & (Self::from_face(Face::new(1, axis)) | Self::from_face(Face::new(-1, axis)))
    }

    /// The single face this normal points to along `axis`, if any.
    pub fn face_on(&self, axis: Axis) -> Option<Face> {
        [Face::new(1, axis), Face::new(-1, axis)]
            .into_iter()
            .find(|face| self.contains(*face))
    }

    #[inline]
    pub fn without_axis(&self, axis: Axis) -> Normal {
        Self(self.0 & !self.on_axis(axis).0)
    }

    /// Number of axes with at least one bit set.
    pub fn axis_count(&self) -> u32 {
        Axis::ALL
            .into_iter()
            .filter(|axis| !self.on_axis(*axis).is_empty())
            .count() as u32
    }

    /// True iff all three axes are represented: a cube corner.
    #[inline]
    pub fn is_corner(&self) -> bool {
        self.axis_count() == 3
    }

    /// True iff at least two axes are represented, i.e. this normal describes a
    /// diagonal (edge or corner) surface.
    #[inline]
    pub fn is_smoothed(&self) -> bool {
        self.axis_count() >= 2
    }

    /// Sum of the unit vectors of every face in the set.
    pub fn to_vector(&self) -> IVec3 {
        self.faces()
            .fold(IVec3::ZERO, |sum, face| sum + face.get_unit_vector())
    }

    /// One face per non-zero component, following its sign.
    pub fn from_vector(v: IVec3) -> Self {
        let mut normal = Self::EMPTY;
        for axis in Axis::ALL {
            let c = v[axis.index()];
            if c != 0 {
                normal.insert(Face::new(c.signum(), axis));
            }
        }
        normal
    }

    /// Every face flipped to the other end of its axis.
    #[inline]
    pub fn opposite(&self) -> Normal {
        self.map_faces(|face| face.opposite())
    }

    /// Maps every face in the set through `f`.
    pub fn map_faces(&self, mut f: impl FnMut(Face) -> Face) -> Normal {
        self.faces().fold(Self::EMPTY, |mut acc, face| {
            acc.insert(f(face));
            acc
        })
    }
}

impl From<Face> for Normal {
    #[inline]
    fn from(face: Face) -> Self {
        Self::from_face(face)
    }
}

impl BitOr for Normal {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Normal {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Normal {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
