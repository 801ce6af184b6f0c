use ilattice::glam::IVec3;

/// Either the X, Y, or Z axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The index for a point's component on this axis.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[inline]
    pub const fn get_unit_vector(&self) -> IVec3 {
        match self {
            Axis::X => IVec3::X,
            Axis::Y => IVec3::Y,
            Axis::Z => IVec3::Z,
        }
    }

    /// The axis that is neither `self` nor `other`. Both must differ.
    #[inline]
    pub fn remaining(&self, other: Axis) -> Axis {
        debug_assert_ne!(*self, other);
        match 3 - self.index() - other.index() {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }
}

/// One of the six outward directions of a unit cube.
///
/// ```text
///        Up (+Y)
///         |  Forward (+Z)
///         | /
/// Left ---O--- Right (+X)
///  (-X)  /|
///       / |
///   Back  Down (-Y)
///   (-Z)
/// ```
///
/// Contours are always traced on the `Back` face; every other face is first
/// rotated onto it (see [`BucketKey`](crate::BucketKey)).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Face {
    Up = 0,
    Down = 1,
    Forward = 2,
    Back = 3,
    Left = 4,
    Right = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::Forward,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    #[inline]
    pub fn new(sign: i32, axis: Axis) -> Self {
        debug_assert!(sign != 0);

        match (sign > 0, axis) {
            (false, Axis::X) => Self::Left,
            (false, Axis::Y) => Self::Down,
            (false, Axis::Z) => Self::Back,
            (true, Axis::X) => Self::Right,
            (true, Axis::Y) => Self::Up,
            (true, Axis::Z) => Self::Forward,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::X,
            Self::Down | Self::Up => Axis::Y,
            Self::Back | Self::Forward => Axis::Z,
        }
    }

    #[inline]
    pub fn signum(&self) -> i32 {
        match self {
            Self::Left | Self::Down | Self::Back => -1,
            Self::Right | Self::Up | Self::Forward => 1,
        }
    }

    #[inline]
    pub fn opposite(&self) -> Self {
        Self::new(-self.signum(), self.axis())
    }

    #[inline]
    pub fn get_unit_vector(&self) -> IVec3 {
        self.axis().get_unit_vector() * self.signum()
    }

    #[inline]
    pub fn from_vector(v: IVec3) -> Option<Self> {
        match v.to_array() {
            [x, 0, 0] if x != 0 => Some(Face::new(x, Axis::X)),
            [0, y, 0] if y != 0 => Some(Face::new(y, Axis::Y)),
            [0, 0, z] if z != 0 => Some(Face::new(z, Axis::Z)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_vectors_round_trip() {
        for face in Face::ALL {
            assert_eq!(Face::from_vector(face.get_unit_vector()), Some(face));
            assert_eq!(face.opposite().get_unit_vector(), -face.get_unit_vector());
        }
        assert_eq!(Face::from_vector(IVec3::new(1, 1, 0)), None);
        assert_eq!(Face::from_vector(IVec3::ZERO), None);
    }

    #[test]
    fn face_follows_sign_of_any_magnitude() {
        assert_eq!(Face::new(3, Axis::X), Face::Right);
        assert_eq!(Face::new(-7, Axis::Y), Face::Down);
        assert_eq!(Face::new(1, Axis::Z), Face::Forward);
        for face in Face::ALL {
            assert_eq!(Face::new(face.signum(), face.axis()), face);
        }
    }

    #[test]
    fn remaining_axis() {
        assert_eq!(Axis::X.remaining(Axis::Y), Axis::Z);
        assert_eq!(Axis::Z.remaining(Axis::X), Axis::Y);
        assert_eq!(Axis::Y.remaining(Axis::Z), Axis::X);
    }
}
