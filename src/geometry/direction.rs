use crate::Face;

use ilattice::glam::IVec2;

/// A planar walking direction on the contour lattice (+X right, +Y up).
///
/// When used as the `from`/`to` of a lattice vertex, a direction names the
/// *side* of the vertex a boundary enters from or leaves toward.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[inline]
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// One lattice step in this direction.
    #[inline]
    pub fn offset(&self) -> IVec2 {
        match self {
            Self::Up => IVec2::Y,
            Self::Right => IVec2::X,
            Self::Down => -IVec2::Y,
            Self::Left => -IVec2::X,
        }
    }

    /// The in-plane cube face pointing the same way.
    #[inline]
    pub fn face(&self) -> Face {
        match self {
            Self::Up => Face::Up,
            Self::Right => Face::Right,
            Self::Down => Face::Down,
            Self::Left => Face::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_offsets_cancel() {
        for dir in Direction::ALL {
            assert_eq!(dir.offset() + dir.opposite().offset(), IVec2::ZERO);
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(
                dir.face().get_unit_vector().truncate(),
                dir.offset(),
            );
        }
    }
}
