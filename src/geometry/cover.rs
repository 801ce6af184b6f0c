use crate::{Face, Normal};

/// How much of one cube face a smoothed voxel still covers.
///
/// A voxel's solid depends on its smooth normal:
/// - no bits: the whole unit cube
/// - a wedge on faces `a` and `b`: the half of the cube away from the edge
///   between `a` and `b`, cut along the diagonal plane through that edge's
///   neighboring edges
/// - a corner on three faces: the tetrahedron at the cube corner facing away
///   from the corner's octant
///
/// Every face of such a solid is the full square, nothing, or the square minus
/// one corner triangle cut along the face diagonal.
///
/// ```text
///   Full       Half(Up | Right)   Empty
///   O----O     O---O              O    O
///   |    |     |    \
///   |    |     |     O
///   O----O     O-----O            O    O
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Cover {
    Empty,
    Full,
    /// Everything except the corner triangle toward this in-plane diagonal.
    Half(Normal),
}

impl Cover {
    /// The part of `face` covered by a voxel with smooth normal `normal`.
    pub fn of(normal: Normal, face: Face) -> Self {
        if normal.contains(face) {
            Self::Empty
        } else if normal.is_corner() && normal.contains(face.opposite()) {
            Self::Half(normal.without_axis(face.axis()))
        } else if normal.is_smoothed() && normal.on_axis(face.axis()).is_empty() {
            Self::Half(normal)
        } else {
            Self::Full
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::Empty
    }

    /// What is left of this cover after removing `across`, the cover of the
    /// same square by the voxel on its other side.
    ///
    /// Returns `None` when the two diagonals cross. The remainder is then a
    /// quarter of the square, which no lattice outline can describe.
    pub fn minus(self, across: Cover) -> Option<Cover> {
        match (self, across) {
            (Self::Empty, _) | (_, Self::Full) => Some(Self::Empty),
            (cover, Self::Empty) => Some(cover),
            (Self::Full, Self::Half(corner)) => Some(Self::Half(corner.opposite())),
            (Self::Half(a), Self::Half(b)) if a == b => Some(Self::Empty),
            (Self::Half(a), Self::Half(b)) if a == b.opposite() => Some(Self::Half(a)),
            (Self::Half(_), Self::Half(_)) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_of_a_wedge() {
        let wedge = Normal::UP | Normal::RIGHT;
        assert_eq!(Cover::of(wedge, Face::Up), Cover::Empty);
        assert_eq!(Cover::of(wedge, Face::Down), Cover::Full);
        assert_eq!(Cover::of(wedge, Face::Left), Cover::Full);
        assert_eq!(Cover::of(wedge, Face::Back), Cover::Half(wedge));
        assert_eq!(Cover::of(wedge, Face::Forward), Cover::Half(wedge));
        assert_eq!(Cover::of(Normal::EMPTY, Face::Up), Cover::Full);
        assert_eq!(Cover::of(Normal::FORWARD, Face::Back), Cover::Full);
        assert_eq!(Cover::of(Normal::FORWARD, Face::Forward), Cover::Empty);
    }

    #[test]
    fn covers_of_a_corner() {
        let corner = Normal::LEFT | Normal::DOWN | Normal::BACK;
        for face in corner.faces() {
            assert_eq!(Cover::of(corner, face), Cover::Empty);
        }
        assert_eq!(Cover::of(corner, Face::Forward), Cover::Half(Normal::LEFT | Normal::DOWN));
        assert_eq!(Cover::of(corner, Face::Right), Cover::Half(Normal::DOWN | Normal::BACK));
    }

    #[test]
    fn exposure_across_a_face() {
        let lower_left = Normal::LEFT | Normal::DOWN;
        let upper_right = Normal::RIGHT | Normal::UP;
        let half = Cover::Half(lower_left);

        assert_eq!(Cover::Full.minus(Cover::Empty), Some(Cover::Full));
        assert_eq!(Cover::Full.minus(Cover::Full), Some(Cover::Empty));
        assert_eq!(Cover::Full.minus(half), Some(Cover::Half(upper_right)));
        assert_eq!(half.minus(half), Some(Cover::Empty));
        assert_eq!(half.minus(Cover::Half(upper_right)), Some(half));
        assert_eq!(Cover::Empty.minus(half), Some(Cover::Empty));
        assert_eq!(half.minus(Cover::Half(Normal::LEFT | Normal::UP)), None);
    }
}
