use crate::{Axis, Face, Normal};

use core::ops::Neg;
use ilattice::glam::{IVec3, Vec3};

/// A diagonal surface between two faces on different axes, extruded along the
/// third axis.
///
/// There are 12 of these, one per edge of a cube.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Edge {
    /// Always on a lower axis than `b`.
    a: Face,
    b: Face,
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::ordered(Face::Right, Face::Up),
        Edge::ordered(Face::Right, Face::Down),
        Edge::ordered(Face::Left, Face::Up),
        Edge::ordered(Face::Left, Face::Down),
        Edge::ordered(Face::Right, Face::Forward),
        Edge::ordered(Face::Right, Face::Back),
        Edge::ordered(Face::Left, Face::Forward),
        Edge::ordered(Face::Left, Face::Back),
        Edge::ordered(Face::Up, Face::Forward),
        Edge::ordered(Face::Up, Face::Back),
        Edge::ordered(Face::Down, Face::Forward),
        Edge::ordered(Face::Down, Face::Back),
    ];

    const fn ordered(a: Face, b: Face) -> Self {
        Self { a, b }
    }

    /// Returns `None` if both faces lie on the same axis.
    pub fn new(a: Face, b: Face) -> Option<Self> {
        match a.axis().index().cmp(&b.axis().index()) {
            core::cmp::Ordering::Less => Some(Self { a, b }),
            core::cmp::Ordering::Greater => Some(Self { a: b, b: a }),
            core::cmp::Ordering::Equal => None,
        }
    }

    /// The edge described by a normal with exactly two faces on two axes.
    pub fn from_normal(normal: Normal) -> Option<Self> {
        let mut faces = normal.faces();
        match (faces.next(), faces.next(), faces.next()) {
            (Some(a), Some(b), None) => Self::new(a, b),
            _ => None,
        }
    }

    #[inline]
    pub fn faces(&self) -> [Face; 2] {
        [self.a, self.b]
    }

    /// The axis the diagonal surface runs along.
    #[inline]
    pub fn extrusion_axis(&self) -> Axis {
        self.a.axis().remaining(self.b.axis())
    }

    #[inline]
    pub fn normal(&self) -> Normal {
        Normal::from(self.a) | Normal::from(self.b)
    }

    /// Position in [`Edge::ALL`].
    pub fn index(&self) -> usize {
        let pair = match (self.a.axis(), self.b.axis()) {
            (Axis::X, Axis::Y) => 0,
            (Axis::X, Axis::Z) => 1,
            _ => 2,
        };
        let signs = 2 * (self.a.signum() < 0) as usize + (self.b.signum() < 0) as usize;
        4 * pair + signs
    }
}

/// One of the 8 octants, identified by the sign of each axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Octant(u8);

impl Octant {
    pub const ALL: [Octant; 8] = [
        Octant(0),
        Octant(1),
        Octant(2),
        Octant(3),
        Octant(4),
        Octant(5),
        Octant(6),
        Octant(7),
    ];

    /// Bit `i` of the index is set iff the octant is negative along axis `i`.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The octant of a normal with exactly one face on every axis.
    pub fn from_normal(normal: Normal) -> Option<Self> {
        let mut bits = 0;
        for axis in Axis::ALL {
            let on_axis = normal.on_axis(axis);
            let face = normal.face_on(axis)?;
            if on_axis != Normal::from(face) {
                return None;
            }
            if face.signum() < 0 {
                bits |= 1 << axis.index();
            }
        }
        Some(Self(bits))
    }

    #[inline]
    pub fn signs(&self) -> IVec3 {
        IVec3::new(
            if self.0 & 1 == 0 { 1 } else { -1 },
            if self.0 & 2 == 0 { 1 } else { -1 },
            if self.0 & 4 == 0 { 1 } else { -1 },
        )
    }

    #[inline]
    pub fn normal(&self) -> Normal {
        Normal::from_vector(self.signs())
    }
}

/// Identifies one of the 26 orientation-specific views of a voxel set: 6 cube
/// faces, 12 edges and 8 corners.
///
/// Each key owns a coordinate frame. Face and edge frames are arranged so that
/// the surfaces they collect lie in XY layers stacked along local Z, which is
/// what the contour tracer consumes. Corner frames are the identity.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BucketKey {
    Face(Face),
    Edge(Edge),
    Corner(Octant),
}

impl BucketKey {
    pub const COUNT: usize = 26;

    /// A dense index in `0..26`.
    pub fn index(&self) -> usize {
        match self {
            Self::Face(face) => face.index(),
            Self::Edge(edge) => 6 + edge.index(),
            Self::Corner(octant) => 18 + octant.index(),
        }
    }

    pub fn all() -> impl Iterator<Item = BucketKey> {
        Face::ALL
            .into_iter()
            .map(Self::Face)
            .chain(Edge::ALL.into_iter().map(Self::Edge))
            .chain(Octant::ALL.into_iter().map(Self::Corner))
    }

    /// The outward direction of surfaces in this bucket, as a face set.
    pub fn normal(&self) -> Normal {
        match self {
            Self::Face(face) => Normal::from(*face),
            Self::Edge(edge) => edge.normal(),
            Self::Corner(octant) => octant.normal(),
        }
    }

    /// The outward unit normal of surfaces in this bucket, in the global frame.
    pub fn outward_normal(&self) -> Vec3 {
        self.normal().to_vector().as_vec3().normalize()
    }

    /// Maps a global voxel cell into this bucket's frame.
    pub fn to_local_cell(&self, cell: IVec3) -> IVec3 {
        match self {
            Self::Face(face) => {
                // Negated axes shift the cell by one so it still covers [c, c + 1].
                let flips = IVec3::from(rotate_onto_back(*face, IVec3::ONE.to_array()));
                IVec3::from(rotate_onto_back(*face, cell.to_array())) + (flips - IVec3::ONE) / 2
            }
            Self::Edge(edge) => {
                let [a, b] = edge.faces();
                let (i, j, k) = (a.axis().index(), b.axis().index(), edge.extrusion_axis().index());
                let (sa, sb) = (a.signum(), b.signum());
                let layer = sa * cell[i]
                    + sb * cell[j]
                    + if sa < 0 { -1 } else { 0 }
                    + if sb > 0 { 1 } else { 0 };
                IVec3::new(cell[i], cell[k], layer)
            }
            Self::Corner(_) => cell,
        }
    }

    /// Maps a lattice point of this bucket's frame back into the global frame.
    ///
    /// Edge layers are the diagonal planes `sa * X_i + sb * X_j = layer`, so the
    /// inverse is affine rather than a pure rotation.
    pub fn to_global_point(&self, p: Vec3) -> Vec3 {
        match self {
            Self::Face(face) => Vec3::from(rotate_onto_back(inverse(*face), p.to_array())),
            Self::Edge(edge) => {
                let [a, b] = edge.faces();
                let (sa, sb) = (a.signum() as f32, b.signum() as f32);
                let (u, v, layer) = (p.x, p.y, p.z);
                let mut out = Vec3::ZERO;
                out[a.axis().index()] = u;
                out[edge.extrusion_axis().index()] = v;
                out[b.axis().index()] = sb * (layer - sa * u);
                out
            }
            Self::Corner(_) => p,
        }
    }

    /// Expresses a voxel's smooth normal in this bucket's frame.
    ///
    /// Edge entries are always fully smoothed, so they carry `Forward`. Corner
    /// buckets only record membership.
    pub fn to_local_normal(&self, normal: Normal) -> Normal {
        match self {
            Self::Face(face) => Normal::from_vector(IVec3::from(rotate_onto_back(
                *face,
                normal.to_vector().to_array(),
            ))),
            Self::Edge(_) => Normal::FORWARD,
            Self::Corner(_) => Normal::EMPTY,
        }
    }
}

/// The proper rotation taking `face`'s outward normal onto `Back` (-Z).
fn rotate_onto_back<T: Copy + Neg<Output = T>>(face: Face, [x, y, z]: [T; 3]) -> [T; 3] {
    match face {
        Face::Back => [x, y, z],
        Face::Forward => [-x, y, -z],
        Face::Left => [-z, y, x],
        Face::Right => [z, y, -x],
        Face::Down => [x, -z, y],
        Face::Up => [x, z, -y],
    }
}

/// The face whose rotation undoes the rotation of `face`.
fn inverse(face: Face) -> Face {
    match face {
        Face::Left => Face::Right,
        Face::Right => Face::Left,
        Face::Up => Face::Down,
        Face::Down => Face::Up,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_densely_indexed() {
        let mut seen = [false; BucketKey::COUNT];
        for key in BucketKey::all() {
            assert!(!seen[key.index()], "duplicate index for {key:?}");
            seen[key.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn face_frames_send_normal_to_back() {
        for face in Face::ALL {
            let key = BucketKey::Face(face);
            assert_eq!(key.to_local_normal(Normal::from(face)), Normal::BACK);
            let back = Vec3::new(0.0, 0.0, -1.0);
            assert_eq!(key.to_global_point(back), face.get_unit_vector().as_vec3());
        }
    }

    #[test]
    fn face_frames_round_trip_cell_corners() {
        let cell = IVec3::new(3, -2, 5);
        for face in Face::ALL {
            let key = BucketKey::Face(face);
            let local = key.to_local_cell(cell);
            // The local cell spans the same unit cube as the global one.
            let lo = key.to_global_point(local.as_vec3());
            let hi = key.to_global_point((local + IVec3::ONE).as_vec3());
            assert_eq!(lo.min(hi), cell.as_vec3(), "{face:?}");
            assert_eq!(lo.max(hi), (cell + IVec3::ONE).as_vec3(), "{face:?}");
        }
    }

    #[test]
    fn edge_layer_holds_the_diagonal() {
        let key = BucketKey::Edge(Edge::new(Face::Right, Face::Up).unwrap());
        let local = key.to_local_cell(IVec3::new(1, 1, 0));
        assert_eq!(local, IVec3::new(1, 0, 3));
        let start = key.to_global_point(local.as_vec3());
        let end = key.to_global_point((local + IVec3::X).as_vec3());
        assert_eq!(start, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(end, Vec3::new(2.0, 1.0, 0.0));

        let key = BucketKey::Edge(Edge::new(Face::Down, Face::Left).unwrap());
        let local = key.to_local_cell(IVec3::ZERO);
        assert_eq!(local.z, -1);
        assert_eq!(key.to_global_point(local.as_vec3()), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(
            key.to_global_point((local + IVec3::X).as_vec3()),
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn edges_and_octants_from_normals() {
        assert_eq!(Edge::from_normal(Normal::UP | Normal::BACK).map(|e| e.index()), Some(9));
        assert_eq!(Edge::from_normal(Normal::UP | Normal::DOWN), None);
        assert_eq!(Edge::from_normal(Normal::UP), None);
        for (i, edge) in Edge::ALL.iter().enumerate() {
            assert_eq!(edge.index(), i);
        }

        let octant = Octant::from_normal(Normal::LEFT | Normal::UP | Normal::BACK).unwrap();
        assert_eq!(octant.signs(), IVec3::new(-1, 1, -1));
        assert_eq!(Octant::from_normal(Normal::LEFT | Normal::UP), None);
    }
}
