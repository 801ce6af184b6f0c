use crate::{Bucket, Cover, Direction, Face, Normal};

use core::fmt;
use ilattice::glam::{IVec2, IVec3, UVec2};
use ndshape::{RuntimeShape, Shape};

/// What each cell of one bucket layer shows toward the viewer.
///
/// The viewer looks at the cell's `Back` face. What shows is the part of that
/// face the cell's own solid covers, minus the part the cell at `z - 1` covers
/// from the other side. A cell with anything showing is a wall.
#[derive(Clone)]
pub struct LayerMask {
    z: i32,
    shape: RuntimeShape<u32, 2>,
    exposed: Vec<Cover>,
}

impl LayerMask {
    pub fn new(bucket: &Bucket, z: i32) -> Self {
        let size = bucket.size();
        let shape = RuntimeShape::<u32, 2>::new([size.x, size.y]);
        let exposed = (0..shape.size())
            .map(|i| {
                let [x, y] = shape.delinearize(i);
                exposure(bucket, IVec3::new(x as i32, y as i32, z))
            })
            .collect();
        Self { z, shape, exposed }
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        UVec2::from(self.shape.as_array())
    }

    /// Cells outside the layer show nothing.
    #[inline]
    pub fn exposure(&self, cell: IVec2) -> Cover {
        let size = self.size().as_ivec2();
        if cell.cmplt(IVec2::ZERO).any() || cell.cmpge(size).any() {
            return Cover::Empty;
        }
        self.exposed[self.shape.linearize(cell.as_uvec2().to_array()) as usize]
    }

    #[inline]
    pub fn is_wall(&self, cell: IVec2) -> bool {
        !self.exposure(cell).is_empty()
    }

    pub fn num_walls(&self) -> usize {
        self.exposed.iter().filter(|c| !c.is_empty()).count()
    }
}

impl fmt::Debug for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerMask")
            .field("z", &self.z)
            .field("size", &self.size())
            .field("num_walls", &self.num_walls())
            .finish()
    }
}

fn exposure(bucket: &Bucket, cell: IVec3) -> Cover {
    let Some(normal) = bucket.get(cell) else {
        return Cover::Empty;
    };
    let front = Cover::of(normal, Face::Back);
    let across = bucket
        .get(cell - IVec3::Z)
        .map_or(Cover::Empty, |behind| Cover::of(behind, Face::Forward));
    // Crossing diagonals never survive `classify`.
    front.minus(across).unwrap_or(front)
}

/// How a boundary crosses a lattice point: it enters from side `from` and
/// leaves toward side `to`, keeping the walls on its left.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Passage {
    pub from: Direction,
    pub to: Direction,
    /// Replace the corner with a diagonal across the cell it belongs to.
    pub should_smooth: bool,
}

impl Passage {
    const fn new(from: Direction, to: Direction) -> Self {
        Self {
            from,
            to,
            should_smooth: false,
        }
    }

    /// Straight through, no corner to emit.
    #[inline]
    pub fn is_flat(&self) -> bool {
        self.from.opposite() == self.to
    }

    /// Appends the outline points this passage contributes at `at`.
    pub fn emit(&self, at: IVec2, out: &mut Vec<IVec2>) {
        if self.is_flat() {
            return;
        }
        if self.should_smooth {
            push_distinct(out, at + self.from.offset());
            push_distinct(out, at + self.to.offset());
        } else {
            push_distinct(out, at);
        }
    }
}

fn push_distinct(out: &mut Vec<IVec2>, p: IVec2) {
    if out.last() != Some(&p) {
        out.push(p);
    }
}

/// A lattice point that lies on some contour.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LatticeVertex {
    Single(Passage),
    /// Two walls touching only at this point, diagonally. Each passage turns
    /// around one of them, so the two contours stay apart.
    Pinch([Passage; 2]),
}

impl LatticeVertex {
    pub fn passages(&self) -> &[Passage] {
        match self {
            Self::Single(passage) => core::slice::from_ref(passage),
            Self::Pinch(passages) => passages,
        }
    }

    /// The passage a walker arriving from `arrival` must take.
    pub fn passage_from(&self, arrival: Direction) -> Option<Passage> {
        self.passages().iter().copied().find(|p| p.from == arrival)
    }
}

// Quadrant bits around a lattice point (x, y).
const BL: u8 = 0b0001;
const BR: u8 = 0b0010;
const TL: u8 = 0b0100;
const TR: u8 = 0b1000;

/// Classifies lattice point `p` of a layer from its four surrounding cells.
pub fn classify_point(mask: &LayerMask, p: IVec2) -> Option<LatticeVertex> {
    use Direction::*;

    let quadrant = |bit: u8| -> IVec2 {
        match bit {
            BL => p - IVec2::ONE,
            BR => p - IVec2::Y,
            TL => p - IVec2::X,
            _ => p,
        }
    };
    let bits = [BL, BR, TL, TR]
        .into_iter()
        .filter(|bit| mask.is_wall(quadrant(*bit)))
        .fold(0, |acc, bit| acc | bit);

    let outer = |from: Direction, to: Direction, bit: u8| -> Passage {
        Passage {
            should_smooth: should_smooth(mask.exposure(quadrant(bit)), from, to),
            ..Passage::new(from, to)
        }
    };

    let vertex = match bits {
        TR => LatticeVertex::Single(outer(Up, Right, TR)),
        TL => LatticeVertex::Single(outer(Left, Up, TL)),
        BL => LatticeVertex::Single(outer(Down, Left, BL)),
        BR => LatticeVertex::Single(outer(Right, Down, BR)),
        0b0111 => LatticeVertex::Single(Passage::new(Right, Up)),
        0b1011 => LatticeVertex::Single(Passage::new(Up, Left)),
        0b1110 => LatticeVertex::Single(Passage::new(Left, Down)),
        0b1101 => LatticeVertex::Single(Passage::new(Down, Right)),
        0b0011 => LatticeVertex::Single(Passage::new(Right, Left)),
        0b1100 => LatticeVertex::Single(Passage::new(Left, Right)),
        0b0101 => LatticeVertex::Single(Passage::new(Down, Up)),
        0b1010 => LatticeVertex::Single(Passage::new(Up, Down)),
        0b1001 => LatticeVertex::Pinch([outer(Up, Right, TR), outer(Down, Left, BL)]),
        0b0110 => LatticeVertex::Pinch([outer(Right, Down, BR), outer(Left, Up, TL)]),
        _ => return None,
    };
    Some(vertex)
}

/// An outer corner is cut when its cell shows everything but the triangle at
/// that corner.
fn should_smooth(exposure: Cover, from: Direction, to: Direction) -> bool {
    let toward_corner = Normal::from(from.opposite().face()) | Normal::from(to.opposite().face());
    exposure == Cover::Half(toward_corner)
}

/// Every classified lattice point of one layer, with per-side visit marks.
pub struct Lattice {
    shape: RuntimeShape<u32, 2>,
    vertices: Vec<Option<LatticeVertex>>,
    visited: Vec<u8>,
}

impl Lattice {
    pub fn new(mask: &LayerMask) -> Self {
        let size = mask.size() + UVec2::ONE;
        let shape = RuntimeShape::<u32, 2>::new(size.to_array());
        let vertices = (0..shape.size())
            .map(|i| classify_point(mask, UVec2::from(shape.delinearize(i)).as_ivec2()))
            .collect();
        let visited = vec![0; shape.usize()];
        Self {
            shape,
            vertices,
            visited,
        }
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.vertices.len()
    }

    fn index(&self, p: IVec2) -> Option<usize> {
        let size = UVec2::from(self.shape.as_array()).as_ivec2();
        if p.cmplt(IVec2::ZERO).any() || p.cmpge(size).any() {
            return None;
        }
        Some(self.shape.linearize(p.as_uvec2().to_array()) as usize)
    }

    #[inline]
    pub fn get(&self, p: IVec2) -> Option<LatticeVertex> {
        self.index(p).and_then(|i| self.vertices[i])
    }

    pub fn mark_visited(&mut self, p: IVec2, arrival: Direction) {
        if let Some(i) = self.index(p) {
            self.visited[i] |= 1 << arrival.index();
        }
    }

    pub fn is_visited(&self, p: IVec2, arrival: Direction) -> bool {
        self.index(p)
            .map_or(false, |i| self.visited[i] & (1 << arrival.index()) != 0)
    }

    /// Candidate walk starts: every corner in lattice order, then the
    /// passages of pinch points for contours that have no other corner.
    pub fn starts(&self) -> Vec<(IVec2, Direction)> {
        let point = |i: usize| UVec2::from(self.shape.delinearize(i as u32)).as_ivec2();
        let corners = self.vertices.iter().enumerate().filter_map(|(i, v)| match v {
            Some(LatticeVertex::Single(passage)) if !passage.is_flat() => {
                Some((point(i), passage.from))
            }
            _ => None,
        });
        let pinches = self.vertices.iter().enumerate().flat_map(|(i, v)| {
            let passages = match v {
                Some(LatticeVertex::Pinch(passages)) => passages.to_vec(),
                _ => Vec::new(),
            };
            passages.into_iter().map(move |passage| (point(i), passage.from))
        });
        corners.chain(pinches).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, partition, BucketKey, Voxel, VoxelSet};

    fn back_bucket(points: &[[i32; 3]], smooth: bool) -> Bucket {
        let voxels: VoxelSet = points
            .iter()
            .map(|p| (IVec3::from(*p), Voxel { smooth }))
            .collect();
        let buckets = partition(&voxels, &classify(&voxels));
        buckets.get(BucketKey::Face(Face::Back)).unwrap().clone()
    }

    #[test]
    fn hidden_cells_show_no_wall() {
        let bucket = back_bucket(&[[0, 0, 0], [0, 0, 1], [1, 0, 1]], false);
        let front = LayerMask::new(&bucket, 0);
        assert!(front.is_wall(IVec2::ZERO));
        assert!(!front.is_wall(IVec2::X));

        let back = LayerMask::new(&bucket, 1);
        assert!(!back.is_wall(IVec2::ZERO));
        assert!(back.is_wall(IVec2::X));
        assert_eq!(back.num_walls(), 1);
        assert!(!back.is_wall(-IVec2::ONE));
    }

    #[test]
    fn matching_cuts_hide_each_other() {
        // Every voxel of a smooth 2x2x2 cube is a corner. Between the two
        // layers their cut faces line up exactly, and the outer faces are cut
        // away, so nothing shows.
        let cube: Vec<[i32; 3]> = (0..8).map(|i| [i & 1, (i >> 1) & 1, i >> 2]).collect();
        let bucket = back_bucket(&cube, true);
        for z in 0..2 {
            assert_eq!(LayerMask::new(&bucket, z).num_walls(), 0);
        }
    }

    #[test]
    fn lone_cell_has_four_outer_corners() {
        let bucket = back_bucket(&[[0, 0, 0]], true);
        let mask = LayerMask::new(&bucket, 0);
        let at = |x, y| classify_point(&mask, IVec2::new(x, y));
        assert_eq!(at(0, 0), Some(LatticeVertex::Single(Passage::new(Direction::Up, Direction::Right))));
        assert_eq!(at(1, 0), Some(LatticeVertex::Single(Passage::new(Direction::Left, Direction::Up))));
        assert_eq!(at(1, 1), Some(LatticeVertex::Single(Passage::new(Direction::Down, Direction::Left))));
        assert_eq!(at(0, 1), Some(LatticeVertex::Single(Passage::new(Direction::Right, Direction::Down))));
        assert_eq!(at(2, 2), None);
    }

    #[test]
    fn wedge_corner_is_smoothed() {
        let bucket = back_bucket(
            &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [0, 1, 0], [1, 1, 0], [0, 2, 0]],
            true,
        );
        let mask = LayerMask::new(&bucket, 0);
        let corner = classify_point(&mask, IVec2::new(2, 2)).unwrap();
        assert!(corner.passages()[0].should_smooth);

        // The inner corner next to it never is.
        let inner = classify_point(&mask, IVec2::new(2, 1)).unwrap();
        assert_eq!(inner, LatticeVertex::Single(Passage::new(Direction::Right, Direction::Up)));

        // Plain corners are left alone.
        let plain = classify_point(&mask, IVec2::new(3, 0)).unwrap();
        assert!(!plain.passages()[0].should_smooth);
    }

    #[test]
    fn cut_neighbor_exposes_a_triangle() {
        // Two layers deep, the front corner voxel at (1, 1) keeps its cut while
        // the one behind it is plain. The back voxel's face then shows the
        // triangle the corner leaves uncovered.
        let stair = [[0, 0], [1, 0], [2, 0], [0, 1], [1, 1], [0, 2]];
        let points: Vec<[i32; 3]> = (0..2)
            .flat_map(|z| stair.map(|[x, y]| [x, y, z]))
            .collect();
        let bucket = back_bucket(&points, true);
        let mask = LayerMask::new(&bucket, 1);
        assert_eq!(mask.exposure(IVec2::ONE), Cover::Half(Normal::LEFT | Normal::DOWN));
        assert_eq!(mask.num_walls(), 1);

        let corner = classify_point(&mask, IVec2::ONE).unwrap();
        assert!(corner.passages()[0].should_smooth);
        assert!(!classify_point(&mask, IVec2::new(2, 2)).unwrap().passages()[0].should_smooth);
    }

    #[test]
    fn diagonal_cells_make_a_pinch() {
        let bucket = back_bucket(&[[0, 0, 0], [1, 1, 0]], false);
        let mask = LayerMask::new(&bucket, 0);
        let pinch = classify_point(&mask, IVec2::ONE).unwrap();
        assert!(matches!(pinch, LatticeVertex::Pinch(_)));
        assert_eq!(pinch.passage_from(Direction::Down).map(|p| p.to), Some(Direction::Left));
        assert_eq!(pinch.passage_from(Direction::Up).map(|p| p.to), Some(Direction::Right));
        assert_eq!(pinch.passage_from(Direction::Left), None);
    }

    #[test]
    fn smoothed_passage_emits_the_chamfer() {
        let passage = Passage {
            should_smooth: true,
            ..Passage::new(Direction::Down, Direction::Left)
        };
        let mut out = vec![IVec2::new(2, 1)];
        passage.emit(IVec2::new(2, 2), &mut out);
        assert_eq!(out, vec![IVec2::new(2, 1), IVec2::new(1, 2)]);

        Passage::new(Direction::Left, Direction::Right).emit(IVec2::ZERO, &mut out);
        assert_eq!(out.len(), 2);
    }
}
