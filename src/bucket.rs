use crate::{BucketKey, Edge, Face, Normal, Octant, SmoothNormals, VoxelSet};

use core::fmt;
use ilattice::glam::{IVec3, UVec3};
use ndshape::{RuntimeShape, Shape};

/// The voxels of one [`BucketKey`], in that key's frame.
///
/// Cells are stored densely over the bucket's bounding box. Coordinates passed
/// to [`Bucket::get`] are relative to [`Bucket::origin`], so the box always
/// starts at zero.
#[derive(Clone)]
pub struct Bucket {
    key: BucketKey,
    origin: IVec3,
    shape: RuntimeShape<u32, 3>,
    cells: Vec<Option<Normal>>,
    len: usize,
}

impl Bucket {
    fn from_entries(key: BucketKey, entries: &[(IVec3, Normal)]) -> Option<Self> {
        let (first, _) = entries.first()?;
        let (min, max) = entries
            .iter()
            .fold((*first, *first), |(min, max), (p, _)| (min.min(*p), max.max(*p)));
        let size = (max - min + IVec3::ONE).as_uvec3();
        let shape = RuntimeShape::<u32, 3>::new(size.to_array());
        let mut cells = vec![None; shape.usize()];
        for (p, normal) in entries {
            let local = (*p - min).as_uvec3();
            cells[shape.linearize(local.to_array()) as usize] = Some(*normal);
        }
        Some(Self {
            key,
            origin: min,
            shape,
            cells,
            len: entries.len(),
        })
    }

    #[inline]
    pub fn key(&self) -> BucketKey {
        self.key
    }

    /// The minimum local cell, which [`Bucket::get`] calls zero.
    #[inline]
    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    /// Extent of the bounding box in cells.
    #[inline]
    pub fn size(&self) -> UVec3 {
        UVec3::from(self.shape.as_array())
    }

    /// Number of occupied cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The local smooth normal of the cell at `p`, or `None` if `p` is empty or
    /// outside the bounding box.
    #[inline]
    pub fn get(&self, p: IVec3) -> Option<Normal> {
        let size = self.size().as_ivec3();
        if p.cmplt(IVec3::ZERO).any() || p.cmpge(size).any() {
            return None;
        }
        self.cells[self.shape.linearize(p.as_uvec3().to_array()) as usize]
    }

    #[inline]
    pub fn contains(&self, p: IVec3) -> bool {
        self.get(p).is_some()
    }

    /// All occupied cells in linear order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, Normal)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            let normal = (*cell)?;
            let p = UVec3::from(self.shape.delinearize(i as u32)).as_ivec3();
            Some((p, normal))
        })
    }
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("key", &self.key)
            .field("origin", &self.origin)
            .field("size", &self.size())
            .field("len", &self.len)
            .finish()
    }
}

/// All non-empty buckets of a voxel set, one slot per [`BucketKey`].
#[derive(Clone, Debug)]
pub struct Buckets {
    slots: Vec<Option<Bucket>>,
}

impl Buckets {
    pub fn get(&self, key: BucketKey) -> Option<&Bucket> {
        self.slots[key.index()].as_ref()
    }

    /// Non-empty buckets: faces, then edges, then corners.
    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.slots.iter().flatten()
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Sorts every voxel into the buckets it contributes surfaces to.
///
/// - every voxel enters all 6 face buckets, with its smooth normal rotated
///   into the face's frame
/// - a voxel whose smooth normal is a two-axis wedge also enters that edge's
///   bucket
/// - a voxel whose smooth normal is a three-axis corner also enters that
///   octant's corner bucket
pub fn partition(voxels: &VoxelSet, normals: &SmoothNormals) -> Buckets {
    let mut entries: Vec<Vec<(IVec3, Normal)>> = vec![Vec::new(); BucketKey::COUNT];
    let mut push = |key: BucketKey, cell: IVec3, normal: Normal| {
        entries[key.index()].push((key.to_local_cell(cell), key.to_local_normal(normal)));
    };

    for (p, _) in voxels.iter() {
        let smooth = normals.get(p);

        for face in Face::ALL {
            push(BucketKey::Face(face), p, smooth.refined);
        }

        if smooth.refined.axis_count() == 2 {
            if let Some(edge) = Edge::from_normal(smooth.refined) {
                push(BucketKey::Edge(edge), p, smooth.refined);
            }
        }

        if smooth.refined.is_corner() {
            match Octant::from_normal(smooth.refined) {
                Some(octant) => push(BucketKey::Corner(octant), p, smooth.refined),
                None => log::warn!(
                    "voxel {p} has an unclassifiable corner pattern {:#08b}; skipping its corner",
                    smooth.refined.bits()
                ),
            }
        }
    }

    let slots = BucketKey::all()
        .map(|key| Bucket::from_entries(key, &entries[key.index()]))
        .collect();
    Buckets { slots }
}
