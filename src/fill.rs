use crate::{Face, Voxel, VoxelSet};

use ilattice::glam::{IVec3, UVec3};
use ndshape::{RuntimeShape, Shape};
use std::collections::VecDeque;

/// Fills every empty cell that cannot be reached from outside the voxel set.
///
/// The flood starts in a one-cell margin around the occupied bounding box and
/// moves through empty cells across faces. Whatever empty space it cannot reach
/// is enclosed and becomes solid (non-smooth) voxels. Returns the number of
/// voxels added.
pub fn fill_empty_spaces(voxels: &mut VoxelSet) -> usize {
    let Some(extent) = voxels.extent() else {
        return 0;
    };
    let padded = extent.padded(1);
    let shape = RuntimeShape::<u32, 3>::new(padded.shape.as_uvec3().to_array());
    let index = |p: IVec3| shape.linearize((p - padded.minimum).as_uvec3().to_array()) as usize;

    let mut outside = vec![false; shape.usize()];
    let mut queue = VecDeque::new();
    outside[index(padded.minimum)] = true;
    queue.push_back(padded.minimum);
    while let Some(p) = queue.pop_front() {
        for face in Face::ALL {
            let q = p + face.get_unit_vector();
            if !padded.contains(q) || voxels.contains(q) {
                continue;
            }
            let i = index(q);
            if !outside[i] {
                outside[i] = true;
                queue.push_back(q);
            }
        }
    }

    let enclosed: Vec<IVec3> = (0..shape.size())
        .filter(|i| !outside[*i as usize])
        .map(|i| padded.minimum + UVec3::from(shape.delinearize(i)).as_ivec3())
        .filter(|p| !voxels.contains(*p))
        .collect();
    let added = enclosed.len();
    voxels.extend(enclosed.into_iter().map(|p| (p, Voxel::SOLID)));
    log::debug!("filled {added} enclosed cells");
    added
}
