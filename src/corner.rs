use crate::{Bucket, BucketKey, PolygonsData};

use ilattice::glam::{IVec3, Vec3};

/// The cut triangle of a cube corner, per octant.
///
/// Cube corners are labeled `x | y << 1 | z << 2` with each bit set on the
/// positive side of the cell. Each triangle connects the three corners adjacent
/// to the one facing away from the octant, which leaves the voxel only the
/// tetrahedron behind the triangle. It is wound counter-clockwise when seen
/// from the octant direction.
pub const CORNER_TRIANGLES: [[u8; 3]; 8] = [
    [1, 2, 4],
    [0, 5, 3],
    [3, 6, 0],
    [2, 1, 7],
    [5, 0, 6],
    [4, 7, 1],
    [7, 4, 2],
    [6, 3, 5],
];

#[inline]
fn corner_offset(label: u8) -> IVec3 {
    IVec3::new(
        (label & 1) as i32,
        ((label >> 1) & 1) as i32,
        ((label >> 2) & 1) as i32,
    )
}

/// One corner triangle per voxel of a corner bucket, in global coordinates.
///
/// Other buckets produce nothing.
pub fn corner_fan(bucket: &Bucket) -> PolygonsData {
    let mut data = PolygonsData::new();
    let BucketKey::Corner(octant) = bucket.key() else {
        return data;
    };

    let labels = CORNER_TRIANGLES[octant.index()];
    let normal = octant.signs().as_vec3().normalize();
    for (p, _) in bucket.iter() {
        let cell = bucket.origin() + p;
        let start = data.vertices.len() as u32;
        data.vertices
            .extend(labels.map(|label| (cell + corner_offset(label)).as_vec3()));
        data.normals.extend([normal; 3]);
        data.triangles.extend([start, start + 1, start + 2]);
    }
    data
}

/// Geometric normal of a triangle, not normalized.
pub(crate) fn triangle_normal([a, b, c]: [Vec3; 3]) -> Vec3 {
    (b - a).cross(c - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, partition, Octant, Voxel, VoxelSet};

    #[test]
    fn table_faces_its_octant() {
        for octant in Octant::ALL {
            let labels = CORNER_TRIANGLES[octant.index()];
            let tri = labels.map(|l| corner_offset(l).as_vec3());
            let signs = octant.signs().as_vec3();
            assert!(triangle_normal(tri).dot(signs) > 0.0, "{octant:?}");

            // The corner toward the octant is cut off.
            let near = (0..8)
                .find(|l| corner_offset(*l).as_vec3() * 2.0 - Vec3::ONE == signs)
                .unwrap();
            assert!(!labels.contains(&near));
        }
    }

    #[test]
    fn cube_corner_gets_one_triangle() {
        let voxels: VoxelSet = (0..8)
            .map(|i| (IVec3::new(i & 1, (i >> 1) & 1, i >> 2), Voxel::SMOOTH))
            .collect();
        let buckets = partition(&voxels, &classify(&voxels));
        let octant = Octant::ALL
            .into_iter()
            .find(|o| o.signs() == -IVec3::ONE)
            .unwrap();
        let bucket = buckets.get(BucketKey::Corner(octant)).unwrap();

        let fan = corner_fan(bucket);
        assert_eq!(fan.num_triangles(), 1);
        assert_eq!(fan.normals, vec![Vec3::splat(-1.0).normalize(); 3]);
        assert_eq!(
            fan.vertices,
            vec![Vec3::new(0.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 1.0)]
        );

        let face = buckets.get(BucketKey::Face(crate::Face::Up)).unwrap();
        assert!(corner_fan(face).is_empty());
    }
}
