use crate::corner::triangle_normal;
use crate::{
    build_polygon, classify, corner_fan, partition, trace_layer, Aabb, Bucket, BucketKey,
    ConstrainedDelaunay, MeshError, MeshParams, PolygonsData, Triangulator, VoxelSet,
};

use ilattice::glam::{IVec3, Vec3};
use std::collections::{HashMap, HashSet};

/// A UV-mapped triangle mesh, ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<[f32; 3]>,
    /// Parallel to `vertices`.
    pub normals: Vec<[f32; 3]>,
    /// Parallel to `vertices`.
    pub uvs: Vec<[f32; 2]>,
    /// Counter-clockwise, seen from outside.
    pub triangles: Vec<u32>,
    pub bounds: Aabb,
}

impl Mesh {
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Replaces the normals with area-weighted averages of the adjacent
    /// triangle normals.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.triangles.chunks_exact(3) {
            let corners = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(self.vertices[i as usize]));
            let n = triangle_normal(corners);
            for i in tri {
                normals[*i as usize] += n;
            }
        }
        self.normals = normals
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
    }
}

/// Meshes `voxels` with the default triangulator.
///
/// Failures are logged and reported as `None`.
pub fn generate_mesh(voxels: &VoxelSet, params: &MeshParams) -> Option<Mesh> {
    match try_generate_mesh(voxels, params, &ConstrainedDelaunay) {
        Ok(mesh) => Some(mesh),
        Err(e) => {
            log::error!("failed to generate sprite mesh: {e}");
            None
        }
    }
}

pub fn try_generate_mesh(
    voxels: &VoxelSet,
    params: &MeshParams,
    triangulator: &impl Triangulator,
) -> Result<Mesh, MeshError> {
    params.validate()?;

    let normals = classify(voxels);
    let buckets = partition(voxels, &normals);
    log::debug!(
        "meshing {} voxels in {} buckets",
        voxels.len(),
        buckets.len()
    );

    let mut data = PolygonsData::new();
    for bucket in buckets.iter() {
        let polygons = mesh_bucket(bucket, triangulator)?;
        log::debug!(
            "{:?}: {} voxels, {} triangles",
            bucket.key(),
            bucket.len(),
            polygons.num_triangles()
        );
        data.append(polygons);
    }

    let splits = split_t_junctions(&mut data);
    if splits > 0 {
        log::debug!("split {splits} triangles where bucket outlines meet");
    }

    if params.optimize_normals {
        data = weld(data);
    }
    let mesh = finish(data, params);
    log::debug!(
        "sprite mesh has {} vertices and {} triangles",
        mesh.vertices.len(),
        mesh.num_triangles()
    );
    Ok(mesh)
}

/// The triangles of one bucket in global lattice coordinates, facing the
/// bucket's direction.
fn mesh_bucket(
    bucket: &Bucket,
    triangulator: &impl Triangulator,
) -> Result<PolygonsData, MeshError> {
    let key = bucket.key();
    let mut data = match key {
        BucketKey::Corner(_) => corner_fan(bucket),
        BucketKey::Face(_) | BucketKey::Edge(_) => {
            let mut data = PolygonsData::new();
            let origin = bucket.origin().as_vec3();
            for z in 0..bucket.size().z as i32 {
                let layer = trace_layer(bucket, z);
                let Some(polygon) = build_polygon(&layer) else {
                    continue;
                };
                let triangulation = triangulator.triangulate(&polygon)?;
                data.append(PolygonsData {
                    vertices: triangulation
                        .vertices
                        .iter()
                        .map(|p| key.to_global_point(p.extend(z as f32) + origin))
                        .collect(),
                    normals: Vec::new(),
                    triangles: triangulation.triangles,
                });
            }
            data
        }
    };

    let normal = key.outward_normal();
    data.orient_towards(normal);
    data.fill_normals(normal);
    Ok(data)
}

/// Splits every triangle edge that runs past a vertex on the other side of a
/// seam.
///
/// Layers are outlined independently, so a long straight edge in one bucket
/// can pass a lattice point where the surface across the seam has a corner.
/// Each such edge is split at the first vertex it passes until every edge is
/// matched by a reverse edge or passes no vertex. Returns the number of splits.
fn split_t_junctions(data: &mut PolygonsData) -> usize {
    let lattice = |v: Vec3| v.round().as_ivec3();
    let points: HashSet<IVec3> = data.vertices.iter().map(|v| lattice(*v)).collect();

    let mut splits = 0;
    loop {
        let edges: HashSet<(IVec3, IVec3)> = data
            .triangles
            .chunks_exact(3)
            .flat_map(|tri| (0..3).map(move |k| (tri[k], tri[(k + 1) % 3])))
            .map(|(a, b)| (lattice(data.vertices[a as usize]), lattice(data.vertices[b as usize])))
            .collect();

        let mut triangles = Vec::with_capacity(data.triangles.len());
        let mut changed = false;
        for t in 0..data.num_triangles() {
            let tri = [data.triangles[3 * t], data.triangles[3 * t + 1], data.triangles[3 * t + 2]];
            let corners = tri.map(|i| lattice(data.vertices[i as usize]));
            let split = (0..3).find_map(|k| {
                let (a, b) = (corners[k], corners[(k + 1) % 3]);
                if edges.contains(&(b, a)) {
                    return None;
                }
                first_point_between(a, b, &points).map(|m| (k, m))
            });
            let Some((k, m)) = split else {
                triangles.extend(tri);
                continue;
            };

            let mid = data.vertices.len() as u32;
            data.vertices.push(m.as_vec3());
            if data.has_normals() {
                let normal = data.normals[tri[k] as usize];
                data.normals.push(normal);
            }
            let [a, b, c] = [tri[k], tri[(k + 1) % 3], tri[(k + 2) % 3]];
            triangles.extend([a, mid, c, mid, b, c]);
            changed = true;
            splits += 1;
        }
        data.triangles = triangles;

        if !changed {
            return splits;
        }
    }
}

/// The point of `points` strictly between lattice points `a` and `b` that is
/// closest to `a`.
fn first_point_between(a: IVec3, b: IVec3, points: &HashSet<IVec3>) -> Option<IVec3> {
    let d = b - a;
    let steps = gcd(gcd(d.x.abs(), d.y.abs()), d.z.abs());
    (1..steps).map(|s| a + d / steps * s).find(|m| points.contains(m))
}

fn gcd(a: i32, b: i32) -> i32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Merges vertices at the same lattice point and drops triangles that
/// collapse. Every vertex gets the same placeholder normal.
fn weld(data: PolygonsData) -> PolygonsData {
    let mut welded = PolygonsData::new();
    let mut index: HashMap<IVec3, u32> = HashMap::new();
    let remap: Vec<u32> = data
        .vertices
        .iter()
        .map(|v| {
            let key = v.round().as_ivec3();
            *index.entry(key).or_insert_with(|| {
                welded.vertices.push(key.as_vec3());
                welded.vertices.len() as u32 - 1
            })
        })
        .collect();

    for tri in data.triangles.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| remap[i as usize]);
        if a == b || b == c || a == c {
            continue;
        }
        welded.triangles.extend([a, b, c]);
    }
    welded.fill_normals(Vec3::NEG_Z);
    welded
}

fn finish(data: PolygonsData, params: &MeshParams) -> Mesh {
    let positions: Vec<Vec3> = data.vertices.iter().map(|p| params.place(*p)).collect();
    let bounds = Aabb::from_points(positions.iter().copied()).unwrap_or_default();
    Mesh {
        uvs: data.vertices.iter().map(|p| params.uv(*p).to_array()).collect(),
        vertices: positions.into_iter().map(|v| v.to_array()).collect(),
        normals: data.normals.into_iter().map(|v| v.to_array()).collect(),
        triangles: data.triangles,
        bounds,
    }
}
