use sprite_mesh::glam::{IVec3, UVec2};
use sprite_mesh::{
    classify, fill_empty_spaces, generate_mesh, partition, MeshParams, Voxel, VoxelSet,
};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const SPRITE_DIM: i32 = 32;
const DEPTH: i32 = 4;

fn bench_disc_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("bench_disc_mesh");
    for smooth in [false, true] {
        let voxels = disc_sprite(smooth);
        for optimize_normals in [false, true] {
            let params = MeshParams::new(UVec2::splat(SPRITE_DIM as u32))
                .with_optimize_normals(optimize_normals);

            // Do a single run first to report the output size.
            let num_triangles = generate_mesh(&voxels, &params)
                .map(|mesh| mesh.num_triangles())
                .unwrap_or(0);

            group.bench_with_input(
                BenchmarkId::from_parameter(format!(
                    "smooth={smooth},weld={optimize_normals},triangles={num_triangles}"
                )),
                &(),
                |b, _| b.iter(|| generate_mesh(&voxels, &params)),
            );
        }
    }
    group.finish();
}

fn bench_disc_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("bench_disc_partition");
    let voxels = disc_sprite(true);
    group.bench_with_input(
        BenchmarkId::from_parameter(format!("voxels={}", voxels.len())),
        &(),
        |b, _| b.iter(|| partition(&voxels, &classify(&voxels))),
    );
    group.finish();
}

fn bench_fill_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("bench_fill_ring");
    let center = SPRITE_DIM / 2;
    // Hollow out the disc, keeping the front and back caps.
    let shell: VoxelSet = disc_sprite(false)
        .iter()
        .filter(|(p, _)| {
            let d = p.truncate() - IVec3::splat(center).truncate();
            p.z == 0 || p.z == DEPTH - 1 || d.length_squared() > (center - 3) * (center - 3)
        })
        .collect();

    group.bench_with_input(
        BenchmarkId::from_parameter(format!("voxels={}", shell.len())),
        &(),
        |b, _| {
            b.iter(|| {
                let mut voxels = shell.clone();
                fill_empty_spaces(&mut voxels)
            })
        },
    );
    group.finish();
}

criterion_group!(
    benches,
    bench_disc_mesh,
    bench_disc_partition,
    bench_fill_ring
);
criterion_main!(benches);

/// A filled disc sprite extruded `DEPTH` voxels deep.
fn disc_sprite(smooth: bool) -> VoxelSet {
    let mut voxels = VoxelSet::new();
    for y in 0..SPRITE_DIM {
        for x in 0..SPRITE_DIM {
            if !in_disc(into_domain(SPRITE_DIM, [x, y])) {
                continue;
            }
            for z in 0..DEPTH {
                voxels.insert(IVec3::new(x, y, z), Voxel { smooth });
            }
        }
    }
    voxels
}

fn in_disc([x, y]: [f32; 2]) -> bool {
    x * x + y * y <= 0.9
}

fn into_domain(array_dim: i32, [x, y]: [i32; 2]) -> [f32; 2] {
    [
        (2.0 * x as f32 + 1.0) / array_dim as f32 - 1.0,
        (2.0 * y as f32 + 1.0) / array_dim as f32 - 1.0,
    ]
}
