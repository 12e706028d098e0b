use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_refinement::prelude::*;

fn bench_compile_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_time_refinement");
    for level in [2u32, 4, 6] {
        group.bench_with_input(BenchmarkId::new("simplex3_elements", level), &level, |b, &l| {
            b.iter(|| {
                let n = SimplexRefinement::<3>::elements(l)
                    .map(|(_, idx)| idx[0])
                    .fold(0usize, usize::wrapping_add);
                black_box(n);
            });
        });
        group.bench_with_input(BenchmarkId::new("hexahedron_vertices", level), &level, |b, &l| {
            b.iter(|| {
                let s: f64 = HypercubeRefinement::<3>::vertices(l).map(|(_, x)| x[0]).sum();
                black_box(s);
            });
        });
        group.bench_with_input(
            BenchmarkId::new("hexahedron_to_tetrahedra_elements", level),
            &level,
            |b, &l| {
                b.iter(|| black_box(HypercubeTriangulationRefinement::<3>::elements(l).count()));
            },
        );
    }
    group.finish();
}

fn bench_virtual(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_refinement");
    let tet = build_refinement(GeometryKind::tetrahedron(), GeometryKind::tetrahedron(), 3)
        .expect("tetrahedron refinement");
    let quad = build_refinement(GeometryKind::quadrilateral(), GeometryKind::triangle(), 2)
        .expect("quadrilateral triangulation");
    let config = RefinementConfig::default();
    for level in [2u32, 4] {
        group.bench_with_input(BenchmarkId::new("tetrahedron_subsample", level), &level, |b, &l| {
            b.iter(|| black_box(Subsample::collect(tet.as_ref(), l, &config)));
        });
        group.bench_with_input(BenchmarkId::new("quad_triangles_elements", level), &level, |b, &l| {
            b.iter(|| black_box(quad.elements(l).count()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compile_time, bench_virtual);
criterion_main!(benches);
