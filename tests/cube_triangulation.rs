use mesh_refinement::combinatorics::kuhn::to_kuhn;
use mesh_refinement::combinatorics::permutation;
use mesh_refinement::prelude::*;
use std::collections::BTreeSet;

mod util;

#[test]
fn square_splits_into_two_kuhn_triangles_per_cell() {
    let t = build_refinement(GeometryKind::quadrilateral(), GeometryKind::triangle(), 2).unwrap();
    assert_eq!(t.n_elements(0), 2);
    assert_eq!(t.n_elements(1), 2 * 4);
    assert_eq!(t.n_vertices(1), 2 * SimplexRefinement::<2>::n_vertices(1));
}

#[test]
fn vertex_set_matches_simplex_refinement_of_each_kuhn_triangle() {
    let t = build_refinement(GeometryKind::quadrilateral(), GeometryKind::triangle(), 2).unwrap();
    let produced: BTreeSet<Vec<i64>> = t.vertices(1).map(|(_, c)| util::key(&c)).collect();

    let mut expected = BTreeSet::new();
    for k in 0..2 {
        let perm = permutation::<2>(k);
        for (_, c) in SimplexRefinement::<2>::vertices(1) {
            expected.insert(util::key(&to_kuhn(c, &perm)));
        }
    }
    assert_eq!(produced, expected);

    let grid: BTreeSet<Vec<i64>> = (0..3)
        .flat_map(|y| (0..3).map(move |x| util::key(&[x as f64 * 0.5, y as f64 * 0.5])))
        .collect();
    assert_eq!(produced, grid);
}

#[test]
fn corner_handles_stay_in_their_kuhn_block() {
    let level = 2;
    let block = SimplexRefinement::<3>::n_vertices(level);
    for (e, cell) in HypercubeTriangulationRefinement::<3>::elements(level) {
        let kuhn = e / SimplexRefinement::<3>::n_elements(level);
        assert!(cell.iter().all(|&v| v / block == kuhn), "element {e}: {cell:?}");
    }
}

#[test]
fn triangulated_cube_volume() {
    let t = build_refinement(GeometryKind::hexahedron(), GeometryKind::tetrahedron(), 3).unwrap();
    let coords: Vec<Vec<f64>> = t.vertices(2).map(|(_, c)| c).collect();
    let volume: f64 = t
        .elements(2)
        .map(|(_, cell)| {
            let corners: Vec<&Vec<f64>> = cell.iter().map(|&v| &coords[v]).collect();
            util::simplex_volume(&corners)
        })
        .sum();
    assert!((volume - 1.0).abs() < 1e-12);
}
