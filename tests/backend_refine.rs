use mesh_refinement::backend::{refine_to, shared_backend, BackendGrid, StructuredGrid};
use mesh_refinement::prelude::*;
use parking_lot::RwLock;
use serial_test::serial;

#[test]
fn refine_to_same_level_twice_changes_nothing() {
    let grid = RwLock::new(StructuredGrid::new(3));
    refine_to(&grid, 2);
    let (nv, ne) = {
        let g = grid.read();
        (g.size(2, 3), g.size(2, 0))
    };
    refine_to(&grid, 2);
    let g = grid.read();
    assert_eq!(g.max_level(), 2);
    assert_eq!((g.size(2, 3), g.size(2, 0)), (nv, ne));
    assert_eq!(nv, Some(125));
    assert_eq!(ne, Some(64));
    assert!(g.validate_invariants().is_ok());
}

#[test]
#[serial]
fn hypercube_refinement_drives_the_shared_backend() {
    let before = shared_backend(2).read().max_level();
    let target = before + 1;
    let n = HypercubeRefinement::<2>::n_elements(target);
    assert_eq!(n, 1 << (2 * target));
    assert_eq!(shared_backend(2).read().max_level(), target);

    // Same request again: nothing is added.
    HypercubeRefinement::<2>::n_vertices(target);
    assert_eq!(shared_backend(2).read().levels().len(), target as usize + 1);
}

#[test]
#[serial]
fn concurrent_readers_see_consistent_counts() {
    let counts: Vec<usize> = std::thread::scope(|s| {
        let workers: Vec<_> = (0..6)
            .map(|_| s.spawn(|| HypercubeRefinement::<3>::elements(3).count()))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });
    assert!(counts.iter().all(|&c| c == 512));
    assert!(shared_backend(3).read().validate_invariants().is_ok());
}
