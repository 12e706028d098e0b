//! Uniform refinement of a hypercube into hypercubes.
//!
//! Counting and enumeration are delegated to the shared structured backend
//! for dimension `D` (see [`crate::backend`]), which is refined on demand to
//! the requested level. Cursors capture the backend's [`LevelView`] when they
//! are created and never touch the lock again.
//!
//! Element corner lists are the backend's reference-order corners reversed:
//! `out[i] = corner(2^D - 1 - i)`.

use crate::backend::{refine_to, shared_backend, LevelView};
use crate::geometry::kind::GeometryKind;
use crate::geometry::sub_geometry::CubeGeometry;
use crate::refinement::cursor::{ElementCursor, SubEntityCursor, VertexCursor};
use crate::refinement::{max_representable_level, Refinement};

/// Backend view of `level` for dimension `D`.
fn level_view<const D: usize>(level: u32) -> LevelView {
    debug_assert!(level <= max_representable_level(D));
    refine_to(shared_backend(D), level)
}

/// Refinement of the `D`-cube.
#[derive(Clone, Copy, Debug, Default)]
pub struct HypercubeRefinement<const D: usize>;

impl<const D: usize> Refinement<D> for HypercubeRefinement<D>
where
    HypercubeElementCursor<D>: ElementCursor<D>,
{
    type VertexCursor = HypercubeVertexCursor<D>;
    type ElementCursor = HypercubeElementCursor<D>;

    fn source() -> GeometryKind {
        GeometryKind::cube(D)
    }

    fn target() -> GeometryKind {
        GeometryKind::cube(D)
    }

    fn n_vertices(level: u32) -> usize {
        level_view::<D>(level).n_vertices()
    }

    fn n_elements(level: u32) -> usize {
        level_view::<D>(level).n_elements()
    }

    fn v_begin(level: u32) -> HypercubeVertexCursor<D> {
        HypercubeVertexCursor {
            view: level_view::<D>(level),
            index: 0,
        }
    }

    fn v_end(level: u32) -> HypercubeVertexCursor<D> {
        let view = level_view::<D>(level);
        HypercubeVertexCursor {
            view,
            index: view.n_vertices(),
        }
    }

    fn e_begin(level: u32) -> HypercubeElementCursor<D> {
        HypercubeElementCursor {
            view: level_view::<D>(level),
            index: 0,
        }
    }

    fn e_end(level: u32) -> HypercubeElementCursor<D> {
        let view = level_view::<D>(level);
        HypercubeElementCursor {
            view,
            index: view.n_elements(),
        }
    }
}

/// Position in the backend's level-indexed vertex sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HypercubeVertexCursor<const D: usize> {
    view: LevelView,
    index: usize,
}

impl<const D: usize> SubEntityCursor for HypercubeVertexCursor<D> {
    fn increment(&mut self) {
        debug_assert!(self.index < self.view.n_vertices(), "increment past end");
        self.index += 1;
    }

    fn index(&self) -> usize {
        self.index
    }
}

impl<const D: usize> VertexCursor<D> for HypercubeVertexCursor<D> {
    fn coords(&self) -> [f64; D] {
        self.view.vertex_position::<D>(self.index)
    }
}

/// Position in the backend's level-indexed element sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HypercubeElementCursor<const D: usize> {
    view: LevelView,
    index: usize,
}

impl<const D: usize> HypercubeElementCursor<D> {
    pub(crate) fn write_vertex_indices(&self, out: &mut [usize]) {
        let last = (1usize << D) - 1;
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.view.element_corner(self.index, last - i);
        }
    }

    pub(crate) fn cube_geometry(&self) -> CubeGeometry<D> {
        CubeGeometry::new(
            self.view.element_lower::<D>(self.index),
            self.view.width(),
        )
    }
}

impl<const D: usize> SubEntityCursor for HypercubeElementCursor<D> {
    fn increment(&mut self) {
        debug_assert!(self.index < self.view.n_elements(), "increment past end");
        self.index += 1;
    }

    fn index(&self) -> usize {
        self.index
    }
}

macro_rules! hypercube_element_cursor {
    ($($d:literal),*) => {$(
        impl ElementCursor<$d> for HypercubeElementCursor<$d> {
            type IndexVector = [usize; 1 << $d];
            type Geometry = CubeGeometry<$d>;

            fn vertex_indices(&self) -> Self::IndexVector {
                let mut out = [0; 1 << $d];
                self.write_vertex_indices(&mut out);
                out
            }

            fn geometry(&self) -> CubeGeometry<$d> {
                self.cube_geometry()
            }
        }
    )*};
}

hypercube_element_cursor!(1, 2, 3, 4);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::sub_geometry::SubElementGeometry;
    use serial_test::serial;

    #[test]
    #[serial]
    fn counts_and_consecutive_indices() {
        for level in 0..=3 {
            let n = 1usize << level;
            assert_eq!(HypercubeRefinement::<2>::n_vertices(level), (n + 1) * (n + 1));
            assert_eq!(HypercubeRefinement::<3>::n_elements(level), n * n * n);
            let vs: Vec<usize> = HypercubeRefinement::<3>::vertices(level).map(|(i, _)| i).collect();
            assert_eq!(vs, (0..(n + 1).pow(3)).collect::<Vec<_>>());
            let es: Vec<usize> = HypercubeRefinement::<4>::elements(level).map(|(i, _)| i).collect();
            assert_eq!(es, (0..n.pow(4)).collect::<Vec<_>>());
        }
    }

    #[test]
    #[serial]
    fn corners_are_reversed_reference_order() {
        let (_, first) = HypercubeRefinement::<2>::elements(1)
            .next()
            .expect("level 1 has elements");
        // Reference order of the lower-left cell is [0, 1, 3, 4].
        assert_eq!(first, [4, 3, 1, 0]);
    }

    #[test]
    #[serial]
    fn geometry_matches_vertex_coordinates() {
        let level = 2;
        let coords: Vec<[f64; 2]> = HypercubeRefinement::<2>::vertices(level).map(|(_, c)| c).collect();
        let mut e = HypercubeRefinement::<2>::e_begin(level);
        let end = HypercubeRefinement::<2>::e_end(level);
        let mut volume = 0.0;
        while e != end {
            let geo = e.geometry();
            let idx = e.vertex_indices();
            for (i, &v) in idx.iter().enumerate() {
                assert_eq!(geo.corner(3 - i), coords[v]);
            }
            volume += geo.integration_element();
            e.increment();
        }
        assert!((volume - 1.0).abs() < 1e-12);
    }

    #[test]
    #[serial]
    fn repeated_requests_do_not_refine_again() {
        let before = HypercubeRefinement::<1>::n_vertices(4);
        let levels = shared_backend(1).read().levels().len();
        let after = HypercubeRefinement::<1>::n_vertices(4);
        assert_eq!(before, after);
        assert_eq!(shared_backend(1).read().levels().len(), levels);
    }
}
