//! Uniform refinement of a hypercube into simplices.
//!
//! The `D`-cube is split into its `D!` Kuhn simplices, and each one is refined
//! with [`SimplexRefinement`]. Every Kuhn simplex owns a contiguous block of
//! vertex handles (`kuhn_index · SimplexRefinement::n_vertices(level) + inner`),
//! so vertices on shared faces appear once per Kuhn simplex. Element handles
//! are blocked the same way.

use crate::combinatorics::kuhn::{to_kuhn, to_reference};
use crate::combinatorics::{factorial, permutation};
use crate::geometry::kind::GeometryKind;
use crate::geometry::sub_geometry::SubElementGeometry;
use crate::refinement::cursor::{ElementCursor, SubEntityCursor, VertexCursor};
use crate::refinement::simplex::{self, SimplexElementCursor, SimplexGeometry, SimplexVertexCursor};
use crate::refinement::{max_representable_level, Refinement};

/// Refinement of the `D`-cube into `D`-simplices.
#[derive(Clone, Copy, Debug, Default)]
pub struct HypercubeTriangulationRefinement<const D: usize>;

impl<const D: usize> Refinement<D> for HypercubeTriangulationRefinement<D>
where
    TriangulationElementCursor<D>: ElementCursor<D>,
{
    type VertexCursor = TriangulationVertexCursor<D>;
    type ElementCursor = TriangulationElementCursor<D>;

    fn source() -> GeometryKind {
        GeometryKind::cube(D)
    }

    fn target() -> GeometryKind {
        GeometryKind::simplex(D)
    }

    fn max_level() -> u32 {
        (0..=max_representable_level(D))
            .rev()
            .find(|&level| checked_counts(D, level).is_some())
            .unwrap_or(0)
    }

    fn n_vertices(level: u32) -> usize {
        debug_assert!(level <= Self::max_level(), "level {level} overflows");
        simplex::n_vertices(D, level) * factorial(D)
    }

    fn n_elements(level: u32) -> usize {
        debug_assert!(level <= Self::max_level(), "level {level} overflows");
        simplex::n_elements(D, level) * factorial(D)
    }

    fn v_begin(level: u32) -> TriangulationVertexCursor<D> {
        TriangulationVertexCursor::new(level, false)
    }

    fn v_end(level: u32) -> TriangulationVertexCursor<D> {
        TriangulationVertexCursor::new(level, true)
    }

    fn e_begin(level: u32) -> TriangulationElementCursor<D> {
        TriangulationElementCursor::new(level, false)
    }

    fn e_end(level: u32) -> TriangulationElementCursor<D> {
        TriangulationElementCursor::new(level, true)
    }
}

/// `(n_vertices, n_elements)` of the `dim`-cube triangulation at `level`,
/// or `None` when either does not fit a `usize`.
pub fn checked_counts(dim: usize, level: u32) -> Option<(usize, usize)> {
    let kuhn = factorial(dim);
    let vertices = simplex::checked_n_vertices(dim, level)?.checked_mul(kuhn)?;
    let elements = simplex::checked_n_elements(dim, level)?.checked_mul(kuhn)?;
    Some((vertices, elements))
}

/// A simplex vertex cursor paired with the Kuhn simplex it runs in.
#[derive(Clone, Copy, Debug)]
pub struct TriangulationVertexCursor<const D: usize> {
    level: u32,
    kuhn_index: usize,
    inner: SimplexVertexCursor<D>,
}

impl<const D: usize> TriangulationVertexCursor<D> {
    /// Begin or end cursor at `level`. The end state has
    /// `kuhn_index == D!` and the inner cursor at its begin.
    pub fn new(level: u32, end: bool) -> Self {
        Self {
            level,
            kuhn_index: if end { factorial(D) } else { 0 },
            inner: SimplexVertexCursor::new(level, false),
        }
    }

    /// Kuhn simplex the cursor currently runs in.
    pub fn kuhn_index(&self) -> usize {
        self.kuhn_index
    }
}

impl<const D: usize> PartialEq for TriangulationVertexCursor<D> {
    fn eq(&self, other: &Self) -> bool {
        self.kuhn_index == other.kuhn_index && self.inner == other.inner
    }
}

impl<const D: usize> SubEntityCursor for TriangulationVertexCursor<D> {
    fn increment(&mut self) {
        debug_assert!(self.kuhn_index < factorial(D), "increment past end");
        self.inner.increment();
        if self.inner == SimplexVertexCursor::new(self.level, true) {
            self.inner = SimplexVertexCursor::new(self.level, false);
            self.kuhn_index += 1;
        }
    }

    fn index(&self) -> usize {
        self.kuhn_index * simplex::n_vertices(D, self.level) + self.inner.index()
    }
}

impl<const D: usize> VertexCursor<D> for TriangulationVertexCursor<D> {
    fn coords(&self) -> [f64; D] {
        to_kuhn(self.inner.coords(), &permutation::<D>(self.kuhn_index))
    }
}

/// A simplex element cursor paired with the Kuhn simplex it runs in.
#[derive(Clone, Copy, Debug)]
pub struct TriangulationElementCursor<const D: usize> {
    level: u32,
    kuhn_index: usize,
    inner: SimplexElementCursor<D>,
}

impl<const D: usize> TriangulationElementCursor<D> {
    /// Begin or end cursor at `level`.
    pub fn new(level: u32, end: bool) -> Self {
        Self {
            level,
            kuhn_index: if end { factorial(D) } else { 0 },
            inner: SimplexElementCursor::new(level, false),
        }
    }

    /// Kuhn simplex the cursor currently runs in.
    pub fn kuhn_index(&self) -> usize {
        self.kuhn_index
    }

    pub(crate) fn write_vertex_indices(&self, out: &mut [usize]) {
        self.inner.write_vertex_indices(out);
        let base = self.kuhn_index * simplex::n_vertices(D, self.level);
        for v in out.iter_mut() {
            *v += base;
        }
    }

    pub(crate) fn triangulated_geometry(&self) -> TriangulatedGeometry<D> {
        TriangulatedGeometry {
            inner: self.inner.simplex_geometry(),
            kuhn_index: self.kuhn_index,
        }
    }
}

impl<const D: usize> PartialEq for TriangulationElementCursor<D> {
    fn eq(&self, other: &Self) -> bool {
        self.kuhn_index == other.kuhn_index && self.inner == other.inner
    }
}

impl<const D: usize> SubEntityCursor for TriangulationElementCursor<D> {
    fn increment(&mut self) {
        debug_assert!(self.kuhn_index < factorial(D), "increment past end");
        self.inner.increment();
        if self.inner == SimplexElementCursor::new(self.level, true) {
            self.inner = SimplexElementCursor::new(self.level, false);
            self.kuhn_index += 1;
        }
    }

    fn index(&self) -> usize {
        self.kuhn_index * simplex::n_elements(D, self.level) + self.inner.index()
    }
}

macro_rules! triangulation_element_cursor {
    ($($d:literal),*) => {$(
        impl ElementCursor<$d> for TriangulationElementCursor<$d> {
            type IndexVector = [usize; $d + 1];
            type Geometry = TriangulatedGeometry<$d>;

            fn vertex_indices(&self) -> Self::IndexVector {
                let mut out = [0; $d + 1];
                self.write_vertex_indices(&mut out);
                out
            }

            fn geometry(&self) -> TriangulatedGeometry<$d> {
                self.triangulated_geometry()
            }
        }
    )*};
}

triangulation_element_cursor!(1, 2, 3, 4);

/// Sub-simplex geometry inside one Kuhn simplex of the cube: the refined
/// simplex geometry followed by `reference_to_kuhn`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangulatedGeometry<const D: usize> {
    inner: SimplexGeometry<D>,
    kuhn_index: usize,
}

impl<const D: usize> SubElementGeometry<D> for TriangulatedGeometry<D> {
    fn corner_count(&self) -> usize {
        D + 1
    }

    fn corner(&self, k: usize) -> [f64; D] {
        to_kuhn(self.inner.corner(k), &permutation::<D>(self.kuhn_index))
    }

    fn global(&self, local: &[f64; D]) -> [f64; D] {
        to_kuhn(self.inner.global(local), &permutation::<D>(self.kuhn_index))
    }

    fn local(&self, global: &[f64; D]) -> [f64; D] {
        let in_simplex = to_reference(*global, &permutation::<D>(self.kuhn_index));
        self.inner.local(&in_simplex)
    }

    fn integration_element(&self) -> f64 {
        self.inner.integration_element() / factorial(D) as f64
    }

    fn jacobian_inverse(&self) -> [[f64; D]; D] {
        let perm = permutation::<D>(self.kuhn_index);
        let inner = self.inner.jacobian_inverse();
        let back: [[f64; D]; D] = std::array::from_fn(|j| {
            let mut e = [0.0; D];
            e[j] = 1.0;
            to_reference(e, &perm)
        });
        // back[j] is column j of the inverse Kuhn map.
        std::array::from_fn(|i| {
            std::array::from_fn(|j| (0..D).map(|k| inner[i][k] * back[j][k]).sum())
        })
    }

    fn check_inside(&self, local: &[f64; D]) -> bool {
        self.inner.check_inside(local)
    }
}
