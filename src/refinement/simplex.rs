//! Uniform refinement of a simplex into simplices.
//!
//! The refined simplex is viewed as the Kuhn0 simplex of width
//! `size = 2^level`. Its lattice points are the integer tuples with
//! `size >= x_0 >= x_1 >= ... >= x_{d-1} >= 0`; they are the sub-vertices, and
//! [`point_index`] numbers them consecutively.
//!
//! Sub-elements are Kuhn simplices of width 1: an integer `origin` plus one of
//! the `d!` permutations. A pair is kept when every corner reached by walking
//! the permutation from `origin` stays inside the Kuhn0 simplex. Exactly
//! `2^(level·d)` pairs survive.
//!
//! Lattice coordinates become reference-simplex coordinates through
//! `kuhn_to_reference(x, identity) / size`.

use crate::combinatorics::kuhn::{identity, point_index, to_kuhn, to_reference};
use crate::combinatorics::{binomial, checked_binomial, factorial, permutation};
use crate::geometry::kind::GeometryKind;
use crate::geometry::sub_geometry::{inside_reference_simplex, SubElementGeometry};
use crate::refinement::cursor::{ElementCursor, SubEntityCursor, VertexCursor};
use crate::refinement::{max_representable_level, Refinement};

/// `C(dim + 2^level, dim)`.
#[inline]
pub fn n_vertices(dim: usize, level: u32) -> usize {
    debug_assert!(level <= max_representable_level(dim));
    binomial(dim as i64 + (1i64 << level), dim as i64)
}

/// `2^(level·dim)`.
#[inline]
pub fn n_elements(dim: usize, level: u32) -> usize {
    debug_assert!(level <= max_representable_level(dim));
    1usize << (level as usize * dim)
}

/// [`n_vertices`], or `None` when the count does not fit a `usize`.
pub fn checked_n_vertices(dim: usize, level: u32) -> Option<usize> {
    let size = 1i64.checked_shl(level).filter(|&s| s > 0)?;
    checked_binomial((dim as i64).checked_add(size)?, dim as i64)
}

/// [`n_elements`], or `None` when the count does not fit a `usize`.
pub fn checked_n_elements(dim: usize, level: u32) -> Option<usize> {
    let shift = u32::try_from(dim).ok()?.checked_mul(level)?;
    1usize.checked_shl(shift)
}

/// Refinement of the `D`-simplex.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimplexRefinement<const D: usize>;

impl<const D: usize> Refinement<D> for SimplexRefinement<D>
where
    SimplexElementCursor<D>: ElementCursor<D>,
{
    type VertexCursor = SimplexVertexCursor<D>;
    type ElementCursor = SimplexElementCursor<D>;

    fn source() -> GeometryKind {
        GeometryKind::simplex(D)
    }

    fn target() -> GeometryKind {
        GeometryKind::simplex(D)
    }

    fn n_vertices(level: u32) -> usize {
        n_vertices(D, level)
    }

    fn n_elements(level: u32) -> usize {
        n_elements(D, level)
    }

    fn v_begin(level: u32) -> SimplexVertexCursor<D> {
        SimplexVertexCursor::new(level, false)
    }

    fn v_end(level: u32) -> SimplexVertexCursor<D> {
        SimplexVertexCursor::new(level, true)
    }

    fn e_begin(level: u32) -> SimplexElementCursor<D> {
        SimplexElementCursor::new(level, false)
    }

    fn e_end(level: u32) -> SimplexElementCursor<D> {
        SimplexElementCursor::new(level, true)
    }
}

/// Vertex cursor: a non-increasing lattice tuple advanced like an odometer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimplexVertexCursor<const D: usize> {
    size: usize,
    vertex: [usize; D],
}

impl<const D: usize> SimplexVertexCursor<D> {
    /// Begin (`end == false`) or end cursor at `level`. The end state has
    /// `vertex[0] == size + 1`.
    pub fn new(level: u32, end: bool) -> Self {
        let size = 1usize << level;
        let mut vertex = [0; D];
        if end && D > 0 {
            vertex[0] = size + 1;
        }
        Self { size, vertex }
    }

    /// Current Kuhn0 lattice coordinates.
    pub fn lattice(&self) -> [usize; D] {
        self.vertex
    }
}

impl<const D: usize> SubEntityCursor for SimplexVertexCursor<D> {
    fn increment(&mut self) {
        debug_assert!(D > 0 && self.vertex[0] <= self.size, "increment past end");
        for i in (0..D).rev() {
            self.vertex[i] += 1;
            if i == 0 || self.vertex[i] <= self.vertex[i - 1] {
                break;
            }
            self.vertex[i] = 0;
        }
    }

    fn index(&self) -> usize {
        point_index(&self.vertex)
    }
}

impl<const D: usize> VertexCursor<D> for SimplexVertexCursor<D> {
    fn coords(&self) -> [f64; D] {
        let lattice = self.vertex.map(|x| x as f64);
        let size = self.size as f64;
        to_reference(lattice, &identity::<D>()).map(|x| x / size)
    }
}

/// Element cursor: a lattice origin plus a Kuhn permutation index.
#[derive(Clone, Copy, Debug)]
pub struct SimplexElementCursor<const D: usize> {
    origin: [usize; D],
    kuhn_index: usize,
    level: u32,
    size: usize,
    index: usize,
}

impl<const D: usize> PartialEq for SimplexElementCursor<D> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.index == other.index
    }
}

impl<const D: usize> SimplexElementCursor<D> {
    /// Begin (`end == false`) or end cursor at `level`.
    pub fn new(level: u32, end: bool) -> Self {
        let mut cursor = Self {
            origin: [0; D],
            kuhn_index: 0,
            level,
            size: 1usize << level,
            index: 0,
        };
        if end {
            cursor.park_at_end();
        }
        cursor
    }

    /// Lattice origin of the current Kuhn simplex.
    pub fn origin(&self) -> [usize; D] {
        self.origin
    }

    /// Permutation index of the current Kuhn simplex.
    pub fn kuhn_index(&self) -> usize {
        self.kuhn_index
    }

    fn park_at_end(&mut self) {
        self.index = n_elements(D, self.level);
        self.kuhn_index = 0;
        self.origin = [0; D];
        if D > 0 {
            self.origin[0] = self.size;
        }
    }

    fn advance_origin(&mut self) {
        for i in (0..D).rev() {
            self.origin[i] += 1;
            if i == 0 || self.origin[i] <= self.origin[i - 1] {
                break;
            }
            self.origin[i] = 0;
        }
    }

    /// Whether walking the current permutation from `origin` leaves the
    /// Kuhn0 simplex.
    fn leaves_kuhn0(&self) -> bool {
        let perm = permutation::<D>(self.kuhn_index);
        let mut corner = self.origin;
        perm.iter().any(|&axis| {
            corner[axis] += 1;
            axis > 0 && corner[axis] > corner[axis - 1]
        })
    }

    /// Writes the `D + 1` corner handles into `out`. Odd Kuhn indices list
    /// them in reverse.
    pub(crate) fn write_vertex_indices(&self, out: &mut [usize]) {
        debug_assert_eq!(out.len(), D + 1);
        let perm = permutation::<D>(self.kuhn_index);
        let mut vertex = self.origin;
        out[0] = point_index(&vertex);
        for (i, &axis) in perm.iter().enumerate() {
            vertex[axis] += 1;
            out[i + 1] = point_index(&vertex);
        }
        if self.kuhn_index % 2 == 1 {
            out.reverse();
        }
    }

    pub(crate) fn simplex_geometry(&self) -> SimplexGeometry<D> {
        SimplexGeometry::new(self.level, self.kuhn_index, self.origin)
    }
}

impl<const D: usize> SubEntityCursor for SimplexElementCursor<D> {
    fn increment(&mut self) {
        debug_assert!(D > 0 && self.origin[0] < self.size, "increment past end");
        self.index += 1;
        if self.index >= n_elements(D, self.level) {
            self.park_at_end();
            return;
        }
        let kuhn_simplices = factorial(D);
        loop {
            self.kuhn_index += 1;
            if self.kuhn_index == kuhn_simplices {
                self.kuhn_index = 0;
                self.advance_origin();
            }
            if !self.leaves_kuhn0() {
                return;
            }
        }
    }

    fn index(&self) -> usize {
        self.index
    }
}

macro_rules! simplex_element_cursor {
    ($($d:literal),*) => {$(
        impl ElementCursor<$d> for SimplexElementCursor<$d> {
            type IndexVector = [usize; $d + 1];
            type Geometry = SimplexGeometry<$d>;

            fn vertex_indices(&self) -> Self::IndexVector {
                let mut out = [0; $d + 1];
                self.write_vertex_indices(&mut out);
                out
            }

            fn geometry(&self) -> SimplexGeometry<$d> {
                self.simplex_geometry()
            }
        }
    )*};
}

simplex_element_cursor!(1, 2, 3, 4);

/// Affine map from the reference simplex onto one Kuhn sub-simplex.
///
/// `global(l) = kuhn_to_reference((reference_to_kuhn(l, perm) + origin) / size, id)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimplexGeometry<const D: usize> {
    level: u32,
    kuhn_index: usize,
    origin: [usize; D],
}

impl<const D: usize> SimplexGeometry<D> {
    /// Geometry of the Kuhn simplex `(origin, kuhn_index)` at `level`.
    pub fn new(level: u32, kuhn_index: usize, origin: [usize; D]) -> Self {
        Self {
            level,
            kuhn_index,
            origin,
        }
    }

    fn size(&self) -> f64 {
        (1u64 << self.level) as f64
    }
}

impl<const D: usize> SubElementGeometry<D> for SimplexGeometry<D> {
    fn corner_count(&self) -> usize {
        D + 1
    }

    /// Corner `k` is the lattice point `origin + e_{p[0]} + ... + e_{p[k-1]}`,
    /// the image of the reference corner `e_{p[k-1]}`.
    fn corner(&self, k: usize) -> [f64; D] {
        debug_assert!(k <= D);
        let perm = permutation::<D>(self.kuhn_index);
        let mut lattice = self.origin;
        for &axis in &perm[..k] {
            lattice[axis] += 1;
        }
        let size = self.size();
        to_reference(lattice.map(|x| x as f64 / size), &identity::<D>())
    }

    fn global(&self, local: &[f64; D]) -> [f64; D] {
        let perm = permutation::<D>(self.kuhn_index);
        let size = self.size();
        let mut v = to_kuhn(*local, &perm);
        for (x, &o) in v.iter_mut().zip(&self.origin) {
            *x = (*x + o as f64) / size;
        }
        to_reference(v, &identity::<D>())
    }

    fn local(&self, global: &[f64; D]) -> [f64; D] {
        let perm = permutation::<D>(self.kuhn_index);
        let size = self.size();
        let mut v = to_kuhn(*global, &identity::<D>());
        for (x, &o) in v.iter_mut().zip(&self.origin) {
            *x = *x * size - o as f64;
        }
        to_reference(v, &perm)
    }

    fn integration_element(&self) -> f64 {
        1.0 / n_elements(D, self.level) as f64
    }

    fn jacobian_inverse(&self) -> [[f64; D]; D] {
        let perm = permutation::<D>(self.kuhn_index);
        let id = identity::<D>();
        // Column j of the inverse is e_j pushed through the inverse linear part.
        let columns: [[i64; D]; D] = std::array::from_fn(|j| {
            let mut e = [0i64; D];
            e[j] = 1;
            to_reference(to_kuhn(e, &id), &perm)
        });
        let size = self.size();
        std::array::from_fn(|i| std::array::from_fn(|j| size * columns[j][i] as f64))
    }

    fn check_inside(&self, local: &[f64; D]) -> bool {
        inside_reference_simplex(local)
    }
}
