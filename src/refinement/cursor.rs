//! Cursor traits shared by the compile-time refinement implementations.
//!
//! A cursor is a pull-based position inside one `(shape, level)` enumeration:
//! call [`SubEntityCursor::increment`], then read its state. Two cursors are
//! equal when they denote the same position of the same enumeration, which is
//! how a begin cursor is compared against the end cursor.

use crate::geometry::sub_geometry::SubElementGeometry;
use std::fmt;

/// State common to vertex and element cursors.
pub trait SubEntityCursor: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Advance to the next sub-entity.
    fn increment(&mut self);

    /// Consecutive index of the current sub-entity.
    fn index(&self) -> usize;
}

/// Cursor over the sub-vertices of a refined element.
pub trait VertexCursor<const D: usize>: SubEntityCursor {
    /// Position of the current vertex in reference-element coordinates.
    fn coords(&self) -> [f64; D];
}

/// Cursor over the sub-elements of a refined element.
pub trait ElementCursor<const D: usize>: SubEntityCursor {
    /// Fixed-size corner list (`[usize; D + 1]` or `[usize; 1 << D]`).
    type IndexVector: AsRef<[usize]> + Copy + PartialEq + fmt::Debug;
    /// Geometry of the current sub-element.
    type Geometry: SubElementGeometry<D>;

    /// Vertex handles of the corners of the current sub-element.
    fn vertex_indices(&self) -> Self::IndexVector;

    /// Geometry of the current sub-element inside the refined element.
    fn geometry(&self) -> Self::Geometry;
}

/// Iterator adaptor running a vertex cursor up to its end cursor.
#[derive(Clone, Debug)]
pub struct Vertices<C, const D: usize> {
    current: C,
    end: C,
}

impl<C, const D: usize> Vertices<C, D> {
    pub(crate) fn new(current: C, end: C) -> Self {
        Self { current, end }
    }
}

impl<C, const D: usize> Iterator for Vertices<C, D>
where
    C: VertexCursor<D>,
{
    type Item = (usize, [f64; D]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.end {
            return None;
        }
        let item = (self.current.index(), self.current.coords());
        self.current.increment();
        Some(item)
    }
}

/// Iterator adaptor running an element cursor up to its end cursor.
#[derive(Clone, Debug)]
pub struct Elements<C, const D: usize> {
    current: C,
    end: C,
}

impl<C, const D: usize> Elements<C, D> {
    pub(crate) fn new(current: C, end: C) -> Self {
        Self { current, end }
    }
}

impl<C, const D: usize> Iterator for Elements<C, D>
where
    C: ElementCursor<D>,
{
    type Item = (usize, C::IndexVector);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.end {
            return None;
        }
        let item = (self.current.index(), self.current.vertex_indices());
        self.current.increment();
        Some(item)
    }
}
