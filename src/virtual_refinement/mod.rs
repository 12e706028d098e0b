//! # VirtualRefinement: run-time selected refinements
//!
//! When the shapes are only known at run time, [`build_refinement`] returns a
//! shared [`RefinementHandle`] to a type-erased refinement. Its iterators own a
//! boxed cursor back-end that wraps one of the compile-time cursors; corner
//! lists cross this boundary as `Vec<usize>` because their length depends on
//! the dimension.
//!
//! ```rust
//! use mesh_refinement::geometry::GeometryKind;
//! use mesh_refinement::virtual_refinement::build_refinement;
//!
//! let r = build_refinement(GeometryKind::triangle(), GeometryKind::triangle(), 2).unwrap();
//! assert_eq!(r.n_vertices(1), 6);
//! let cells: Vec<Vec<usize>> = r.elements(1).map(|(_, idx)| idx).collect();
//! assert_eq!(cells.len(), 4);
//! assert!(cells.iter().all(|c| c.len() == 3));
//! ```

pub mod builder;

pub use builder::{build_refinement, global_registry, RefinementHandle, RefinementKey, RefinementRegistry};

use crate::config::RefinementConfig;
use crate::geometry::kind::GeometryKind;
use crate::mesh_error::RefinementError;
use crate::refinement::cursor::{ElementCursor, SubEntityCursor, VertexCursor};
use crate::refinement::Refinement;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

/// Vertex position with run-time length.
pub type CoordVector = Vec<f64>;
/// Corner handles with run-time length.
pub type IndexVector = Vec<usize>;

/// Type-erased vertex cursor.
pub trait VertexIteratorBack: Send + Sync + fmt::Debug {
    /// Copy of this cursor at the same position.
    fn clone_box(&self) -> Box<dyn VertexIteratorBack>;
    /// Same concrete cursor type and same position. A type mismatch is
    /// "not equal".
    fn equals(&self, other: &dyn VertexIteratorBack) -> bool;
    /// Advance to the next sub-vertex.
    fn increment(&mut self);
    /// Handle of the current sub-vertex.
    fn index(&self) -> usize;
    /// Reference coordinates of the current sub-vertex.
    fn coords(&self) -> CoordVector;
    /// Concrete cursor, for [`VertexIteratorBack::equals`].
    fn as_any(&self) -> &dyn Any;
}

/// Type-erased element cursor.
pub trait ElementIteratorBack: Send + Sync + fmt::Debug {
    /// Copy of this cursor at the same position.
    fn clone_box(&self) -> Box<dyn ElementIteratorBack>;
    /// Same concrete cursor type and same position. A type mismatch is
    /// "not equal".
    fn equals(&self, other: &dyn ElementIteratorBack) -> bool;
    /// Advance to the next sub-element.
    fn increment(&mut self);
    /// Handle of the current sub-element.
    fn index(&self) -> usize;
    /// Corner handles of the current sub-element.
    fn vertex_indices(&self) -> IndexVector;
    /// Concrete cursor, for [`ElementIteratorBack::equals`].
    fn as_any(&self) -> &dyn Any;
}

/// Adapter from a compile-time vertex cursor to [`VertexIteratorBack`].
#[derive(Clone, Debug, PartialEq)]
struct VertexBack<C, const D: usize> {
    cursor: C,
}

impl<C, const D: usize> VertexIteratorBack for VertexBack<C, D>
where
    C: VertexCursor<D>,
{
    fn clone_box(&self) -> Box<dyn VertexIteratorBack> {
        Box::new(self.clone())
    }

    fn equals(&self, other: &dyn VertexIteratorBack) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| o.cursor == self.cursor)
    }

    fn increment(&mut self) {
        self.cursor.increment();
    }

    fn index(&self) -> usize {
        self.cursor.index()
    }

    fn coords(&self) -> CoordVector {
        self.cursor.coords().to_vec()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Adapter from a compile-time element cursor to [`ElementIteratorBack`].
#[derive(Clone, Debug, PartialEq)]
struct ElementBack<C, const D: usize> {
    cursor: C,
}

impl<C, const D: usize> ElementIteratorBack for ElementBack<C, D>
where
    C: ElementCursor<D>,
{
    fn clone_box(&self) -> Box<dyn ElementIteratorBack> {
        Box::new(self.clone())
    }

    fn equals(&self, other: &dyn ElementIteratorBack) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| o.cursor == self.cursor)
    }

    fn increment(&mut self) {
        self.cursor.increment();
    }

    fn index(&self) -> usize {
        self.cursor.index()
    }

    fn vertex_indices(&self) -> IndexVector {
        self.cursor.vertex_indices().as_ref().to_vec()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Value-semantics vertex iterator over a type-erased cursor.
#[derive(Debug)]
pub struct VirtualVertexIterator {
    back: Box<dyn VertexIteratorBack>,
}

impl VirtualVertexIterator {
    /// Wrap an existing back-end.
    pub fn new(back: Box<dyn VertexIteratorBack>) -> Self {
        Self { back }
    }

    /// Advance to the next sub-vertex.
    pub fn increment(&mut self) {
        self.back.increment();
    }

    /// Handle of the current sub-vertex.
    pub fn index(&self) -> usize {
        self.back.index()
    }

    /// Reference coordinates of the current sub-vertex.
    pub fn coords(&self) -> CoordVector {
        self.back.coords()
    }

    /// The wrapped back-end.
    pub fn back(&self) -> &dyn VertexIteratorBack {
        self.back.as_ref()
    }
}

impl Clone for VirtualVertexIterator {
    fn clone(&self) -> Self {
        Self {
            back: self.back.clone_box(),
        }
    }
}

impl PartialEq for VirtualVertexIterator {
    fn eq(&self, other: &Self) -> bool {
        self.back.equals(other.back.as_ref())
    }
}

/// Value-semantics element iterator over a type-erased cursor.
#[derive(Debug)]
pub struct VirtualElementIterator {
    back: Box<dyn ElementIteratorBack>,
}

impl VirtualElementIterator {
    /// Wrap an existing back-end.
    pub fn new(back: Box<dyn ElementIteratorBack>) -> Self {
        Self { back }
    }

    /// Advance to the next sub-element.
    pub fn increment(&mut self) {
        self.back.increment();
    }

    /// Handle of the current sub-element.
    pub fn index(&self) -> usize {
        self.back.index()
    }

    /// Corner handles of the current sub-element.
    pub fn vertex_indices(&self) -> IndexVector {
        self.back.vertex_indices()
    }

    /// The wrapped back-end.
    pub fn back(&self) -> &dyn ElementIteratorBack {
        self.back.as_ref()
    }
}

impl Clone for VirtualElementIterator {
    fn clone(&self) -> Self {
        Self {
            back: self.back.clone_box(),
        }
    }
}

impl PartialEq for VirtualElementIterator {
    fn eq(&self, other: &Self) -> bool {
        self.back.equals(other.back.as_ref())
    }
}

/// `(index, coords)` for every sub-vertex, until the end iterator.
#[derive(Clone, Debug)]
pub struct VirtualVertices {
    current: VirtualVertexIterator,
    end: VirtualVertexIterator,
}

impl Iterator for VirtualVertices {
    type Item = (usize, CoordVector);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.end {
            return None;
        }
        let item = (self.current.index(), self.current.coords());
        self.current.increment();
        Some(item)
    }
}

/// `(index, corner handles)` for every sub-element, until the end iterator.
#[derive(Clone, Debug)]
pub struct VirtualElements {
    current: VirtualElementIterator,
    end: VirtualElementIterator,
}

impl Iterator for VirtualElements {
    type Item = (usize, IndexVector);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.end {
            return None;
        }
        let item = (self.current.index(), self.current.vertex_indices());
        self.current.increment();
        Some(item)
    }
}

/// Refinement whose shapes and dimension are fixed at run time.
pub trait VirtualRefinement: Send + Sync + fmt::Debug {
    /// Dimension of the refined element.
    fn dimension(&self) -> usize;

    /// Kind of the refined element.
    fn source(&self) -> GeometryKind;

    /// Kind of the produced sub-elements.
    fn target(&self) -> GeometryKind;

    /// Length of every corner list.
    fn corners_per_element(&self) -> usize {
        self.target().corner_count()
    }

    /// Largest level whose counts and handles fit a `usize`.
    fn max_level(&self) -> u32;

    /// Number of sub-vertices at `level`.
    fn n_vertices(&self, level: u32) -> usize;

    /// Number of sub-elements at `level`.
    fn n_elements(&self, level: u32) -> usize;

    /// Iterator at the first sub-vertex.
    fn v_begin(&self, level: u32) -> VirtualVertexIterator;

    /// Iterator one past the last sub-vertex.
    fn v_end(&self, level: u32) -> VirtualVertexIterator;

    /// Iterator at the first sub-element.
    fn e_begin(&self, level: u32) -> VirtualElementIterator;

    /// Iterator one past the last sub-element.
    fn e_end(&self, level: u32) -> VirtualElementIterator;

    /// [`VirtualRefinement::n_vertices`] after [`RefinementConfig::check_level`].
    fn try_n_vertices(&self, level: u32, config: &RefinementConfig) -> Result<usize, RefinementError> {
        config.check_level(self, level)?;
        Ok(self.n_vertices(level))
    }

    /// [`VirtualRefinement::n_elements`] after [`RefinementConfig::check_level`].
    fn try_n_elements(&self, level: u32, config: &RefinementConfig) -> Result<usize, RefinementError> {
        config.check_level(self, level)?;
        Ok(self.n_elements(level))
    }

    /// [`VirtualRefinement::vertices`] after [`RefinementConfig::check_level`].
    /// A rejected level never reaches a shared backend grid.
    fn try_vertices(
        &self,
        level: u32,
        config: &RefinementConfig,
    ) -> Result<VirtualVertices, RefinementError> {
        config.check_level(self, level)?;
        Ok(self.vertices(level))
    }

    /// [`VirtualRefinement::elements`] after [`RefinementConfig::check_level`].
    fn try_elements(
        &self,
        level: u32,
        config: &RefinementConfig,
    ) -> Result<VirtualElements, RefinementError> {
        config.check_level(self, level)?;
        Ok(self.elements(level))
    }

    /// Iterate all sub-vertices at `level`.
    fn vertices(&self, level: u32) -> VirtualVertices {
        VirtualVertices {
            current: self.v_begin(level),
            end: self.v_end(level),
        }
    }

    /// Iterate all sub-elements at `level`.
    fn elements(&self, level: u32) -> VirtualElements {
        VirtualElements {
            current: self.e_begin(level),
            end: self.e_end(level),
        }
    }
}

/// [`VirtualRefinement`] backed by the compile-time refinement `R`.
pub struct VirtualRefinementImp<R, const D: usize> {
    _refinement: PhantomData<fn() -> R>,
}

impl<R, const D: usize> VirtualRefinementImp<R, D> {
    /// The zero-sized wrapper; all state lives in `R`.
    pub const fn new() -> Self {
        Self {
            _refinement: PhantomData,
        }
    }
}

impl<R, const D: usize> Default for VirtualRefinementImp<R, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Refinement<D>, const D: usize> fmt::Debug for VirtualRefinementImp<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualRefinementImp")
            .field("source", &R::source())
            .field("target", &R::target())
            .field("dimension", &D)
            .finish()
    }
}

impl<R, const D: usize> VirtualRefinement for VirtualRefinementImp<R, D>
where
    R: Refinement<D> + 'static,
{
    fn dimension(&self) -> usize {
        D
    }

    fn source(&self) -> GeometryKind {
        R::source()
    }

    fn target(&self) -> GeometryKind {
        R::target()
    }

    fn max_level(&self) -> u32 {
        R::max_level()
    }

    fn n_vertices(&self, level: u32) -> usize {
        R::n_vertices(level)
    }

    fn n_elements(&self, level: u32) -> usize {
        R::n_elements(level)
    }

    fn v_begin(&self, level: u32) -> VirtualVertexIterator {
        VirtualVertexIterator::new(Box::new(VertexBack::<_, D> {
            cursor: R::v_begin(level),
        }))
    }

    fn v_end(&self, level: u32) -> VirtualVertexIterator {
        VirtualVertexIterator::new(Box::new(VertexBack::<_, D> {
            cursor: R::v_end(level),
        }))
    }

    fn e_begin(&self, level: u32) -> VirtualElementIterator {
        VirtualElementIterator::new(Box::new(ElementBack::<_, D> {
            cursor: R::e_begin(level),
        }))
    }

    fn e_end(&self, level: u32) -> VirtualElementIterator {
        VirtualElementIterator::new(Box::new(ElementBack::<_, D> {
            cursor: R::e_end(level),
        }))
    }
}
