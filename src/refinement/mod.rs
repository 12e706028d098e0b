//! # Refinement: compile-time uniform subdivision of reference elements
//!
//! A refinement enumerates the sub-vertices and sub-elements produced by
//! refining a reference element `level` times: every edge is split into
//! `2^level` equal segments. Sub-entities carry consecutive indices starting
//! at 0, and enumeration is deterministic and restartable.
//!
//! Three implementations are provided, all generic over the dimension `D`
//! (instantiated for `1..=MAX_DIMENSION`):
//!
//! - [`simplex::SimplexRefinement`]: simplex into simplices, using the Kuhn0
//!   lattice and its closed-form vertex index.
//! - [`hcube::HypercubeRefinement`]: hypercube into hypercubes, driven by a
//!   shared structured backend grid.
//! - [`hcube_triangulation::HypercubeTriangulationRefinement`]: hypercube into
//!   simplices, by refining each of the `D!` Kuhn simplices of the cube.
//!
//! [`selector`] maps a `(source shape, target shape, D)` triple to one of them
//! at compile time.

pub mod cursor;
pub mod hcube;
pub mod hcube_triangulation;
pub mod selector;
pub mod simplex;

pub use cursor::{ElementCursor, Elements, SubEntityCursor, VertexCursor, Vertices};
pub use hcube::HypercubeRefinement;
pub use hcube_triangulation::HypercubeTriangulationRefinement;
pub use selector::{CubeShape, RefinementFor, SelectRefinement, SimplexShape};
pub use simplex::SimplexRefinement;

use crate::geometry::kind::GeometryKind;

/// Largest dimension with instantiated refinements.
pub const MAX_DIMENSION: usize = 4;

/// Largest level whose element count `2^(level * dim)` fits a `usize`.
/// Families that scale this count further lower it through
/// [`Refinement::max_level`].
#[inline]
pub fn max_representable_level(dim: usize) -> u32 {
    if dim == 0 {
        u32::MAX
    } else {
        (60 / dim) as u32
    }
}

/// Compile-time refinement of a `D`-dimensional reference element.
///
/// All operations are associated functions: a refinement carries no state of
/// its own (the hypercube family shares a process-wide backend, see
/// [`crate::backend`]).
pub trait Refinement<const D: usize> {
    /// Cursor over sub-vertices.
    type VertexCursor: VertexCursor<D>;
    /// Cursor over sub-elements.
    type ElementCursor: ElementCursor<D>;

    /// Kind of the refined element.
    fn source() -> GeometryKind;

    /// Kind of the produced sub-elements.
    fn target() -> GeometryKind;

    /// Largest level whose counts and handles fit a `usize`. Counts and
    /// cursors above it are only guarded by debug assertions.
    fn max_level() -> u32 {
        max_representable_level(D)
    }

    /// Number of sub-vertices at `level`.
    fn n_vertices(level: u32) -> usize;

    /// Number of sub-elements at `level`.
    fn n_elements(level: u32) -> usize;

    /// Cursor at the first sub-vertex.
    fn v_begin(level: u32) -> Self::VertexCursor;

    /// Cursor one past the last sub-vertex.
    fn v_end(level: u32) -> Self::VertexCursor;

    /// Cursor at the first sub-element.
    fn e_begin(level: u32) -> Self::ElementCursor;

    /// Cursor one past the last sub-element.
    fn e_end(level: u32) -> Self::ElementCursor;

    /// Iterate `(index, coords)` over all sub-vertices.
    fn vertices(level: u32) -> Vertices<Self::VertexCursor, D> {
        Vertices::new(Self::v_begin(level), Self::v_end(level))
    }

    /// Iterate `(index, corner indices)` over all sub-elements.
    fn elements(level: u32) -> Elements<Self::ElementCursor, D> {
        Elements::new(Self::e_begin(level), Self::e_end(level))
    }
}
