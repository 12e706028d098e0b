//! Compile-time choice of a refinement from `(source shape, target shape, D)`.
//!
//! ```rust
//! use mesh_refinement::refinement::{CubeShape, Refinement, RefinementFor, SimplexShape};
//!
//! type QuadToTriangles = RefinementFor<CubeShape, SimplexShape, 2>;
//! assert_eq!(<QuadToTriangles>::n_elements(1), 8);
//! ```
//!
//! Unsupported pairs (a simplex into cubes, for instance) have no
//! [`SelectRefinement`] impl and fail to compile.

use crate::geometry::kind::BasicType;
use crate::refinement::cursor::ElementCursor;
use crate::refinement::hcube::{HypercubeElementCursor, HypercubeRefinement};
use crate::refinement::hcube_triangulation::{
    HypercubeTriangulationRefinement, TriangulationElementCursor,
};
use crate::refinement::simplex::{SimplexElementCursor, SimplexRefinement};
use crate::refinement::Refinement;

/// Type-level tag for a reference shape family.
pub trait Shape {
    /// Run-time counterpart of the tag.
    const BASIC: BasicType;
}

/// Simplex family marker.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimplexShape;

/// Hypercube family marker.
#[derive(Clone, Copy, Debug, Default)]
pub struct CubeShape;

impl Shape for SimplexShape {
    const BASIC: BasicType = BasicType::Simplex;
}

impl Shape for CubeShape {
    const BASIC: BasicType = BasicType::Cube;
}

/// Maps a source shape, a target shape and a dimension to the refinement
/// implementing that subdivision.
pub trait SelectRefinement<Target: Shape, const D: usize>: Shape {
    /// The selected implementation.
    type Imp: Refinement<D>;
}

impl<const D: usize> SelectRefinement<SimplexShape, D> for SimplexShape
where
    SimplexElementCursor<D>: ElementCursor<D>,
{
    type Imp = SimplexRefinement<D>;
}

impl<const D: usize> SelectRefinement<CubeShape, D> for CubeShape
where
    HypercubeElementCursor<D>: ElementCursor<D>,
{
    type Imp = HypercubeRefinement<D>;
}

impl<const D: usize> SelectRefinement<SimplexShape, D> for CubeShape
where
    TriangulationElementCursor<D>: ElementCursor<D>,
{
    type Imp = HypercubeTriangulationRefinement<D>;
}

/// The refinement chosen for `Source -> Target` in dimension `D`.
pub type RefinementFor<Source, Target, const D: usize> =
    <Source as SelectRefinement<Target, D>>::Imp;
