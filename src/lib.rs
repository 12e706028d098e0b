#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-refinement
//!
//! mesh-refinement enumerates the sub-vertices and sub-elements of a reference
//! element (simplex or hypercube) refined uniformly to an integer level. PDE
//! codes use it to subsample coarse cells for visualization and
//! post-processing without touching the mesh itself.
//!
//! ## Features
//! - Compile-time refinements for simplices, hypercubes, and hypercubes split
//!   into Kuhn simplices, generic over the dimension (1 to 4)
//! - Consecutive, deterministic vertex and element numbering with documented
//!   corner order
//! - Run-time selection through [`virtual_refinement::build_refinement`],
//!   returning shared, thread-safe handles
//! - Sub-element geometry (corner positions, local/global maps, Jacobians)
//!
//! ## Usage
//!
//! ```rust
//! use mesh_refinement::prelude::*;
//!
//! // Compile-time: dimension and shapes are type parameters.
//! let n = SimplexRefinement::<2>::n_vertices(1);
//! assert_eq!(n, 6);
//!
//! // Run-time: shapes come from data.
//! let quad = build_refinement(GeometryKind::quadrilateral(), GeometryKind::triangle(), 2)?;
//! let sample = Subsample::collect(quad.as_ref(), 1, &RefinementConfig::default())?;
//! assert_eq!(sample.cells().len(), 8);
//! # Ok::<(), RefinementError>(())
//! ```
//!
//! ## Shared state
//! Hypercube refinements read from one structured backend grid per dimension,
//! and [`build_refinement`](virtual_refinement::build_refinement) caches one
//! instance per `(source, target, dimension)`. Both are created lazily, are
//! safe to use from several threads, and live until the process exits.

pub mod backend;
pub mod combinatorics;
pub mod config;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh_error;
pub mod refinement;
pub mod subsample;
pub mod virtual_refinement;

pub use debug_invariants::DebugInvariants;
pub use mesh_error::RefinementError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::config::RefinementConfig;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::{BasicType, GeometryKind, SubElementGeometry};
    pub use crate::mesh_error::RefinementError;
    pub use crate::refinement::{
        CubeShape, ElementCursor, HypercubeRefinement, HypercubeTriangulationRefinement,
        Refinement, RefinementFor, SimplexRefinement, SimplexShape, SubEntityCursor,
        VertexCursor,
    };
    pub use crate::subsample::Subsample;
    pub use crate::virtual_refinement::{
        build_refinement, RefinementHandle, RefinementRegistry, VirtualRefinement,
    };
}
