//! Geometry types for reference elements and their sub-elements.
//!
//! - [`kind`]: run-time geometry kind tags.
//! - [`sub_geometry`]: affine maps between a sub-element and its parent.

pub mod kind;
pub mod sub_geometry;

pub use kind::{BasicType, GeometryKind};
pub use sub_geometry::{CubeGeometry, SubElementGeometry};
