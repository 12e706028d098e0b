//! RefinementError: Unified error type for mesh-refinement public APIs
//!
//! Configuration errors (no implementation for a kind pair) and contract
//! violations detected at the API boundary are both reported through this
//! type, so callers can fall back or print a precise diagnostic.

use crate::geometry::kind::GeometryKind;
use thiserror::Error;

/// Unified error type for refinement operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefinementError {
    /// No refinement is registered for this source/target pair.
    #[error("No refinement implemented for {refined} -> {coerce_to} in dimension {dimension}")]
    NotImplemented {
        /// Geometry kind of the refined element.
        refined: GeometryKind,
        /// Geometry kind requested for the sub-elements.
        coerce_to: GeometryKind,
        /// Requested dimension.
        dimension: usize,
    },
    /// A geometry kind carries a different dimension than the one requested.
    #[error("Geometry kind {kind} has dimension {}, expected {expected}", .kind.dim())]
    DimensionMismatch {
        /// The offending kind.
        kind: GeometryKind,
        /// The dimension the caller asked for.
        expected: usize,
    },
    /// The dimension is outside the instantiated range.
    #[error("Dimension {dimension} is not supported (supported: 1..={max})")]
    UnsupportedDimension {
        /// Requested dimension.
        dimension: usize,
        /// Largest instantiated dimension.
        max: usize,
    },
    /// The level exceeds the configured ceiling or the representable range.
    #[error("Refinement level {level} too large for dimension {dimension} (max {max_level})")]
    LevelTooLarge {
        /// Requested level.
        level: u32,
        /// Dimension of the refined element.
        dimension: usize,
        /// Largest accepted level for this dimension.
        max_level: u32,
    },
    /// A permutation index outside `[0, d!)`.
    #[error("Permutation index {index} out of range for dimension {dimension}")]
    PermutationIndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Permutation size.
        dimension: usize,
    },
    /// Internal consistency check failed.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}
