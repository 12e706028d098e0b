//! Invariant validation shared by the backend grid and subsample tables.

use crate::mesh_error::RefinementError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);

    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), RefinementError>;

    /// Validate only when `enabled`; used where a [`crate::config::RefinementConfig`]
    /// opts into release-mode checking.
    fn validate_invariants_if(&self, enabled: bool) -> Result<(), RefinementError> {
        if enabled {
            self.validate_invariants()
        } else {
            Ok(())
        }
    }
}

/// Run a fallible invariant check and panic with context when invariant
/// checking is compiled in.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[refinement invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
