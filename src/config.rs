//! Configuration for refinement lookups and subsampling.

use crate::mesh_error::RefinementError;
use crate::virtual_refinement::VirtualRefinement;
use serde::{Deserialize, Serialize};

/// Options for checked refinement queries (`try_*` on
/// [`VirtualRefinement`]) and [`crate::subsample::Subsample`] tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinementConfig {
    /// Largest level accepted by [`RefinementConfig::check_level`].
    pub max_level: u32,
    /// Validate subsample tables even in release builds.
    pub check_invariants: bool,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            max_level: 10,
            check_invariants: false,
        }
    }
}

impl RefinementConfig {
    /// Largest level allowed for `refinement`: the configured ceiling, capped
    /// at the largest level whose counts fit a `usize`.
    pub fn level_limit<R>(&self, refinement: &R) -> u32
    where
        R: VirtualRefinement + ?Sized,
    {
        self.max_level.min(refinement.max_level())
    }

    /// Reject levels above [`RefinementConfig::level_limit`].
    pub fn check_level<R>(&self, refinement: &R, level: u32) -> Result<(), RefinementError>
    where
        R: VirtualRefinement + ?Sized,
    {
        let max_level = self.level_limit(refinement);
        if level > max_level {
            return Err(RefinementError::LevelTooLarge {
                level,
                dimension: refinement.dimension(),
                max_level,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refinement::{HypercubeTriangulationRefinement, SimplexRefinement};
    use crate::virtual_refinement::VirtualRefinementImp;

    #[test]
    fn default_limits() {
        let cfg = RefinementConfig::default();
        let tet = VirtualRefinementImp::<SimplexRefinement<3>, 3>::new();
        assert!(cfg.check_level(&tet, 10).is_ok());
        assert_eq!(
            cfg.check_level(&tet, 11),
            Err(RefinementError::LevelTooLarge {
                level: 11,
                dimension: 3,
                max_level: 10
            })
        );
    }

    #[test]
    fn representable_bound_wins_over_large_ceiling() {
        let cfg = RefinementConfig {
            max_level: 100,
            ..Default::default()
        };
        let simplex = VirtualRefinementImp::<SimplexRefinement<4>, 4>::new();
        assert_eq!(cfg.level_limit(&simplex), 15);
        assert!(cfg.check_level(&simplex, 16).is_err());
        let line = VirtualRefinementImp::<SimplexRefinement<1>, 1>::new();
        assert_eq!(cfg.level_limit(&line), 60);
    }

    #[test]
    fn cube_triangulation_limit_is_one_level_lower_in_4d() {
        let cfg = RefinementConfig {
            max_level: 100,
            ..Default::default()
        };
        let tri = VirtualRefinementImp::<HypercubeTriangulationRefinement<4>, 4>::new();
        assert!(cfg.check_level(&tri, 14).is_ok());
        assert_eq!(
            cfg.check_level(&tri, 15),
            Err(RefinementError::LevelTooLarge {
                level: 15,
                dimension: 4,
                max_level: 14
            })
        );
        let tri3 = VirtualRefinementImp::<HypercubeTriangulationRefinement<3>, 3>::new();
        assert!(cfg.check_level(&tri3, 20).is_ok());
    }

    #[test]
    fn json_round_trip_and_defaults() {
        let cfg = RefinementConfig {
            max_level: 6,
            check_invariants: true,
        };
        let text = serde_json::to_string(&cfg).unwrap();
        let back: RefinementConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, cfg);

        let partial: RefinementConfig = serde_json::from_str(r#"{"max_level": 3}"#).unwrap();
        assert_eq!(partial.max_level, 3);
        assert!(!partial.check_invariants);
    }
}
