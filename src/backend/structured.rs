//! Structured unit-cube grid and the per-dimension shared instances.

use super::{BackendGrid, LevelView};
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::RefinementError;
use crate::refinement::MAX_DIMENSION;
use once_cell::sync::OnceCell;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

/// Uniformly refined structured grid on `[0, 1]^dim`.
///
/// Level `l` has `2^l` cells per axis. Levels are stored incrementally and
/// never discarded.
#[derive(Clone, Debug)]
pub struct StructuredGrid {
    dim: usize,
    levels: Vec<LevelView>,
}

impl StructuredGrid {
    /// A grid holding only level 0 (a single cell).
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            levels: vec![LevelView::new(dim, 0)],
        }
    }

    /// All available levels, coarsest first.
    pub fn levels(&self) -> &[LevelView] {
        &self.levels
    }
}

impl BackendGrid for StructuredGrid {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn max_level(&self) -> u32 {
        (self.levels.len() - 1) as u32
    }

    fn size(&self, level: u32, codim: usize) -> Option<usize> {
        let view = self.level_view(level)?;
        match codim {
            0 => Some(view.n_elements()),
            c if c == self.dim => Some(view.n_vertices()),
            _ => None,
        }
    }

    fn global_refine(&mut self, steps: u32) {
        let from = self.max_level();
        for level in from + 1..=from + steps {
            self.levels.push(LevelView::new(self.dim, level));
        }
        log::debug!(
            "refined hypercube backend (dim {}) from level {} to {}",
            self.dim,
            from,
            self.max_level()
        );
    }

    fn level_view(&self, level: u32) -> Option<LevelView> {
        self.levels.get(level as usize).copied()
    }
}

impl DebugInvariants for StructuredGrid {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "StructuredGrid");
    }

    fn validate_invariants(&self) -> Result<(), RefinementError> {
        if self.levels.is_empty() {
            return Err(RefinementError::InvariantViolation(
                "structured grid has no levels".into(),
            ));
        }
        for (l, view) in self.levels.iter().enumerate() {
            if view.dim() != self.dim || view.level() as usize != l {
                return Err(RefinementError::InvariantViolation(format!(
                    "level {l} stored as {view:?} in a {}-d grid",
                    self.dim
                )));
            }
            if view.cells_per_axis() != 1 << l {
                return Err(RefinementError::InvariantViolation(format!(
                    "level {l} has {} cells per axis",
                    view.cells_per_axis()
                )));
            }
        }
        Ok(())
    }
}

static BACKENDS: [OnceCell<RwLock<StructuredGrid>>; MAX_DIMENSION + 1] =
    [const { OnceCell::new() }; MAX_DIMENSION + 1];

/// Process-wide backend grid for `dim`, created on first use.
///
/// # Panics
/// If `dim > MAX_DIMENSION`.
pub fn shared_backend(dim: usize) -> &'static RwLock<StructuredGrid> {
    BACKENDS[dim].get_or_init(|| {
        log::debug!("creating hypercube backend for dimension {dim}");
        RwLock::new(StructuredGrid::new(dim))
    })
}

/// Make sure `grid` provides `level`, refining only the missing steps, and
/// return that level's view.
///
/// Readers that find the level present never block each other; only one
/// caller at a time may decide to refine.
pub fn refine_to(grid: &RwLock<StructuredGrid>, level: u32) -> LevelView {
    if let Some(view) = grid.read().level_view(level) {
        log::trace!("backend already provides level {level}");
        return view;
    }
    let guard = grid.upgradable_read();
    if let Some(view) = guard.level_view(level) {
        log::trace!("backend reached level {level} concurrently");
        return view;
    }
    let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
    let missing = level - guard.max_level();
    guard.global_refine(missing);
    guard.debug_assert_invariants();
    guard.levels()[level as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn refine_is_incremental() {
        let grid = RwLock::new(StructuredGrid::new(2));
        let view = refine_to(&grid, 2);
        assert_eq!(view.cells_per_axis(), 4);
        assert_eq!(grid.read().max_level(), 2);
        assert_eq!(grid.read().size(2, 0), Some(16));
        assert_eq!(grid.read().size(2, 2), Some(25));
        assert_eq!(grid.read().size(2, 1), None);
        assert_eq!(grid.read().size(3, 0), None);

        // Asking for a coarser level keeps the finer ones.
        let coarse = refine_to(&grid, 1);
        assert_eq!(coarse.n_elements(), 4);
        assert_eq!(grid.read().max_level(), 2);
        assert!(grid.read().validate_invariants().is_ok());
    }

    #[test]
    fn refine_twice_is_idempotent() {
        let grid = RwLock::new(StructuredGrid::new(3));
        let first = refine_to(&grid, 3);
        let levels = grid.read().levels().len();
        let second = refine_to(&grid, 3);
        assert_eq!(first, second);
        assert_eq!(grid.read().levels().len(), levels);
        assert_eq!(second.n_vertices(), 9 * 9 * 9);
    }

    #[test]
    fn corrupted_grid_fails_validation() {
        let mut grid = StructuredGrid::new(2);
        grid.levels.push(LevelView::new(2, 3));
        assert!(matches!(
            grid.validate_invariants(),
            Err(RefinementError::InvariantViolation(_))
        ));
    }

    #[test]
    #[serial]
    fn shared_backends_are_per_dimension() {
        let a = shared_backend(1) as *const _;
        let b = shared_backend(1) as *const _;
        let c = shared_backend(2) as *const _;
        assert_eq!(a, b);
        assert_ne!(a, c);
        let view = refine_to(shared_backend(1), 3);
        assert!(shared_backend(1).read().max_level() >= 3);
        assert_eq!(view.dim(), 1);
    }

    #[test]
    fn concurrent_refine_to_agrees() {
        let grid = RwLock::new(StructuredGrid::new(2));
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for level in 0..=5 {
                        assert_eq!(refine_to(&grid, level).level(), level);
                    }
                });
            }
        });
        assert_eq!(grid.read().max_level(), 5);
        assert!(grid.read().validate_invariants().is_ok());
    }
}
