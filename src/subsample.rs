//! Index-addressed subsample tables.
//!
//! [`Subsample::collect`] runs both enumerations of a refinement once and
//! stores vertex positions and corner lists by handle, the form most
//! visualization writers expect.

use crate::config::RefinementConfig;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::RefinementError;
use crate::virtual_refinement::{CoordVector, IndexVector, VirtualRefinement};
use itertools::Itertools;

/// Sub-vertices and sub-elements of one refined reference element.
#[derive(Clone, Debug, PartialEq)]
pub struct Subsample {
    dimension: usize,
    level: u32,
    coords: Vec<CoordVector>,
    cells: Vec<IndexVector>,
}

impl Subsample {
    /// Enumerate `refinement` at `level`.
    ///
    /// # Errors
    /// [`RefinementError::LevelTooLarge`] if `config` rejects the level, and
    /// [`RefinementError::InvariantViolation`] if `config.check_invariants` is
    /// set and the enumeration is inconsistent.
    pub fn collect(
        refinement: &dyn VirtualRefinement,
        level: u32,
        config: &RefinementConfig,
    ) -> Result<Self, RefinementError> {
        let dimension = refinement.dimension();
        config.check_level(refinement, level)?;

        let mut coords = vec![Vec::new(); refinement.n_vertices(level)];
        for (index, position) in refinement.vertices(level) {
            match coords.get_mut(index) {
                Some(slot) => *slot = position,
                None => {
                    return Err(RefinementError::InvariantViolation(format!(
                        "vertex handle {index} out of range {}",
                        coords.len()
                    )));
                }
            }
        }
        let mut cells = vec![Vec::new(); refinement.n_elements(level)];
        for (index, corners) in refinement.elements(level) {
            match cells.get_mut(index) {
                Some(slot) => *slot = corners,
                None => {
                    return Err(RefinementError::InvariantViolation(format!(
                        "element handle {index} out of range {}",
                        cells.len()
                    )));
                }
            }
        }

        let sample = Self {
            dimension,
            level,
            coords,
            cells,
        };
        sample.validate_invariants_if(config.check_invariants)?;
        sample.debug_assert_invariants();
        log::trace!(
            "collected {} vertices and {} cells at level {level}",
            sample.coords.len(),
            sample.cells.len()
        );
        Ok(sample)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Vertex positions, indexed by vertex handle.
    pub fn coords(&self) -> &[CoordVector] {
        &self.coords
    }

    /// Corner handles, indexed by element handle.
    pub fn cells(&self) -> &[IndexVector] {
        &self.cells
    }

    /// Corner positions of element `e`.
    pub fn cell_coords(&self, e: usize) -> Option<Vec<&CoordVector>> {
        let cell = self.cells.get(e)?;
        cell.iter().map(|&v| self.coords.get(v)).collect()
    }
}

impl DebugInvariants for Subsample {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Subsample");
    }

    fn validate_invariants(&self) -> Result<(), RefinementError> {
        if let Some(v) = self.coords.iter().position(|c| c.len() != self.dimension) {
            return Err(RefinementError::InvariantViolation(format!(
                "vertex {v} was not enumerated or has the wrong length"
            )));
        }
        let corners = self.cells.first().map_or(0, Vec::len);
        for (e, cell) in self.cells.iter().enumerate() {
            if cell.is_empty() || cell.len() != corners {
                return Err(RefinementError::InvariantViolation(format!(
                    "element {e} has {} corners, expected {corners}",
                    cell.len()
                )));
            }
            if let Some(&v) = cell.iter().find(|&&v| v >= self.coords.len()) {
                return Err(RefinementError::InvariantViolation(format!(
                    "element {e} references vertex {v} of {}",
                    self.coords.len()
                )));
            }
            if !cell.iter().all_unique() {
                return Err(RefinementError::InvariantViolation(format!(
                    "element {e} repeats a corner: {cell:?}"
                )));
            }
        }
        Ok(())
    }
}
