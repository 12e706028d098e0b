//! Enumeration backend for the hypercube refinement family.
//!
//! The hypercube refinements do not count or walk sub-entities themselves:
//! they ask a structured grid on the unit cube, refined uniformly to the
//! requested level, for its level-indexed vertices and elements. The grid is
//! only ever refined forward, one `global_refine` step at a time.

pub mod structured;

pub use structured::{refine_to, shared_backend, StructuredGrid};

/// Interface the hypercube refinements consume from a backend grid.
pub trait BackendGrid {
    /// Dimension of the grid (and of the unit cube it covers).
    fn dimension(&self) -> usize;

    /// Finest level currently available.
    fn max_level(&self) -> u32;

    /// Number of entities of codimension `codim` on `level` (`0` = elements,
    /// `dimension()` = vertices), or `None` when the level does not exist yet
    /// or the codimension is not stored.
    fn size(&self, level: u32, codim: usize) -> Option<usize>;

    /// Extend the available levels by exactly `steps` uniform refinements.
    fn global_refine(&mut self, steps: u32);

    /// Snapshot of one existing level.
    fn level_view(&self, level: u32) -> Option<LevelView>;
}

/// Read-only description of one level of a structured unit-cube grid.
///
/// Vertices and elements are numbered lexicographically with axis 0 running
/// fastest. Element corner `c` is offset by `(c >> j) & 1` along axis `j`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LevelView {
    dim: usize,
    level: u32,
    cells_per_axis: usize,
}

impl LevelView {
    pub(crate) fn new(dim: usize, level: u32) -> Self {
        Self {
            dim,
            level,
            cells_per_axis: 1usize << level,
        }
    }

    /// Grid dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Refinement level of this view.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// `2^level`.
    pub fn cells_per_axis(&self) -> usize {
        self.cells_per_axis
    }

    /// Edge length of one cell.
    pub fn width(&self) -> f64 {
        1.0 / self.cells_per_axis as f64
    }

    /// `(2^level + 1)^dim`.
    pub fn n_vertices(&self) -> usize {
        (self.cells_per_axis + 1).pow(self.dim as u32)
    }

    /// `2^(level·dim)`.
    pub fn n_elements(&self) -> usize {
        self.cells_per_axis.pow(self.dim as u32)
    }

    /// Position of vertex `index` on the unit cube.
    pub fn vertex_position<const D: usize>(&self, index: usize) -> [f64; D] {
        debug_assert_eq!(D, self.dim);
        let stride = self.cells_per_axis + 1;
        let h = self.width();
        let mut rest = index;
        std::array::from_fn(|_| {
            let digit = rest % stride;
            rest /= stride;
            digit as f64 * h
        })
    }

    /// Lower corner of element `index`.
    pub fn element_lower<const D: usize>(&self, index: usize) -> [f64; D] {
        debug_assert_eq!(D, self.dim);
        let n = self.cells_per_axis;
        let h = self.width();
        let mut rest = index;
        std::array::from_fn(|_| {
            let digit = rest % n;
            rest /= n;
            digit as f64 * h
        })
    }

    /// Vertex index of corner `corner` of element `index`.
    pub fn element_corner(&self, index: usize, corner: usize) -> usize {
        debug_assert!(corner < 1 << self.dim);
        let n = self.cells_per_axis;
        let stride = n + 1;
        let mut rest = index;
        let mut weight = 1;
        let mut vertex = 0;
        for axis in 0..self.dim {
            let cell = rest % n;
            rest /= n;
            vertex += (cell + ((corner >> axis) & 1)) * weight;
            weight *= stride;
        }
        vertex
    }
}
