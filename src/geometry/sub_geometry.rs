//! Affine geometry of a sub-element inside its refined reference element.
//!
//! `local` coordinates live on the sub-element's own reference element (unit
//! simplex or unit cube); `global` coordinates live on the refined parent's
//! reference element. All maps here are affine, so the integration element and
//! the inverse Jacobian are constant per sub-element.

use std::fmt;

/// Geometry of one sub-element.
pub trait SubElementGeometry<const D: usize>: Clone + fmt::Debug {
    /// Number of corners (`D + 1` for simplices, `2^D` for cubes).
    fn corner_count(&self) -> usize;

    /// Global position of corner `i`.
    fn corner(&self, i: usize) -> [f64; D];

    /// All corners in order.
    fn corners(&self) -> Vec<[f64; D]> {
        (0..self.corner_count()).map(|i| self.corner(i)).collect()
    }

    /// Map a local position to the parent reference element.
    fn global(&self, local: &[f64; D]) -> [f64; D];

    /// Inverse of [`SubElementGeometry::global`].
    fn local(&self, global: &[f64; D]) -> [f64; D];

    /// Ratio of the sub-element's content to its reference element's content,
    /// measured in the parent's reference coordinates.
    fn integration_element(&self) -> f64;

    /// Inverse Jacobian of the local-to-global map, `J^{-1}[i][j] = ∂local_i / ∂global_j`.
    fn jacobian_inverse(&self) -> [[f64; D]; D];

    /// Whether `local` lies inside the sub-element's reference element.
    fn check_inside(&self, local: &[f64; D]) -> bool;
}

/// Inside test for the unit reference simplex.
pub(crate) fn inside_reference_simplex<const D: usize>(local: &[f64; D]) -> bool {
    local.iter().all(|&x| x >= 0.0) && local.iter().sum::<f64>() <= 1.0
}

/// Axis-aligned cube sub-element `lower + width * [0, 1]^D`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeGeometry<const D: usize> {
    lower: [f64; D],
    width: f64,
}

impl<const D: usize> CubeGeometry<D> {
    /// Cube with the given lower corner and edge length.
    pub fn new(lower: [f64; D], width: f64) -> Self {
        Self { lower, width }
    }

    /// Lower corner.
    pub fn lower(&self) -> [f64; D] {
        self.lower
    }

    /// Edge length.
    pub fn width(&self) -> f64 {
        self.width
    }
}

impl<const D: usize> SubElementGeometry<D> for CubeGeometry<D> {
    fn corner_count(&self) -> usize {
        1 << D
    }

    fn corner(&self, i: usize) -> [f64; D] {
        debug_assert!(i < self.corner_count());
        std::array::from_fn(|axis| self.lower[axis] + self.width * ((i >> axis) & 1) as f64)
    }

    fn global(&self, local: &[f64; D]) -> [f64; D] {
        std::array::from_fn(|axis| self.lower[axis] + self.width * local[axis])
    }

    fn local(&self, global: &[f64; D]) -> [f64; D] {
        std::array::from_fn(|axis| (global[axis] - self.lower[axis]) / self.width)
    }

    fn integration_element(&self) -> f64 {
        self.width.powi(D as i32)
    }

    fn jacobian_inverse(&self) -> [[f64; D]; D] {
        std::array::from_fn(|i| std::array::from_fn(|j| if i == j { 1.0 / self.width } else { 0.0 }))
    }

    fn check_inside(&self, local: &[f64; D]) -> bool {
        local.iter().all(|&x| (0.0..=1.0).contains(&x))
    }
}
