//! Registry of shared [`VirtualRefinement`] instances.
//!
//! Each `(source, target, dimension)` triple maps to at most one instance,
//! created on first request and kept for the lifetime of the registry. The
//! process-wide registry behind [`build_refinement`] is never dropped.
//!
//! Handles take raw levels; pass a [`crate::config::RefinementConfig`] to the
//! `try_*` methods of [`VirtualRefinement`] to bound them.

use super::{VirtualRefinement, VirtualRefinementImp};
use crate::geometry::kind::GeometryKind;
use crate::mesh_error::RefinementError;
use crate::refinement::cursor::ElementCursor;
use crate::refinement::hcube::{HypercubeElementCursor, HypercubeRefinement};
use crate::refinement::hcube_triangulation::{
    HypercubeTriangulationRefinement, TriangulationElementCursor,
};
use crate::refinement::simplex::{SimplexElementCursor, SimplexRefinement};
use crate::refinement::{Refinement, MAX_DIMENSION};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Shared handle to a run-time refinement.
pub type RefinementHandle = Arc<dyn VirtualRefinement>;

type Factory = fn() -> RefinementHandle;

/// Lookup key of a cached refinement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RefinementKey {
    pub source: GeometryKind,
    pub target: GeometryKind,
    pub dimension: usize,
}

/// Cache of refinement singletons keyed by [`RefinementKey`].
#[derive(Debug, Default)]
pub struct RefinementRegistry {
    instances: DashMap<RefinementKey, RefinementHandle>,
}

impl RefinementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances created so far.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Refinement of `source` into `target` sub-elements in `dimension`.
    ///
    /// # Errors
    /// - [`RefinementError::DimensionMismatch`] if a kind is not
    ///   `dimension`-dimensional.
    /// - [`RefinementError::UnsupportedDimension`] outside `1..=MAX_DIMENSION`.
    /// - [`RefinementError::NotImplemented`] for pairs other than
    ///   simplex→simplex, cube→cube and cube→simplex.
    pub fn get(
        &self,
        source: GeometryKind,
        target: GeometryKind,
        dimension: usize,
    ) -> Result<RefinementHandle, RefinementError> {
        for kind in [source, target] {
            if kind.dim() != dimension {
                return Err(RefinementError::DimensionMismatch {
                    kind,
                    expected: dimension,
                });
            }
        }
        if !(1..=MAX_DIMENSION).contains(&dimension) {
            return Err(RefinementError::UnsupportedDimension {
                dimension,
                max: MAX_DIMENSION,
            });
        }

        let key = RefinementKey {
            source,
            target,
            dimension,
        };
        if let Some(handle) = self.instances.get(&key) {
            return Ok(handle.value().clone());
        }

        let Some(factory) = select(source, target, dimension) else {
            log::warn!("no refinement for {source} -> {target} in dimension {dimension}");
            return Err(RefinementError::NotImplemented {
                refined: source,
                coerce_to: target,
                dimension,
            });
        };
        let handle = self
            .instances
            .entry(key)
            .or_insert_with(|| {
                log::debug!("creating refinement {source} -> {target} (dim {dimension})");
                factory()
            })
            .value()
            .clone();
        Ok(handle)
    }
}

fn select(source: GeometryKind, target: GeometryKind, dimension: usize) -> Option<Factory> {
    match dimension {
        1 => select_in::<1>(source, target),
        2 => select_in::<2>(source, target),
        3 => select_in::<3>(source, target),
        4 => select_in::<4>(source, target),
        _ => None,
    }
}

fn select_in<const D: usize>(source: GeometryKind, target: GeometryKind) -> Option<Factory>
where
    SimplexElementCursor<D>: ElementCursor<D>,
    HypercubeElementCursor<D>: ElementCursor<D>,
    TriangulationElementCursor<D>: ElementCursor<D>,
{
    if source.is_simplex() && target.is_simplex() {
        Some(make::<SimplexRefinement<D>, D>)
    } else if source.is_cube() && target.is_cube() {
        Some(make::<HypercubeRefinement<D>, D>)
    } else if source.is_cube() && target.is_simplex() {
        Some(make::<HypercubeTriangulationRefinement<D>, D>)
    } else {
        None
    }
}

fn make<R, const D: usize>() -> RefinementHandle
where
    R: Refinement<D> + 'static,
{
    Arc::new(VirtualRefinementImp::<R, D>::new())
}

static GLOBAL: Lazy<RefinementRegistry> = Lazy::new(RefinementRegistry::new);

/// The process-wide registry used by [`build_refinement`].
pub fn global_registry() -> &'static RefinementRegistry {
    &GLOBAL
}

/// Shared refinement of `source` into `target` in `dimension`, from the
/// process-wide registry. Repeated calls return the same instance.
pub fn build_refinement(
    source: GeometryKind,
    target: GeometryKind,
    dimension: usize,
) -> Result<RefinementHandle, RefinementError> {
    GLOBAL.get(source, target, dimension)
}
