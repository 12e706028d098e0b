//! Kuhn simplex mappings and Kuhn0 lattice indexing.
//!
//! A Kuhn simplex of a `d`-cube is described by a permutation `p`: starting
//! at the origin, corner `k+1` is corner `k` plus the unit vector `e_{p[k]}`.
//! The Kuhn0 simplex (identity permutation) contains exactly the points with
//! `x_0 >= x_1 >= ... >= x_{d-1} >= 0`.
//!
//! The number of lattice points in a Kuhn0 simplex of dimension `n` and width
//! `x` is `C(n + x, n)`; slicing the simplex orthogonally to each axis in turn
//! gives the index of a lattice point as
//! `Σ_i C(d - i + x_i - 1, d - i)`.

use super::binomial;
use num_traits::NumAssign;

/// Maps `point` from the reference simplex into the Kuhn simplex labelled by
/// `perm`, in place.
///
/// For `i` from `d-1` down to `1`: `point[perm[i-1]] += point[perm[i]]`.
pub fn reference_to_kuhn<T>(point: &mut [T], perm: &[usize])
where
    T: Copy + NumAssign,
{
    debug_assert_eq!(point.len(), perm.len());
    for i in (1..perm.len()).rev() {
        let carry = point[perm[i]];
        point[perm[i - 1]] += carry;
    }
}

/// Maps `point` from the Kuhn simplex labelled by `perm` back to the reference
/// simplex, in place. Exact inverse of [`reference_to_kuhn`].
pub fn kuhn_to_reference<T>(point: &mut [T], perm: &[usize])
where
    T: Copy + NumAssign,
{
    debug_assert_eq!(point.len(), perm.len());
    for i in 0..perm.len().saturating_sub(1) {
        let carry = point[perm[i + 1]];
        point[perm[i]] -= carry;
    }
}

/// By-value form of [`reference_to_kuhn`] for fixed dimensions.
#[inline]
pub fn to_kuhn<T, const D: usize>(mut point: [T; D], perm: &[usize; D]) -> [T; D]
where
    T: Copy + NumAssign,
{
    reference_to_kuhn(&mut point, perm);
    point
}

/// By-value form of [`kuhn_to_reference`] for fixed dimensions.
#[inline]
pub fn to_reference<T, const D: usize>(mut point: [T; D], perm: &[usize; D]) -> [T; D]
where
    T: Copy + NumAssign,
{
    kuhn_to_reference(&mut point, perm);
    point
}

/// Consecutive index of a lattice point of the Kuhn0 simplex.
///
/// `coords` must be non-increasing. Runtime is O(d²).
pub fn point_index(coords: &[usize]) -> usize {
    let d = coords.len() as i64;
    coords
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let rank = d - i as i64;
            binomial(rank + x as i64 - 1, rank)
        })
        .sum()
}

/// Identity permutation for fixed dimensions.
#[inline]
pub fn identity<const D: usize>() -> [usize; D] {
    std::array::from_fn(|i| i)
}
