//! Factorial-base permutation numbering.
//!
//! A permutation of `0..d` is built from the identity by `d` transpositions:
//! step `i` (for `i = d` down to `1`) swaps slot `i-1` with slot `i-1-t`,
//! where the digit `t` lies in `[0, i-1]`. The digits are packed into one
//! integer as `Σ t_i · (i-1)!`, so the identity has index 0 and the indices
//! cover `[0, d!)` exactly once.
//!
//! ```rust
//! use mesh_refinement::combinatorics::{decode, encode};
//! assert_eq!(decode(0, 3), vec![0, 1, 2]);
//! assert_eq!(decode(1, 2), vec![1, 0]);
//! for m in 0..24 {
//!     assert_eq!(encode(&decode(m, 4)), m);
//! }
//! ```

use super::factorial;
use crate::mesh_error::RefinementError;

/// Writes the permutation with index `index` into `perm` (`perm.len()` is `d`).
///
/// Indices outside `[0, d!)` are a contract violation: debug builds assert,
/// release builds wrap modulo `d!`.
pub fn decode_into(index: usize, perm: &mut [usize]) {
    let n = perm.len();
    let total = factorial(n);
    debug_assert!(index < total, "permutation index {index} >= {n}!");

    for (i, slot) in perm.iter_mut().enumerate() {
        *slot = i;
    }

    let mut m = index % total;
    let mut base = total;
    for i in (1..=n).rev() {
        base /= i;
        let digit = m / base;
        m %= base;
        perm.swap(i - 1, i - 1 - digit);
    }
}

/// Permutation of `0..d` with the given index.
pub fn decode(index: usize, d: usize) -> Vec<usize> {
    let mut perm = vec![0; d];
    decode_into(index, &mut perm);
    perm
}

/// Like [`decode`], but rejects indices outside `[0, d!)`.
pub fn try_decode(index: usize, d: usize) -> Result<Vec<usize>, RefinementError> {
    if index >= factorial(d) {
        return Err(RefinementError::PermutationIndexOutOfRange {
            index,
            dimension: d,
        });
    }
    Ok(decode(index, d))
}

/// Fixed-size permutation for compile-time dimensions.
#[inline]
pub fn permutation<const D: usize>(index: usize) -> [usize; D] {
    let mut perm = [0; D];
    decode_into(index, &mut perm);
    perm
}

/// Index of `perm`; inverse of [`decode`].
///
/// `perm` must be a permutation of `0..perm.len()`. Runtime is O(d²).
pub fn encode(perm: &[usize]) -> usize {
    let n = perm.len();
    let mut current: Vec<usize> = (0..n).collect();
    let mut index = 0;
    for i in (1..=n).rev() {
        let slot = i - 1;
        let Some(pos) = current[..i].iter().position(|&v| v == perm[slot]) else {
            debug_assert!(false, "{perm:?} is not a permutation");
            return index;
        };
        index += (slot - pos) * factorial(slot);
        current.swap(slot, pos);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_zero() {
        for d in 0..7 {
            let id: Vec<usize> = (0..d).collect();
            assert_eq!(decode(0, d), id);
            assert_eq!(encode(&id), 0);
        }
    }

    #[test]
    fn two_dimensional_kuhn_permutations() {
        assert_eq!(permutation::<2>(0), [0, 1]);
        assert_eq!(permutation::<2>(1), [1, 0]);
    }

    #[test]
    fn all_indices_give_distinct_permutations() {
        for d in 1..=6 {
            let seen: HashSet<Vec<usize>> = (0..factorial(d)).map(|m| decode(m, d)).collect();
            assert_eq!(seen.len(), factorial(d));
            for p in &seen {
                let mut sorted = p.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (0..d).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn round_trip_exhaustive() {
        for d in 1..=6 {
            for m in 0..factorial(d) {
                assert_eq!(encode(&decode(m, d)), m, "d={d} m={m}");
            }
        }
    }

    #[test]
    fn try_decode_rejects_out_of_range() {
        assert!(try_decode(5, 3).is_ok());
        assert_eq!(
            try_decode(6, 3),
            Err(RefinementError::PermutationIndexOutOfRange {
                index: 6,
                dimension: 3
            })
        );
    }

    proptest! {
        #[test]
        fn decode_encode_round_trip(d in 1usize..=6, seed in any::<usize>()) {
            let m = seed % factorial(d);
            prop_assert_eq!(encode(&decode(m, d)), m);
        }
    }
}
