//! Counting helpers and the Kuhn-simplex combinatorics shared by all
//! refinement implementations.
//!
//! - [`permutation`]: factorial-base numbering of the `d!` permutations that
//!   label the Kuhn simplices of a `d`-cube.
//! - [`kuhn`]: maps between the reference simplex and a Kuhn simplex, and the
//!   closed-form vertex index inside the Kuhn0 lattice.

pub mod kuhn;
pub mod permutation;

pub use kuhn::{kuhn_to_reference, point_index, reference_to_kuhn};
pub use permutation::{decode, encode, permutation, try_decode};

/// `n!`. Runtime is O(n).
#[inline]
pub fn factorial(n: usize) -> usize {
    (1..=n).product()
}

/// Binomial coefficient `C(upper, lower)`, zero when `lower < 0` or
/// `lower > upper`.
///
/// Runtime is O(min(lower, upper - lower)).
pub fn binomial(upper: i64, lower: i64) -> usize {
    let value = checked_binomial(upper, lower);
    debug_assert!(value.is_some(), "C({upper}, {lower}) overflows usize");
    value.unwrap_or(usize::MAX)
}

/// [`binomial`], or `None` when the coefficient does not fit a `usize`.
pub fn checked_binomial(upper: i64, lower: i64) -> Option<usize> {
    if lower < 0 || lower > upper {
        return Some(0);
    }
    let lower = lower.min(upper - lower);
    let mut acc: u128 = 1;
    for i in 0..lower {
        // acc == C(upper, i) here, so the division is exact.
        acc = acc.checked_mul((upper - i) as u128)? / (i + 1) as u128;
    }
    usize::try_from(acc).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_small_values() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(4), 24);
        assert_eq!(factorial(6), 720);
    }

    #[test]
    fn binomial_matches_pascal() {
        for n in 0..12i64 {
            for k in 1..n {
                assert_eq!(
                    binomial(n, k),
                    binomial(n - 1, k - 1) + binomial(n - 1, k),
                    "C({n},{k})"
                );
            }
            assert_eq!(binomial(n, 0), 1);
            assert_eq!(binomial(n, n), 1);
        }
    }

    #[test]
    fn binomial_out_of_range_is_zero() {
        assert_eq!(binomial(3, -1), 0);
        assert_eq!(binomial(2, 3), 0);
        assert_eq!(binomial(-1, 0), 0);
    }

    #[test]
    fn checked_binomial_reports_overflow() {
        assert_eq!(checked_binomial(64, 32), Some(1_832_624_140_942_590_534));
        assert_eq!(checked_binomial(70, 35), None);
        assert_eq!(checked_binomial(2, 3), Some(0));
    }
}
