//! Exact combinatorics.
//!
//! Everything here works on arbitrary precision integers. Counts for decks
//! with many copies or large hands grow far past 64 bits.

use std::fmt::Display;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

mod polynomial;
pub use self::polynomial::Polynomial;

/// `n` choose `k`. Zero when `k > n`.
///
/// ```
/// use deck_census::combinatorics::binomial;
/// use num_bigint::BigUint;
///
/// assert_eq!(BigUint::from(2_598_960_u32), binomial(52, 5));
/// assert_eq!(BigUint::from(0_u32), binomial(4, 5));
/// ```
pub fn binomial(n: u64, k: u64) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    // C(n, k) == C(n, n - k), walk the shorter side.
    let k = k.min(n - k);
    let mut result = BigUint::one();
    for i in 0..k {
        // Every prefix product is itself a binomial so the division is exact.
        result *= n - i;
        result /= i + 1;
    }
    result
}

/// Signed binomial for inclusion-exclusion sums.
pub fn binomial_signed(n: u64, k: u64) -> BigInt {
    BigInt::from(binomial(n, k))
}

/// Turn a signed intermediate into a count.
///
/// # Panics
///
/// When `value` is negative. Inclusion-exclusion sums are never negative when
/// they are correct, so a negative value is a bug and not something to clamp.
pub fn into_count(value: BigInt, context: impl Display) -> BigUint {
    match value.to_biguint() {
        Some(count) => count,
        None => panic!("negative count {} while computing {}", value, context),
    }
}

/// Number of hands of `hand_size` cards drawn from `total_cards` that hold at
/// least one card from each of `cells` disjoint groups of `cell_size` cards.
///
/// `sum_t (-1)^t C(cells, t) C(total_cards - t * cell_size, hand_size)`
///
/// ```
/// use deck_census::combinatorics::cover_count;
/// use num_bigint::BigInt;
///
/// // One card from each of five ranks in a 52 card deck, five card hands.
/// assert_eq!(BigInt::from(1024), cover_count(5, 4, 52, 5));
/// ```
pub fn cover_count(cells: u64, cell_size: u64, total_cards: u64, hand_size: u64) -> BigInt {
    let mut total = BigInt::zero();
    for t in 0..=cells {
        let Some(remaining) = t
            .checked_mul(cell_size)
            .and_then(|removed| total_cards.checked_sub(removed))
        else {
            break;
        };
        if remaining < hand_size {
            // Only fewer cards left from here on.
            break;
        }
        let term = binomial_signed(cells, t) * binomial_signed(remaining, hand_size);
        if t % 2 == 0 {
            total += term;
        } else {
            total -= term;
        }
    }
    total
}
