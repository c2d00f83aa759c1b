//! Straights, flushes and straight flushes.
//!
//! All three are "some pattern of `pattern_len` is fully covered" questions,
//! answered with inclusion-exclusion over the set of runs or suits that are
//! covered. Runs overlap, so instead of walking every subset of runs the
//! signed sum is folded into a polynomial over the number of ranks the
//! chosen runs span.

use std::collections::VecDeque;

use num_bigint::BigInt;
use num_traits::Zero;
use tracing::event;

use crate::combinatorics::{Polynomial, binomial, binomial_signed, cover_count, into_count};
use crate::core::{Count, DeckModel, HandCategory};

/// Signed run weights.
///
/// The coefficient of `x^u` is `sum (-1)^(|R| + 1)` over every non-empty set
/// `R` of runs whose ranks together number exactly `u`. Spans larger than
/// the hand size are dropped since no hand can cover them.
///
/// ```
/// use deck_census::census::run_weights;
/// use deck_census::core::DeckModel;
/// use num_bigint::BigInt;
///
/// // Ten single runs of five ranks.
/// let weights = run_weights(&DeckModel::new(13, 4, 1, 5).unwrap());
/// assert_eq!(BigInt::from(10), weights.coefficient(5));
/// ```
pub fn run_weights(deck: &DeckModel) -> Polynomial {
    let ranks = deck.num_ranks();
    let pattern_len = deck.pattern_len();
    let hand_size = deck.hand_size() as usize;
    if ranks < pattern_len {
        return Polynomial::zero();
    }

    // When wrapping, the ace is placed on both ends of the line, so the
    // first and the last run share a rank the line doesn't know about.
    let wraps = deck.wraps();
    let line = if wraps { ranks + 1 } else { ranks };
    let num_windows = (line - pattern_len + 1) as usize;
    let window = pattern_len as usize;
    // One extra degree so a span that loses the doubled ace isn't cut early.
    let max_degree = hand_size + 1;

    // recent[k] holds the signed weights of the run sets whose highest run
    // starts k + 1 before the current one, split by whether the set holds
    // the first run. Sets starting a whole run or more back all gain exactly
    // `window` ranks, so they are kept summed in `far`.
    let mut recent: VecDeque<[Polynomial; 2]> = VecDeque::with_capacity(window);
    let mut far = [Polynomial::zero(), Polynomial::zero()];
    let mut weights = Polynomial::zero();
    for start in 0..num_windows {
        if recent.len() == window
            && let Some([without_first, with_first]) = recent.pop_back()
        {
            far[0] += &without_first;
            far[1] += &with_first;
        }

        let mut entry = [Polynomial::zero(), Polynomial::zero()];
        entry[usize::from(start == 0)] += &Polynomial::monomial(1, window).truncated(max_degree);
        for (with_first, sets) in far.iter().enumerate() {
            if !sets.is_zero() {
                entry[with_first] -= &sets.shifted_up(window).truncated(max_degree);
            }
        }
        for (back, prior) in recent.iter().enumerate() {
            // Ranks this run adds past the end of the earlier one.
            let added = back + 1;
            for (with_first, sets) in prior.iter().enumerate() {
                if !sets.is_zero() {
                    entry[with_first] -= &sets.shifted_up(added).truncated(max_degree);
                }
            }
        }

        weights += &entry[0];
        if wraps && start + 1 == num_windows {
            weights += &entry[1].shifted_down(1);
        } else {
            weights += &entry[1];
        }
        recent.push_front(entry);
    }
    weights.truncated(hand_size)
}

/// Hands holding at least one card in every rank of some run.
pub fn count_straight(deck: &DeckModel) -> Count {
    if !HandCategory::Straight.is_possible(deck) {
        return Count::zero();
    }
    let pool = deck.suit_pool();
    if deck.hand_size() == deck.pattern_len() {
        // The hand is exactly one card from each rank of one run.
        return Count::from(deck.num_runs()) * Count::from(pool).pow(deck.pattern_len() as u32);
    }

    let weights = run_weights(deck);
    let mut total = BigInt::zero();
    for (span, weight) in weights.terms() {
        total += weight * cover_count(span as u64, pool, deck.total_cards(), deck.hand_size());
    }
    into_count(total, format_args!("straights in {}", deck))
}

/// Hands holding `pattern_len` or more cards of one suit.
///
/// Inclusion-exclusion over the suits reaching the length:
/// `sum_j (-1)^(j + 1) C(suits, j) [x^h] G^j (1 + x)^((suits - j) * line)`
/// where `G` takes `pattern_len` or more of the `line` cards in a suit.
pub fn count_flush(deck: &DeckModel) -> Count {
    if !HandCategory::Flush.is_possible(deck) {
        return Count::zero();
    }
    let suits = deck.num_suits();
    let line = deck.suit_line();
    let hand_size = deck.hand_size();
    let pattern_len = deck.pattern_len();
    if hand_size == pattern_len {
        return Count::from(suits) * binomial(line, pattern_len);
    }

    let suited = Polynomial::choose_from(line, pattern_len, hand_size);
    let mut total = BigInt::zero();
    for j in 1..=suits.min(hand_size / pattern_len) {
        let reaching = suited.pow_truncated(j, hand_size as usize);
        let rest = (suits - j) * line;
        let mut ways = BigInt::zero();
        for (taken, coeff) in reaching.terms() {
            ways += coeff * binomial_signed(rest, hand_size - taken as u64);
        }
        let term = binomial_signed(suits, j) * ways;
        if j % 2 == 1 {
            total += term;
        } else {
            total -= term;
        }
    }
    into_count(total, format_args!("flushes in {}", deck))
}

/// Hands holding every rank of some run inside a single suit.
///
/// Each suit's run weights are independent, so the weights for `j` chosen
/// suits are the `j`th power of the single suit weights, and a span covers
/// cells of `num_copies` cards each.
pub fn count_straight_flush(deck: &DeckModel) -> Count {
    if !HandCategory::StraightFlush.is_possible(deck) {
        return Count::zero();
    }
    let suits = deck.num_suits();
    let copies = deck.num_copies();
    let hand_size = deck.hand_size();
    let pattern_len = deck.pattern_len();
    if hand_size == pattern_len {
        return Count::from(suits)
            * Count::from(deck.num_runs())
            * Count::from(copies).pow(pattern_len as u32);
    }

    let weights = run_weights(deck);
    let mut total = BigInt::zero();
    for j in 1..=suits.min(hand_size / pattern_len) {
        let chosen = weights.pow_truncated(j, hand_size as usize);
        let mut ways = BigInt::zero();
        for (span, weight) in chosen.terms() {
            ways += weight * cover_count(span as u64, copies, deck.total_cards(), hand_size);
        }
        let term = binomial_signed(suits, j) * ways;
        if j % 2 == 1 {
            total += term;
        } else {
            total -= term;
        }
    }
    event!(
        tracing::Level::TRACE,
        spans = weights.coeffs().len(),
        "Counted straight flushes for {}",
        deck
    );
    into_count(total, format_args!("straight flushes in {}", deck))
}
