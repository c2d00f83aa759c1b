//! Counting hands by how many cards each rank contributes.
//!
//! A hand's rank signature says how many ranks hold exactly two, exactly
//! three, exactly four and five or more of its cards. Pair, two pair, three
//! of a kind, full house, four of a kind and five of a kind only depend on
//! the signature, so summing signature counts answers every one of them and
//! any conjunction of them.

use num_bigint::BigInt;
use num_traits::Zero;
use tracing::event;

use crate::combinatorics::{Polynomial, binomial, binomial_signed, into_count};
use crate::core::{CategoryFamily, Count, DeckModel, HandCategory};

/// How many ranks of a hand land in each multiplicity class. Ranks with
/// zero or one card aren't recorded.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankSignature {
    /// Ranks with exactly two cards.
    pub pairs: u64,
    /// Ranks with exactly three cards.
    pub trips: u64,
    /// Ranks with exactly four cards.
    pub quads: u64,
    /// Ranks with five or more cards.
    pub quints: u64,
}

impl RankSignature {
    /// Ranks holding two or more cards.
    pub fn at_least_pairs(&self) -> u64 {
        self.pairs + self.trips + self.quads + self.quints
    }

    /// Ranks holding three or more cards.
    pub fn at_least_trips(&self) -> u64 {
        self.trips + self.quads + self.quints
    }

    /// Ranks holding four or more cards.
    pub fn at_least_quads(&self) -> u64 {
        self.quads + self.quints
    }

    /// Ranks holding five or more cards.
    pub fn at_least_quints(&self) -> u64 {
        self.quints
    }

    /// Does a hand with this signature make `category`? `None` for
    /// categories that depend on more than rank multiplicities.
    ///
    /// ```
    /// use deck_census::census::RankSignature;
    /// use deck_census::core::HandCategory;
    ///
    /// // Three of one rank and two of another.
    /// let boat = RankSignature { pairs: 1, trips: 1, ..Default::default() };
    /// assert_eq!(Some(true), boat.matches(HandCategory::FullHouse));
    /// assert_eq!(Some(true), boat.matches(HandCategory::TwoPair));
    /// assert_eq!(Some(false), boat.matches(HandCategory::FourOfKind));
    /// assert_eq!(None, boat.matches(HandCategory::Flush));
    /// ```
    pub fn matches(&self, category: HandCategory) -> Option<bool> {
        match category {
            HandCategory::Pair => Some(self.at_least_pairs() >= 1),
            HandCategory::TwoPair => Some(self.at_least_pairs() >= 2),
            HandCategory::ThreeOfKind => Some(self.at_least_trips() >= 1),
            HandCategory::FullHouse => {
                Some(self.at_least_trips() >= 1 && self.at_least_pairs() >= 2)
            }
            HandCategory::FourOfKind => Some(self.at_least_quads() >= 1),
            HandCategory::FiveOfKind => Some(self.at_least_quints() >= 1),
            HandCategory::Straight | HandCategory::Flush | HandCategory::StraightFlush => None,
        }
    }

    /// Cards the recorded ranks need at a minimum.
    fn min_cards(&self) -> u64 {
        2 * self.pairs + 3 * self.trips + 4 * self.quads + 5 * self.quints
    }
}

/// The single rank generating function raised to the number of ranks,
/// truncated at the hand size.
///
/// The coefficient of `x^k` is the number of `k` card hands. At the hand
/// size that is `total_hands()`.
pub fn rank_generating_function(deck: &DeckModel) -> Polynomial {
    let hand_size = deck.hand_size() as usize;
    Polynomial::choose_from(deck.suit_pool(), 0, deck.hand_size())
        .pow_truncated(deck.num_ranks(), hand_size)
}

/// Coefficient of `x^target` in `a * b`, without building the product.
fn product_coefficient(a: &Polynomial, b: &Polynomial, target: usize) -> BigInt {
    let mut total = BigInt::zero();
    for (i, coeff) in a.terms() {
        if i > target {
            break;
        }
        let other = b.coefficient(target - i);
        if !other.is_zero() {
            total += coeff * other;
        }
    }
    total
}

/// `low^base, low^(base + 1), ..., low^(base + len - 1)`
fn power_run(low: &Polynomial, base: u64, len: usize, max_degree: usize) -> Vec<Polynomial> {
    let mut run = Vec::with_capacity(len);
    let mut current = low.pow_truncated(base, max_degree);
    for _ in 0..len {
        let next = current.mul_truncated(low, max_degree);
        run.push(current);
        current = next;
    }
    run
}

/// Number of hands with at least one rank holding `threshold` or more
/// cards.
///
/// Hands are split by exactly how many ranks `j` reach the threshold:
/// `sum_j C(ranks, j) [x^h] F_hi^j F_lo^(ranks - j)`, where `F_hi` takes
/// `threshold` or more cards from a rank and `F_lo` takes fewer.
///
/// ```
/// use deck_census::census::hands_with_rank_reaching;
/// use deck_census::core::{Count, DeckModel};
///
/// let deck = DeckModel::new(13, 4, 1, 5).unwrap();
/// assert_eq!(Count::from(624_u32), hands_with_rank_reaching(&deck, 4));
/// ```
pub fn hands_with_rank_reaching(deck: &DeckModel, threshold: u64) -> Count {
    let hand_size = deck.hand_size();
    let max_degree = hand_size as usize;
    let ranks = deck.num_ranks();
    let pool = deck.suit_pool();

    if threshold == 0 {
        return deck.total_hands();
    }
    let high = Polynomial::choose_from(pool, threshold, hand_size);
    if high.is_zero() {
        return Count::zero();
    }
    let low = Polynomial::choose_from(pool, 0, threshold - 1);

    let max_j = ranks.min(hand_size / threshold);
    let high_powers = high.powers_truncated(max_j as usize, max_degree);
    // low_powers[i] is low^(ranks - max_j + i)
    let low_powers = power_run(&low, ranks - max_j, max_j as usize + 1, max_degree);

    let mut total = BigInt::zero();
    for j in 1..=max_j {
        let ways = product_coefficient(
            &high_powers[j as usize],
            &low_powers[(max_j - j) as usize],
            max_degree,
        );
        if !ways.is_zero() {
            total += binomial_signed(ranks, j) * ways;
        }
    }
    into_count(
        total,
        format_args!("hands reaching {} of a rank in {}", threshold, deck),
    )
}

/// Every rank signature a deck's hands can have, and how many hands have
/// it.
#[derive(Debug, Clone)]
pub struct PartitionTable {
    signatures: Vec<(RankSignature, Count)>,
}

impl PartitionTable {
    /// Enumerate the signatures for `deck`.
    ///
    /// # Panics
    ///
    /// If the signature counts don't add up to `total_hands()`.
    pub fn new(deck: &DeckModel) -> Self {
        let hand_size = deck.hand_size();
        let max_degree = hand_size as usize;
        let ranks = deck.num_ranks();
        let pool = deck.suit_pool();

        // Generating functions for one rank in each class.
        let low = Polynomial::choose_from(pool, 0, 1);
        let pair = Polynomial::choose_from(pool, 2, 2);
        let trip = Polynomial::choose_from(pool, 3, 3);
        let quad = Polynomial::choose_from(pool, 4, 4);
        let quint = Polynomial::choose_from(pool, 5, hand_size);

        let class_powers = |class: &Polynomial, level: u64| -> Vec<Polynomial> {
            if class.is_zero() {
                vec![Polynomial::one()]
            } else {
                let max_exp = ranks.min(hand_size / level) as usize;
                class.powers_truncated(max_exp, max_degree)
            }
        };
        let pair_powers = class_powers(&pair, 2);
        let trip_powers = class_powers(&trip, 3);
        let quad_powers = class_powers(&quad, 4);
        let quint_powers = class_powers(&quint, 5);

        // At most this many ranks hold two or more cards.
        let max_marked = ranks.min(hand_size / 2);
        // low_powers[i] is low^(ranks - max_marked + i)
        let low_powers = power_run(
            &low,
            ranks - max_marked,
            max_marked as usize + 1,
            max_degree,
        );

        let mut signatures = Vec::new();
        for (quints, quint_part) in quint_powers.iter().enumerate() {
            for (quads, quad_part) in quad_powers.iter().enumerate() {
                let upper = quint_part.mul_truncated(quad_part, max_degree);
                for (trips, trip_part) in trip_powers.iter().enumerate() {
                    let upper = upper.mul_truncated(trip_part, max_degree);
                    for (pairs, pair_part) in pair_powers.iter().enumerate() {
                        let signature = RankSignature {
                            pairs: pairs as u64,
                            trips: trips as u64,
                            quads: quads as u64,
                            quints: quints as u64,
                        };
                        let marked = signature.at_least_pairs();
                        if marked > max_marked || signature.min_cards() > hand_size {
                            continue;
                        }
                        let marked_part = upper.mul_truncated(pair_part, max_degree);
                        let ways = product_coefficient(
                            &marked_part,
                            &low_powers[(max_marked - marked) as usize],
                            max_degree,
                        );
                        if ways.is_zero() {
                            continue;
                        }
                        let count = into_count(
                            ways * BigInt::from(Self::rank_assignments(ranks, &signature)),
                            format_args!("{:?} in {}", signature, deck),
                        );
                        signatures.push((signature, count));
                    }
                }
            }
        }
        signatures.sort();

        let table = Self { signatures };
        let total_hands = deck.total_hands();
        assert_eq!(
            BigInt::from(total_hands.clone()),
            rank_generating_function(deck).coefficient(max_degree),
            "rank generating function disagrees with C(total_cards, hand_size) for {}",
            deck
        );
        assert_eq!(
            total_hands,
            table.total(),
            "rank signatures don't cover every hand of {}",
            deck
        );
        event!(
            tracing::Level::DEBUG,
            signatures = table.signatures.len(),
            "Built partition table for {}",
            deck
        );
        table
    }

    /// Ways to pick which ranks fall in which class.
    fn rank_assignments(ranks: u64, signature: &RankSignature) -> Count {
        let mut remaining = ranks;
        let mut ways = Count::from(1_u32);
        for in_class in [
            signature.quints,
            signature.quads,
            signature.trips,
            signature.pairs,
        ] {
            ways *= binomial(remaining, in_class);
            remaining -= in_class;
        }
        ways
    }

    /// Every signature with a non-zero hand count, in sorted order.
    pub fn signatures(&self) -> &[(RankSignature, Count)] {
        &self.signatures
    }

    /// Every hand, summed over all signatures.
    pub fn total(&self) -> Count {
        self.signatures.iter().map(|(_, count)| count).sum()
    }

    /// Hands whose signature satisfies `predicate`.
    pub fn count_where<F>(&self, predicate: F) -> Count
    where
        F: Fn(&RankSignature) -> bool,
    {
        self.signatures
            .iter()
            .filter(|(signature, _)| predicate(signature))
            .map(|(_, count)| count)
            .sum()
    }

    /// Hands making every one of `categories` at once.
    ///
    /// # Panics
    ///
    /// If any category depends on more than rank multiplicities.
    pub fn count_all(&self, categories: &[HandCategory]) -> Count {
        for category in categories {
            assert_eq!(
                CategoryFamily::RankShape,
                category.family(),
                "{} isn't decided by rank multiplicities",
                category
            );
        }
        self.count_where(|signature| {
            categories
                .iter()
                .all(|category| signature.matches(*category) == Some(true))
        })
    }
}
