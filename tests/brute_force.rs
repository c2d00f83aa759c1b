//! Every count checked against dealing out every hand of a tiny deck.

use deck_census::core::{CONTAINMENT, DeckModelBuilder, StraightPolicy};
use deck_census::{Count, DeckAnalyzer, DeckModel, HandCategory};

/// Walks every `size` element subset of `0..len` in lexicographic order.
struct SubsetIter {
    idx: Vec<usize>,
    len: usize,
    done: bool,
}

impl SubsetIter {
    fn new(len: usize, size: usize) -> Self {
        Self {
            idx: (0..size).collect(),
            len,
            done: size > len,
        }
    }
}

impl Iterator for SubsetIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let current = self.idx.clone();

        // Find the rightmost index that can still move forward.
        let size = self.idx.len();
        let mut level = size;
        while level > 0 && self.idx[level - 1] == self.len - size + level - 1 {
            level -= 1;
        }
        if level == 0 {
            self.done = true;
        } else {
            self.idx[level - 1] += 1;
            for i in level..size {
                self.idx[i] = self.idx[i - 1] + 1;
            }
        }
        Some(current)
    }
}

fn has_run(deck: &DeckModel, present: &[bool]) -> bool {
    let ranks = deck.num_ranks() as usize;
    let len = deck.pattern_len() as usize;
    if ranks < len {
        return false;
    }
    let linear = (0..=ranks - len).any(|start| present[start..start + len].iter().all(|p| *p));
    let wrapped = deck.straight_policy() == StraightPolicy::AceLow
        && ranks > len
        && present[ranks - 1]
        && present[..len - 1].iter().all(|p| *p);
    linear || wrapped
}

/// The categories one hand of `(rank, suit)` cards makes.
fn categories_made(deck: &DeckModel, hand: &[(usize, usize)]) -> Vec<HandCategory> {
    let ranks = deck.num_ranks() as usize;
    let suits = deck.num_suits() as usize;
    let mut rank_counts = vec![0_usize; ranks];
    let mut suit_counts = vec![0_usize; suits];
    let mut suited = vec![vec![false; ranks]; suits];
    for (rank, suit) in hand {
        rank_counts[*rank] += 1;
        suit_counts[*suit] += 1;
        suited[*suit][*rank] = true;
    }
    let reaching = |t: usize| rank_counts.iter().filter(|c| **c >= t).count();
    let present: Vec<bool> = rank_counts.iter().map(|c| *c > 0).collect();

    let made = [
        (HandCategory::Pair, reaching(2) >= 1),
        (HandCategory::TwoPair, reaching(2) >= 2),
        (HandCategory::ThreeOfKind, reaching(3) >= 1),
        (
            HandCategory::FullHouse,
            reaching(3) >= 1 && reaching(2) >= 2,
        ),
        (HandCategory::Straight, has_run(deck, &present)),
        (
            HandCategory::Flush,
            suit_counts
                .iter()
                .any(|c| *c as u64 >= deck.pattern_len()),
        ),
        (HandCategory::FourOfKind, reaching(4) >= 1),
        (
            HandCategory::StraightFlush,
            suited.iter().any(|line| has_run(deck, line)),
        ),
        (HandCategory::FiveOfKind, reaching(5) >= 1),
    ];
    made.iter()
        .filter(|(_, is_made)| *is_made)
        .map(|(category, _)| *category)
        .collect()
}

/// (inclusive, exclusive) per category, by enumeration.
fn enumerate(deck: &DeckModel) -> Vec<(HandCategory, u64, u64)> {
    let mut cards = vec![];
    for rank in 0..deck.num_ranks() as usize {
        for suit in 0..deck.num_suits() as usize {
            for _ in 0..deck.num_copies() {
                cards.push((rank, suit));
            }
        }
    }

    let mut counts: Vec<(HandCategory, u64, u64)> =
        HandCategory::ALL.iter().map(|c| (*c, 0, 0)).collect();
    let mut hands = 0_u64;
    for subset in SubsetIter::new(cards.len(), deck.hand_size() as usize) {
        hands += 1;
        let hand: Vec<(usize, usize)> = subset.iter().map(|i| cards[*i]).collect();
        let made = categories_made(deck, &hand);
        for (category, inclusive, exclusive) in counts.iter_mut() {
            if !made.contains(category) {
                continue;
            }
            *inclusive += 1;
            if !CONTAINMENT
                .dominators(*category)
                .iter()
                .any(|d| made.contains(d))
            {
                *exclusive += 1;
            }
        }
    }
    assert_eq!(deck.total_hands(), Count::from(hands));
    counts
}

fn deck(
    ranks: u64,
    suits: u64,
    copies: u64,
    hand_size: u64,
    pattern_len: u64,
    straight_policy: StraightPolicy,
) -> DeckModel {
    DeckModelBuilder::default()
        .num_ranks(ranks)
        .num_suits(suits)
        .num_copies(copies)
        .hand_size(hand_size)
        .pattern_len(pattern_len)
        .straight_policy(straight_policy)
        .build()
        .unwrap()
}

fn check(deck: DeckModel) {
    let analyzer = DeckAnalyzer::from_deck(deck);
    for (category, inclusive, exclusive) in enumerate(&deck) {
        assert_eq!(
            Count::from(inclusive),
            analyzer.count(category, false),
            "inclusive {category} in {deck}"
        );
        assert_eq!(
            Count::from(exclusive),
            analyzer.count(category, true),
            "exclusive {category} in {deck}"
        );
    }
}

#[test]
fn test_subset_iter() {
    let all: Vec<Vec<usize>> = SubsetIter::new(4, 2).collect();
    assert_eq!(
        vec![
            vec![0, 1],
            vec![0, 2],
            vec![0, 3],
            vec![1, 2],
            vec![1, 3],
            vec![2, 3]
        ],
        all
    );
    assert_eq!(1, SubsetIter::new(3, 3).count());
    assert_eq!(0, SubsetIter::new(2, 3).count());
}

#[test_log::test]
fn test_two_copies_seven_cards() {
    check(deck(6, 2, 2, 7, 5, StraightPolicy::AceLow));
}

#[test]
fn test_three_suits() {
    check(deck(7, 3, 1, 6, 5, StraightPolicy::AceLow));
    check(deck(5, 3, 1, 7, 5, StraightPolicy::AceLow));
}

#[test]
fn test_nearly_whole_deck() {
    check(deck(6, 2, 1, 10, 5, StraightPolicy::AceLow));
}

#[test]
fn test_linear_runs() {
    check(deck(7, 2, 1, 6, 5, StraightPolicy::Linear));
}

#[test]
fn test_short_runs() {
    check(deck(6, 3, 2, 4, 3, StraightPolicy::AceLow));
    check(deck(5, 2, 2, 12, 3, StraightPolicy::AceLow));
}

#[test]
fn test_hand_is_one_run() {
    check(deck(6, 2, 2, 5, 5, StraightPolicy::AceLow));
}

#[test]
fn test_five_of_a_kind() {
    // Six cards per rank, so a rank can hold five.
    check(deck(3, 2, 3, 7, 3, StraightPolicy::AceLow));
}

#[test]
fn test_single_suit() {
    // Every hand is a flush.
    check(deck(4, 1, 4, 8, 3, StraightPolicy::AceLow));
}

#[test]
fn test_single_card_runs() {
    check(deck(2, 1, 1, 1, 1, StraightPolicy::AceLow));
    check(deck(3, 2, 1, 2, 1, StraightPolicy::AceLow));
    check(deck(4, 2, 2, 3, 1, StraightPolicy::AceLow));
}

#[test]
fn test_whole_deck() {
    check(deck(4, 2, 2, 16, 2, StraightPolicy::AceLow));
}
