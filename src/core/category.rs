use std::fmt;
use std::sync::LazyLock;

use super::deck::DeckModel;

/// The patterns that can be counted.
///
/// Categories aren't a ranking. A hand can be a flush and a pair at the
/// same time, and it is counted in both.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    /// At least two cards of one rank.
    Pair = 0,
    /// At least two cards in each of two different ranks.
    TwoPair = 1,
    /// At least three cards of one rank.
    ThreeOfKind = 2,
    /// At least three cards of one rank and two of another.
    FullHouse = 3,
    /// One card from each of `pattern_len` consecutive ranks.
    Straight = 4,
    /// At least `pattern_len` cards of one suit.
    Flush = 5,
    /// At least four cards of one rank.
    FourOfKind = 6,
    /// A straight where every card is the same suit.
    StraightFlush = 7,
    /// At least five cards of one rank.
    FiveOfKind = 8,
}

/// Every category, in the order the counts are usually displayed.
pub const CATEGORIES: [HandCategory; 9] = [
    HandCategory::Pair,
    HandCategory::TwoPair,
    HandCategory::ThreeOfKind,
    HandCategory::FullHouse,
    HandCategory::Straight,
    HandCategory::Flush,
    HandCategory::FourOfKind,
    HandCategory::StraightFlush,
    HandCategory::FiveOfKind,
];

/// What a category looks at in a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFamily {
    /// Only how many cards each rank contributes.
    RankShape,
    /// Rank adjacency or suit uniformity.
    RunFlush,
}

impl HandCategory {
    /// Every category, in display order.
    pub const ALL: [HandCategory; 9] = CATEGORIES;

    /// Get all of the categories.
    pub fn categories() -> [HandCategory; 9] {
        CATEGORIES
    }

    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfKind => "Three of a Kind",
            HandCategory::FullHouse => "Full House",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FourOfKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::FiveOfKind => "Five of a Kind",
        }
    }

    pub fn family(&self) -> CategoryFamily {
        match self {
            HandCategory::Straight | HandCategory::Flush | HandCategory::StraightFlush => {
                CategoryFamily::RunFlush
            }
            _ => CategoryFamily::RankShape,
        }
    }

    /// Can any hand dealt from this deck make this category?
    ///
    /// ```
    /// use deck_census::core::{DeckModel, HandCategory};
    ///
    /// let standard = DeckModel::new(13, 4, 1, 5).unwrap();
    /// assert!(!HandCategory::FiveOfKind.is_possible(&standard));
    ///
    /// let pinochle = DeckModel::new(6, 4, 2, 5).unwrap();
    /// assert!(HandCategory::FiveOfKind.is_possible(&pinochle));
    /// ```
    pub fn is_possible(&self, deck: &DeckModel) -> bool {
        let hand_size = deck.hand_size();
        let ranks = deck.num_ranks();
        let pool = deck.suit_pool();
        let pattern_len = deck.pattern_len();

        match self {
            HandCategory::Pair => hand_size >= 2 && pool >= 2,
            HandCategory::TwoPair => hand_size >= 4 && ranks >= 2 && pool >= 2,
            HandCategory::ThreeOfKind => hand_size >= 3 && pool >= 3,
            HandCategory::FullHouse => hand_size >= 5 && ranks >= 2 && pool >= 3,
            HandCategory::FourOfKind => hand_size >= 4 && pool >= 4,
            HandCategory::FiveOfKind => hand_size >= 5 && pool >= 5,
            HandCategory::Straight | HandCategory::StraightFlush => {
                hand_size >= pattern_len && ranks >= pattern_len
            }
            HandCategory::Flush => hand_size >= pattern_len && deck.suit_line() >= pattern_len,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `(better, worse)`: every hand making `better` also makes `worse`.
pub const CONTAINMENT_EDGES: [(HandCategory, HandCategory); 8] = [
    (HandCategory::FiveOfKind, HandCategory::FourOfKind),
    (HandCategory::FourOfKind, HandCategory::ThreeOfKind),
    (HandCategory::ThreeOfKind, HandCategory::Pair),
    (HandCategory::FullHouse, HandCategory::ThreeOfKind),
    (HandCategory::FullHouse, HandCategory::TwoPair),
    (HandCategory::TwoPair, HandCategory::Pair),
    (HandCategory::StraightFlush, HandCategory::Straight),
    (HandCategory::StraightFlush, HandCategory::Flush),
];

/// The containment hierarchy as an adjacency table.
///
/// Built once from `CONTAINMENT_EDGES` and never changed afterwards. Use the
/// shared `CONTAINMENT` instance.
#[derive(Debug, Clone)]
pub struct ContainmentGraph {
    direct: [Vec<HandCategory>; 9],
    transitive: [Vec<HandCategory>; 9],
}

/// The shared containment hierarchy.
pub static CONTAINMENT: LazyLock<ContainmentGraph> =
    LazyLock::new(|| ContainmentGraph::new(&CONTAINMENT_EDGES));

impl ContainmentGraph {
    /// Build the graph from `(better, worse)` edges.
    ///
    /// # Panics
    ///
    /// If the edges contain a cycle.
    pub fn new(edges: &[(HandCategory, HandCategory)]) -> Self {
        let mut direct: [Vec<HandCategory>; 9] = Default::default();
        for (better, worse) in edges {
            direct[worse.index()].push(*better);
        }

        let mut transitive: [Vec<HandCategory>; 9] = Default::default();
        for category in CATEGORIES {
            // Walk up from each category collecting everything above it.
            let mut stack = direct[category.index()].clone();
            let mut seen = [false; 9];
            while let Some(better) = stack.pop() {
                assert!(
                    better != category,
                    "containment cycle through {:?}",
                    category
                );
                if !seen[better.index()] {
                    seen[better.index()] = true;
                    stack.extend(direct[better.index()].iter().copied());
                }
            }
            transitive[category.index()] = CATEGORIES
                .iter()
                .copied()
                .filter(|c| seen[c.index()])
                .collect();
        }

        for list in direct.iter_mut() {
            list.sort();
        }

        Self { direct, transitive }
    }

    /// Categories with an edge straight into `category`.
    pub fn direct_dominators(&self, category: HandCategory) -> &[HandCategory] {
        &self.direct[category.index()]
    }

    /// Every category that implies `category`, directly or through others.
    ///
    /// ```
    /// use deck_census::core::{CONTAINMENT, HandCategory};
    ///
    /// assert_eq!(
    ///     &[
    ///         HandCategory::FullHouse,
    ///         HandCategory::FourOfKind,
    ///         HandCategory::FiveOfKind
    ///     ],
    ///     CONTAINMENT.dominators(HandCategory::ThreeOfKind)
    /// );
    /// ```
    pub fn dominators(&self, category: HandCategory) -> &[HandCategory] {
        &self.transitive[category.index()]
    }

    /// Does every `better` hand also make `worse`?
    pub fn dominates(&self, better: HandCategory, worse: HandCategory) -> bool {
        self.transitive[worse.index()].contains(&better)
    }

    /// Nothing dominates a leaf, so its exclusive and inclusive counts agree.
    pub fn is_leaf(&self, category: HandCategory) -> bool {
        self.transitive[category.index()].is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_dominators() {
        assert_eq!(
            &[HandCategory::TwoPair, HandCategory::ThreeOfKind],
            CONTAINMENT.direct_dominators(HandCategory::Pair)
        );
        assert_eq!(
            &[HandCategory::StraightFlush],
            CONTAINMENT.direct_dominators(HandCategory::Flush)
        );
        assert!(
            CONTAINMENT
                .direct_dominators(HandCategory::FiveOfKind)
                .is_empty()
        );
    }

    #[test]
    fn test_transitive_dominators() {
        assert_eq!(
            &[
                HandCategory::TwoPair,
                HandCategory::ThreeOfKind,
                HandCategory::FullHouse,
                HandCategory::FourOfKind,
                HandCategory::FiveOfKind
            ],
            CONTAINMENT.dominators(HandCategory::Pair)
        );
        assert_eq!(
            &[HandCategory::FullHouse],
            CONTAINMENT.dominators(HandCategory::TwoPair)
        );
        assert_eq!(
            &[HandCategory::FiveOfKind],
            CONTAINMENT.dominators(HandCategory::FourOfKind)
        );
    }

    #[test]
    fn test_dominates() {
        assert!(CONTAINMENT.dominates(HandCategory::FiveOfKind, HandCategory::Pair));
        assert!(CONTAINMENT.dominates(HandCategory::StraightFlush, HandCategory::Flush));
        assert!(!CONTAINMENT.dominates(HandCategory::Flush, HandCategory::StraightFlush));
        assert!(!CONTAINMENT.dominates(HandCategory::FullHouse, HandCategory::FourOfKind));
        assert!(!CONTAINMENT.dominates(HandCategory::Straight, HandCategory::Pair));
    }

    #[test]
    fn test_leaves() {
        let leaves: Vec<HandCategory> = CATEGORIES
            .iter()
            .copied()
            .filter(|c| CONTAINMENT.is_leaf(*c))
            .collect();
        assert_eq!(
            vec![
                HandCategory::FullHouse,
                HandCategory::StraightFlush,
                HandCategory::FiveOfKind
            ],
            leaves
        );
    }

    #[test]
    #[should_panic(expected = "containment cycle")]
    fn test_cycle_panics() {
        ContainmentGraph::new(&[
            (HandCategory::Pair, HandCategory::TwoPair),
            (HandCategory::TwoPair, HandCategory::Pair),
        ]);
    }

    #[test]
    fn test_families() {
        assert_eq!(CategoryFamily::RunFlush, HandCategory::Flush.family());
        assert_eq!(CategoryFamily::RankShape, HandCategory::FullHouse.family());
    }

    #[test]
    fn test_is_possible() {
        let tiny = DeckModel::new(4, 1, 1, 3).unwrap();
        for category in CATEGORIES {
            assert!(!category.is_possible(&tiny), "{category} possible");
        }

        let short = DeckModel::new(9, 4, 1, 4).unwrap();
        assert!(HandCategory::TwoPair.is_possible(&short));
        assert!(HandCategory::FourOfKind.is_possible(&short));
        assert!(!HandCategory::FullHouse.is_possible(&short));
        assert!(!HandCategory::Straight.is_possible(&short));
    }
}
