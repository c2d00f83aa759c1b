use std::collections::HashMap;
use std::sync::{LazyLock, OnceLock, RwLock};

use num_traits::Zero;
use tracing::{event, trace_span};

use super::exclusivity::{JointCounter, resolve_exclusive};
use super::partition::{PartitionTable, hands_with_rank_reaching};
use super::report::{CensusRow, HandCensus};
use super::runs::{count_flush, count_straight, count_straight_flush};
use crate::core::{CATEGORIES, CategoryFamily, ConfigurationError, Count, DeckModel, HandCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CountKey {
    deck: DeckModel,
    category: HandCategory,
    exclusive: bool,
}

/// Every count computed so far, shared by all analyzers. Counts are pure
/// functions of the key so entries never go stale.
static COUNT_CACHE: LazyLock<RwLock<HashMap<CountKey, Count>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Forget every cached count.
pub fn clear_count_cache() {
    if let Ok(mut cache) = COUNT_CACHE.write() {
        cache.clear();
    }
}

/// Number of cached counts.
pub fn count_cache_len() -> usize {
    COUNT_CACHE.read().map_or(0, |cache| cache.len())
}

/// # DeckAnalyzer
///
/// Answers how many hands of a deck make each category, inclusively (every
/// hand making the pattern) or exclusively (only hands where it's the best
/// pattern along its branch of the containment hierarchy).
///
/// The analyzer never changes after construction and can be shared between
/// threads. Results are memoized in a process wide cache keyed by the deck
/// so a second analyzer for the same deck reuses them.
///
/// ```
/// use deck_census::{Count, DeckAnalyzer};
///
/// let analyzer = DeckAnalyzer::new(13, 4, 1, 5).unwrap();
/// assert_eq!(Count::from(3_744_u32), analyzer.count_full_house(false));
/// assert_eq!(Count::from(1_098_240_u32), analyzer.count_pair(true));
/// ```
#[derive(Debug)]
pub struct DeckAnalyzer {
    deck: DeckModel,
    partitions: OnceLock<PartitionTable>,
}

impl DeckAnalyzer {
    /// Validate a deck with `DeckModel::new` and analyze it.
    pub fn new(
        num_ranks: u64,
        num_suits: u64,
        num_copies: u64,
        hand_size: u64,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self::from_deck(DeckModel::new(
            num_ranks, num_suits, num_copies, hand_size,
        )?))
    }

    pub fn from_deck(deck: DeckModel) -> Self {
        Self {
            deck,
            partitions: OnceLock::new(),
        }
    }

    pub fn deck(&self) -> &DeckModel {
        &self.deck
    }

    pub fn total_hands(&self) -> Count {
        self.deck.total_hands()
    }

    /// The rank signature table, built on first use.
    pub fn partition_table(&self) -> &PartitionTable {
        self.partitions.get_or_init(|| PartitionTable::new(&self.deck))
    }

    /// Hands making `category`. With `exclusive` only hands where no
    /// dominating category is also made are counted.
    pub fn count(&self, category: HandCategory, exclusive: bool) -> Count {
        let key = CountKey {
            deck: self.deck,
            category,
            exclusive,
        };
        if let Ok(cache) = COUNT_CACHE.read()
            && let Some(count) = cache.get(&key)
        {
            event!(tracing::Level::TRACE, %category, exclusive, "Cache hit");
            return count.clone();
        }

        let _span = trace_span!("count", %category, exclusive).entered();
        let count = if exclusive {
            resolve_exclusive(self, category)
        } else {
            self.compute_inclusive(category)
        };
        event!(
            tracing::Level::TRACE,
            %category,
            exclusive,
            %count,
            "Counted hands for {}",
            self.deck
        );

        if let Ok(mut cache) = COUNT_CACHE.write() {
            cache.insert(key, count.clone());
        }
        count
    }

    fn compute_inclusive(&self, category: HandCategory) -> Count {
        if !category.is_possible(&self.deck) {
            return Count::zero();
        }
        match category {
            HandCategory::Pair => hands_with_rank_reaching(&self.deck, 2),
            HandCategory::ThreeOfKind => hands_with_rank_reaching(&self.deck, 3),
            HandCategory::FourOfKind => hands_with_rank_reaching(&self.deck, 4),
            HandCategory::FiveOfKind => hands_with_rank_reaching(&self.deck, 5),
            HandCategory::TwoPair | HandCategory::FullHouse => {
                self.partition_table().count_all(&[category])
            }
            HandCategory::Straight => count_straight(&self.deck),
            HandCategory::Flush => count_flush(&self.deck),
            HandCategory::StraightFlush => count_straight_flush(&self.deck),
        }
    }

    pub fn count_pair(&self, exclusive: bool) -> Count {
        self.count(HandCategory::Pair, exclusive)
    }

    pub fn count_two_pair(&self, exclusive: bool) -> Count {
        self.count(HandCategory::TwoPair, exclusive)
    }

    pub fn count_three_of_kind(&self, exclusive: bool) -> Count {
        self.count(HandCategory::ThreeOfKind, exclusive)
    }

    pub fn count_full_house(&self, exclusive: bool) -> Count {
        self.count(HandCategory::FullHouse, exclusive)
    }

    pub fn count_straight(&self, exclusive: bool) -> Count {
        self.count(HandCategory::Straight, exclusive)
    }

    pub fn count_flush(&self, exclusive: bool) -> Count {
        self.count(HandCategory::Flush, exclusive)
    }

    pub fn count_four_of_kind(&self, exclusive: bool) -> Count {
        self.count(HandCategory::FourOfKind, exclusive)
    }

    pub fn count_straight_flush(&self, exclusive: bool) -> Count {
        self.count(HandCategory::StraightFlush, exclusive)
    }

    pub fn count_five_of_kind(&self, exclusive: bool) -> Count {
        self.count(HandCategory::FiveOfKind, exclusive)
    }

    fn row(&self, category: HandCategory) -> CensusRow {
        CensusRow::new(
            category,
            self.count(category, false),
            self.count(category, true),
        )
    }

    /// Inclusive and exclusive counts for every category.
    pub fn census(&self) -> HandCensus {
        let _span = trace_span!("census", deck = %self.deck).entered();
        let rows = CATEGORIES.iter().map(|c| self.row(*c)).collect();
        HandCensus::new(self.deck, self.total_hands(), rows)
    }
}

#[cfg(feature = "parallel")]
mod par {
    use rayon::prelude::*;

    use super::*;

    impl DeckAnalyzer {
        /// `census` with the categories counted on the rayon pool.
        pub fn census_par(&self) -> HandCensus {
            let _span = trace_span!("census_par", deck = %self.deck).entered();
            // Build the shared table once up front instead of racing for it.
            self.partition_table();
            let rows = CATEGORIES.par_iter().map(|c| self.row(*c)).collect();
            HandCensus::new(self.deck, self.total_hands(), rows)
        }
    }
}

impl From<DeckModel> for DeckAnalyzer {
    fn from(deck: DeckModel) -> Self {
        Self::from_deck(deck)
    }
}

impl JointCounter for DeckAnalyzer {
    fn count_inclusive(&self, category: HandCategory) -> Count {
        self.count(category, false)
    }

    /// # Panics
    ///
    /// For conjunctions involving straights or flushes. The containment
    /// hierarchy never asks for one.
    fn count_joint(&self, categories: &[HandCategory]) -> Count {
        assert!(
            categories
                .iter()
                .all(|c| c.family() == CategoryFamily::RankShape),
            "no joint count for {:?}",
            categories
        );
        if categories.iter().any(|c| !c.is_possible(&self.deck)) {
            return Count::zero();
        }
        self.partition_table().count_all(categories)
    }
}
