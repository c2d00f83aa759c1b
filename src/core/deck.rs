use std::fmt;

use crate::combinatorics::binomial;

use super::Count;
use super::error::ConfigurationError;

/// Default number of cards in a straight run or a flush.
pub const DEFAULT_PATTERN_LEN: u64 = 5;

/// Default number of cards in a hand when a builder doesn't set one.
pub const DEFAULT_HAND_SIZE: u64 = 5;

/// How ranks are allowed to chain together into a straight.
///
/// Which runs count as straights is a property of the game being modeled.
/// `DeckModel::new` picks `AceLow`, use `DeckModelBuilder` for anything else.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StraightPolicy {
    /// Ranks form a line. The lowest rank is never adjacent to the highest.
    Linear,
    /// The highest rank can also play below the lowest rank, the way an
    /// ace plays in A-2-3-4-5. When the deck has exactly `pattern_len`
    /// ranks the wrapped run is the same set of ranks as the only linear
    /// run, and a one card run is just the highest rank, so neither adds
    /// an extra run.
    AceLow,
}

/// Well known deck shapes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckPreset {
    /// 13 ranks, 4 suits, 1 copy. 52 cards.
    Standard,
    /// 6 ranks (9 through ace), 4 suits, 2 copies. 48 cards.
    Pinochle,
    /// 9 ranks (6 through ace), 4 suits, 1 copy. 36 cards.
    ShortDeck,
    /// Two standard decks shuffled together. 104 cards.
    DoubleDeck,
}

const PRESETS: [DeckPreset; 4] = [
    DeckPreset::Standard,
    DeckPreset::Pinochle,
    DeckPreset::ShortDeck,
    DeckPreset::DoubleDeck,
];

impl DeckPreset {
    /// All the presets.
    pub fn presets() -> [DeckPreset; 4] {
        PRESETS
    }

    /// (ranks, suits, copies) for this preset.
    pub fn shape(&self) -> (u64, u64, u64) {
        match self {
            DeckPreset::Standard => (13, 4, 1),
            DeckPreset::Pinochle => (6, 4, 2),
            DeckPreset::ShortDeck => (9, 4, 1),
            DeckPreset::DoubleDeck => (13, 4, 2),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeckPreset::Standard => "Standard Deck",
            DeckPreset::Pinochle => "Pinochle Deck",
            DeckPreset::ShortDeck => "Short-Deck Poker",
            DeckPreset::DoubleDeck => "Double Deck",
        }
    }

    /// Find the preset with exactly this shape, if there is one.
    pub fn from_shape(num_ranks: u64, num_suits: u64, num_copies: u64) -> Option<DeckPreset> {
        PRESETS
            .iter()
            .copied()
            .find(|p| p.shape() == (num_ranks, num_suits, num_copies))
    }
}

/// A validated deck and hand configuration.
///
/// Every card is a physical object: two copies of the same rank and suit
/// are different cards when counting hands, but identical when deciding
/// what pattern a hand makes.
///
/// ```
/// use deck_census::core::{Count, DeckModel};
///
/// let deck = DeckModel::new(13, 4, 1, 5).unwrap();
/// assert_eq!(52, deck.total_cards());
/// assert_eq!(4, deck.suit_pool());
/// assert_eq!(Count::from(2_598_960_u32), deck.total_hands());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeckModel {
    num_ranks: u64,
    num_suits: u64,
    num_copies: u64,
    hand_size: u64,
    pattern_len: u64,
    straight_policy: StraightPolicy,
    total_cards: u64,
}

impl DeckModel {
    /// Create a deck model with `StraightPolicy::AceLow` and five card
    /// straights and flushes. Use `DeckModelBuilder` to choose differently.
    pub fn new(
        num_ranks: u64,
        num_suits: u64,
        num_copies: u64,
        hand_size: u64,
    ) -> Result<Self, ConfigurationError> {
        DeckModelBuilder::default()
            .num_ranks(num_ranks)
            .num_suits(num_suits)
            .num_copies(num_copies)
            .hand_size(hand_size)
            .straight_policy(StraightPolicy::AceLow)
            .pattern_len(DEFAULT_PATTERN_LEN)
            .build()
    }

    /// Create a deck model from one of the well known deck shapes.
    ///
    /// ```
    /// use deck_census::core::{DeckModel, DeckPreset};
    ///
    /// let pinochle = DeckModel::preset(DeckPreset::Pinochle, 5).unwrap();
    /// assert_eq!(48, pinochle.total_cards());
    /// ```
    pub fn preset(preset: DeckPreset, hand_size: u64) -> Result<Self, ConfigurationError> {
        let (num_ranks, num_suits, num_copies) = preset.shape();
        Self::new(num_ranks, num_suits, num_copies, hand_size)
    }

    pub fn num_ranks(&self) -> u64 {
        self.num_ranks
    }

    pub fn num_suits(&self) -> u64 {
        self.num_suits
    }

    pub fn num_copies(&self) -> u64 {
        self.num_copies
    }

    pub fn hand_size(&self) -> u64 {
        self.hand_size
    }

    /// Cards needed for a straight run or a flush.
    pub fn pattern_len(&self) -> u64 {
        self.pattern_len
    }

    pub fn straight_policy(&self) -> StraightPolicy {
        self.straight_policy
    }

    /// Number of physically distinct cards sharing one rank.
    pub fn suit_pool(&self) -> u64 {
        self.num_suits * self.num_copies
    }

    /// Number of physically distinct cards sharing one suit.
    pub fn suit_line(&self) -> u64 {
        self.num_ranks * self.num_copies
    }

    pub fn total_cards(&self) -> u64 {
        self.total_cards
    }

    /// Number of distinct hands, `C(total_cards, hand_size)`.
    pub fn total_hands(&self) -> Count {
        binomial(self.total_cards, self.hand_size)
    }

    /// Does the highest rank also sit below the lowest one?
    pub(crate) fn wraps(&self) -> bool {
        self.straight_policy == StraightPolicy::AceLow
            && self.pattern_len >= 2
            && self.num_ranks > self.pattern_len
    }

    /// Number of distinct runs of `pattern_len` consecutive ranks.
    ///
    /// ```
    /// use deck_census::core::DeckModel;
    ///
    /// // A-2-3-4-5 through T-J-Q-K-A
    /// assert_eq!(10, DeckModel::new(13, 4, 1, 5).unwrap().num_runs());
    /// ```
    pub fn num_runs(&self) -> u64 {
        if self.num_ranks < self.pattern_len {
            0
        } else if self.wraps() {
            self.num_ranks - self.pattern_len + 2
        } else {
            self.num_ranks - self.pattern_len + 1
        }
    }

    /// The preset this deck is shaped like, if any.
    pub fn matching_preset(&self) -> Option<DeckPreset> {
        DeckPreset::from_shape(self.num_ranks, self.num_suits, self.num_copies)
    }

    /// Human readable description of the deck.
    ///
    /// ```
    /// use deck_census::core::DeckModel;
    ///
    /// let deck = DeckModel::new(6, 4, 2, 5).unwrap();
    /// assert_eq!(
    ///     "Pinochle Deck (6 ranks x 4 suits x 2 copies = 48 cards)",
    ///     deck.description()
    /// );
    /// ```
    pub fn description(&self) -> String {
        let name = self
            .matching_preset()
            .map_or("Custom Deck", |preset| preset.name());
        format!(
            "{} ({} ranks x {} suits x {} copies = {} cards)",
            name, self.num_ranks, self.num_suits, self.num_copies, self.total_cards
        )
    }
}

impl fmt::Display for DeckModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} card hands", self.description(), self.hand_size)
    }
}

/// # DeckModelBuilder
///
/// Collects deck parameters and validates them into a `DeckModel`.
/// Ranks, suits and copies are required. The hand size and pattern length
/// default to five, and the straight policy defaults to
/// `StraightPolicy::AceLow`.
///
/// ```
/// use deck_census::core::{DeckModelBuilder, StraightPolicy};
///
/// let deck = DeckModelBuilder::default()
///     .num_ranks(9)
///     .num_suits(4)
///     .num_copies(1)
///     .hand_size(7)
///     .straight_policy(StraightPolicy::Linear)
///     .build()
///     .unwrap();
/// assert_eq!(5, deck.num_runs());
/// ```
///
/// With the `serde` feature the builder can be read from JSON.
///
/// ```
/// # #[cfg(feature = "serde")]
/// # {
/// use deck_census::core::DeckModelBuilder;
///
/// let builder: DeckModelBuilder =
///     serde_json::from_str(r#"{"num_ranks": 6, "num_suits": 4, "num_copies": 2}"#).unwrap();
/// assert_eq!(48, builder.build().unwrap().total_cards());
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckModelBuilder {
    num_ranks: Option<u64>,
    num_suits: Option<u64>,
    num_copies: Option<u64>,
    hand_size: Option<u64>,
    pattern_len: Option<u64>,
    straight_policy: Option<StraightPolicy>,
}

impl DeckModelBuilder {
    pub fn num_ranks(mut self, num_ranks: u64) -> Self {
        self.num_ranks = Some(num_ranks);
        self
    }

    pub fn num_suits(mut self, num_suits: u64) -> Self {
        self.num_suits = Some(num_suits);
        self
    }

    pub fn num_copies(mut self, num_copies: u64) -> Self {
        self.num_copies = Some(num_copies);
        self
    }

    pub fn hand_size(mut self, hand_size: u64) -> Self {
        self.hand_size = Some(hand_size);
        self
    }

    /// Set how many cards make a straight or a flush.
    pub fn pattern_len(mut self, pattern_len: u64) -> Self {
        self.pattern_len = Some(pattern_len);
        self
    }

    pub fn straight_policy(mut self, straight_policy: StraightPolicy) -> Self {
        self.straight_policy = Some(straight_policy);
        self
    }

    /// Validate the parameters and create the deck model.
    pub fn build(self) -> Result<DeckModel, ConfigurationError> {
        let num_ranks = self.num_ranks.unwrap_or(0);
        let num_suits = self.num_suits.unwrap_or(0);
        let num_copies = self.num_copies.unwrap_or(0);
        let hand_size = self.hand_size.unwrap_or(DEFAULT_HAND_SIZE);
        let pattern_len = self.pattern_len.unwrap_or(DEFAULT_PATTERN_LEN);

        if num_ranks == 0 {
            return Err(ConfigurationError::ZeroRanks);
        }
        if num_suits == 0 {
            return Err(ConfigurationError::ZeroSuits);
        }
        if num_copies == 0 {
            return Err(ConfigurationError::ZeroCopies);
        }
        if hand_size == 0 {
            return Err(ConfigurationError::ZeroHandSize);
        }
        if pattern_len == 0 {
            return Err(ConfigurationError::ZeroPatternLength);
        }

        let total_cards = num_ranks
            .checked_mul(num_suits)
            .and_then(|cards| cards.checked_mul(num_copies))
            .ok_or(ConfigurationError::Overflow)?;

        if hand_size > total_cards {
            return Err(ConfigurationError::HandLargerThanDeck {
                hand_size,
                total_cards,
            });
        }

        Ok(DeckModel {
            num_ranks,
            num_suits,
            num_copies,
            hand_size,
            pattern_len,
            straight_policy: self.straight_policy.unwrap_or(StraightPolicy::AceLow),
            total_cards,
        })
    }
}
