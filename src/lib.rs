//! Exact counts of hand patterns over generalized card decks.
//!
//! A deck has any number of ranks, suits and identical copies of every
//! card. For a given hand size the library counts, without sampling, how
//! many hands contain a pair, two pair, three of a kind, a full house, a
//! straight, a flush, four of a kind, a straight flush or five of a kind.
//!
//! Counts come in two flavors. Inclusive counts every hand that makes the
//! pattern. Exclusive drops hands that also make a pattern which contains
//! it, such as a three of a kind that is really a full house.
//!
//! ```
//! use deck_census::{Count, DeckAnalyzer};
//!
//! let analyzer = DeckAnalyzer::new(13, 4, 1, 5).unwrap();
//! assert_eq!(Count::from(10_240_u32), analyzer.count_straight(false));
//! assert_eq!(Count::from(10_200_u32), analyzer.count_straight(true));
//! ```

/// Deck configuration and hand categories.
pub mod core;

pub mod combinatorics;

pub mod census;

pub use crate::census::{CensusRow, DeckAnalyzer, HandCensus};
pub use crate::core::{ConfigurationError, Count, DeckModel, HandCategory};
