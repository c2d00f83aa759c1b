//! This is the core module. It holds the deck configuration and the hand
//! categories that every counter works from.

/// Exact counts are arbitrary precision unsigned integers.
pub type Count = num_bigint::BigUint;

/// error.rs has the configuration errors.
mod error;
/// Export `ConfigurationError`
pub use self::error::ConfigurationError;

/// Deck parameters and derived quantities.
mod deck;
/// Export the deck model, its builder and the policies.
pub use self::deck::{
    DEFAULT_HAND_SIZE, DEFAULT_PATTERN_LEN, DeckModel, DeckModelBuilder, DeckPreset,
    StraightPolicy,
};

/// Hand categories and how they contain each other.
mod category;
/// Everything in there should be public.
pub use self::category::*;
