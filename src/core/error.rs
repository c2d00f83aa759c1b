use thiserror::Error;

/// The error type for building a `DeckModel`. Counting itself never
/// fails, so this is the only error the library surfaces.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigurationError {
    #[error("A deck needs at least one rank")]
    ZeroRanks,
    #[error("A deck needs at least one suit")]
    ZeroSuits,
    #[error("A deck needs at least one copy of every card")]
    ZeroCopies,
    #[error("A hand needs at least one card")]
    ZeroHandSize,
    #[error("Straights and flushes need a pattern length of at least one card")]
    ZeroPatternLength,
    #[error("Hand size {hand_size} is larger than the {total_cards} card deck")]
    HandLargerThanDeck { hand_size: u64, total_cards: u64 },
    #[error("The number of cards in the deck doesn't fit in 64 bits")]
    Overflow,
}
