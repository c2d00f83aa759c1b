//! Exact hand counts for a deck.
//!
//! Rank shaped categories come from the partition table, straights and
//! flushes from the run counter, and exclusive counts from combining the
//! two with the containment hierarchy. `DeckAnalyzer` puts it together.

mod analyzer;
mod exclusivity;
mod partition;
mod report;
mod runs;

pub use self::analyzer::{DeckAnalyzer, clear_count_cache, count_cache_len};
pub use self::exclusivity::{
    JointCounter, count_conjunction, reduce_conjunction, resolve_exclusive,
};
pub use self::partition::{
    PartitionTable, RankSignature, hands_with_rank_reaching, rank_generating_function,
};
pub use self::report::{CensusRow, HandCensus};
pub use self::runs::{count_flush, count_straight, count_straight_flush, run_weights};
