use std::fmt;

use num_traits::{ToPrimitive, Zero};

use crate::core::{Count, DeckModel, HandCategory};

/// `part / whole` as a float, for counts too big for `f64` on their own.
fn ratio(part: &Count, whole: &Count) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    // Keep the top 64 bits of the denominator, plenty for an f64.
    let shift = whole.bits().saturating_sub(64);
    let part = (part >> shift).to_f64().unwrap_or(f64::INFINITY);
    let whole = (whole >> shift).to_f64().unwrap_or(f64::INFINITY);
    part / whole
}

/// Counts serialize as decimal strings, JSON numbers can't hold them.
#[cfg(feature = "serde")]
mod count_string {
    use serde::Serializer;

    use crate::core::Count;

    pub fn serialize<S>(count: &Count, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(count)
    }
}

/// One category's counts.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusRow {
    category: HandCategory,
    #[cfg_attr(feature = "serde", serde(with = "count_string"))]
    inclusive: Count,
    #[cfg_attr(feature = "serde", serde(with = "count_string"))]
    exclusive: Count,
}

impl CensusRow {
    pub fn new(category: HandCategory, inclusive: Count, exclusive: Count) -> Self {
        assert!(
            exclusive <= inclusive,
            "{} exclusive count {} above inclusive count {}",
            category,
            exclusive,
            inclusive
        );
        Self {
            category,
            inclusive,
            exclusive,
        }
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    pub fn inclusive(&self) -> &Count {
        &self.inclusive
    }

    pub fn exclusive(&self) -> &Count {
        &self.exclusive
    }
}

/// Inclusive and exclusive counts of every category for one deck.
///
/// ```
/// use deck_census::DeckAnalyzer;
/// use deck_census::core::HandCategory;
///
/// let census = DeckAnalyzer::new(13, 4, 1, 5).unwrap().census();
/// let rarest: Vec<HandCategory> = census.rarest_first().map(|r| r.category()).collect();
/// assert_eq!(HandCategory::StraightFlush, rarest[0]);
/// assert_eq!(HandCategory::Pair, rarest[rarest.len() - 1]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandCensus {
    deck: DeckModel,
    #[cfg_attr(feature = "serde", serde(with = "count_string"))]
    total_hands: Count,
    rows: Vec<CensusRow>,
}

impl HandCensus {
    pub fn new(deck: DeckModel, total_hands: Count, rows: Vec<CensusRow>) -> Self {
        Self {
            deck,
            total_hands,
            rows,
        }
    }

    pub fn deck(&self) -> &DeckModel {
        &self.deck
    }

    pub fn total_hands(&self) -> &Count {
        &self.total_hands
    }

    pub fn rows(&self) -> &[CensusRow] {
        &self.rows
    }

    pub fn row(&self, category: HandCategory) -> Option<&CensusRow> {
        self.rows.iter().find(|row| row.category == category)
    }

    /// Chance a random hand makes `category` at all.
    pub fn inclusive_probability(&self, category: HandCategory) -> f64 {
        self.row(category)
            .map_or(0.0, |row| ratio(&row.inclusive, &self.total_hands))
    }

    /// Chance a random hand makes `category` and nothing dominating it.
    pub fn exclusive_probability(&self, category: HandCategory) -> f64 {
        self.row(category)
            .map_or(0.0, |row| ratio(&row.exclusive, &self.total_hands))
    }

    /// Rows of categories that can happen, least common first. Ties keep
    /// display order.
    pub fn rarest_first(&self) -> impl Iterator<Item = &CensusRow> {
        let mut rows: Vec<&CensusRow> = self
            .rows
            .iter()
            .filter(|row| !row.inclusive.is_zero())
            .collect();
        rows.sort_by(|a, b| a.inclusive.cmp(&b.inclusive));
        rows.into_iter()
    }

    /// Sum of the inclusive probabilities. Categories overlap, so this is
    /// usually above one.
    pub fn probability_sum(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| ratio(&row.inclusive, &self.total_hands))
            .sum()
    }

    /// The census as pretty printed JSON. Counts are decimal strings.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for HandCensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.deck)?;
        writeln!(f, "Total hands: {}", self.total_hands)?;
        writeln!(
            f,
            "{:<16} {:>24} {:>10} {:>24} {:>10}",
            "Category", "Inclusive", "%", "Exclusive", "%"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<16} {:>24} {:>10.6} {:>24} {:>10.6}",
                row.category.name(),
                row.inclusive.to_string(),
                100.0 * ratio(&row.inclusive, &self.total_hands),
                row.exclusive.to_string(),
                100.0 * ratio(&row.exclusive, &self.total_hands),
            )?;
        }
        Ok(())
    }
}
