//! Weight tables for both evaluation modes.
//!
//! In-memory ranking and the SQL order-by expression deliberately use
//! different tables. The SQL projection has no tags column and matches whole
//! groups rather than individual words, so its weights are coarser.

use crate::ingestion::quality::normalize_quality_score;

/// Weights applied by the in-memory scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Tool name equals the whole query.
    pub exact_name: f64,
    /// Tool name starts with the whole query.
    pub name_prefix: f64,
    pub name: f64,
    pub category: f64,
    pub tag: f64,
    pub description: f64,
}

impl ScoreWeights {
    pub const DEFAULT: Self = Self {
        exact_name: 100.0,
        name_prefix: 50.0,
        name: 20.0,
        category: 10.0,
        tag: 15.0,
        description: 5.0,
    };
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Weights rendered into the predicate-mode order-by expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredicateWeights {
    pub name: u32,
    pub category: u32,
    pub description: u32,
}

impl PredicateWeights {
    pub const DEFAULT: Self = Self {
        name: 10,
        category: 7,
        description: 2,
    };
}

impl Default for PredicateWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Multiplier for a quality score: 1.0 at 0, 2.0 at 100.
///
/// Out-of-range scores are clamped first and non-finite ones count as 0, so
/// the boost is always within [1, 2].
#[inline]
pub fn quality_boost(quality_score: f64) -> f64 {
    1.0 + normalize_quality_score(quality_score) / 100.0
}
