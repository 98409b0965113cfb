//! Query relevance engine.
//!
//! One tokenizer and one synonym table drive two evaluators: the in-memory
//! scorer, which filters and ranks loaded records, and the predicate builder,
//! which emits SQL fragments with the same group semantics for a relational
//! store.

pub mod predicate;
pub mod scorer;
pub mod synonyms;
pub mod tokenize;
pub mod weights;

pub use predicate::{PredicateBuilder, PredicateColumns, SqlPredicate};
pub use scorer::RankedResult;
pub use synonyms::SynonymTable;
pub use tokenize::{expand_query, tokenize, TokenGroup};
pub use weights::{PredicateWeights, ScoreWeights};

use crate::error::Result;
use crate::ingestion::ToolRecord;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Immutable bundle of the tables both evaluation modes share.
///
/// Cheap to share behind an `Arc`; every method is a pure function of its
/// arguments and the tables.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    synonyms: SynonymTable,
    weights: ScoreWeights,
    predicates: PredicateBuilder,
}

/// Same tables as [`QueryEngine::builtin`], as an owned value.
impl Default for QueryEngine {
    fn default() -> Self {
        QueryEngine::new(SynonymTable::builtin().clone(), PredicateBuilder::default())
    }
}

impl QueryEngine {
    pub fn new(synonyms: SynonymTable, predicates: PredicateBuilder) -> Self {
        Self {
            synonyms,
            weights: ScoreWeights::DEFAULT,
            predicates,
        }
    }

    /// Engine over the built-in synonym table and default columns.
    pub fn builtin() -> &'static QueryEngine {
        static ENGINE: OnceLock<QueryEngine> = OnceLock::new();
        ENGINE.get_or_init(QueryEngine::default)
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    pub fn tokenize(&self, query: &str) -> Vec<TokenGroup> {
        tokenize::tokenize_with(query, &self.synonyms)
    }

    pub fn expand_query(&self, query: &str) -> BTreeSet<String> {
        tokenize::expand_query_with(query, &self.synonyms)
    }

    /// Relevance of `tool` for `query`; 0 means the tool is excluded.
    ///
    /// Fails with `InvalidRecord` if the tool has a blank name.
    pub fn score(&self, tool: &ToolRecord, query: &str) -> Result<f64> {
        let groups = self.tokenize(query);
        scorer::score_tokens(tool, query, &groups, &self.weights)
    }

    pub fn matches(&self, tool: &ToolRecord, query: &str) -> Result<bool> {
        Ok(self.score(tool, query)? > 0.0)
    }

    /// Matching records, best first. An empty query is "no search": every
    /// record is returned unscored in input order.
    pub fn filter_and_rank<'a>(
        &self,
        records: &'a [ToolRecord],
        query: &str,
    ) -> Result<Vec<RankedResult<'a>>> {
        let groups = self.tokenize(query);
        scorer::rank_tokens(records, query, &groups, &self.weights)
    }

    pub fn build_predicate(&self, query: &str) -> SqlPredicate {
        self.predicates.build(&self.tokenize(query))
    }

    pub fn predicate_columns(&self) -> &PredicateColumns {
        self.predicates.columns()
    }
}

/// [`QueryEngine::score`] on the built-in engine.
pub fn score(tool: &ToolRecord, query: &str) -> Result<f64> {
    QueryEngine::builtin().score(tool, query)
}

/// [`QueryEngine::matches`] on the built-in engine.
pub fn matches(tool: &ToolRecord, query: &str) -> Result<bool> {
    QueryEngine::builtin().matches(tool, query)
}

/// [`QueryEngine::filter_and_rank`] on the built-in engine.
pub fn filter_and_rank<'a>(records: &'a [ToolRecord], query: &str) -> Result<Vec<RankedResult<'a>>> {
    QueryEngine::builtin().filter_and_rank(records, query)
}

/// [`QueryEngine::build_predicate`] on the built-in engine.
pub fn build_predicate(query: &str) -> SqlPredicate {
    QueryEngine::builtin().build_predicate(query)
}
