//! Query tokenization into synonym groups.
//!
//! Every whitespace-delimited word of a query becomes one [`TokenGroup`]:
//! the word itself, its registered synonyms, and simple morphological stems.
//! Groups are combined with AND semantics, members of a group with OR.

use crate::relevance::synonyms::SynonymTable;
use std::collections::BTreeSet;

/// Words longer than this lose a trailing "s" as an extra variant.
const PLURAL_MIN_LEN: usize = 3;

/// Words longer than this lose a trailing "ing" as an extra variant.
const GERUND_MIN_LEN: usize = 5;

/// One query word and everything considered equivalent to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGroup {
    word: String,
    members: BTreeSet<String>,
}

impl TokenGroup {
    /// The lower-cased query word this group was built from.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Members in sorted order. Always contains [`TokenGroup::word`].
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.contains(member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Split `query` into token groups using `synonyms` for expansion.
///
/// Empty or whitespace-only input yields no groups.
pub fn tokenize_with(query: &str, synonyms: &SynonymTable) -> Vec<TokenGroup> {
    query
        .split_whitespace()
        .map(|raw| {
            let word = raw.to_lowercase();
            let mut members = BTreeSet::new();
            members.insert(word.clone());

            for alt in synonyms.lookup(&word) {
                members.insert(alt.clone());
            }

            let len = word.chars().count();
            if len > PLURAL_MIN_LEN {
                if let Some(stem) = word.strip_suffix('s') {
                    members.insert(stem.to_string());
                }
            }
            if len > GERUND_MIN_LEN {
                if let Some(stem) = word.strip_suffix("ing") {
                    members.insert(stem.to_string());
                }
            }

            TokenGroup { word, members }
        })
        .collect()
}

/// Tokenize against the built-in synonym table.
pub fn tokenize(query: &str) -> Vec<TokenGroup> {
    tokenize_with(query, SynonymTable::builtin())
}

/// Flattened union of every group member for `query`.
pub fn expand_query_with(query: &str, synonyms: &SynonymTable) -> BTreeSet<String> {
    tokenize_with(query, synonyms)
        .into_iter()
        .flat_map(|group| group.members)
        .collect()
}

pub fn expand_query(query: &str) -> BTreeSet<String> {
    expand_query_with(query, SynonymTable::builtin())
}
