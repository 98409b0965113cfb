//! Synonym table used for query expansion.
//!
//! The built-in table maps user intent words onto the vocabulary that tends to
//! appear in tool names, categories and tags. Lookups are one-directional:
//! `chatbot` lists `bot`, but that does not make `bot` list `chatbot` unless the
//! table says so.

use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Built-in intent vocabulary.
const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    ("maker", &["builder", "generator", "creator"]),
    ("builder", &["maker", "generator", "creator"]),
    ("generator", &["maker", "builder", "creator"]),
    ("creator", &["maker", "builder", "generator"]),
    ("bot", &["chatbot", "assistant", "conversational"]),
    ("chatbot", &["bot", "assistant", "conversational"]),
    ("assistant", &["bot", "chatbot", "chat"]),
    ("site", &["website", "landing page", "web"]),
    ("website", &["site", "landing page", "web"]),
    ("writing", &["copywriting", "content", "script", "essay"]),
    ("copywriting", &["writing", "content", "marketing"]),
    ("image", &["photo", "picture", "art", "graphic", "designer"]),
    ("photo", &["image", "picture", "art"]),
    ("art", &["image", "graphic", "design", "illustration"]),
    ("video", &["movie", "clip", "animation", "editing"]),
    ("audio", &["sound", "music", "voice", "speech"]),
    ("voice", &["speech", "audio", "sound", "talking"]),
    ("speech", &["voice", "audio", "sound"]),
    ("code", &["programming", "developer", "software", "app"]),
    ("coding", &["code", "programming", "developer"]),
    ("app", &["software", "application", "tool"]),
    ("marketing", &["seo", "advertising", "sales", "growth"]),
    ("seo", &["marketing", "search", "ranking"]),
    ("data", &["analytics", "metrics", "statistics", "chart"]),
    ("analytics", &["data", "metrics", "insights"]),
    ("legal", &["lawyer", "compliance", "contract"]),
    ("medical", &["health", "doctor", "doctor assistant"]),
    ("career", &["job", "interview", "resume", "hiring", "recruitment"]),
    ("hiring", &["career", "recruitment", "job", "interview"]),
    ("interview", &["career", "job", "hiring"]),
];

/// Immutable mapping from a lower-cased word to its alternates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// The table shipped with the directory, built once per process.
    pub fn builtin() -> &'static SynonymTable {
        static TABLE: OnceLock<SynonymTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            Self::from_entries(
                BUILTIN_SYNONYMS
                    .iter()
                    .map(|(word, alts)| (word.to_string(), alts.iter().map(|a| a.to_string()).collect())),
            )
        })
    }

    /// Build a table from `(word, alternates)` pairs. Words and alternates are
    /// lower-cased and trimmed; later entries for the same word extend earlier ones.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut table: HashMap<String, Vec<String>> = HashMap::new();

        for (word, alternates) in entries {
            let key = word.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }

            let slot = table.entry(key).or_default();
            for alt in alternates {
                let alt = alt.trim().to_lowercase();
                if !alt.is_empty() && !slot.contains(&alt) {
                    slot.push(alt);
                }
            }
        }

        Self { entries: table }
    }

    /// Load a replacement table from a JSON object of `word -> [alternates]`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::CatalogError(format!(
                "Failed to read synonym file {}: {}",
                path.display(),
                e
            ))
        })?;

        let raw: HashMap<String, Vec<String>> = serde_json::from_str(&contents).map_err(|e| {
            AppError::CatalogError(format!(
                "Synonym file {} is not a word -> [alternates] object: {}",
                path.display(),
                e
            ))
        })?;

        let table = Self::from_entries(raw);

        tracing::info!(
            path = %path.display(),
            entries = table.len(),
            "Synonym table loaded"
        );

        Ok(table)
    }

    /// Alternates registered for `word`. `word` must already be lower-cased.
    pub fn lookup(&self, word: &str) -> &[String] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
