//! Type definitions for the ingestion module.

use crate::taxonomy::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque tool identifier. Catalog exports use either integer or string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolId::Int(id) => write!(f, "{}", id),
            ToolId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ToolId {
    fn from(id: i64) -> Self {
        ToolId::Int(id)
    }
}

impl From<i32> for ToolId {
    fn from(id: i32) -> Self {
        ToolId::Int(i64::from(id))
    }
}

impl From<String> for ToolId {
    fn from(id: String) -> Self {
        ToolId::Text(id)
    }
}

impl From<&str> for ToolId {
    fn from(id: &str) -> Self {
        ToolId::Text(id.to_string())
    }
}

/// A normalized, searchable tool record.
///
/// Records produced by the catalog loader always have a non-blank `name`, a
/// category from the closed set and a quality score in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub id: ToolId,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quality_score: f64,
}

impl ToolRecord {
    /// Creates a record with no tags, no description and a zero quality score.
    pub fn new(id: impl Into<ToolId>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            tags: Vec::new(),
            description: String::new(),
            quality_score: 0.0,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_quality_score(mut self, quality_score: f64) -> Self {
        self.quality_score = quality_score;
        self
    }

    /// A record is searchable only if it has a non-blank name.
    pub fn is_searchable(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// A tool as it appears in a catalog export, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawToolRecord {
    pub id: Option<ToolId>,
    pub name: Option<String>,
    /// Free-text category label, mapped onto the closed set at load time.
    #[serde(alias = "category_name")]
    pub category: Option<String>,
    #[serde(default, alias = "v2_tags")]
    pub tags: Option<Vec<String>>,
    pub description: Option<String>,
    pub quality_score: Option<f64>,

    /// Completeness signals used when `quality_score` is absent.
    pub logo_url: Option<String>,
    pub screenshot_url: Option<String>,
    pub scraped_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_id_accepts_int_and_string() {
        let int: ToolId = serde_json::from_str("42").unwrap();
        let text: ToolId = serde_json::from_str("\"abc-1\"").unwrap();

        assert_eq!(int, ToolId::Int(42));
        assert_eq!(text, ToolId::Text("abc-1".to_string()));
        assert_eq!(int.to_string(), "42");
        assert_eq!(text.to_string(), "abc-1");
    }

    #[test]
    fn test_record_defaults() {
        let record: ToolRecord = serde_json::from_str(r#"{"id": 1, "name": "Claude"}"#).unwrap();

        assert_eq!(record.category, Category::Other);
        assert!(record.tags.is_empty());
        assert!(record.description.is_empty());
        assert_eq!(record.quality_score, 0.0);
        assert!(record.is_searchable());
    }

    #[test]
    fn test_blank_name_is_not_searchable() {
        let record = ToolRecord::new(1, "   ", Category::Other);
        assert!(!record.is_searchable());
    }

    #[test]
    fn test_raw_record_aliases() {
        let raw: RawToolRecord = serde_json::from_str(
            r#"{"id": "x", "name": "Tool", "category_name": "Video", "v2_tags": ["clip"]}"#,
        )
        .unwrap();

        assert_eq!(raw.category.as_deref(), Some("Video"));
        assert_eq!(raw.tags, Some(vec!["clip".to_string()]));
    }
}
