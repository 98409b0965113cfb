//! Catalog loading and normalization.
//!
//! Parses a JSON catalog export and turns every entry into a [`ToolRecord`]
//! ready for the relevance engine. Malformed entries are logged and skipped
//! (partial success model); the load only fails when the file itself is
//! unusable or nothing in it survives.

use crate::error::{AppError, Result};
use crate::ingestion::quality::{compute_quality_score, normalize_quality_score, QualitySignals};
use crate::ingestion::types::{RawToolRecord, ToolId, ToolRecord};
use crate::taxonomy::{classify, clean_tags, infer_category, Category};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

/// Knobs for catalog normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogOptions {
    /// Infer a category from name and description when the export has none.
    pub infer_categories: bool,
}

/// A normalized catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub tools: Vec<ToolRecord>,
    /// Hex SHA-256 over the normalized records, stable for identical input.
    pub fingerprint: String,
    /// Entries dropped during normalization.
    pub skipped: usize,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Number of tools per category, for every category in display order.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.tools.iter().filter(|t| t.category == c).count()))
            .collect()
    }
}

/// Read and normalize the catalog at `path`.
pub fn load_catalog(path: &Path, options: &CatalogOptions) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::CatalogError(format!(
            "Failed to read catalog {}: {}",
            path.display(),
            e
        ))
    })?;

    let json: Value = serde_json::from_str(&contents).map_err(|e| {
        AppError::CatalogError(format!(
            "Catalog {} is not valid JSON: {}",
            path.display(),
            e
        ))
    })?;

    let catalog = normalize_records(&json, options)?;

    tracing::info!(
        path = %path.display(),
        tools = catalog.len(),
        skipped = catalog.skipped,
        fingerprint = %catalog.fingerprint,
        "Catalog loaded"
    );

    Ok(catalog)
}

/// Normalize a parsed catalog: either a bare array of tools or an object
/// with a `tools` array.
pub fn normalize_records(json: &Value, options: &CatalogOptions) -> Result<Catalog> {
    let entries = extract_tools_array(json)?;

    let mut tools = Vec::with_capacity(entries.len());
    let mut seen_ids: HashSet<ToolId> = HashSet::with_capacity(entries.len());
    let mut skipped = 0;

    for (idx, entry) in entries.iter().enumerate() {
        match normalize_tool(entry, options) {
            Ok(tool) => {
                if !seen_ids.insert(tool.id.clone()) {
                    tracing::warn!(index = idx, id = %tool.id, "Skipping duplicate tool id");
                    skipped += 1;
                    continue;
                }
                tools.push(tool);
            }
            Err(e) => {
                tracing::warn!(
                    index = idx,
                    error = %e,
                    "Skipping malformed tool record"
                );
                skipped += 1;
            }
        }
    }

    if tools.is_empty() && !entries.is_empty() {
        return Err(AppError::CatalogError(
            "All tool records failed to normalize".into(),
        ));
    }

    tracing::debug!(
        total = entries.len(),
        parsed = tools.len(),
        "Catalog normalization complete"
    );

    let fingerprint = fingerprint(&tools);

    Ok(Catalog {
        tools,
        fingerprint,
        skipped,
    })
}

fn extract_tools_array(json: &Value) -> Result<&Vec<Value>> {
    json.as_array()
        .or_else(|| json.get("tools").and_then(|t| t.as_array()))
        .ok_or_else(|| {
            AppError::CatalogError("Expected a JSON array of tools or a 'tools' array".into())
        })
}

fn normalize_tool(value: &Value, options: &CatalogOptions) -> Result<ToolRecord> {
    let raw: RawToolRecord = serde_json::from_value(value.clone())
        .map_err(|e| AppError::InvalidRecord(format!("unreadable tool record: {}", e)))?;

    let id = raw
        .id
        .clone()
        .ok_or_else(|| AppError::InvalidRecord("tool record has no id".into()))?;

    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::InvalidRecord(format!("tool {} has no name", id)))?
        .to_string();

    let description = raw.description.as_deref().unwrap_or("").trim().to_string();

    let category = match raw.category.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => classify(label),
        _ if options.infer_categories => infer_category(&name, &description),
        _ => Category::Other,
    };

    let tags = clean_tags(raw.tags.as_deref().unwrap_or(&[]));

    let quality_score = match raw.quality_score {
        Some(score) => normalize_quality_score(score),
        None => compute_quality_score(&QualitySignals::from(&raw)),
    };

    Ok(ToolRecord {
        id,
        name,
        category,
        tags,
        description,
        quality_score,
    })
}

fn fingerprint(tools: &[ToolRecord]) -> String {
    let mut hasher = Sha256::new();

    for tool in tools {
        hasher.update(tool.id.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(tool.name.as_bytes());
        hasher.update(b"|");
        hasher.update(tool.category.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(tool.tags.join(",").as_bytes());
        hasher.update(b"|");
        hasher.update(tool.description.as_bytes());
        hasher.update(b"|");
        hasher.update(tool.quality_score.to_le_bytes());
        hasher.update(b"\n");
    }

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn normalize(json: Value) -> Result<Catalog> {
        normalize_records(&json, &CatalogOptions::default())
    }

    #[test]
    fn test_normalizes_valid_records() {
        let catalog = normalize(json!([
            {
                "id": 1,
                "name": "  Claude ",
                "category": "AI Chat & Assistants",
                "tags": ["AI", "assistant", "Assistant"],
                "description": "An AI chatbot",
                "quality_score": 80
            }
        ]))
        .unwrap();

        assert_eq!(catalog.len(), 1);
        let tool = &catalog.tools[0];
        assert_eq!(tool.id, ToolId::Int(1));
        assert_eq!(tool.name, "Claude");
        assert_eq!(tool.category, Category::Chatbot);
        assert_eq!(tool.tags, vec!["assistant".to_string()]);
        assert_eq!(tool.quality_score, 80.0);
        assert_eq!(catalog.skipped, 0);
    }

    #[test]
    fn test_accepts_tools_object() {
        let catalog = normalize(json!({ "tools": [{ "id": "a", "name": "A" }] })).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.tools[0].category, Category::Other);
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let result = normalize(json!({ "result": {} }));
        assert!(matches!(result, Err(AppError::CatalogError(_))));
    }

    #[test]
    fn test_missing_name_skips_record() {
        let catalog = normalize(json!([
            { "id": 1, "description": "No name here" },
            { "id": 2, "name": "   " },
            { "id": 3, "name": "Valid" }
        ]))
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.tools[0].name, "Valid");
        assert_eq!(catalog.skipped, 2);
        assert!(catalog.tools.iter().all(ToolRecord::is_searchable));
    }

    #[test]
    fn test_all_invalid_is_an_error() {
        let result = normalize(json!([{ "id": 1 }, { "name": "no id" }]));
        assert!(matches!(result, Err(AppError::CatalogError(_))));
    }

    #[test]
    fn test_empty_catalog_is_ok() {
        let catalog = normalize(json!([])).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let catalog = normalize(json!([
            { "id": 1, "name": "First" },
            { "id": 1, "name": "Second" }
        ]))
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.tools[0].name, "First");
        assert_eq!(catalog.skipped, 1);
    }

    #[test]
    fn test_quality_computed_when_absent() {
        let catalog = normalize(json!([{
            "id": 1,
            "name": "Shiny",
            "logo_url": "https://shiny.ai/logo.png",
            "screenshot_url": "https://shiny.ai/shot.png"
        }]))
        .unwrap();

        assert_eq!(catalog.tools[0].quality_score, 50.0);
    }

    #[test]
    fn test_supplied_quality_is_clamped() {
        let catalog = normalize(json!([{ "id": 1, "name": "Loud", "quality_score": 250 }])).unwrap();
        assert_eq!(catalog.tools[0].quality_score, 100.0);
    }

    #[test]
    fn test_category_inference_is_opt_in() {
        let entry = json!([{
            "id": 1,
            "name": "PodScribe",
            "description": "Podcast transcription with speaker voice labels"
        }]);

        let plain = normalize(entry.clone()).unwrap();
        assert_eq!(plain.tools[0].category, Category::Other);

        let inferred = normalize_records(
            &entry,
            &CatalogOptions {
                infer_categories: true,
            },
        )
        .unwrap();
        assert_eq!(inferred.tools[0].category, Category::Audio);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = normalize(json!([{ "id": 1, "name": "A" }])).unwrap();
        let a_again = normalize(json!([{ "id": 1, "name": "A" }])).unwrap();
        let b = normalize(json!([{ "id": 1, "name": "B" }])).unwrap();

        assert_eq!(a.fingerprint, a_again.fingerprint);
        assert_ne!(a.fingerprint, b.fingerprint);
        assert_eq!(a.fingerprint.len(), 64);
    }

    #[test]
    fn test_category_counts() {
        let catalog = normalize(json!([
            { "id": 1, "name": "A", "category": "Video" },
            { "id": 2, "name": "B", "category": "video editing" },
            { "id": 3, "name": "C" }
        ]))
        .unwrap();

        let counts = catalog.category_counts();
        assert_eq!(counts.len(), Category::ALL.len());
        assert!(counts.contains(&(Category::Video, 2)));
        assert!(counts.contains(&(Category::Other, 1)));
        assert!(counts.contains(&(Category::Code, 0)));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "x1", "name": "Midjourney", "category": "Image"}}]"#).unwrap();

        let catalog = load_catalog(file.path(), &CatalogOptions::default()).unwrap();
        assert_eq!(catalog.tools[0].category, Category::Image);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let result = load_catalog(Path::new("/nonexistent/catalog.json"), &CatalogOptions::default());
        assert!(matches!(result, Err(AppError::CatalogError(_))));
    }
}
