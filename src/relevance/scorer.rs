//! In-memory relevance scoring.

use crate::error::{AppError, Result};
use crate::ingestion::quality::normalize_quality_score;
use crate::ingestion::ToolRecord;
use crate::relevance::tokenize::TokenGroup;
use crate::relevance::weights::{quality_boost, ScoreWeights};
use serde::Serialize;
use std::cmp::Ordering;

/// A record paired with its relevance score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult<'a> {
    pub tool: &'a ToolRecord,
    pub score: f64,
}

/// Score one record against a query that has already been tokenized.
///
/// `query` is the raw query text, used for the exact and prefix name bonuses.
/// Returns 0 when there are no groups or when any group fails to match a field.
pub fn score_tokens(
    tool: &ToolRecord,
    query: &str,
    groups: &[TokenGroup],
    weights: &ScoreWeights,
) -> Result<f64> {
    ensure_searchable(tool)?;

    if groups.is_empty() {
        return Ok(0.0);
    }

    let query_lower = query.to_lowercase();
    let name = tool.name.to_lowercase();
    let category = tool.category.as_str().to_lowercase();
    let description = tool.description.to_lowercase();
    let tags: Vec<String> = tool.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut total = 0.0;

    if name == query_lower {
        total += weights.exact_name;
    } else if name.starts_with(&query_lower) {
        total += weights.name_prefix;
    }

    for group in groups {
        let mut matched = false;

        for word in group.members() {
            if name.contains(word) {
                total += weights.name;
                matched = true;
            }
            if category.contains(word) {
                total += weights.category;
                matched = true;
            }
            if tags.iter().any(|t| t.contains(word)) {
                total += weights.tag;
                matched = true;
            }
            if description.contains(word) {
                total += weights.description;
                matched = true;
            }
        }

        if !matched {
            return Ok(0.0);
        }
    }

    Ok(total * quality_boost(tool.quality_score))
}

/// Keep records with a positive score and order them best first.
///
/// Equal scores fall back to the higher quality score, then to input order.
/// With no groups every record passes through unscored, in input order.
pub fn rank_tokens<'a>(
    records: &'a [ToolRecord],
    query: &str,
    groups: &[TokenGroup],
    weights: &ScoreWeights,
) -> Result<Vec<RankedResult<'a>>> {
    if groups.is_empty() {
        return records
            .iter()
            .map(|tool| {
                ensure_searchable(tool)?;
                Ok(RankedResult { tool, score: 0.0 })
            })
            .collect();
    }

    let mut results = Vec::new();
    for tool in records {
        let score = score_tokens(tool, query, groups, weights)?;
        if score > 0.0 {
            results.push(RankedResult { tool, score });
        }
    }

    results.sort_by(compare_ranked);

    Ok(results)
}

fn compare_ranked(a: &RankedResult<'_>, b: &RankedResult<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| {
            normalize_quality_score(b.tool.quality_score)
                .total_cmp(&normalize_quality_score(a.tool.quality_score))
        })
}

fn ensure_searchable(tool: &ToolRecord) -> Result<()> {
    if tool.is_searchable() {
        Ok(())
    } else {
        Err(AppError::InvalidRecord(format!(
            "tool {} has no name",
            tool.id
        )))
    }
}
