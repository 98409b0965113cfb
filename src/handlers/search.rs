//! Keyword search over the loaded catalog.
//!
//! Runs the in-memory evaluator: the query is expanded into synonym groups,
//! every group must match some field of a tool, and matches are ranked by
//! weighted field hits boosted by the tool's quality score.

use crate::error::{AppError, Result};
use crate::ingestion::ToolId;
use crate::state::AppState;
use crate::taxonomy::Category;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text query. Empty means "no search": the catalog is listed as is.
    #[serde(default)]
    pub query: String,
    /// Restrict results to one category label.
    pub category: Option<String>,
    /// Number of results to return (default: DEFAULT_LIMIT, capped at MAX_RESULTS)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Matches before the limit was applied
    pub total: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub id: ToolId,
    pub name: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub description: String,
    pub quality_score: f64,
    /// Relevance score; 0 for unscored listings
    pub score: f64,
}

/// POST /search - Filter and rank catalog tools for a query.
///
/// # Flow
/// 1. Validate query length, limit and category
/// 2. Acquire semaphore permit (503 if all permits are busy for too long)
/// 3. Tokenize, score and rank on the blocking pool
/// 4. Apply the category filter and the limit
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let start_time = std::time::Instant::now();

    // Validation
    let max_query_length = state.config.max_query_length;
    if request.query.chars().count() > max_query_length {
        return Err(AppError::ValidationError(format!(
            "Query cannot exceed {} characters",
            max_query_length
        )));
    }

    if request.limit == Some(0) {
        return Err(AppError::ValidationError(
            "limit must be at least 1".to_string(),
        ));
    }
    let limit = request
        .limit
        .unwrap_or(state.config.default_limit)
        .min(state.config.max_results);

    let category = match request.category.as_deref() {
        Some(label) => Some(Category::from_label(label).ok_or_else(|| {
            AppError::ValidationError(format!("Unknown category '{}'", label))
        })?),
        None => None,
    };

    // Acquire semaphore with timeout (503 if service overloaded)
    let _permit = tokio::time::timeout(Duration::from_secs(5), state.semaphore.acquire())
        .await
        .map_err(|_| {
            AppError::ResourceError("Service temporarily overloaded, please retry".to_string())
        })?
        .map_err(|_| AppError::ResourceError("Semaphore closed".to_string()))?;

    let engine = Arc::clone(&state.engine);
    let catalog = Arc::clone(&state.catalog);
    let query = request.query.clone();

    let search_timeout = Duration::from_secs(state.config.search_timeout_secs);
    let (total, results) = tokio::time::timeout(
        search_timeout,
        tokio::task::spawn_blocking(move || {
            let ranked = engine.filter_and_rank(&catalog.tools, &query)?;

            let mut total = 0;
            let mut results = Vec::with_capacity(limit.min(ranked.len()));
            for hit in ranked
                .into_iter()
                .filter(|hit| category.map_or(true, |c| hit.tool.category == c))
            {
                total += 1;
                if results.len() < limit {
                    results.push(SearchResult {
                        id: hit.tool.id.clone(),
                        name: hit.tool.name.clone(),
                        category: hit.tool.category,
                        tags: hit.tool.tags.clone(),
                        description: hit.tool.description.clone(),
                        quality_score: hit.tool.quality_score,
                        score: hit.score,
                    });
                }
            }

            Ok::<(usize, Vec<SearchResult>), AppError>((total, results))
        }),
    )
    .await
    .map_err(|_| {
        AppError::ResourceError(format!(
            "Search timeout exceeded ({}s)",
            search_timeout.as_secs()
        ))
    })?
    .map_err(|e| AppError::SearchError(format!("Task join error: {}", e)))??;

    let elapsed = start_time.elapsed();
    tracing::info!(
        query = %request.query,
        category = ?category,
        total,
        returned = results.len(),
        total_ms = elapsed.as_millis() as u64,
        "Search completed"
    );

    metrics::counter!("search_requests_total").increment(1);
    metrics::histogram!("search_latency_ms").record(elapsed.as_millis() as f64);
    metrics::histogram!("search_results").record(total as f64);

    Ok(Json(SearchResponse { total, results }))
}
