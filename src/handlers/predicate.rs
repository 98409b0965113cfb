use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PredicateRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct PredicateResponse {
    /// All clauses joined with AND; null when the query imposes no filter
    pub where_clause: Option<String>,
    pub clauses: Vec<String>,
    /// `ORDER BY` list: relevance descending, then quality and id tie-breaks
    pub order_by: Option<String>,
    /// Positional parameters, one `text[]` of LIKE patterns per placeholder
    pub params: Vec<Vec<String>>,
    /// Complete statement against the configured table
    pub statement: String,
}

/// POST /predicate - Translate a query into parameterized SQL fragments.
///
/// Nothing is executed; the caller splices the fragments into its own
/// statement and binds `params` in order.
pub async fn predicate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredicateRequest>,
) -> Result<Json<PredicateResponse>> {
    let max_query_length = state.config.max_query_length;
    if request.query.chars().count() > max_query_length {
        return Err(AppError::ValidationError(format!(
            "Query cannot exceed {} characters",
            max_query_length
        )));
    }

    let predicate = state.engine.build_predicate(&request.query);
    let statement =
        predicate.select_statement(&state.config.catalog_table, Some(state.config.max_results))?;

    tracing::debug!(
        query = %request.query,
        groups = predicate.clauses.len(),
        "Predicate built"
    );
    metrics::counter!("predicate_requests_total").increment(1);

    Ok(Json(PredicateResponse {
        where_clause: predicate.where_clause(),
        order_by: predicate.order_by_clause(),
        clauses: predicate.clauses,
        params: predicate.params,
        statement,
    }))
}
