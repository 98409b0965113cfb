//! Toolrank - query relevance engine for an AI tool directory
//!
//! This library exposes the relevance core (tokenizer, synonym table,
//! in-memory scorer, SQL predicate builder), the ingestion-time taxonomy,
//! and the HTTP handlers of the search service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod ingestion;
pub mod relevance;
pub mod state;
pub mod taxonomy;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

// Re-export key types for convenience
pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::{
    categories_handler, classify_handler, health_handler, predicate_handler, ready_handler,
    search_handler,
};
pub use ingestion::{load_catalog, Catalog, CatalogOptions, ToolId, ToolRecord};
pub use relevance::{
    build_predicate, filter_and_rank, matches, score, tokenize, QueryEngine, RankedResult,
    SqlPredicate, SynonymTable, TokenGroup,
};
pub use state::AppState;
pub use taxonomy::{classify, Category};

/// Service routes, without metrics or middleware.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search", post(search_handler))
        .route("/predicate", post(predicate_handler))
        .route("/classify", post(classify_handler))
        .route("/categories", get(categories_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .with_state(state)
}
