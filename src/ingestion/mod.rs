//! Ingestion module for loading tool catalogs.
//!
//! Catalog exports are messy: free-text categories, junk tags, missing quality
//! scores. This module normalizes them into [`ToolRecord`]s the relevance
//! engine can search.

pub mod loader;
pub mod quality;
pub mod types;

pub use loader::{load_catalog, normalize_records, Catalog, CatalogOptions};
pub use quality::{compute_quality_score, QualitySignals};
pub use types::{RawToolRecord, ToolId, ToolRecord};
