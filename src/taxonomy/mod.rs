//! Directory taxonomy: the closed category set and the ingestion-time
//! heuristics that map free text onto it.

pub mod category;
pub mod classify;

pub use category::Category;
pub use classify::{classify, clean_tags, infer_category};
