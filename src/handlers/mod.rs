pub mod classify;
pub mod health;
pub mod predicate;
pub mod search;

pub use classify::{categories_handler, classify_handler};
pub use health::{health_handler, ready_handler};
pub use predicate::predicate_handler;
pub use search::search_handler;
