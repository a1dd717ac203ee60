//! HTTP handlers for the search service.

pub mod callback;
pub mod health;
pub mod search;

pub use callback::callback;
pub use health::{health_check, metrics, not_found};
pub use search::search_news;
