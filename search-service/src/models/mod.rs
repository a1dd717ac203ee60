pub mod search;

pub use search::{SearchNewsRequest, SearchNewsResponse, SearchSource};
