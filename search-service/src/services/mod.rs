pub mod metrics;
pub mod providers;
pub mod search;

pub use providers::{GroundedProvider, GroundedResponse, ProviderError};
pub use search::{build_prompt, SearchService};
