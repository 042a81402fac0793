mod errors;
pub mod source;

pub use errors::FetchError;
pub use source::{InMemoryMatchSource, JsonFileMatchSource, MatchStatsSource};
