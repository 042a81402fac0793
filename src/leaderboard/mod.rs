mod errors;
pub mod file_store;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

pub use errors::{LeaderboardError, ParticipantError};
pub use file_store::JsonFileLeaderboardRepository;
pub use models::*;
pub use repository::{InMemoryLeaderboardRepository, LeaderboardRepository};
pub use service::{LeaderboardService, LeaderboardServiceBuilder};
pub use types::{LeaderboardRecord, LineupRecord};
