// Library crate for the fantasy cricket points engine
// This file exposes the public API for the runner and integration tests

pub mod config;
pub mod ingest;
pub mod leaderboard;
pub mod lineup;
pub mod scoring;
pub mod shared;
pub mod squad;

// Re-export commonly used types for easier access in tests
pub use config::{Config, ConfigError};
pub use ingest::{FetchError, InMemoryMatchSource, JsonFileMatchSource, MatchStatsSource};
pub use leaderboard::{
    GameweekReport, InMemoryLeaderboardRepository, JsonFileLeaderboardRepository, LeaderboardEntry,
    LeaderboardError, LeaderboardRecord, LeaderboardRepository, LeaderboardService,
    LeaderboardView, ParticipantError,
};
pub use lineup::{select_best_11, Best11Result, Best11Selector, InsufficientDataError, LineupRules};
pub use scoring::{
    calculate_scores, PlayerRecord, PlayerScore, PlayerStat, Role, ScoreCalculator, ScoreSheet,
};
pub use shared::{AppError, RepositoryError};
pub use squad::{
    InMemorySquadRepository, Participant, ParticipantId, Squad, SquadEntry, SquadRepository,
    SquadValidator, ValidationError,
};
