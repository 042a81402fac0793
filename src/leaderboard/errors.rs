use thiserror::Error;

use crate::lineup::InsufficientDataError;
use crate::shared::RepositoryError;
use crate::squad::ValidationError;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid gameweek: {0}")]
    InvalidGameweek(u32),
}

/// Why a single participant was left out of a gameweek.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParticipantError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Insufficient data: {0}")]
    InsufficientData(#[from] InsufficientDataError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
