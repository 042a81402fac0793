use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A malformed raw statistic that was clamped to zero before scoring.
///
/// These are recorded on the resulting score rather than raised; the player
/// is always scored.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComputationWarning {
    #[error("{field} was negative ({value}), clamped to zero")]
    NegativeValue { field: String, value: f64 },

    #[error("{field} was not a finite number, clamped to zero")]
    NonFinite { field: String },
}
