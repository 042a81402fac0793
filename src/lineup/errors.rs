use thiserror::Error;

use super::RoleCounts;

/// No combination of eligible players satisfies the role quotas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not enough eligible players to satisfy role quotas (eligible: {available})")]
pub struct InsufficientDataError {
    pub available: RoleCounts,
}
