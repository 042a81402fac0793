use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("squad has {size} players, limit is {max}")]
    Oversize { size: usize, max: usize },

    #[error("player {name} appears more than once")]
    DuplicatePlayer { name: String },

    #[error("a full squad of {size} needs exactly one inactive reserve, found none")]
    MissingInactiveReserve { size: usize },

    #[error("squad has {count} inactive reserves, at most one is allowed")]
    TooManyInactiveReserves { count: usize },
}
