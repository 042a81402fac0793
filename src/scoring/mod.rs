pub mod calculator;
pub mod components;
mod errors;
pub mod models;
pub mod types;

pub use calculator::{calculate_scores, ScoreCalculator};
pub use errors::ComputationWarning;
pub use models::*;
pub use types::{PlayerRecord, StatLine};

/// One scoring category applied to a sanitized stat line.
///
/// Components only add to the breakdown; the calculator sums and clamps.
pub trait ScoreComponent: Send + Sync {
    fn apply(&self, stat: &PlayerStat, breakdown: &mut ScoreBreakdown);

    fn name(&self) -> &'static str;
}
