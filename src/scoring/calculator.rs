use std::sync::Arc;
use tracing::{debug, trace, warn};

use super::{
    components::{BattingComponent, BowlingComponent, FieldingComponent},
    PlayerScore, PlayerStat, ScoreBreakdown, ScoreComponent,
};

/// Turns raw match statistics into fantasy points.
///
/// Pure and stateless: the same stat line always produces the same score, so
/// a single calculator can be shared across threads.
#[derive(Clone)]
pub struct ScoreCalculator {
    components: Vec<Arc<dyn ScoreComponent>>,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCalculator {
    pub fn new() -> Self {
        Self {
            components: vec![
                Arc::new(BattingComponent::new()),
                Arc::new(BowlingComponent::new()),
                Arc::new(FieldingComponent::new()),
            ],
        }
    }

    pub fn with_component(mut self, component: Arc<dyn ScoreComponent>) -> Self {
        self.components.push(component);
        self
    }

    /// Scores one player's match. Never fails: malformed fields are clamped
    /// and reported on the returned score.
    pub fn score(&self, stat: &PlayerStat) -> PlayerScore {
        let (clean, warnings) = stat.sanitized();
        for warning in &warnings {
            warn!(player = %stat.name, %warning, "Clamped malformed statistic");
        }

        let mut breakdown = ScoreBreakdown::default();
        for component in &self.components {
            component.apply(&clean, &mut breakdown);
            trace!(
                player = %clean.name,
                component = component.name(),
                running_total = breakdown.raw_total(),
                "Applied score component"
            );
        }

        let total_score = breakdown.raw_total().max(0.0);
        debug!(
            player = %clean.name,
            role = %clean.role,
            total_score,
            "Scored player"
        );

        PlayerScore {
            name: clean.name.clone(),
            role: clean.role,
            total_score,
            breakdown,
            stats: clean,
            matches: 1,
            warnings,
        }
    }

    pub fn calculate_scores(&self, stats: &[PlayerStat]) -> Vec<PlayerScore> {
        stats.iter().map(|stat| self.score(stat)).collect()
    }
}

/// Scores a list of stat lines with the standard components.
pub fn calculate_scores(stats: &[PlayerStat]) -> Vec<PlayerScore> {
    ScoreCalculator::new().calculate_scores(stats)
}
