use super::super::{PlayerStat, ScoreBreakdown, ScoreComponent};

const CATCH_POINTS: f64 = 8.0;

pub struct FieldingComponent;

impl Default for FieldingComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldingComponent {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreComponent for FieldingComponent {
    fn apply(&self, stat: &PlayerStat, breakdown: &mut ScoreBreakdown) {
        breakdown.fielding += f64::from(stat.catches.max(0)) * CATCH_POINTS;
    }

    fn name(&self) -> &'static str {
        "fielding"
    }
}
