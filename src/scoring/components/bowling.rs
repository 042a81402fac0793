use super::super::{PlayerStat, ScoreBreakdown, ScoreComponent};

const WICKET_POINTS: f64 = 25.0;
const MAIDEN_POINTS: f64 = 8.0;

/// Economy is only judged once two full overs have been bowled.
const ECONOMY_MIN_BALLS: u32 = 12;
const ECONOMICAL_BELOW: f64 = 5.0;
const EXPENSIVE_ABOVE: f64 = 9.0;
const ECONOMY_BONUS: f64 = 10.0;
const ECONOMY_PENALTY: f64 = -15.0;

pub struct BowlingComponent;

impl Default for BowlingComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl BowlingComponent {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreComponent for BowlingComponent {
    fn apply(&self, stat: &PlayerStat, breakdown: &mut ScoreBreakdown) {
        if stat.wickets <= 0 && stat.maidens <= 0 && stat.balls_bowled() == 0 {
            return;
        }

        breakdown.bowling +=
            f64::from(stat.wickets) * WICKET_POINTS + f64::from(stat.maidens) * MAIDEN_POINTS;
        breakdown.add_modifier(economy_modifier(stat));
    }

    fn name(&self) -> &'static str {
        "bowling"
    }
}

fn economy_modifier(stat: &PlayerStat) -> f64 {
    if stat.balls_bowled() < ECONOMY_MIN_BALLS {
        return 0.0;
    }
    match stat.economy() {
        Some(economy) if economy < ECONOMICAL_BELOW => ECONOMY_BONUS,
        Some(economy) if economy > EXPENSIVE_ABOVE => ECONOMY_PENALTY,
        _ => 0.0,
    }
}
