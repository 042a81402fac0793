use super::super::{PlayerStat, Role, ScoreBreakdown, ScoreComponent};

const RUN_POINTS: f64 = 1.0;
const FOUR_BONUS: f64 = 1.0;
const SIX_BONUS: f64 = 2.0;

/// Cumulative milestone bonuses: each threshold reached adds its bonus.
const MILESTONES: [(i32, f64); 3] = [(30, 4.0), (50, 4.0), (100, 8.0)];

const STRIKE_RATE_MIN_BALLS: i32 = 10;
const SLOW_STRIKE_RATE_MIN_BALLS: i32 = 15;

pub struct BattingComponent;

impl Default for BattingComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl BattingComponent {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreComponent for BattingComponent {
    fn apply(&self, stat: &PlayerStat, breakdown: &mut ScoreBreakdown) {
        if stat.runs <= 0 && stat.balls_faced <= 0 {
            return;
        }

        breakdown.batting += f64::from(stat.runs) * RUN_POINTS
            + f64::from(stat.fours) * FOUR_BONUS
            + f64::from(stat.sixes) * SIX_BONUS;

        breakdown.bonus += milestone_bonus(stat.runs);
        breakdown.add_modifier(strike_rate_modifier(stat));
    }

    fn name(&self) -> &'static str {
        "batting"
    }
}

fn milestone_bonus(runs: i32) -> f64 {
    MILESTONES
        .iter()
        .filter(|(threshold, _)| runs >= *threshold)
        .map(|(_, bonus)| bonus)
        .sum()
}

/// Highest satisfied tier only. Bowlers never take the slow-scoring penalty.
fn strike_rate_modifier(stat: &PlayerStat) -> f64 {
    if stat.balls_faced < STRIKE_RATE_MIN_BALLS {
        return 0.0;
    }
    let Some(strike_rate) = stat.strike_rate() else {
        return 0.0;
    };

    if strike_rate > 250.0 {
        10.0
    } else if strike_rate > 200.0 {
        6.0
    } else if strike_rate < 100.0
        && stat.balls_faced >= SLOW_STRIKE_RATE_MIN_BALLS
        && stat.role != Role::Bowler
    {
        -6.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn batting(stat: &PlayerStat) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();
        BattingComponent::new().apply(stat, &mut breakdown);
        breakdown
    }

    #[test]
    fn skips_players_who_did_not_bat() {
        let stat = PlayerStat::new("x", Role::Batsman).with_catches(2);
        assert_eq!(batting(&stat), ScoreBreakdown::default());
    }

    #[test]
    fn half_century_with_boundaries() {
        let stat = PlayerStat::new("x", Role::Batsman).with_batting(55, 40, 6, 2);
        let breakdown = batting(&stat);

        assert_eq!(breakdown.batting, 65.0);
        assert_eq!(breakdown.bonus, 8.0);
        assert_eq!(breakdown.penalty, 0.0);
    }

    #[rstest]
    #[case(29, 0.0)]
    #[case(30, 4.0)]
    #[case(49, 4.0)]
    #[case(50, 8.0)]
    #[case(99, 8.0)]
    #[case(100, 16.0)]
    #[case(180, 16.0)]
    fn milestones_stack(#[case] runs: i32, #[case] expected: f64) {
        assert_eq!(milestone_bonus(runs), expected);
    }

    #[rstest]
    #[case(26, 10, 10.0)] // SR 260
    #[case(25, 10, 6.0)] // SR 250 is not above 250
    #[case(21, 10, 6.0)] // SR 210
    #[case(20, 10, 0.0)] // SR 200
    #[case(30, 9, 0.0)] // too few balls to evaluate
    #[case(9, 14, 0.0)] // slow, but under the penalty sample
    #[case(14, 15, -6.0)] // slow over 15 balls
    #[case(15, 15, 0.0)] // SR exactly 100
    fn strike_rate_tiers(#[case] runs: i32, #[case] balls: i32, #[case] expected: f64) {
        let stat = PlayerStat::new("x", Role::Batsman).with_batting(runs, balls, 0, 0);
        assert_eq!(strike_rate_modifier(&stat), expected);
    }

    #[test]
    fn bowlers_are_exempt_from_slow_scoring_penalty() {
        let stat = PlayerStat::new("x", Role::Bowler).with_batting(10, 20, 0, 0);
        assert_eq!(strike_rate_modifier(&stat), 0.0);

        let stat = PlayerStat::new("x", Role::AllRounder).with_batting(10, 20, 0, 0);
        assert_eq!(strike_rate_modifier(&stat), -6.0);
    }

    #[test]
    fn bowlers_still_earn_strike_rate_bonus() {
        let stat = PlayerStat::new("x", Role::Bowler).with_batting(30, 11, 0, 3);
        assert_eq!(strike_rate_modifier(&stat), 10.0);
    }
}
