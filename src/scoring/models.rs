use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use strum_macros::EnumIter;

use super::ComputationWarning;

/// Normalizes a player name into the key used for case-insensitive lookups.
pub fn player_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Rounds a point value to one decimal place for display.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    EnumIter,
)]
#[serde(from = "String", into = "String")]
pub enum Role {
    WicketKeeper,
    #[default]
    Batsman,
    AllRounder,
    Bowler,
}

impl Role {
    /// Short label used in logs and lineup summaries.
    pub fn code(&self) -> &'static str {
        match self {
            Role::WicketKeeper => "WK",
            Role::Batsman => "BAT",
            Role::AllRounder => "AR",
            Role::Bowler => "BWL",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::WicketKeeper => "WicketKeeper",
            Role::Batsman => "Batsman",
            Role::AllRounder => "AllRounder",
            Role::Bowler => "Bowler",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses the free-form role strings scorecards use ("WK-Batter",
/// "Batting Allrounder", "bowl", ...). Anything unrecognised is a batsman.
impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let role = s.trim().to_lowercase();

        let is_all_rounder = role == "ar"
            || ["allround", "all-round", "all round"]
                .iter()
                .any(|needle| role.contains(needle));

        let parsed = if role.starts_with("wk") || role.contains("wicket") || role.contains("keeper")
        {
            Role::WicketKeeper
        } else if is_all_rounder {
            Role::AllRounder
        } else if role.contains("bowl") || role == "bwl" {
            Role::Bowler
        } else {
            Role::Batsman
        };

        Ok(parsed)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// One player's raw performance in a single match.
///
/// Counts are signed so that malformed scraper output can be represented and
/// clamped; see [`PlayerStat::sanitized`]. `overs_bowled` uses cricket
/// notation, where `3.4` means three overs and four balls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStat {
    pub name: String,
    pub role: Role,
    pub runs: i32,
    pub balls_faced: i32,
    pub fours: i32,
    pub sixes: i32,
    pub wickets: i32,
    pub maidens: i32,
    pub overs_bowled: f64,
    pub runs_conceded: i32,
    pub catches: i32,
}

impl PlayerStat {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            ..Self::default()
        }
    }

    pub fn with_batting(mut self, runs: i32, balls_faced: i32, fours: i32, sixes: i32) -> Self {
        self.runs = runs;
        self.balls_faced = balls_faced;
        self.fours = fours;
        self.sixes = sixes;
        self
    }

    pub fn with_bowling(
        mut self,
        overs_bowled: f64,
        maidens: i32,
        runs_conceded: i32,
        wickets: i32,
    ) -> Self {
        self.overs_bowled = overs_bowled;
        self.maidens = maidens;
        self.runs_conceded = runs_conceded;
        self.wickets = wickets;
        self
    }

    pub fn with_catches(mut self, catches: i32) -> Self {
        self.catches = catches;
        self
    }

    /// Returns a copy with every negative or non-finite field clamped to
    /// zero, along with one warning per clamped field.
    pub fn sanitized(&self) -> (PlayerStat, Vec<ComputationWarning>) {
        let mut warnings = Vec::new();
        let mut clean = self.clone();

        for (field, value) in [
            ("runs", &mut clean.runs),
            ("balls_faced", &mut clean.balls_faced),
            ("fours", &mut clean.fours),
            ("sixes", &mut clean.sixes),
            ("wickets", &mut clean.wickets),
            ("maidens", &mut clean.maidens),
            ("runs_conceded", &mut clean.runs_conceded),
            ("catches", &mut clean.catches),
        ] {
            if *value < 0 {
                warnings.push(ComputationWarning::NegativeValue {
                    field: field.to_string(),
                    value: f64::from(*value),
                });
                *value = 0;
            }
        }

        if !clean.overs_bowled.is_finite() {
            warnings.push(ComputationWarning::NonFinite {
                field: "overs_bowled".to_string(),
            });
            clean.overs_bowled = 0.0;
        } else if clean.overs_bowled < 0.0 {
            warnings.push(ComputationWarning::NegativeValue {
                field: "overs_bowled".to_string(),
                value: clean.overs_bowled,
            });
            clean.overs_bowled = 0.0;
        }

        (clean, warnings)
    }

    /// Legal deliveries bowled, decoded from cricket overs notation.
    pub fn balls_bowled(&self) -> u32 {
        if !self.overs_bowled.is_finite() || self.overs_bowled <= 0.0 {
            return 0;
        }
        let whole = self.overs_bowled.trunc();
        let part = ((self.overs_bowled - whole) * 10.0).round();
        (whole as u32).saturating_mul(6).saturating_add(part as u32)
    }

    /// Overs as a true quantity (`balls / 6`), suitable for rate calculations.
    pub fn overs(&self) -> f64 {
        f64::from(self.balls_bowled()) / 6.0
    }

    pub fn strike_rate(&self) -> Option<f64> {
        (self.balls_faced > 0)
            .then(|| f64::from(self.runs) / f64::from(self.balls_faced) * 100.0)
    }

    pub fn economy(&self) -> Option<f64> {
        let overs = self.overs();
        (overs > 0.0).then(|| f64::from(self.runs_conceded) / overs)
    }

    /// Sums two stat lines for the same player. Overs are added ball-wise and
    /// re-expressed in cricket notation. Counts saturate rather than wrap.
    pub fn combine(&self, other: &PlayerStat) -> PlayerStat {
        PlayerStat {
            name: self.name.clone(),
            role: self.role,
            runs: self.runs.saturating_add(other.runs),
            balls_faced: self.balls_faced.saturating_add(other.balls_faced),
            fours: self.fours.saturating_add(other.fours),
            sixes: self.sixes.saturating_add(other.sixes),
            wickets: self.wickets.saturating_add(other.wickets),
            maidens: self.maidens.saturating_add(other.maidens),
            overs_bowled: overs_notation(self.balls_bowled().saturating_add(other.balls_bowled())),
            runs_conceded: self.runs_conceded.saturating_add(other.runs_conceded),
            catches: self.catches.saturating_add(other.catches),
        }
    }
}

fn overs_notation(balls: u32) -> f64 {
    f64::from(balls / 6) + f64::from(balls % 6) / 10.0
}

/// Per-category points. `penalty` is never positive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub batting: f64,
    pub bowling: f64,
    pub fielding: f64,
    pub bonus: f64,
    pub penalty: f64,
}

impl ScoreBreakdown {
    pub fn raw_total(&self) -> f64 {
        self.batting + self.bowling + self.fielding + self.bonus + self.penalty
    }

    /// Routes a signed modifier into `bonus` or `penalty`.
    pub fn add_modifier(&mut self, points: f64) {
        if points >= 0.0 {
            self.bonus += points;
        } else {
            self.penalty += points;
        }
    }
}

impl Add for ScoreBreakdown {
    type Output = ScoreBreakdown;

    fn add(self, rhs: ScoreBreakdown) -> ScoreBreakdown {
        ScoreBreakdown {
            batting: self.batting + rhs.batting,
            bowling: self.bowling + rhs.bowling,
            fielding: self.fielding + rhs.fielding,
            bonus: self.bonus + rhs.bonus,
            penalty: self.penalty + rhs.penalty,
        }
    }
}

impl AddAssign for ScoreBreakdown {
    fn add_assign(&mut self, rhs: ScoreBreakdown) {
        *self = *self + rhs;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub name: String,
    pub role: Role,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    /// Sanitized stats the score was computed from (summed when merged).
    pub stats: PlayerStat,
    pub matches: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ComputationWarning>,
}

impl PlayerScore {
    pub fn key(&self) -> String {
        player_key(&self.name)
    }

    pub fn display_total(&self) -> f64 {
        round_one_decimal(self.total_score)
    }

    /// Folds another match's score for the same player into this one. Totals
    /// and breakdown components are summed.
    pub fn absorb(&mut self, other: PlayerScore) {
        self.total_score += other.total_score;
        self.breakdown += other.breakdown;
        self.stats = self.stats.combine(&other.stats);
        self.matches += other.matches;
        self.warnings.extend(other.warnings);
    }
}

/// Player scores keyed case-insensitively by name.
#[derive(Debug, Clone, Default)]
pub struct ScoreSheet {
    scores: HashMap<String, PlayerScore>,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a score, summing it into any existing score for the same player.
    pub fn merge(&mut self, score: PlayerScore) {
        match self.scores.get_mut(&score.key()) {
            Some(existing) => existing.absorb(score),
            None => {
                self.scores.insert(score.key(), score);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PlayerScore> {
        self.scores.get(&player_key(name))
    }

    /// Points for a player, or zero if they did not feature.
    pub fn points_for(&self, name: &str) -> f64 {
        self.get(name).map(|s| s.total_score).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerScore> {
        self.scores.values()
    }

    /// Scores sorted by total descending, then by name.
    pub fn ranked(&self) -> Vec<&PlayerScore> {
        let mut ranked: Vec<&PlayerScore> = self.scores.values().collect();
        ranked.sort_by(|a, b| {
            b.total_score
                .total_cmp(&a.total_score)
                .then_with(|| a.key().cmp(&b.key()))
        });
        ranked
    }
}

impl FromIterator<PlayerScore> for ScoreSheet {
    fn from_iter<I: IntoIterator<Item = PlayerScore>>(iter: I) -> Self {
        let mut sheet = ScoreSheet::new();
        for score in iter {
            sheet.merge(score);
        }
        sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("WK", Role::WicketKeeper)]
    #[case("Wicket-Keeper", Role::WicketKeeper)]
    #[case("WK-Batter", Role::WicketKeeper)]
    #[case("Batter", Role::Batsman)]
    #[case("Batting Allrounder", Role::AllRounder)]
    #[case("bowling all-rounder", Role::AllRounder)]
    #[case("AllRounder", Role::AllRounder)]
    #[case("Bowler", Role::Bowler)]
    #[case("BWL", Role::Bowler)]
    #[case("", Role::Batsman)]
    #[case("coach", Role::Batsman)]
    fn parses_free_form_roles(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>().unwrap(), expected);
    }

    #[test]
    fn role_round_trips_through_canonical_name() {
        let json = serde_json::to_string(&Role::AllRounder).unwrap();
        assert_eq!(json, "\"AllRounder\"");
        let role: Role = serde_json::from_str("\"wk\"").unwrap();
        assert_eq!(role, Role::WicketKeeper);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let stat: PlayerStat =
            serde_json::from_str(r#"{"name": "Tail Ender", "role": "Bowler"}"#).unwrap();
        assert_eq!(stat.runs, 0);
        assert_eq!(stat.overs_bowled, 0.0);
        assert_eq!(stat.catches, 0);
    }

    #[rstest]
    #[case(4.0, 24)]
    #[case(3.4, 22)]
    #[case(0.5, 5)]
    #[case(0.0, 0)]
    #[case(1.0e9, u32::MAX)]
    #[case(f64::MAX, u32::MAX)]
    fn decodes_overs_notation(#[case] overs: f64, #[case] balls: u32) {
        let stat = PlayerStat::new("b", Role::Bowler).with_bowling(overs, 0, 0, 0);
        assert_eq!(stat.balls_bowled(), balls);
    }

    #[test]
    fn combine_adds_overs_ball_wise() {
        let a = PlayerStat::new("b", Role::Bowler).with_bowling(3.4, 0, 20, 1);
        let b = PlayerStat::new("b", Role::Bowler).with_bowling(2.4, 1, 10, 2);

        let combined = a.combine(&b);
        assert_eq!(combined.balls_bowled(), 40);
        assert!((combined.overs_bowled - 6.4).abs() < 1e-9);
        assert_eq!(combined.wickets, 3);
        assert_eq!(combined.runs_conceded, 30);
    }

    #[test]
    fn combine_saturates_instead_of_overflowing() {
        let a = PlayerStat::new("b", Role::AllRounder)
            .with_batting(i32::MAX, 10, i32::MAX, 0)
            .with_bowling(4.0e8, 0, 10, 0);
        let b = PlayerStat::new("b", Role::AllRounder)
            .with_batting(1, 1, 1, 0)
            .with_bowling(4.0e8, 0, i32::MAX, 0);

        let combined = a.combine(&b);
        assert_eq!(combined.runs, i32::MAX);
        assert_eq!(combined.fours, i32::MAX);
        assert_eq!(combined.runs_conceded, i32::MAX);
        assert_eq!(combined.balls_bowled(), u32::MAX);
    }

    fn scored(name: &str, total_score: f64) -> PlayerScore {
        PlayerScore {
            name: name.into(),
            role: Role::Batsman,
            total_score,
            breakdown: ScoreBreakdown::default(),
            stats: PlayerStat::new(name, Role::Batsman),
            matches: 1,
            warnings: vec![],
        }
    }

    #[rstest]
    #[case(vec![("Rahul", 30.0), ("Gill", 55.0), ("Iyer", 30.0)], vec!["Gill", "Iyer", "Rahul"])]
    #[case(vec![("b", 0.0), ("A", 0.0), ("c", 0.0)], vec!["A", "b", "c"])]
    #[case(vec![("Pant", 12.5), ("pant", 7.5), ("Jadeja", 19.0)], vec!["Pant", "Jadeja"])]
    fn ranked_orders_by_total_then_name(
        #[case] scores: Vec<(&str, f64)>,
        #[case] expected: Vec<&str>,
    ) {
        let sheet: ScoreSheet = scores.into_iter().map(|(n, t)| scored(n, t)).collect();
        let names: Vec<&str> = sheet.ranked().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn sanitized_clamps_negatives_and_reports_each_field() {
        let mut stat = PlayerStat::new("x", Role::Batsman).with_batting(-5, 10, -1, 0);
        stat.overs_bowled = f64::NAN;

        let (clean, warnings) = stat.sanitized();
        assert_eq!(clean.runs, 0);
        assert_eq!(clean.fours, 0);
        assert_eq!(clean.balls_faced, 10);
        assert_eq!(clean.overs_bowled, 0.0);
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn score_sheet_lookup_ignores_case() {
        let mut sheet = ScoreSheet::new();
        sheet.merge(scored("Virat Kohli", 42.0));

        assert_eq!(sheet.points_for("virat kohli"), 42.0);
        assert_eq!(sheet.points_for(" VIRAT KOHLI "), 42.0);
        assert_eq!(sheet.points_for("someone else"), 0.0);
    }
}
