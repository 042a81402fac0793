use serde::{Deserialize, Serialize};

use super::{PlayerScore, Role};

/// Wire-level player record consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub role: Role,
    pub total_score: f64,
    pub stats: StatLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub runs: i32,
    pub balls_faced: i32,
    pub fours: i32,
    pub sixes: i32,
    pub wickets: i32,
    pub maidens: i32,
    pub catches: i32,
}

impl From<&PlayerScore> for PlayerRecord {
    fn from(score: &PlayerScore) -> Self {
        let stats = &score.stats;
        Self {
            name: score.name.clone(),
            role: score.role,
            total_score: score.display_total(),
            stats: StatLine {
                runs: stats.runs,
                balls_faced: stats.balls_faced,
                fours: stats.fours,
                sixes: stats.sixes,
                wickets: stats.wickets,
                maidens: stats.maidens,
                catches: stats.catches,
            },
        }
    }
}
