use serde::{Deserialize, Serialize};

use super::LeaderboardEntry;
use crate::scoring::{round_one_decimal, Role};
use crate::squad::ParticipantId;

/// Wire-level leaderboard row consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub gw_points: f64,
    pub cumulative_points: f64,
    pub best_11: Vec<LineupRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupRecord {
    pub name: String,
    pub role: Role,
    pub points: f64,
}

impl From<&LeaderboardEntry> for LeaderboardRecord {
    fn from(entry: &LeaderboardEntry) -> Self {
        let best_11 = entry
            .best_11
            .iter()
            .flat_map(|result| result.selected.iter())
            .map(|player| LineupRecord {
                name: player.entry.name.clone(),
                role: player.entry.role,
                points: round_one_decimal(player.points),
            })
            .collect();

        Self {
            participant_id: entry.participant_id,
            participant_name: entry.participant_name.clone(),
            gw_points: round_one_decimal(entry.gw_points),
            cumulative_points: round_one_decimal(entry.cumulative_points),
            best_11,
        }
    }
}
