use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::ParticipantError;
use crate::ingest::FetchError;
use crate::lineup::Best11Result;
use crate::scoring::ComputationWarning;
use crate::squad::{Participant, ParticipantId};

/// Which table to read: a single gameweek or the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum LeaderboardView {
    Gameweek(u32),
    Cumulative,
}

impl fmt::Display for LeaderboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardView::Gameweek(gw) => write!(f, "GW{gw}"),
            LeaderboardView::Cumulative => write!(f, "cumulative"),
        }
    }
}

impl From<LeaderboardView> for Value {
    fn from(view: LeaderboardView) -> Self {
        match view {
            LeaderboardView::Gameweek(gw) => Value::from(gw),
            LeaderboardView::Cumulative => Value::from("cumulative"),
        }
    }
}

impl TryFrom<Value> for LeaderboardView {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match &value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(LeaderboardView::Gameweek)
                .ok_or_else(|| format!("invalid gameweek number: {n}")),
            Value::String(s) if s.eq_ignore_ascii_case("cumulative") => {
                Ok(LeaderboardView::Cumulative)
            }
            Value::String(s) => s
                .parse()
                .map(LeaderboardView::Gameweek)
                .map_err(|_| format!("invalid leaderboard view: {s}")),
            other => Err(format!("invalid leaderboard view: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub gameweek: LeaderboardView,
    pub gw_points: f64,
    /// Sum of `gw_points` over every stored gameweek for the participant.
    pub cumulative_points: f64,
    pub best_11: Option<Best11Result>,
    pub processed_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    /// The points a table in `view` ranks by.
    pub fn points_for(&self, view: LeaderboardView) -> f64 {
        match view {
            LeaderboardView::Gameweek(_) => self.gw_points,
            LeaderboardView::Cumulative => self.cumulative_points,
        }
    }
}

/// Sorts descending by the view's points; ties go to the lower participant id.
pub fn rank_entries(view: LeaderboardView, entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        b.points_for(view)
            .total_cmp(&a.points_for(view))
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });
}

/// Folds stored per-gameweek entries into one cumulative entry per
/// participant. The name is taken from the participant's latest gameweek.
pub fn derive_cumulative<'a>(
    entries: impl IntoIterator<Item = &'a LeaderboardEntry>,
) -> Vec<LeaderboardEntry> {
    let mut totals: BTreeMap<ParticipantId, (LeaderboardEntry, LeaderboardView)> = BTreeMap::new();

    for entry in entries {
        let slot = totals.entry(entry.participant_id).or_insert_with(|| {
            (
                LeaderboardEntry {
                    participant_id: entry.participant_id,
                    participant_name: entry.participant_name.clone(),
                    gameweek: LeaderboardView::Cumulative,
                    gw_points: 0.0,
                    cumulative_points: 0.0,
                    best_11: None,
                    processed_at: entry.processed_at,
                },
                entry.gameweek,
            )
        });

        let (total, latest) = slot;
        total.cumulative_points += entry.gw_points;
        total.gw_points = total.cumulative_points;
        total.processed_at = total.processed_at.max(entry.processed_at);
        if entry.gameweek >= *latest {
            *latest = entry.gameweek;
            total.participant_name = entry.participant_name.clone();
        }
    }

    totals.into_values().map(|(entry, _)| entry).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantFailure {
    pub participant: Participant,
    pub error: ParticipantError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerWarning {
    pub player: String,
    pub warning: ComputationWarning,
}

/// Outcome of processing one gameweek: what was stored and everything that
/// was skipped along the way.
#[derive(Debug, Clone)]
pub struct GameweekReport {
    pub gameweek: u32,
    /// Ranked by gameweek points.
    pub entries: Vec<LeaderboardEntry>,
    pub match_failures: Vec<FetchError>,
    pub participant_failures: Vec<ParticipantFailure>,
    pub warnings: Vec<PlayerWarning>,
    pub players_scored: usize,
}

impl GameweekReport {
    pub fn is_clean(&self) -> bool {
        self.match_failures.is_empty() && self.participant_failures.is_empty()
    }
}
