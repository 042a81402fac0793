use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::{derive_cumulative, LeaderboardEntry, LeaderboardView};
use crate::shared::RepositoryError;
use crate::squad::ParticipantId;

/// Storage for per-gameweek leaderboard entries.
///
/// Only gameweek entries are stored. The cumulative view is always derived
/// from them so reprocessing a gameweek can never leave it stale.
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Stores an entry, replacing any existing entry for the same
    /// participant and gameweek.
    async fn save_leaderboard_entry(&self, entry: LeaderboardEntry) -> Result<(), RepositoryError>;

    async fn get_leaderboard(
        &self,
        view: LeaderboardView,
    ) -> Result<Vec<LeaderboardEntry>, RepositoryError>;

    async fn get_participant_entries(
        &self,
        participant_id: ParticipantId,
    ) -> Result<Vec<LeaderboardEntry>, RepositoryError>;
}

#[derive(Debug, Default)]
pub struct InMemoryLeaderboardRepository {
    entries: Arc<RwLock<BTreeMap<(ParticipantId, u32), LeaderboardEntry>>>,
}

impl InMemoryLeaderboardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with previously stored gameweek entries. Later
    /// entries for the same participant and gameweek win; cumulative entries
    /// are skipped.
    pub fn with_entries(stored: impl IntoIterator<Item = LeaderboardEntry>) -> Self {
        let mut entries = BTreeMap::new();
        for entry in stored {
            match entry.gameweek {
                LeaderboardView::Gameweek(gameweek) => {
                    entries.insert((entry.participant_id, gameweek), entry);
                }
                LeaderboardView::Cumulative => {
                    warn!(
                        participant_id = entry.participant_id,
                        "Skipping stored cumulative entry"
                    );
                }
            }
        }
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Every stored gameweek entry, ordered by participant then gameweek.
    pub async fn snapshot(&self) -> Vec<LeaderboardEntry> {
        self.entries.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryLeaderboardRepository {
    #[instrument(
        skip(self, entry),
        fields(participant_id = entry.participant_id, gameweek = %entry.gameweek)
    )]
    async fn save_leaderboard_entry(&self, entry: LeaderboardEntry) -> Result<(), RepositoryError> {
        let LeaderboardView::Gameweek(gameweek) = entry.gameweek else {
            warn!("Refusing to store a derived cumulative entry");
            return Err(RepositoryError::Storage(
                "cumulative entries are derived and cannot be stored".to_string(),
            ));
        };

        let mut entries = self.entries.write().await;
        let replaced = entries
            .insert((entry.participant_id, gameweek), entry)
            .is_some();
        debug!(replaced, "Leaderboard entry stored in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_leaderboard(
        &self,
        view: LeaderboardView,
    ) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
        let entries = self.entries.read().await;

        match view {
            LeaderboardView::Cumulative => Ok(derive_cumulative(entries.values())),
            LeaderboardView::Gameweek(gameweek) => {
                let totals: BTreeMap<ParticipantId, f64> = derive_cumulative(entries.values())
                    .into_iter()
                    .map(|e| (e.participant_id, e.cumulative_points))
                    .collect();

                Ok(entries
                    .iter()
                    .filter(|((_, gw), _)| *gw == gameweek)
                    .map(|(_, entry)| LeaderboardEntry {
                        cumulative_points: totals
                            .get(&entry.participant_id)
                            .copied()
                            .unwrap_or(entry.gw_points),
                        ..entry.clone()
                    })
                    .collect())
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_participant_entries(
        &self,
        participant_id: ParticipantId,
    ) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries
            .range((participant_id, u32::MIN)..=(participant_id, u32::MAX))
            .map(|(_, entry)| entry.clone())
            .collect())
    }
}
