use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cricket_points::{
    FetchError, InMemoryLeaderboardRepository, InMemoryMatchSource, LeaderboardEntry,
    LeaderboardRepository, LeaderboardView, MatchStatsSource, ParticipantId, PlayerStat,
    RepositoryError,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Match source that counts fetches before delegating to memory.
#[derive(Clone, Default)]
pub struct CountingMatchSource {
    inner: InMemoryMatchSource,
    fetches: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CountingMatchSource {
    pub fn new(inner: InMemoryMatchSource) -> Self {
        Self {
            inner,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MatchStatsSource for CountingMatchSource {
    async fn fetch_match_stats(&self, match_url: &str) -> Result<Vec<PlayerStat>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_match_stats(match_url).await
    }
}

/// Leaderboard storage that refuses writes for one participant.
pub struct FailingSaveRepository {
    inner: InMemoryLeaderboardRepository,
    failing_participant: ParticipantId,
}

#[allow(dead_code)]
impl FailingSaveRepository {
    pub fn new(failing_participant: ParticipantId) -> Self {
        Self {
            inner: InMemoryLeaderboardRepository::new(),
            failing_participant,
        }
    }

    pub async fn entry_count(&self) -> usize {
        self.inner.entry_count().await
    }
}

#[async_trait]
impl LeaderboardRepository for FailingSaveRepository {
    async fn save_leaderboard_entry(&self, entry: LeaderboardEntry) -> Result<(), RepositoryError> {
        if entry.participant_id == self.failing_participant {
            return Err(RepositoryError::Storage("disk full".to_string()));
        }
        self.inner.save_leaderboard_entry(entry).await
    }

    async fn get_leaderboard(
        &self,
        view: LeaderboardView,
    ) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
        self.inner.get_leaderboard(view).await
    }

    async fn get_participant_entries(
        &self,
        participant_id: ParticipantId,
    ) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
        self.inner.get_participant_entries(participant_id).await
    }
}
