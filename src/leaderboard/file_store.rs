use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument};

use super::{
    InMemoryLeaderboardRepository, LeaderboardEntry, LeaderboardRepository, LeaderboardView,
};
use crate::shared::RepositoryError;
use crate::squad::ParticipantId;

const STORE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    entries: Vec<LeaderboardEntry>,
}

/// Gameweek entries kept in a JSON file so cumulative totals survive between
/// runs. Reads are served from memory; every save rewrites the file.
#[derive(Debug)]
pub struct JsonFileLeaderboardRepository {
    path: PathBuf,
    cache: InMemoryLeaderboardRepository,
    write_lock: AsyncMutex<()>,
}

impl JsonFileLeaderboardRepository {
    /// Loads the store at `path`. A missing file starts an empty league.
    #[instrument(skip_all)]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => {
                let store: StoreFile = serde_json::from_str(&raw).map_err(|err| {
                    RepositoryError::Storage(format!("{}: {err}", path.display()))
                })?;
                if store.version != STORE_VERSION {
                    return Err(RepositoryError::Storage(format!(
                        "{}: unsupported store version {}",
                        path.display(),
                        store.version
                    )));
                }
                store.entries
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "No leaderboard store yet, starting empty");
                Vec::new()
            }
            Err(err) => {
                return Err(RepositoryError::Storage(format!("{}: {err}", path.display())));
            }
        };

        debug!(path = %path.display(), entries = entries.len(), "Leaderboard store loaded");
        Ok(Self {
            path,
            cache: InMemoryLeaderboardRepository::with_entries(entries),
            write_lock: AsyncMutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn entry_count(&self) -> usize {
        self.cache.entry_count().await
    }

    /// Writes to a sibling temp file and renames it over the store.
    async fn persist(&self, entries: Vec<LeaderboardEntry>) -> Result<(), RepositoryError> {
        let storage_error = |err: std::io::Error| {
            RepositoryError::Storage(format!("{}: {err}", self.path.display()))
        };

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(storage_error)?;
        }

        let store = StoreFile {
            version: STORE_VERSION,
            entries,
        };
        let json = serde_json::to_string_pretty(&store)
            .map_err(|err| RepositoryError::Storage(err.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(storage_error)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(storage_error)
    }
}

#[async_trait]
impl LeaderboardRepository for JsonFileLeaderboardRepository {
    #[instrument(
        skip(self, entry),
        fields(participant_id = entry.participant_id, gameweek = %entry.gameweek)
    )]
    async fn save_leaderboard_entry(&self, entry: LeaderboardEntry) -> Result<(), RepositoryError> {
        let LeaderboardView::Gameweek(gameweek) = entry.gameweek else {
            return Err(RepositoryError::Storage(
                "cumulative entries are derived and cannot be stored".to_string(),
            ));
        };

        let _guard = self.write_lock.lock().await;

        // The file is written first so a failed write leaves memory untouched
        let mut entries: Vec<LeaderboardEntry> = self
            .cache
            .snapshot()
            .await
            .into_iter()
            .filter(|stored| {
                !(stored.participant_id == entry.participant_id
                    && stored.gameweek == LeaderboardView::Gameweek(gameweek))
            })
            .collect();
        entries.push(entry.clone());
        entries.sort_by_key(|stored| (stored.participant_id, stored.gameweek));

        self.persist(entries).await?;
        self.cache.save_leaderboard_entry(entry).await
    }

    async fn get_leaderboard(
        &self,
        view: LeaderboardView,
    ) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
        self.cache.get_leaderboard(view).await
    }

    async fn get_participant_entries(
        &self,
        participant_id: ParticipantId,
    ) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
        self.cache.get_participant_entries(participant_id).await
    }
}
