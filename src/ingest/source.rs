use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::FetchError;
use crate::scoring::PlayerStat;

/// Supplies already-parsed player statistics for a match.
#[async_trait]
pub trait MatchStatsSource: Send + Sync {
    async fn fetch_match_stats(&self, match_url: &str) -> Result<Vec<PlayerStat>, FetchError>;
}

/// Match statistics held in memory, keyed by match URL.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMatchSource {
    matches: Arc<RwLock<HashMap<String, Vec<PlayerStat>>>>,
}

impl InMemoryMatchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matches(matches: Vec<(String, Vec<PlayerStat>)>) -> Self {
        Self {
            matches: Arc::new(RwLock::new(matches.into_iter().collect())),
        }
    }

    pub async fn insert(&self, match_url: impl Into<String>, stats: Vec<PlayerStat>) {
        self.matches.write().await.insert(match_url.into(), stats);
    }
}

#[async_trait]
impl MatchStatsSource for InMemoryMatchSource {
    async fn fetch_match_stats(&self, match_url: &str) -> Result<Vec<PlayerStat>, FetchError> {
        self.matches
            .read()
            .await
            .get(match_url)
            .cloned()
            .ok_or_else(|| FetchError::Unavailable {
                url: match_url.to_string(),
                reason: "no such match".to_string(),
            })
    }
}

/// Reads a JSON array of player statistics per match. A match URL is a path
/// (optionally `file://`-prefixed), resolved against `base_dir` when
/// relative.
#[derive(Debug, Clone, Default)]
pub struct JsonFileMatchSource {
    base_dir: Option<PathBuf>,
}

impl JsonFileMatchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, match_url: &str) -> PathBuf {
        let path = Path::new(match_url.strip_prefix("file://").unwrap_or(match_url));
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl MatchStatsSource for JsonFileMatchSource {
    #[instrument(skip(self))]
    async fn fetch_match_stats(&self, match_url: &str) -> Result<Vec<PlayerStat>, FetchError> {
        let path = self.resolve(match_url);
        debug!(path = %path.display(), "Reading match statistics");

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| FetchError::Unavailable {
                url: match_url.to_string(),
                reason: err.to_string(),
            })?;

        serde_json::from_str(&contents).map_err(|err| FetchError::Malformed {
            url: match_url.to_string(),
            reason: err.to_string(),
        })
    }
}
