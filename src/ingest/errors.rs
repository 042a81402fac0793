use thiserror::Error;

/// A single match's statistics could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("match {url} is unavailable: {reason}")]
    Unavailable { url: String, reason: String },

    #[error("match {url} returned malformed data: {reason}")]
    Malformed { url: String, reason: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Unavailable { url, .. } => url,
            FetchError::Malformed { url, .. } => url,
        }
    }
}
