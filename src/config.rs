use std::env::{self, VarError};
use std::path::PathBuf;
use thiserror::Error;

pub const SQUADS_PATH_VAR: &str = "CRICKET_POINTS_SQUADS";
pub const LEADERBOARD_PATH_VAR: &str = "CRICKET_POINTS_LEADERBOARD";
pub const LOG_FILTER_VAR: &str = "CRICKET_POINTS_LOG";

const DEFAULT_SQUADS_PATH: &str = "squads.json";
const DEFAULT_LEADERBOARD_PATH: &str = "leaderboard.json";
const DEFAULT_LOG_FILTER: &str = "cricket_points=info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is set but empty")]
    Empty { var: &'static str },

    #[error("{var} is not valid unicode")]
    NotUnicode { var: &'static str },
}

/// Runner configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub squads_path: PathBuf,
    /// JSON store of processed gameweeks, carried between runs.
    pub leaderboard_path: PathBuf,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> Result<Self, ConfigError> {
        let squads_path = read_var(&lookup, SQUADS_PATH_VAR)?
            .unwrap_or_else(|| DEFAULT_SQUADS_PATH.to_string());
        let leaderboard_path = read_var(&lookup, LEADERBOARD_PATH_VAR)?
            .unwrap_or_else(|| DEFAULT_LEADERBOARD_PATH.to_string());
        let log_filter =
            read_var(&lookup, LOG_FILTER_VAR)?.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            squads_path: PathBuf::from(squads_path),
            leaderboard_path: PathBuf::from(leaderboard_path),
            log_filter,
        })
    }
}

fn read_var(
    lookup: &impl Fn(&str) -> Result<String, VarError>,
    var: &'static str,
) -> Result<Option<String>, ConfigError> {
    match lookup(var) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var }),
    }
}
