//! Run configuration.
//!
//! Defaults match the command-line defaults. A JSON file named by
//! `SCORECARD_CONFIG_PATH` may override them; explicit flags win over both.

use crate::error::{Result, ScorecardError};
use serde::{Deserialize, Serialize};
use std::{env, fs};

pub const CONFIG_PATH_ENV: &str = "SCORECARD_CONFIG_PATH";

pub const DEFAULT_MIN_BALLS: u32 = 10;
pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;
/// Leaderboards are top-5 boards; a smaller size is allowed, a larger one is not.
pub const MAX_LEADERBOARD_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Minimum balls faced to qualify for the strike-rate leaderboard
    pub min_balls: u32,
    /// Maximum rows per leaderboard
    pub leaderboard_size: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            min_balls: DEFAULT_MIN_BALLS,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

impl StatsConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_LEADERBOARD_SIZE).contains(&self.leaderboard_size) {
            return Err(ScorecardError::InvalidConfig(format!(
                "leaderboard_size must be between 1 and {MAX_LEADERBOARD_SIZE}, got {}",
                self.leaderboard_size
            )));
        }
        Ok(())
    }

    /// Load from `SCORECARD_CONFIG_PATH`, or defaults when the variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_config_path(env::var(CONFIG_PATH_ENV).ok().as_deref())
    }

    /// Load the JSON file at `path`; `None` or a blank path gives defaults.
    pub fn from_config_path(path: Option<&str>) -> Result<Self> {
        let Some(path) = path.map(str::trim) else {
            return Ok(Self::default());
        };
        if path.is_empty() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ScorecardError::InvalidConfig(format!(
                "failed to read {CONFIG_PATH_ENV}='{path}': {e}"
            ))
        })?;
        let config = Self::from_json(&content)?;
        config.validate()?;
        tracing::debug!(path, ?config, "loaded config file");
        Ok(config)
    }

    /// Apply command-line overrides on top of this config.
    pub fn with_overrides(mut self, min_balls: Option<u32>, leaderboard_size: Option<usize>) -> Self {
        if let Some(min_balls) = min_balls {
            self.min_balls = min_balls;
        }
        if let Some(size) = leaderboard_size {
            self.leaderboard_size = size;
        }
        self
    }
}
