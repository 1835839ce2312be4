//! Configuration for the study plan service.
//!
//! Configuration can be set via environment variables:
//! - `STUDYPLAN_UTC_OFFSET_MINUTES` - Optional. Offset used to turn "now" into "today". Defaults to `0` (UTC).
//! - `STUDYPLAN_SEED_FILE` - Optional. JSON file with an array of tasks to create at startup.

use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

pub const UTC_OFFSET_ENV: &str = "STUDYPLAN_UTC_OFFSET_MINUTES";
pub const SEED_FILE_ENV: &str = "STUDYPLAN_SEED_FILE";

/// ±14h covers every zone in use.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Offset of the user's calendar relative to UTC.
    pub utc_offset: FixedOffset,

    /// Tasks to seed the store with.
    pub seed_path: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            utc_offset: utc(),
            seed_path: None,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let utc_offset = match lookup(UTC_OFFSET_ENV) {
            Some(raw) => parse_offset(&raw)?,
            None => utc(),
        };
        let seed_path = lookup(SEED_FILE_ENV)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            utc_offset,
            seed_path,
        })
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::InvalidValue(UTC_OFFSET_ENV.to_string(), format!("{raw:?}: {reason}"))
    };
    let minutes: i32 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("expected whole minutes"))?;
    if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
        return Err(invalid("must be within ±840 minutes"));
    }
    FixedOffset::east_opt(minutes * 60).ok_or_else(|| invalid("out of range"))
}
