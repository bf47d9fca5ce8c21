use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::TicketError;

/// Largest seed batch a config may ask for.
pub const MAX_SEED_COUNT: u32 = 100_000;

/// Top-level `config.toml` contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketdeskConfig {
    /// Preferred output mode (`pretty`, `text`, `json`).
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Where seed-batch submission dates come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSource {
    /// Drawn from the batch seed, so the whole batch is reproducible.
    #[default]
    Seeded,
    /// Drawn from OS entropy; dates differ between sessions.
    Entropy,
}

/// Parameters of the synthetic seed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_count")]
    pub count: u32,
    /// Id number of the ticket at index 0; later rows count down from it.
    #[serde(default = "default_first_id")]
    pub first_id: u64,
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// Dates are drawn from `start_date + 0..=span_days`.
    #[serde(default = "default_span_days")]
    pub span_days: u32,
    #[serde(default)]
    pub dates: DateSource,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            count: default_count(),
            first_id: default_first_id(),
            start_date: default_start_date(),
            span_days: default_span_days(),
            dates: DateSource::default(),
        }
    }
}

impl SeedConfig {
    /// Default batch parameters with a different seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Reject parameter combinations that would produce duplicate or
    /// non-positive ids, or a batch too large to hold in memory.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::InvalidSeed`] when `count` exceeds
    /// [`MAX_SEED_COUNT`] or `first_id`.
    pub fn validate(&self) -> Result<(), TicketError> {
        if self.count > MAX_SEED_COUNT {
            return Err(TicketError::InvalidSeed {
                reason: format!(
                    "seed.count ({}) is above the limit of {MAX_SEED_COUNT}",
                    self.count
                ),
            });
        }
        if u64::from(self.count) > self.first_id {
            return Err(TicketError::InvalidSeed {
                reason: format!(
                    "seed.count ({}) exceeds seed.first_id ({}); ids must stay positive",
                    self.count, self.first_id
                ),
            });
        }
        Ok(())
    }
}

/// Location of the per-user config file, if a config directory exists.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ticketdesk/config.toml"))
}

/// Load configuration from an explicit path, or the per-user file, or defaults.
///
/// An explicit path must exist; the per-user file is optional.
///
/// # Errors
///
/// Fails when a file cannot be read, does not parse, or fails validation.
pub fn load_config(explicit: Option<&Path>) -> Result<TicketdeskConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match user_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(TicketdeskConfig::default()),
        },
    };

    let config = load_config_file(&path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Read and parse a single config file.
///
/// # Errors
///
/// Fails when the file cannot be read, does not parse, or fails validation.
pub fn load_config_file(path: &Path) -> Result<TicketdeskConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<TicketdeskConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config
        .seed
        .validate()
        .with_context(|| format!("Invalid seed settings in {}", path.display()))?;
    Ok(config)
}

const fn default_seed() -> u64 {
    42
}

const fn default_count() -> u32 {
    100
}

const fn default_first_id() -> u64 {
    1100
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 1).unwrap_or_default()
}

const fn default_span_days() -> u32 {
    182
}
