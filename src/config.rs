// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "config/tracker.toml";
pub const ENV_CONFIG_PATH: &str = "TRACKER_CONFIG_PATH";
pub const ENV_DATA_PATH: &str = "TRACKER_DATA_PATH";

fn default_data_path() -> PathBuf {
    PathBuf::from("data/restoration_jobs.csv")
}

fn default_history_cap() -> usize {
    2000
}

/// Runtime configuration, loaded from TOML with env overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Location of the CSV record store.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// How many computation-log entries `/debug/history` retains.
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            history_cap: default_history_cap(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration using env var + fallbacks:
    /// 1) $TRACKER_CONFIG_PATH
    /// 2) config/tracker.toml
    /// 3) built-in defaults (no file is not an error)
    ///
    /// $TRACKER_DATA_PATH overrides the store location either way.
    pub fn load() -> Result<Self> {
        let path = env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("parsing config from {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(p) = env::var(ENV_DATA_PATH) {
            cfg.data_path = PathBuf::from(p);
        }
        Ok(cfg)
    }
}
