//! Karma Courtroom configuration.
//!
//! TOML file with `[player]`, `[storage]`, and `[posts]` sections. Every
//! field has a default, so a missing or empty file is a valid configuration
//! (a guest session against the local store).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Which backend a session persists to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerMode {
    /// Anonymous play, stats kept on the local device.
    Guest,
    /// Signed-in play against the remote record store.
    Registered,
}

impl Default for PlayerMode {
    fn default() -> Self {
        PlayerMode::Guest
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CourtroomConfig {
    pub player: PlayerConfig,
    pub storage: StorageConfig,
    pub posts: PostsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlayerConfig {
    pub mode: PlayerMode,
    /// Player identity for registered mode. Ignored for guests.
    pub uid: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for local player records and the audit log.
    pub data_dir: PathBuf,
    /// Base URL of the remote record store. Empty disables remote persistence.
    pub remote_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("courtroom-data"),
            remote_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsConfig {
    /// Number of posts to keep in the working set.
    pub working_set: usize,
    /// Seconds before the cached working set is refetched.
    pub cache_ttl_secs: u64,
    /// Subreddit listing endpoint.
    pub source_url: String,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            working_set: 50,
            cache_ttl_secs: 300,
            source_url: "https://www.reddit.com/r/AmItheAsshole/hot.json".to_string(),
        }
    }
}

impl CourtroomConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from a TOML file, falling back to defaults if the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("Using default config: {err:#}");
                Self::default()
            }
        }
    }

    /// Write the config as pretty TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let text = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}
