//! Stats persistence.
//!
//! `StatsStore` is the capability boundary between the session controller
//! and durable storage. Two implementations exist: one JSON file per player
//! under the local data directory, and a remote per-user record store over
//! HTTP. Which one backs a session is decided once at startup.
//!
//! Writes are whole-record overwrites, so a retried write is idempotent. An
//! unreadable stored record is discarded, not repaired: `load` reports it as
//! never-seen and the caller reinitializes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use courtroom_common::{daily_challenges, Challenge, PlayerStats};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Whole persisted record for one player identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub stats: PlayerStats,
    pub challenges: Vec<Challenge>,
}

impl PlayerRecord {
    /// Zero-valued record at the lowest tier with a fresh challenge catalog.
    pub fn initial(uid: &str, now: DateTime<Utc>) -> Self {
        Self {
            stats: PlayerStats::initial(uid, now),
            challenges: daily_challenges(),
        }
    }
}

/// One row of the top-players query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position after sorting by XP descending.
    pub position: usize,
    pub uid: String,
    pub xp: u64,
    pub level: u32,
    pub rank: String,
    pub total_judgments: u64,
    pub accuracy: u32,
    pub best_streak: u64,
}

impl LeaderboardEntry {
    fn from_stats(position: usize, stats: &PlayerStats) -> Self {
        Self {
            position,
            uid: stats.uid.clone(),
            xp: stats.xp,
            level: stats.level,
            rank: stats.rank.clone(),
            total_judgments: stats.total_judgments,
            accuracy: stats.accuracy(),
            best_streak: stats.best_streak,
        }
    }
}

#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Load a player's record. `Ok(None)` means the identity has never been
    /// seen, or its stored record was unreadable and has been discarded.
    async fn load(&self, uid: &str) -> Result<Option<PlayerRecord>>;

    /// Persist the whole record.
    async fn save(&self, uid: &str, record: &PlayerRecord) -> Result<()>;

    /// Top players by XP among identities with at least one judgment.
    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>>;
}

// ============================================================================
// Local store
// ============================================================================

/// One pretty-printed JSON file per player under `<data_dir>/players/`.
pub struct LocalStatsStore {
    dir: PathBuf,
}

impl LocalStatsStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: data_dir.into().join("players"),
        }
    }

    fn record_path(&self, uid: &str) -> PathBuf {
        self.dir.join(format!("{uid}.json"))
    }
}

#[async_trait]
impl StatsStore for LocalStatsStore {
    async fn load(&self, uid: &str) -> Result<Option<PlayerRecord>> {
        let path = self.record_path(uid);
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read player record {}", path.display()))?;
        match serde_json::from_str::<PlayerRecord>(&json) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                warn!("Discarding unreadable player record {}: {}", path.display(), err);
                let _ = std::fs::remove_file(&path);
                Ok(None)
            }
        }
    }

    async fn save(&self, uid: &str, record: &PlayerRecord) -> Result<()> {
        std::fs::create_dir_all(&self.dir).context("Failed to create players directory")?;
        let path = self.record_path(uid);
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write player record {}", path.display()))?;
        Ok(())
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // No players directory yet means no players.
            Err(_) => return Ok(Vec::new()),
        };

        let mut players: Vec<PlayerStats> = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "json") != Some(true) {
                continue;
            }
            let Ok(json) = std::fs::read_to_string(&path) else {
                continue;
            };
            match serde_json::from_str::<PlayerRecord>(&json) {
                Ok(record) if record.stats.total_judgments > 0 => players.push(record.stats),
                Ok(_) => {}
                Err(err) => warn!("Skipping unreadable record {}: {}", path.display(), err),
            }
        }

        players.sort_by(|a, b| b.xp.cmp(&a.xp));
        players.truncate(limit);
        Ok(players
            .iter()
            .enumerate()
            .map(|(i, stats)| LeaderboardEntry::from_stats(i + 1, stats))
            .collect())
    }
}

// ============================================================================
// Remote store
// ============================================================================

/// HTTP record store keyed by player identity.
///
/// Expects `GET/PUT <base>/players/<uid>` for records (404 on never-seen) and
/// `GET <base>/leaderboard?limit=N` for the top-players query.
pub struct RemoteStatsStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteStatsStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn player_url(&self, uid: &str) -> String {
        format!("{}/players/{}", self.base_url, uid)
    }
}

#[async_trait]
impl StatsStore for RemoteStatsStore {
    async fn load(&self, uid: &str) -> Result<Option<PlayerRecord>> {
        let response = self
            .client
            .get(self.player_url(uid))
            .send()
            .await
            .context("Record fetch failed")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .context("Record fetch returned an error status")?;

        match response.json::<PlayerRecord>().await {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                // Same policy as a corrupt local file: discard and reinit.
                warn!("Discarding malformed remote record for {}: {}", uid, err);
                Ok(None)
            }
        }
    }

    async fn save(&self, uid: &str, record: &PlayerRecord) -> Result<()> {
        self.client
            .put(self.player_url(uid))
            .json(record)
            .send()
            .await
            .context("Record write failed")?
            .error_for_status()
            .context("Record write rejected")?;
        Ok(())
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let url = format!("{}/leaderboard?limit={}", self.base_url, limit);
        let entries = self
            .client
            .get(&url)
            .send()
            .await
            .context("Leaderboard fetch failed")?
            .error_for_status()
            .context("Leaderboard fetch returned an error status")?
            .json::<Vec<LeaderboardEntry>>()
            .await
            .context("Leaderboard body was not valid JSON")?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStatsStore::new(dir.path());
        assert!(store.load("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_local_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStatsStore::new(dir.path());

        let mut record = PlayerRecord::initial("u1", Utc::now());
        record.stats.xp = 120;
        record.stats.total_judgments = 12;
        record.stats.correct_judgments = 12;
        record.stats.refresh_tier();

        store.save("u1", &record).await.unwrap();
        let loaded = store.load("u1").await.unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_local_corrupt_record_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStatsStore::new(dir.path());

        let players = dir.path().join("players");
        std::fs::create_dir_all(&players).unwrap();
        let path = players.join("u1.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(store.load("u1").await.unwrap().is_none());
        // The corrupt file is gone, not repaired.
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_local_leaderboard_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStatsStore::new(dir.path());
        let now = Utc::now();

        for (uid, xp, total) in [("a", 100u64, 10u64), ("b", 250, 20), ("c", 50, 5), ("idle", 0, 0)] {
            let mut record = PlayerRecord::initial(uid, now);
            record.stats.xp = xp;
            record.stats.total_judgments = total;
            record.stats.correct_judgments = total / 2;
            record.stats.refresh_tier();
            store.save(uid, &record).await.unwrap();
        }

        let board = store.leaderboard(2).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].uid, "b");
        assert_eq!(board[0].position, 1);
        assert_eq!(board[1].uid, "a");
        assert_eq!(board[1].position, 2);
        // "idle" has no judgments and never appears.
        let all = store.leaderboard(10).await.unwrap();
        assert!(all.iter().all(|e| e.uid != "idle"));
    }

    #[test]
    fn test_remote_urls() {
        let store = RemoteStatsStore::new("https://stats.example.com/");
        assert_eq!(store.player_url("u1"), "https://stats.example.com/players/u1");
    }
}
