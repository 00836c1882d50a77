//! Per-player statistics.

use crate::ranks::tier_for_xp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity used for unauthenticated sessions, persisted on-device only.
pub const GUEST_UID: &str = "guest";

/// Durable statistics for one player identity.
///
/// `correct_judgments <= total_judgments` and `current_streak <= best_streak`
/// hold after every update; `level` and `rank` are derived from `xp` and
/// never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub uid: String,
    pub total_judgments: u64,
    pub correct_judgments: u64,
    pub current_streak: u64,
    pub best_streak: u64,
    pub xp: u64,
    pub level: u32,
    pub rank: String,
    pub updated_at: DateTime<Utc>,
}

impl PlayerStats {
    /// Zero-valued stats at the lowest tier, for a first-seen identity.
    pub fn initial(uid: &str, now: DateTime<Utc>) -> Self {
        let mut stats = Self {
            uid: uid.to_string(),
            total_judgments: 0,
            correct_judgments: 0,
            current_streak: 0,
            best_streak: 0,
            xp: 0,
            level: 0,
            rank: String::new(),
            updated_at: now,
        };
        stats.refresh_tier();
        stats
    }

    /// Re-derive `level` and `rank` from `xp`. Idempotent.
    pub fn refresh_tier(&mut self) {
        let tier = tier_for_xp(self.xp);
        self.level = tier.level;
        self.rank = tier.title.to_string();
    }

    /// Correct-judgment percentage, rounded, 0-100.
    pub fn accuracy(&self) -> u32 {
        if self.total_judgments == 0 {
            return 0;
        }
        ((self.correct_judgments as f64 / self.total_judgments as f64) * 100.0).round() as u32
    }

    /// Counter invariants, checked by tests and when loading stored records.
    pub fn is_consistent(&self) -> bool {
        self.correct_judgments <= self.total_judgments
            && self.current_streak <= self.best_streak
            && self.level == tier_for_xp(self.xp).level
    }
}
