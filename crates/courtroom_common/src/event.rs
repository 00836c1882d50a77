//! Judgment events.

use crate::verdict::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One judgment, as handed to the audit trail.
///
/// Produced once per submission and consumed immediately; the core does not
/// retain these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgmentEvent {
    pub uid: String,
    pub post_id: String,
    pub player_verdict: Verdict,
    pub reference_verdict: Verdict,
    pub correct: bool,
    /// Nominal signed delta (+10 / -3); the applied debit may be smaller when
    /// the XP floor clamps it.
    pub xp_delta: i64,
    pub timestamp: DateTime<Utc>,
}
