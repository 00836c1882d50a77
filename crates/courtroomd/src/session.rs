//! Session orchestration.
//!
//! The controller owns one player's in-flight game: the working set of
//! posts, the cursor into it, and the last-known-good `PlayerRecord`. On a
//! submitted judgment it resolves the reference verdict, runs the one pure
//! progression function, persists the result, and audits best-effort.
//!
//! Persistence failure never loses an update: the engine output is already
//! applied to the in-memory snapshot, and when the primary (remote) store
//! rejects a write the same snapshot is mirrored to the local store.

use crate::audit::AuditLog;
use crate::auth::PlayerIdentity;
use crate::store::{LeaderboardEntry, PlayerRecord, StatsStore};
use anyhow::Result;
use chrono::Utc;
use courtroom_common::{
    apply_judgment, resolve, AitaPost, CourtroomError, JudgmentEvent, Verdict, XP_CORRECT,
    XP_INCORRECT,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one submitted judgment, shown to the player.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgmentReview {
    pub post_id: String,
    pub player_verdict: Verdict,
    pub reference_verdict: Verdict,
    pub correct: bool,
    pub xp_delta: i64,
    /// Ids of challenges this judgment completed.
    pub unlocked: Vec<String>,
}

pub struct SessionController {
    identity: PlayerIdentity,
    primary: Arc<dyn StatsStore>,
    /// Local mirror written when the primary (remote) store fails. `None`
    /// when the primary already is the local store.
    mirror: Option<Arc<dyn StatsStore>>,
    audit: Option<AuditLog>,
    /// Set when the primary load errored (as opposed to a clean never-seen).
    /// A record may exist upstream that this session never saw, so primary
    /// writes are withheld for the rest of the session to avoid clobbering
    /// it with a reinitialized one.
    primary_degraded: bool,
    record: PlayerRecord,
    working_set: Vec<AitaPost>,
    current_index: usize,
    last_judgment: Option<JudgmentReview>,
}

impl SessionController {
    /// Load or initialize the player's record and begin a session over the
    /// given working set.
    pub async fn start(
        identity: PlayerIdentity,
        primary: Arc<dyn StatsStore>,
        mirror: Option<Arc<dyn StatsStore>>,
        audit: Option<AuditLog>,
        working_set: Vec<AitaPost>,
    ) -> Result<Self> {
        let uid = identity.uid.clone();
        let (record, primary_degraded) = match primary.load(&uid).await {
            Ok(Some(record)) => (record, false),
            Ok(None) => {
                info!("First session for {}, starting at the lowest tier", uid);
                (PlayerRecord::initial(&uid, Utc::now()), false)
            }
            Err(err) => {
                warn!(
                    "Primary stats load failed, playing against the local snapshot \
                     and withholding primary writes: {err:#}"
                );
                let record = match mirror.as_ref() {
                    Some(local) => match local.load(&uid).await {
                        Ok(Some(record)) => record,
                        _ => PlayerRecord::initial(&uid, Utc::now()),
                    },
                    None => PlayerRecord::initial(&uid, Utc::now()),
                };
                (record, true)
            }
        };

        Ok(Self {
            identity,
            primary,
            mirror,
            audit,
            primary_degraded,
            record,
            working_set,
            current_index: 0,
            last_judgment: None,
        })
    }

    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    pub fn record(&self) -> &PlayerRecord {
        &self.record
    }

    pub fn current_post(&self) -> Option<&AitaPost> {
        self.working_set.get(self.current_index)
    }

    pub fn last_judgment(&self) -> Option<&JudgmentReview> {
        self.last_judgment.as_ref()
    }

    pub fn working_set_len(&self) -> usize {
        self.working_set.len()
    }

    /// Judge the current post.
    ///
    /// Exactly one judgment is in flight at a time (`&mut self`); the only
    /// error is the absence of a current post.
    pub async fn submit(&mut self, verdict: Verdict) -> Result<JudgmentReview, CourtroomError> {
        let post = self
            .current_post()
            .cloned()
            .ok_or(CourtroomError::NoActivePost)?;

        let reference = resolve(&post);
        let correct = verdict == reference;
        let xp_delta = if correct { XP_CORRECT } else { XP_INCORRECT };
        let now = Utc::now();

        let update = apply_judgment(
            &self.record.stats,
            correct,
            xp_delta,
            &self.record.challenges,
            now,
        );
        self.record = PlayerRecord {
            stats: update.stats,
            challenges: update.challenges,
        };

        self.persist().await;

        let event = JudgmentEvent {
            uid: self.identity.uid.clone(),
            post_id: post.id.clone(),
            player_verdict: verdict,
            reference_verdict: reference,
            correct,
            xp_delta,
            timestamp: now,
        };
        if let Some(audit) = &self.audit {
            audit.append_best_effort(&event);
        }

        let review = JudgmentReview {
            post_id: post.id,
            player_verdict: verdict,
            reference_verdict: reference,
            correct,
            xp_delta,
            unlocked: update.unlocked,
        };
        debug!(
            "Judgment on {}: {} vs {} ({})",
            review.post_id,
            review.player_verdict,
            review.reference_verdict,
            if correct { "correct" } else { "miss" }
        );
        self.last_judgment = Some(review.clone());
        Ok(review)
    }

    /// Advance to the next post, wrapping cyclically.
    pub fn advance(&mut self) {
        if self.working_set.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.working_set.len();
        self.last_judgment = None;
    }

    /// Explicit player-requested reset: reinitialize the record and persist
    /// the fresh state.
    pub async fn reset(&mut self) {
        self.record = PlayerRecord::initial(&self.identity.uid, Utc::now());
        self.current_index = 0;
        self.last_judgment = None;
        self.persist().await;
        info!("Session reset for {}", self.identity.uid);
    }

    /// Top players from the primary store.
    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        self.primary.leaderboard(limit).await
    }

    /// Write the current record. A primary failure falls back to the local
    /// mirror; neither failure surfaces to the player, whose session state
    /// is already updated in memory. While the primary is degraded (its load
    /// errored at session start), primary writes are withheld entirely so a
    /// reinitialized record cannot clobber unseen upstream history.
    async fn persist(&self) {
        let uid = &self.identity.uid;
        if self.primary_degraded {
            warn!("Primary store degraded since load, skipping primary write for {uid}");
            self.mirror_save(uid).await;
            return;
        }
        if let Err(err) = self.primary.save(uid, &self.record).await {
            warn!("Primary stats write failed, keeping local snapshot: {err:#}");
            self.mirror_save(uid).await;
        }
    }

    async fn mirror_save(&self, uid: &str) {
        if let Some(mirror) = &self.mirror {
            if let Err(err) = mirror.save(uid, &self.record).await {
                warn!("Local mirror write failed: {err:#}");
            }
        }
    }
}
