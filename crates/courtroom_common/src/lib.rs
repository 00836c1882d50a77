//! Karma Courtroom domain core.
//!
//! Pure game logic shared by the session service: posts and verdicts, the
//! reference-verdict resolver, rank tiers, the daily challenge catalog, and
//! the progression engine. No I/O lives in this crate; everything here is
//! synchronous and deterministic so the service can call the same functions
//! on every persistence path.

pub mod challenges;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod post;
pub mod ranks;
pub mod resolver;
pub mod stats;
pub mod verdict;

pub use challenges::{daily_challenges, Challenge, ChallengeKind};
pub use config::{CourtroomConfig, PlayerMode};
pub use engine::{apply_judgment, JudgmentUpdate, XP_CORRECT, XP_INCORRECT};
pub use error::CourtroomError;
pub use event::JudgmentEvent;
pub use post::{fallback_posts, AitaPost};
pub use ranks::{tier_for_xp, RankTier, JUDGE_RANKS};
pub use resolver::resolve;
pub use stats::{PlayerStats, GUEST_UID};
pub use verdict::Verdict;
