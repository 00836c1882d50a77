//! Daily challenges.
//!
//! A fixed catalog of reward-bearing sub-goals. The engine advances each
//! challenge's progress per judgment; completion is monotonic and its reward
//! XP is credited exactly once, at the transition.

use serde::{Deserialize, Serialize};

/// How a challenge's progress is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    /// Progress tracks the current correct-judgment streak.
    Streak,
    /// Progress tracks total judgments made, correct or not.
    Volume,
    /// Progress tracks total judgments while accuracy stays flawless,
    /// resetting to zero on any miss.
    PerfectAccuracy,
}

/// One challenge: catalog definition plus player progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ChallengeKind,
    pub target: u64,
    pub progress: u64,
    /// Bonus XP credited once, when `completed` first becomes true.
    pub reward: u64,
    pub completed: bool,
}

/// The fixed daily-challenge catalog, progress zeroed.
pub fn daily_challenges() -> Vec<Challenge> {
    vec![
        Challenge {
            id: "streak_3".to_string(),
            title: "Hat Trick".to_string(),
            description: "Get 3 judgments correct in a row".to_string(),
            kind: ChallengeKind::Streak,
            target: 3,
            progress: 0,
            reward: 25,
            completed: false,
        },
        Challenge {
            id: "judge_10".to_string(),
            title: "Busy Day".to_string(),
            description: "Judge 10 cases today".to_string(),
            kind: ChallengeKind::Volume,
            target: 10,
            progress: 0,
            reward: 30,
            completed: false,
        },
        Challenge {
            id: "perfect_accuracy".to_string(),
            title: "Perfect Record".to_string(),
            description: "Maintain 100% accuracy for 5 judgments".to_string(),
            kind: ChallengeKind::PerfectAccuracy,
            target: 5,
            progress: 0,
            reward: 50,
            completed: false,
        },
    ]
}
