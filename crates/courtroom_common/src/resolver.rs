//! Reference-verdict resolution.
//!
//! Derives the community verdict for a post from coarse title and score
//! heuristics. This is deliberately not sentiment analysis: the rules form a
//! fixed, ordered table so the same post always resolves to the same verdict,
//! with no failure mode.

use crate::post::AitaPost;
use crate::verdict::Verdict;

/// Title phrases that signal a conflict over exclusion or refusal.
const EXCLUSION_PHRASES: &[&str] = &["not invite", "refuse", "kick out"];

/// Title words that implicate every party.
const SHARED_FAULT_WORDS: &[&str] = &["everyone", "both"];

/// Title words that signal an honest mishap.
const NO_FAULT_WORDS: &[&str] = &["accident", "mistake"];

/// Score above which an exclusion-type post reads as justified.
const EXCLUSION_NTA_SCORE: i64 = 1000;

/// Score above which the default resolution flips to NTA.
const DEFAULT_NTA_SCORE: i64 = 500;

/// Resolve the reference verdict for a post.
///
/// Rules are checked in order; the first match wins:
/// 1. Negative score: `YTA`.
/// 2. Exclusion phrase in the title: `NTA` above 1000 score, else `YTA`.
/// 3. "everyone" or "both" in the title: `ESH`.
/// 4. "accident" or "mistake" in the title: `NAH`.
/// 5. Default: `NTA` above 500 score, else `YTA`.
///
/// Title matching is case-insensitive.
pub fn resolve(post: &AitaPost) -> Verdict {
    let title = post.title.to_lowercase();

    if post.score < 0 {
        return Verdict::Yta;
    }

    if EXCLUSION_PHRASES.iter().any(|p| title.contains(p)) {
        return if post.score > EXCLUSION_NTA_SCORE {
            Verdict::Nta
        } else {
            Verdict::Yta
        };
    }

    if SHARED_FAULT_WORDS.iter().any(|w| title.contains(w)) {
        return Verdict::Esh;
    }

    if NO_FAULT_WORDS.iter().any(|w| title.contains(w)) {
        return Verdict::Nah;
    }

    if post.score > DEFAULT_NTA_SCORE {
        Verdict::Nta
    } else {
        Verdict::Yta
    }
}
