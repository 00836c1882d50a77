//! Rank tiers.
//!
//! Six tiers with discrete XP thresholds. A player's level and rank are
//! always derived from XP against this table; no separate tier state is ever
//! persisted.

/// One rank tier: reached once a player's XP meets `xp_required`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTier {
    pub level: u32,
    pub title: &'static str,
    pub xp_required: u64,
}

/// The rank ladder, ascending by XP threshold.
pub const JUDGE_RANKS: &[RankTier] = &[
    RankTier { level: 0, title: "Rookie Judge", xp_required: 0 },
    RankTier { level: 1, title: "Courtroom Intern", xp_required: 50 },
    RankTier { level: 2, title: "Junior Justice", xp_required: 150 },
    RankTier { level: 3, title: "Senior Arbitrator", xp_required: 300 },
    RankTier { level: 4, title: "Reddit Justice Wizard", xp_required: 500 },
    RankTier { level: 5, title: "Supreme Karma Judge", xp_required: 1000 },
];

/// The highest tier whose threshold the given XP meets.
///
/// Tier 0 requires 0 XP, so this is total over all inputs.
pub fn tier_for_xp(xp: u64) -> &'static RankTier {
    JUDGE_RANKS
        .iter()
        .rev()
        .find(|tier| xp >= tier.xp_required)
        .unwrap_or(&JUDGE_RANKS[0])
}
