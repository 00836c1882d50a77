//! AITA post records and the built-in fallback catalog.
//!
//! Posts are read-only input: they arrive from the post supply, get judged,
//! and are never mutated or retained by the core.

use serde::{Deserialize, Serialize};

/// A single r/AmItheAsshole submission as seen by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AitaPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    /// Net upvote score. Goes negative on heavily downvoted posts.
    pub score: i64,
    pub num_comments: u32,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_utc: i64,
    pub permalink: String,
    pub url: String,
}

/// Curated posts served when the live supply is unreachable.
///
/// The game must never be left with an empty working set, so this catalog is
/// always non-empty.
pub fn fallback_posts() -> Vec<AitaPost> {
    vec![
        AitaPost {
            id: "fallback_1".to_string(),
            title: "AITA for refusing to give up my airplane seat to a family?".to_string(),
            content: "I (28M) was flying home for the holidays and had booked an aisle seat in \
                      advance. A family with two young kids approached me asking if I could move \
                      to a middle seat so they could sit together. I politely declined because I \
                      specifically chose and paid extra for the aisle seat due to my long legs. \
                      The mother became very upset and said I was being selfish. Other passengers \
                      started staring and I felt awkward. AITA?"
                .to_string(),
            author: "TallTraveler28".to_string(),
            score: 2847,
            num_comments: 1203,
            created_utc: 1_766_016_000_000,
            permalink: "/r/AmItheAsshole/comments/fallback1/".to_string(),
            url: "https://reddit.com/r/AmItheAsshole/comments/fallback1/".to_string(),
        },
        AitaPost {
            id: "fallback_2".to_string(),
            title: "AITA for eating my roommate's leftovers?".to_string(),
            content: "My roommate (24F) left Chinese takeout in the fridge for 5 days. It was \
                      starting to smell and I was hungry, so I ate it and threw away the \
                      container. She came home and was furious, saying she was saving it for \
                      today. I told her food shouldn't sit in the fridge that long anyway and I \
                      was doing her a favor by preventing food poisoning. She's demanding I pay \
                      her back $15. AITA?"
                .to_string(),
            author: "HungryRoomie".to_string(),
            score: 4521,
            num_comments: 892,
            created_utc: 1_765_929_600_000,
            permalink: "/r/AmItheAsshole/comments/fallback2/".to_string(),
            url: "https://reddit.com/r/AmItheAsshole/comments/fallback2/".to_string(),
        },
        AitaPost {
            id: "fallback_3".to_string(),
            title: "AITA for not inviting my sister to my wedding?".to_string(),
            content: "My sister (30F) and I (28F) have had a rocky relationship. Last year, she \
                      missed my birthday party because she 'forgot' but posted on Instagram that \
                      same night at a bar with friends. She's also made several comments about my \
                      fianc\u{e9} being 'not good enough' for me. I decided not to invite her to \
                      my wedding to avoid drama. My parents are furious and say I'm tearing the \
                      family apart. AITA?"
                .to_string(),
            author: "BrideToBe2024".to_string(),
            score: 6234,
            num_comments: 1567,
            created_utc: 1_765_843_200_000,
            permalink: "/r/AmItheAsshole/comments/fallback3/".to_string(),
            url: "https://reddit.com/r/AmItheAsshole/comments/fallback3/".to_string(),
        },
        AitaPost {
            id: "fallback_4".to_string(),
            title: "AITA for telling my neighbor their dog is annoying?".to_string(),
            content: "My neighbor's dog barks constantly from 6 AM to 11 PM. I've tried to be \
                      patient for months, but it's affecting my work-from-home job and sleep. I \
                      finally went over and politely told them their dog was disturbing the peace \
                      and asked if they could do something about it. They got defensive and said \
                      'dogs bark, deal with it.' I told them their dog was poorly trained and \
                      annoying. Now they're giving me dirty looks. AITA?"
                .to_string(),
            author: "QuietNeighbor".to_string(),
            score: 8932,
            num_comments: 2341,
            created_utc: 1_765_756_800_000,
            permalink: "/r/AmItheAsshole/comments/fallback4/".to_string(),
            url: "https://reddit.com/r/AmItheAsshole/comments/fallback4/".to_string(),
        },
        AitaPost {
            id: "fallback_5".to_string(),
            title: "AITA for refusing to pay for my friend's expensive dinner?".to_string(),
            content: "My friend invited me to dinner at a fancy restaurant. She didn't mention it \
                      was expensive - I assumed it was casual dining. When I saw the menu, \
                      everything was $40-60 per dish. I ordered the cheapest salad ($28) while \
                      she got a $75 steak and $15 cocktails. When the bill came, she suggested we \
                      split it evenly. I said I'd only pay for what I ordered plus tip. She got \
                      embarrassed and said I was being cheap in front of our server. AITA?"
                .to_string(),
            author: "BudgetDiner".to_string(),
            score: 5678,
            num_comments: 1834,
            created_utc: 1_765_670_400_000,
            permalink: "/r/AmItheAsshole/comments/fallback5/".to_string(),
            url: "https://reddit.com/r/AmItheAsshole/comments/fallback5/".to_string(),
        },
    ]
}
