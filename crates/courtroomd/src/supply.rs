//! Post supply.
//!
//! Fetches a working set of AITA posts from the subreddit's JSON listing and
//! keeps it in an explicit TTL cache owned by the supply. Every failure path
//! degrades instead of erroring: unexpired cache first, then a live fetch,
//! then the stale cache, then the built-in fallback catalog. The working set
//! handed to the game is never empty.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use courtroom_common::{fallback_posts, AitaPost};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Minimum body length for a post to be judgeable.
const MIN_CONTENT_LEN: usize = 100;

/// Raw listing entry as returned by the subreddit JSON endpoint.
#[derive(Debug, Deserialize)]
struct RedditPost {
    id: String,
    title: String,
    selftext: String,
    author: String,
    score: i64,
    num_comments: u32,
    /// Seconds since the epoch; converted to milliseconds on ingest.
    created_utc: f64,
    permalink: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RedditListing {
    data: RedditListingData,
}

#[derive(Debug, Deserialize)]
struct RedditListingData {
    children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
struct RedditChild {
    data: RedditPost,
}

/// Timestamped working-set cache with a fixed TTL.
pub struct PostCache {
    posts: Vec<AitaPost>,
    fetched_at: Option<DateTime<Utc>>,
    ttl: Duration,
}

impl PostCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            posts: Vec::new(),
            fetched_at: None,
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Whether the cache holds posts fetched within the TTL.
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        if self.posts.is_empty() {
            return false;
        }
        match self.fetched_at {
            Some(at) => now - at < self.ttl,
            None => false,
        }
    }

    fn fill(&mut self, posts: Vec<AitaPost>, now: DateTime<Utc>) {
        self.posts = posts;
        self.fetched_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.posts.clear();
        self.fetched_at = None;
    }
}

/// Live post supply backed by the subreddit listing endpoint.
pub struct RedditSupply {
    client: reqwest::Client,
    source_url: String,
    cache: PostCache,
}

impl RedditSupply {
    pub fn new(source_url: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            source_url: source_url.into(),
            cache: PostCache::new(ttl_secs),
        }
    }

    /// Current working set, at most `count` posts. Never fails and never
    /// returns an empty set.
    pub async fn working_set(&mut self, count: usize) -> Vec<AitaPost> {
        let now = Utc::now();
        if self.cache.is_fresh(now) {
            debug!("Serving cached working set");
            return self.trimmed(count);
        }

        match self.fetch(count).await {
            Ok(posts) if !posts.is_empty() => {
                info!("Fetched {} posts from the live listing", posts.len());
                self.cache.fill(posts, now);
                self.trimmed(count)
            }
            Ok(_) => {
                warn!("Live listing contained no judgeable posts");
                self.stale_or_fallback(count)
            }
            Err(err) => {
                warn!("Post fetch failed: {err:#}");
                self.stale_or_fallback(count)
            }
        }
    }

    /// Drop the cache so the next call refetches.
    pub fn refresh(&mut self) {
        self.cache.clear();
        debug!("Post cache cleared");
    }

    async fn fetch(&self, count: usize) -> Result<Vec<AitaPost>> {
        // Request double the target so the post-filter yield still fills the
        // working set.
        let url = format!("{}?limit={}", self.source_url, count.saturating_mul(2));
        let listing: RedditListing = self
            .client
            .get(&url)
            .header("User-Agent", "karma-courtroom/0.4")
            .send()
            .await
            .context("Listing request failed")?
            .error_for_status()
            .context("Listing returned an error status")?
            .json()
            .await
            .context("Listing body was not valid JSON")?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .filter(is_judgeable)
            .take(count)
            .map(into_post)
            .collect())
    }

    fn stale_or_fallback(&self, count: usize) -> Vec<AitaPost> {
        if !self.cache.posts.is_empty() {
            info!("Serving stale cached posts");
            return self.trimmed(count);
        }
        info!("Serving built-in fallback posts");
        fallback_posts()
    }

    fn trimmed(&self, count: usize) -> Vec<AitaPost> {
        self.cache.posts.iter().take(count).cloned().collect()
    }
}

/// Keep only real, readable AITA submissions.
fn is_judgeable(post: &RedditPost) -> bool {
    let title = post.title.to_lowercase();
    post.selftext.len() > MIN_CONTENT_LEN
        && title.contains("aita")
        && !title.contains("[removed]")
        && !title.contains("[deleted]")
}

fn into_post(raw: RedditPost) -> AitaPost {
    AitaPost {
        id: raw.id,
        title: raw.title,
        content: raw.selftext,
        author: raw.author,
        score: raw.score,
        num_comments: raw.num_comments,
        created_utc: (raw.created_utc * 1000.0) as i64,
        permalink: raw.permalink,
        url: raw.url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, body_len: usize) -> RedditPost {
        RedditPost {
            id: "p1".to_string(),
            title: title.to_string(),
            selftext: "x".repeat(body_len),
            author: "tester".to_string(),
            score: 10,
            num_comments: 2,
            created_utc: 1_700_000_000.0,
            permalink: "/p".to_string(),
            url: "https://example.com/p".to_string(),
        }
    }

    #[test]
    fn test_judgeable_filter() {
        assert!(is_judgeable(&raw("AITA for testing?", 200)));
        assert!(!is_judgeable(&raw("AITA for testing?", 50))); // too short
        assert!(!is_judgeable(&raw("Meta thread", 200))); // not an AITA title
        assert!(!is_judgeable(&raw("AITA [removed]", 200)));
        assert!(!is_judgeable(&raw("aita [deleted]", 200)));
    }

    #[test]
    fn test_ingest_converts_seconds_to_millis() {
        let post = into_post(raw("AITA?", 200));
        assert_eq!(post.created_utc, 1_700_000_000_000);
        assert_eq!(post.content.len(), 200);
    }

    #[test]
    fn test_cache_freshness() {
        let now = Utc::now();
        let mut cache = PostCache::new(300);
        assert!(!cache.is_fresh(now));

        cache.fill(fallback_posts(), now);
        assert!(cache.is_fresh(now));
        assert!(cache.is_fresh(now + Duration::seconds(299)));
        assert!(!cache.is_fresh(now + Duration::seconds(300)));

        cache.clear();
        assert!(!cache.is_fresh(now));
    }

    #[tokio::test]
    async fn test_unreachable_source_falls_back() {
        // Nothing listens on port 1, so the request fails fast.
        let mut supply = RedditSupply::new("http://127.0.0.1:1/hot.json", 300);
        let posts = supply.working_set(10).await;
        assert!(!posts.is_empty());
        assert!(posts.iter().all(|p| p.id.starts_with("fallback_")));
    }
}
