//! Offline sample source: the availability floor of the fallback chain.
//!
//! Output is a pure function of `(query, limit)` and performs no I/O.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::Source;
use crate::error::SourceError;
use crate::types::CanonicalPost;

/// Upper bound on generated posts, whatever the requested limit.
const SAMPLE_MAX: usize = 150;

/// 2024-01-02T12:00:00Z. Sample timestamps are offsets from this instant.
const ANCHOR_EPOCH_SECS: i64 = 1_704_196_800;

struct Template {
    minutes_before_anchor: i64,
    author: &'static str,
    /// `{query}` is replaced with the search query.
    text: &'static str,
    likes: u64,
    shares: u64,
    replies: u64,
}

// The second template lands on the previous day so that any sample of two or
// more posts covers two calendar days.
const TEMPLATES: [Template; 3] = [
    Template {
        minutes_before_anchor: 60,
        author: "demo_user1",
        text: "I love {query}!",
        likes: 15,
        shares: 2,
        replies: 1,
    },
    Template {
        minutes_before_anchor: 24 * 60,
        author: "demo_user3",
        text: "{query} is okay - mixed feelings.",
        likes: 5,
        shares: 1,
        replies: 0,
    },
    Template {
        minutes_before_anchor: 120,
        author: "demo_user2",
        text: "{query} quality is not great lately.",
        likes: 3,
        shares: 0,
        replies: 0,
    },
];

/// Generate the deterministic offline sample for a query.
///
/// Templates are cycled until `min(limit, 150)` posts exist; each further
/// cycle is shifted one minute earlier so timestamps stay distinct.
#[must_use]
pub fn generate_sample(query: &str, limit: usize) -> Vec<CanonicalPost> {
    let anchor = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(ANCHOR_EPOCH_SECS);
    let count = limit.min(SAMPLE_MAX);

    (0..count)
        .map(|i| {
            let template = &TEMPLATES[i % TEMPLATES.len()];
            #[allow(clippy::cast_possible_wrap)] // i < SAMPLE_MAX
            let cycle = (i / TEMPLATES.len()) as i64;
            CanonicalPost {
                timestamp: anchor
                    - Duration::minutes(template.minutes_before_anchor + cycle),
                author: template.author.to_string(),
                text: template.text.replace("{query}", query),
                like_count: template.likes,
                share_count: template.shares,
                reply_count: template.replies,
                permalink: String::new(),
            }
        })
        .collect()
}

/// Source wrapper around [`generate_sample`]. Ignores `since`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleSource;

#[async_trait]
impl Source for SampleSource {
    fn name(&self) -> &'static str {
        "offline_sample"
    }

    async fn try_fetch(
        &self,
        query: &str,
        limit: usize,
        _since: Option<NaiveDate>,
    ) -> Result<Vec<CanonicalPost>, SourceError> {
        Ok(generate_sample(query, limit))
    }
}
