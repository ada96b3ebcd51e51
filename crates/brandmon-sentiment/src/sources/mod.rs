//! Post acquisition sources.
//!
//! Each source maps its upstream records into [`CanonicalPost`] at the
//! boundary; nothing downstream sees source-native shapes.

mod sample;
mod snscrape;
mod twitter_api;

pub use sample::{generate_sample, SampleSource};
pub use snscrape::SnscrapeSource;
pub use twitter_api::TwitterApiSource;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::SourceError;
use crate::types::CanonicalPost;

/// A ranked provider of posts for a query.
#[async_trait]
pub trait Source: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Whether the source has what it needs to run (e.g. a credential).
    ///
    /// Unconfigured sources are skipped by the orchestrator without being
    /// counted as failures.
    fn is_configured(&self) -> bool {
        true
    }

    /// Fetch up to `limit` posts matching `query`, optionally no older than `since`.
    ///
    /// An empty `Vec` is a valid, final answer.
    async fn try_fetch(
        &self,
        query: &str,
        limit: usize,
        since: Option<NaiveDate>,
    ) -> Result<Vec<CanonicalPost>, SourceError>;
}
