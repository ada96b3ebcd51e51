//! Ordered-fallback acquisition.

use brandmon_core::AppConfig;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::SentimentError;
use crate::sources::{SampleSource, SnscrapeSource, Source, TwitterApiSource};
use crate::types::CanonicalPost;

/// Posts from exactly one source, plus which source produced them.
#[derive(Debug, Clone, Serialize)]
pub struct Acquisition {
    pub source: &'static str,
    pub posts: Vec<CanonicalPost>,
}

/// Tries sources in priority order and returns the first answer.
///
/// A source that fails is logged and passed over; its partial output, if
/// any, is discarded. An empty successful answer is final.
pub struct Acquirer {
    sources: Vec<Box<dyn Source>>,
}

impl Acquirer {
    #[must_use]
    pub fn new(sources: Vec<Box<dyn Source>>) -> Self {
        Self { sources }
    }

    /// The default chain: snscrape, then the Twitter API (when a bearer token
    /// is configured), then the offline sample.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidSourceConfig`] if the API client
    /// cannot be constructed from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        let twitter_api = TwitterApiSource::with_base_url(
            config.twitter_bearer_token.clone(),
            config.api_timeout_secs,
            &config.user_agent,
            &config.twitter_api_base_url,
        )
        .map_err(|e| SentimentError::InvalidSourceConfig(e.to_string()))?;

        Ok(Self::new(vec![
            Box::new(SnscrapeSource::new(config.snscrape_bin.clone())),
            Box::new(twitter_api),
            Box::new(SampleSource),
        ]))
    }

    /// Names of the configured sources, in priority order.
    #[must_use]
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Acquire up to `limit` posts for `query`.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::EmptyQuery`] / [`SentimentError::InvalidLimit`]
    ///   before any source is contacted.
    /// - [`SentimentError::SourcesExhausted`] if no source returned an answer.
    ///   The default chain ends with the offline sample and never does this.
    pub async fn acquire(
        &self,
        query: &str,
        limit: usize,
        since: Option<NaiveDate>,
    ) -> Result<Acquisition, SentimentError> {
        validate_acquire_args(query, limit)?;

        for source in &self.sources {
            let name = source.name();
            if !source.is_configured() {
                tracing::info!(source = name, "source not configured, skipping");
                continue;
            }

            match source.try_fetch(query, limit, since).await {
                Ok(posts) => {
                    tracing::info!(source = name, query, count = posts.len(), "acquired posts");
                    return Ok(Acquisition {
                        source: name,
                        posts,
                    });
                }
                Err(e) => {
                    tracing::warn!(source = name, query, error = %e, "source failed, falling back");
                }
            }
        }

        Err(SentimentError::SourcesExhausted)
    }
}

pub(crate) fn validate_acquire_args(query: &str, limit: usize) -> Result<(), SentimentError> {
    if query.trim().is_empty() {
        return Err(SentimentError::EmptyQuery);
    }
    if limit == 0 {
        return Err(SentimentError::InvalidLimit);
    }
    Ok(())
}

#[cfg(test)]
#[path = "acquire_test.rs"]
mod tests;
