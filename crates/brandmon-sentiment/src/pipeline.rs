//! Search pipeline orchestration.

use chrono::NaiveDate;
use serde::Serialize;

use crate::acquire::{validate_acquire_args, Acquirer};
use crate::aggregate::{aggregate_daily, summarize, DailyAggregate, LabelSummary};
use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::labeler::{label_posts, NeutralBand};
use crate::types::LabeledPost;

/// Parameters of one search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub limit: usize,
    pub since: Option<NaiveDate>,
    pub neutral_lo: f64,
    pub neutral_hi: f64,
}

impl SearchRequest {
    /// A request using the default neutral band.
    #[must_use]
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
            since: None,
            neutral_lo: NeutralBand::DEFAULT_LO,
            neutral_hi: NeutralBand::DEFAULT_HI,
        }
    }
}

/// Everything derived from a single acquisition.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub query: String,
    /// Name of the source whose posts were used.
    pub source: &'static str,
    /// Labeled posts, newest first.
    pub items: Vec<LabeledPost>,
    pub summary: LabelSummary,
    pub trend: Vec<DailyAggregate>,
}

/// Run the full pipeline for one query.
///
/// 1. Validate the request (band, query, limit).
/// 2. Acquire posts through the fallback chain, once.
/// 3. Label the batch with `classifier`.
/// 4. Derive the label summary and the daily trend from that labeled batch.
///
/// # Errors
///
/// Returns configuration errors before any source or classifier call, and
/// propagates classifier failures. Source failures are absorbed by the
/// fallback chain.
pub async fn run_search<C>(
    acquirer: &Acquirer,
    classifier: &C,
    request: &SearchRequest,
) -> Result<SearchReport, SentimentError>
where
    C: SentimentClassifier + ?Sized,
{
    let band = NeutralBand::new(request.neutral_lo, request.neutral_hi)?;
    validate_acquire_args(&request.query, request.limit)?;

    let acquisition = acquirer
        .acquire(&request.query, request.limit, request.since)
        .await?;

    let labeled = label_posts(acquisition.posts, classifier, band).await?;
    let summary = summarize(&labeled);
    let trend = aggregate_daily(&labeled);

    let mut items = labeled;
    items.sort_by(|a, b| b.post.timestamp.cmp(&a.post.timestamp));

    tracing::info!(
        query = %request.query,
        source = acquisition.source,
        posts = items.len(),
        days = trend.len(),
        "search complete"
    );

    Ok(SearchReport {
        query: request.query.clone(),
        source: acquisition.source,
        items,
        summary,
        trend,
    })
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
