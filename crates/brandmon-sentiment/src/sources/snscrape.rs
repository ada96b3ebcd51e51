//! No-credential Twitter/X source via the `snscrape` CLI.
//!
//! Invokes `snscrape --jsonl --max-results=N twitter-search "{query}"` as a
//! subprocess and maps each JSON line to a [`CanonicalPost`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::Source;
use crate::error::SourceError;
use crate::types::CanonicalPost;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnscrapeRecord {
    date: String,
    #[serde(default)]
    user: Option<SnscrapeUser>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    raw_content: Option<String>,
    #[serde(default)]
    like_count: Option<u64>,
    #[serde(default)]
    retweet_count: Option<u64>,
    #[serde(default)]
    reply_count: Option<u64>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct SnscrapeUser {
    #[serde(default)]
    username: Option<String>,
}

/// Scraping source that needs no credentials.
pub struct SnscrapeSource {
    program: String,
}

impl SnscrapeSource {
    /// `program` is the executable to run, usually `snscrape`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Source for SnscrapeSource {
    fn name(&self) -> &'static str {
        "snscrape"
    }

    async fn try_fetch(
        &self,
        query: &str,
        limit: usize,
        since: Option<NaiveDate>,
    ) -> Result<Vec<CanonicalPost>, SourceError> {
        let args = build_args(query, limit, since);
        tracing::debug!(program = %self.program, ?args, "running snscrape");

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| SourceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::Process {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_jsonl(&String::from_utf8_lossy(&output.stdout), limit)
    }
}

/// The search expression, with `since` embedded as a query-language token.
fn build_search_query(query: &str, since: Option<NaiveDate>) -> String {
    match since {
        Some(day) => format!("{query} since:{}", day.format("%Y-%m-%d")),
        None => query.to_string(),
    }
}

fn build_args(query: &str, limit: usize, since: Option<NaiveDate>) -> Vec<String> {
    vec![
        "--jsonl".to_string(),
        format!("--max-results={limit}"),
        "twitter-search".to_string(),
        build_search_query(query, since),
    ]
}

/// Parse newline-delimited snscrape records.
///
/// Blank lines are ignored and records without text are dropped. Any line
/// that is not a valid record, or whose `date` does not parse, fails the
/// whole batch.
pub(crate) fn parse_jsonl(stdout: &str, limit: usize) -> Result<Vec<CanonicalPost>, SourceError> {
    let mut posts = Vec::new();

    for (line_no, line) in stdout.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record: SnscrapeRecord = serde_json::from_str(line).map_err(|e| {
            SourceError::Payload(format!("snscrape line {}: {e}", line_no + 1))
        })?;

        if let Some(post) = to_post(record)? {
            posts.push(post);
        }
        if posts.len() >= limit {
            break;
        }
    }

    Ok(posts)
}

fn to_post(record: SnscrapeRecord) -> Result<Option<CanonicalPost>, SourceError> {
    let timestamp = DateTime::parse_from_rfc3339(&record.date)
        .map_err(|e| SourceError::Payload(format!("invalid date '{}': {e}", record.date)))?
        .with_timezone(&Utc);

    let text = record
        .content
        .filter(|c| !c.trim().is_empty())
        .or(record.raw_content)
        .unwrap_or_default();
    if text.trim().is_empty() {
        tracing::debug!(date = %record.date, "dropping snscrape record without text");
        return Ok(None);
    }

    Ok(Some(CanonicalPost {
        timestamp,
        author: record.user.and_then(|u| u.username).unwrap_or_default(),
        text,
        like_count: record.like_count.unwrap_or(0),
        share_count: record.retweet_count.unwrap_or(0),
        reply_count: record.reply_count.unwrap_or(0),
        permalink: record.url.unwrap_or_default(),
    }))
}
