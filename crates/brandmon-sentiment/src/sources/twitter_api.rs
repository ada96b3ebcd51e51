//! Credentialed source backed by the Twitter API v2 recent-search endpoint.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

use super::Source;
use crate::error::SourceError;
use crate::types::CanonicalPost;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/2/";
const SEARCH_PATH: &str = "tweets/search/recent";

/// The endpoint rejects `max_results` outside `10..=100`.
const MIN_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 100;

/// Upper bound on `next_token` hops for one fetch.
const MAX_PAGES: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<ApiTweet>,
    #[serde(default)]
    includes: Option<Includes>,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Default, Deserialize)]
struct PublicMetrics {
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    retweet_count: u64,
    #[serde(default)]
    reply_count: u64,
}

#[derive(Debug, Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<ApiUser>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: String,
    #[serde(default)]
    username: String,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(default)]
    next_token: Option<String>,
}

/// Recent-search client. Without a bearer token the source reports itself
/// unconfigured and the orchestrator skips it.
pub struct TwitterApiSource {
    client: Client,
    bearer_token: Option<String>,
    base_url: Url,
}

impl TwitterApiSource {
    /// Creates a source pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        bearer_token: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SourceError> {
        Self::with_base_url(bearer_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a source with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SourceError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        bearer_token: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SourceError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            bearer_token: bearer_token.filter(|t| !t.is_empty()),
            base_url,
        })
    }

    fn search_url(&self) -> Result<Url, SourceError> {
        self.base_url
            .join(SEARCH_PATH)
            .map_err(|e| SourceError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn fetch_page(
        &self,
        url: &Url,
        token: &str,
        params: &[(&str, String)],
    ) -> Result<SearchResponse, SourceError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| SourceError::Payload(format!("recent search response: {e}")))
    }
}

#[async_trait]
impl Source for TwitterApiSource {
    fn name(&self) -> &'static str {
        "twitter_api"
    }

    fn is_configured(&self) -> bool {
        self.bearer_token.is_some()
    }

    async fn try_fetch(
        &self,
        query: &str,
        limit: usize,
        since: Option<NaiveDate>,
    ) -> Result<Vec<CanonicalPost>, SourceError> {
        let token = self
            .bearer_token
            .as_deref()
            .ok_or(SourceError::MissingCredential)?;
        let url = self.search_url()?;

        let mut posts = Vec::new();
        let mut next_token: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let remaining = limit.saturating_sub(posts.len());
            let params = build_params(query, remaining, since, next_token.as_deref());
            let page = self.fetch_page(&url, token, &params).await?;

            let authors = author_index(page.includes);
            for tweet in page.data {
                if let Some(post) = to_post(tweet, &authors)? {
                    posts.push(post);
                }
            }

            if posts.len() >= limit {
                break;
            }
            match page.meta.and_then(|m| m.next_token) {
                Some(cursor) => next_token = Some(cursor),
                None => break,
            }
        }

        posts.truncate(limit);
        tracing::debug!(query, count = posts.len(), "collected Twitter API posts");
        Ok(posts)
    }
}

fn build_params(
    query: &str,
    remaining: usize,
    since: Option<NaiveDate>,
    next_token: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("query", query.to_string()),
        (
            "max_results",
            remaining.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE).to_string(),
        ),
        (
            "tweet.fields",
            "created_at,public_metrics,author_id".to_string(),
        ),
        ("expansions", "author_id".to_string()),
        ("user.fields", "username".to_string()),
    ];
    if let Some(day) = since {
        params.push(("start_time", format!("{}T00:00:00Z", day.format("%Y-%m-%d"))));
    }
    if let Some(token) = next_token {
        params.push(("next_token", token.to_string()));
    }
    params
}

fn author_index(includes: Option<Includes>) -> HashMap<String, String> {
    includes
        .map(|i| i.users)
        .unwrap_or_default()
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect()
}

fn to_post(
    tweet: ApiTweet,
    authors: &HashMap<String, String>,
) -> Result<Option<CanonicalPost>, SourceError> {
    let raw_date = tweet
        .created_at
        .ok_or_else(|| SourceError::Payload(format!("tweet {} has no created_at", tweet.id)))?;
    let timestamp = DateTime::parse_from_rfc3339(&raw_date)
        .map_err(|e| SourceError::Payload(format!("invalid created_at '{raw_date}': {e}")))?
        .with_timezone(&Utc);

    if tweet.text.trim().is_empty() {
        tracing::debug!(id = %tweet.id, "dropping tweet without text");
        return Ok(None);
    }

    let author = tweet
        .author_id
        .and_then(|id| authors.get(&id).cloned())
        .unwrap_or_default();
    let permalink = if author.is_empty() {
        format!("https://twitter.com/i/web/status/{}", tweet.id)
    } else {
        format!("https://twitter.com/{author}/status/{}", tweet.id)
    };
    let metrics = tweet.public_metrics.unwrap_or_default();

    Ok(Some(CanonicalPost {
        timestamp,
        author,
        text: tweet.text,
        like_count: metrics.like_count,
        share_count: metrics.retweet_count,
        reply_count: metrics.reply_count,
        permalink,
    }))
}
