use chrono::{DateTime, Utc};
use serde::Serialize;

/// One acquired post, normalized from whichever source produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalPost {
    /// Creation instant, normalized to UTC.
    pub timestamp: DateTime<Utc>,
    /// Author handle; empty when the source does not report one.
    pub author: String,
    /// Post content. Never empty.
    pub text: String,
    pub like_count: u64,
    pub share_count: u64,
    pub reply_count: u64,
    /// Link to the post, or empty.
    pub permalink: String,
}

/// Raw classifier output for one input text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Polarity label as reported by the model, e.g. `POSITIVE`.
    pub label: String,
    /// Model confidence in [0, 1].
    pub score: f64,
}

/// Three-way sentiment outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriLabel {
    Positive,
    Negative,
    Neutral,
}

impl TriLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TriLabel::Positive => "POSITIVE",
            TriLabel::Negative => "NEGATIVE",
            TriLabel::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for TriLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post together with its classifier output and derived tri-state label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledPost {
    #[serde(flatten)]
    pub post: CanonicalPost,
    pub binary_label: String,
    pub confidence: f64,
    pub tri_label: TriLabel,
}
