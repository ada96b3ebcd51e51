//! Brand sentiment pipeline.
//!
//! Acquires recent public posts about a query through a fallback chain of
//! sources (snscrape, the Twitter API v2, a bundled offline sample), labels
//! each post with a binary classifier plus a neutral confidence band, and
//! rolls the labels into a whole-batch summary and a per-day trend.

pub mod acquire;
pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod labeler;
pub mod lexicon;
pub mod pipeline;
pub mod sources;
pub mod types;

pub use acquire::{Acquirer, Acquisition};
pub use aggregate::{aggregate_daily, summarize, DailyAggregate, LabelSummary};
pub use classifier::{SentimentClassifier, TeiClassifier};
pub use error::{SentimentError, SourceError};
pub use labeler::{label_posts, predict_text, tri_label, NeutralBand, TextPrediction};
pub use lexicon::{lexicon_score, LexiconClassifier};
pub use pipeline::{run_search, SearchReport, SearchRequest};
pub use types::{CanonicalPost, LabeledPost, Prediction, TriLabel};
