//! Offline word-weight classifier.
//!
//! A stand-in for the hosted model when no classifier server is reachable.
//! It honours the same contract as [`TeiClassifier`](crate::TeiClassifier):
//! one prediction per input with a confidence in [0, 1].

use async_trait::async_trait;

use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::types::Prediction;

/// General-purpose consumer sentiment weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("awesome", 0.5),
    ("love", 0.5),
    ("loved", 0.5),
    ("best", 0.5),
    ("recommend", 0.4),
    ("quality", 0.2),
    ("delicious", 0.4),
    ("happy", 0.4),
    ("fast", 0.2),
    ("favorite", 0.4),
    ("perfect", 0.5),
    ("nice", 0.3),
    ("reliable", 0.4),
    ("thanks", 0.2),
    ("win", 0.4),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("awful", -0.6),
    ("worst", -0.6),
    ("hate", -0.6),
    ("broken", -0.5),
    ("refund", -0.4),
    ("recall", -0.6),
    ("slow", -0.3),
    ("disappointed", -0.5),
    ("disappointing", -0.5),
    ("failed", -0.4),
    ("failure", -0.4),
    ("problem", -0.3),
    ("scam", -0.7),
    ("useless", -0.6),
    ("lawsuit", -0.5),
    ("overpriced", -0.4),
];

/// Words that flip the polarity of the next lexicon hit.
const NEGATORS: &[&str] = &["not", "no", "never", "isn't", "wasn't", "don't", "didn't"];

/// Score a text string using the lexicon.
///
/// Splits text into lowercase words, sums matching weights (flipping a weight
/// that directly follows a negator), and clamps the result to `[-1.0, 1.0]`.
/// Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f64 {
    let mut score = 0.0_f64;
    let mut negate = false;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic() && c != '\'')
            .to_lowercase();
        if NEGATORS.contains(&w.as_str()) {
            negate = true;
            continue;
        }
        if let Some(&(_, weight)) = LEXICON.iter().find(|(lex_word, _)| *lex_word == w) {
            score += if negate { -weight } else { weight };
        }
        negate = false;
    }
    score.clamp(-1.0, 1.0)
}

/// Map a lexicon score to a binary prediction.
///
/// Text with no known words scores 0.0 and gets confidence 0.5.
fn to_prediction(score: f64) -> Prediction {
    let label = if score >= 0.0 { "POSITIVE" } else { "NEGATIVE" };
    Prediction {
        label: label.to_string(),
        score: 0.5 + score.abs() / 2.0,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconClassifier;

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    async fn classify(&self, texts: &[&str]) -> Result<Vec<Prediction>, SentimentError> {
        texts
            .iter()
            .map(|text| {
                if text.trim().is_empty() {
                    Err(SentimentError::Classifier(
                        "empty text cannot be classified".into(),
                    ))
                } else {
                    Ok(to_prediction(lexicon_score(text)))
                }
            })
            .collect()
    }
}
