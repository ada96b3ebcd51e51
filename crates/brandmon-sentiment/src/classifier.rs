//! Binary sentiment classifier contract and the TEI-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::types::Prediction;

/// Maximum number of texts per /predict call.
const BATCH_SIZE: usize = 32;

/// A black-box binary classifier.
///
/// Implementations return exactly one [`Prediction`] per input, in input
/// order, and reject empty input strings.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify a batch of texts.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] when the model rejects the input or fails.
    async fn classify(&self, texts: &[&str]) -> Result<Vec<Prediction>, SentimentError>;
}

/// Client for a Text Embeddings Inference server hosting a
/// sequence-classification model (e.g. an SST-2 fine-tune).
pub struct TeiClassifier {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: Vec<[&'a str; 1]>,
    truncate: bool,
}

#[derive(Deserialize)]
struct TeiScore {
    label: String,
    score: f64,
}

impl TeiClassifier {
    /// Create a new `TeiClassifier` for the server at `tei_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(tei_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/predict", tei_url.trim_end_matches('/')),
        })
    }

    async fn predict_chunk(&self, chunk: &[&str]) -> Result<Vec<Prediction>, SentimentError> {
        let request = PredictRequest {
            inputs: chunk.iter().map(|t| [*t]).collect(),
            truncate: true,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SentimentError::Classifier(format!("TEI request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SentimentError::Classifier(format!(
                "TEI returned status {status}: {}",
                body.trim()
            )));
        }

        let scores: Vec<Vec<TeiScore>> = response
            .json()
            .await
            .map_err(|e| SentimentError::Classifier(format!("TEI response parse error: {e}")))?;

        if scores.len() != chunk.len() {
            return Err(SentimentError::Classifier(format!(
                "TEI returned {} predictions for {} inputs",
                scores.len(),
                chunk.len()
            )));
        }

        scores.into_iter().map(top_prediction).collect()
    }
}

/// Highest-scoring label of one input's score list.
fn top_prediction(scores: Vec<TeiScore>) -> Result<Prediction, SentimentError> {
    scores
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|s| Prediction {
            label: s.label,
            score: s.score,
        })
        .ok_or_else(|| SentimentError::Classifier("TEI returned no scores for an input".into()))
}

#[async_trait]
impl SentimentClassifier for TeiClassifier {
    async fn classify(&self, texts: &[&str]) -> Result<Vec<Prediction>, SentimentError> {
        if texts.iter().any(|t| t.trim().is_empty()) {
            return Err(SentimentError::Classifier(
                "empty text cannot be classified".into(),
            ));
        }

        let mut predictions = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(BATCH_SIZE) {
            predictions.extend(self.predict_chunk(chunk).await?);
        }
        tracing::debug!(count = predictions.len(), "classified texts via TEI");
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wraps_each_input() {
        let request = PredictRequest {
            inputs: vec![["I like you."], ["I hate you."]],
            truncate: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inputs": [["I like you."], ["I hate you."]],
                "truncate": true
            })
        );
    }

    #[test]
    fn top_prediction_picks_highest_score() {
        let scores = vec![
            TeiScore {
                label: "NEGATIVE".into(),
                score: 0.1,
            },
            TeiScore {
                label: "POSITIVE".into(),
                score: 0.9,
            },
        ];
        let prediction = top_prediction(scores).unwrap();
        assert_eq!(prediction.label, "POSITIVE");
        assert!((prediction.score - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn top_prediction_of_empty_list_is_error() {
        assert!(matches!(
            top_prediction(Vec::new()),
            Err(SentimentError::Classifier(_))
        ));
    }

    #[test]
    fn url_is_normalised() {
        let classifier = TeiClassifier::new("http://tei:8080/", 5, "ua").unwrap();
        assert_eq!(classifier.url, "http://tei:8080/predict");
    }
}
