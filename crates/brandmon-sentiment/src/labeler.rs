//! Tri-state labeling: binary classifier output plus a confidence band.
//!
//! A confidence inside the neutral band means "the classifier is unsure" and
//! yields [`TriLabel::Neutral`] regardless of polarity. This approximates a
//! three-class model; strongly worded posts whose score happens to sit near
//! 0.5 will be labeled neutral.

use std::collections::HashMap;

use serde::Serialize;

use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::types::{CanonicalPost, LabeledPost, Prediction, TriLabel};

/// Closed interval of confidences treated as neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeutralBand {
    lo: f64,
    hi: f64,
}

impl NeutralBand {
    pub const DEFAULT_LO: f64 = 0.45;
    pub const DEFAULT_HI: f64 = 0.55;

    /// Validate and build a band.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidBand`] if either bound is outside
    /// `[0, 1]` (or NaN) or `lo > hi`.
    pub fn new(lo: f64, hi: f64) -> Result<Self, SentimentError> {
        let unit = 0.0..=1.0;
        if !unit.contains(&lo) || !unit.contains(&hi) || lo > hi {
            return Err(SentimentError::InvalidBand { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Both bounds are inclusive.
    #[must_use]
    pub fn contains(&self, confidence: f64) -> bool {
        self.lo <= confidence && confidence <= self.hi
    }
}

impl Default for NeutralBand {
    fn default() -> Self {
        Self {
            lo: Self::DEFAULT_LO,
            hi: Self::DEFAULT_HI,
        }
    }
}

/// Derive the tri-state label for one classifier result.
#[must_use]
pub fn tri_label(binary_label: &str, confidence: f64, band: NeutralBand) -> TriLabel {
    if band.contains(confidence) {
        return TriLabel::Neutral;
    }
    let is_positive = binary_label
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("pos"));
    if is_positive {
        TriLabel::Positive
    } else {
        TriLabel::Negative
    }
}

/// Label a batch of posts.
///
/// Each distinct text is classified once, in a single call to `classifier`.
/// An empty batch returns immediately without touching the classifier.
///
/// # Errors
///
/// Propagates classifier failures, and returns [`SentimentError::Classifier`]
/// if the classifier's output is misaligned or a confidence lies outside
/// `[0, 1]`.
pub async fn label_posts<C>(
    posts: Vec<CanonicalPost>,
    classifier: &C,
    band: NeutralBand,
) -> Result<Vec<LabeledPost>, SentimentError>
where
    C: SentimentClassifier + ?Sized,
{
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    // Map each post to the slot of its text among the distinct texts.
    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    let mut distinct: Vec<&str> = Vec::new();
    let slots: Vec<usize> = posts
        .iter()
        .map(|post| {
            *slot_of.entry(post.text.as_str()).or_insert_with(|| {
                distinct.push(post.text.as_str());
                distinct.len() - 1
            })
        })
        .collect();

    let predictions = classifier.classify(&distinct).await?;
    validate_predictions(&predictions, distinct.len())?;

    tracing::debug!(
        posts = posts.len(),
        distinct_texts = predictions.len(),
        "labeled batch"
    );

    Ok(posts
        .into_iter()
        .zip(slots)
        .map(|(post, slot)| {
            let prediction = &predictions[slot];
            LabeledPost {
                post,
                binary_label: prediction.label.clone(),
                confidence: prediction.score,
                tri_label: tri_label(&prediction.label, prediction.score, band),
            }
        })
        .collect())
}

fn validate_predictions(predictions: &[Prediction], expected: usize) -> Result<(), SentimentError> {
    if predictions.len() != expected {
        return Err(SentimentError::Classifier(format!(
            "classifier returned {} predictions for {expected} inputs",
            predictions.len()
        )));
    }
    if let Some(bad) = predictions
        .iter()
        .find(|p| !(0.0..=1.0).contains(&p.score))
    {
        return Err(SentimentError::Classifier(format!(
            "classifier confidence {} is outside [0, 1]",
            bad.score
        )));
    }
    Ok(())
}

/// Classifier result for a single free-text input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrediction {
    pub binary_label: String,
    pub confidence: f64,
    pub tri_label: TriLabel,
}

/// Label one piece of text.
///
/// # Errors
///
/// Returns [`SentimentError::EmptyText`] for blank input before calling the
/// classifier, and propagates classifier failures.
pub async fn predict_text<C>(
    text: &str,
    classifier: &C,
    band: NeutralBand,
) -> Result<TextPrediction, SentimentError>
where
    C: SentimentClassifier + ?Sized,
{
    if text.trim().is_empty() {
        return Err(SentimentError::EmptyText);
    }

    let predictions = classifier.classify(&[text]).await?;
    validate_predictions(&predictions, 1)?;
    let prediction = &predictions[0];

    Ok(TextPrediction {
        binary_label: prediction.label.clone(),
        confidence: prediction.score,
        tri_label: tri_label(&prediction.label, prediction.score, band),
    })
}

#[cfg(test)]
#[path = "labeler_test.rs"]
mod tests;
