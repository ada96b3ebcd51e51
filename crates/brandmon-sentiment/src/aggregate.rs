//! Per-day and whole-batch rollups of labeled posts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::{LabeledPost, TriLabel};

/// Label counts for one UTC calendar day.
///
/// `counts` has one entry per label seen anywhere in the aggregated batch,
/// so rows of the same batch always share the same columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAggregate {
    pub day: NaiveDate,
    pub counts: Vec<(TriLabel, usize)>,
}

impl DailyAggregate {
    /// Count for `label`; 0 when the label is not a column of this batch.
    #[must_use]
    pub fn count(&self, label: TriLabel) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(0, |(_, n)| *n)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Serializes as a flat pivot row: `{"day": "2024-01-01", "POSITIVE": 1, ...}`.
impl Serialize for DailyAggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len() + 1))?;
        map.serialize_entry("day", &self.day)?;
        for (label, count) in &self.counts {
            map.serialize_entry(label.as_str(), count)?;
        }
        map.end()
    }
}

/// Roll labeled posts into one row per UTC day, ascending.
///
/// Days without posts are not emitted. Label columns appear in order of
/// first appearance while walking the days in ascending order.
#[must_use]
pub fn aggregate_daily(posts: &[LabeledPost]) -> Vec<DailyAggregate> {
    let mut by_day: BTreeMap<NaiveDate, Vec<TriLabel>> = BTreeMap::new();
    for post in posts {
        by_day
            .entry(post.post.timestamp.date_naive())
            .or_default()
            .push(post.tri_label);
    }

    let mut columns: Vec<TriLabel> = Vec::new();
    for label in by_day.values().flatten() {
        if !columns.contains(label) {
            columns.push(*label);
        }
    }

    by_day
        .into_iter()
        .map(|(day, labels)| DailyAggregate {
            day,
            counts: columns
                .iter()
                .map(|column| (*column, labels.iter().filter(|l| *l == column).count()))
                .collect(),
        })
        .collect()
}

/// Whole-batch label totals, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSummary {
    pub counts: Vec<(TriLabel, usize)>,
}

impl LabelSummary {
    #[must_use]
    pub fn count(&self, label: TriLabel) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(0, |(_, n)| *n)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

impl Serialize for LabelSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (label, count) in &self.counts {
            map.serialize_entry(label.as_str(), count)?;
        }
        map.end()
    }
}

/// Count labels across the whole batch. Labels that never occur are omitted;
/// equal counts fall back to POSITIVE, NEGATIVE, NEUTRAL order.
#[must_use]
pub fn summarize(posts: &[LabeledPost]) -> LabelSummary {
    let mut totals: BTreeMap<TriLabel, usize> = BTreeMap::new();
    for post in posts {
        *totals.entry(post.tri_label).or_default() += 1;
    }

    let mut counts: Vec<(TriLabel, usize)> = totals.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    LabelSummary { counts }
}
