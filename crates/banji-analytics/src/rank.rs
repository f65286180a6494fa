//! Keyword ranking for the two report styles.
//!
//! [`keyword_histogram`] counts surface tokens and keeps the most frequent
//! for the bar chart. [`weighted_keywords`] scales jieba's TF-IDF weights to
//! integers for the word cloud. Both apply the shared stop-word filter and
//! drop empty tokens; single-character content words are kept.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::segment::{extract_weighted, segment};
use crate::stopwords::Stopwords;

/// Number of bars in the frequency histogram.
pub const HISTOGRAM_TOP_N: usize = 20;

/// Number of keyword candidates fed to the word cloud.
pub const CLOUD_TOP_K: usize = 50;

/// Multiplier applied to raw TF-IDF weights before integer truncation.
const WEIGHT_SCALE: f64 = 1000.0;

/// Ranked keyword frequencies, shaped for the bar chart renderer.
///
/// `labels[i]` pairs with `counts[i]`; entries are ordered by descending
/// count. Ties keep first-seen token order, so equal-count keywords appear
/// in the order the corpus first produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histogram {
    /// Keyword labels, highest count first.
    pub labels: Vec<String>,
    /// Occurrence counts, parallel to `labels`.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Number of ranked keywords.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true when there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates `(label, count)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }
}

/// Counts keyword frequencies and keeps the `top_n` most frequent.
///
/// Tokens come from [`segment`]; stop words and empty tokens are dropped,
/// everything else counts. Sorting is by count descending with first-seen
/// order breaking ties.
pub fn keyword_histogram(text: &str, top_n: usize) -> Histogram {
    let stopwords = Stopwords::shared();
    let mut counts: HashMap<String, (u64, usize)> = HashMap::new();
    let mut next_seen = 0usize;
    for token in segment(text) {
        if token.is_empty() || stopwords.contains(&token) {
            continue;
        }
        let slot = counts.entry(token).or_insert_with(|| {
            let seen = next_seen;
            next_seen += 1;
            (0, seen)
        });
        slot.0 += 1;
    }

    let mut ranked: Vec<(String, u64, usize)> = counts
        .into_iter()
        .map(|(token, (count, seen))| (token, count, seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(&b.2)));
    ranked.truncate(top_n);

    let mut histogram = Histogram::default();
    for (token, count, _) in ranked {
        histogram.labels.push(token);
        histogram.counts.push(count);
    }
    histogram
}

/// Extracts TF-IDF-weighted keywords and scales them to integer weights.
///
/// Runs [`extract_weighted`] with `top_k` candidates, removes stop words
/// and empty tokens, then maps each raw weight through [`scale_weight`].
/// The result is keyed by token; `BTreeMap` ordering keeps serialized
/// output stable.
pub fn weighted_keywords(text: &str, top_k: usize) -> BTreeMap<String, u32> {
    let stopwords = Stopwords::shared();
    let mut table = BTreeMap::new();
    for keyword in extract_weighted(text, top_k) {
        if keyword.token.is_empty() || stopwords.contains(&keyword.token) {
            continue;
        }
        table.insert(keyword.token, scale_weight(keyword.weight));
    }
    table
}

/// Scales a raw TF-IDF weight to an integer. Truncates, never rounds.
fn scale_weight(weight: f64) -> u32 {
    (weight * WEIGHT_SCALE) as u32
}
