//! Mixed Chinese/English tokenization backed by jieba.
//!
//! Two modes mirror the two report styles:
//! - [`segment`] cuts text into every surface token for frequency counting
//! - [`extract_weighted`] runs jieba's TF-IDF keyword extraction with a
//!   part-of-speech allow list for the word cloud
//!
//! The segmenter and the extractor load their bundled dictionaries once per
//! process and are shared behind `Lazy` statics.

use jieba_rs::{Jieba, Keyword, KeywordExtract, TfIdf};
use once_cell::sync::Lazy;

/// Process-wide segmenter with the bundled default dictionary.
static SEGMENTER: Lazy<Jieba> = Lazy::new(Jieba::new);

/// Process-wide TF-IDF extractor with the bundled IDF table.
static EXTRACTOR: Lazy<TfIdf> = Lazy::new(TfIdf::default);

/// Part-of-speech tags admitted into weighted extraction.
///
/// Nouns, verbal nouns, verbs and adjectives carry the subject matter of a
/// question; particles, numerals and Latin-tagged tokens are left to the
/// plain frequency mode.
pub const WEIGHTED_POS_TAGS: &[&str] = &["n", "vn", "v", "a"];

/// A keyword with its raw TF-IDF weight, as returned by [`extract_weighted`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedKeyword {
    /// The extracted token.
    pub token: String,
    /// Raw TF-IDF weight, before any scaling.
    pub weight: f64,
}

/// Cuts text into surface tokens.
///
/// Chinese runs are segmented with the HMM model enabled so unseen words
/// still come out whole; Latin runs come out as whole words. Whitespace-only
/// segments are discarded. No other filtering happens here — stop words
/// are removed downstream.
pub fn segment(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    SEGMENTER
        .cut(text, true)
        .into_iter()
        .filter(|token| !token.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts up to `top_k` keywords ranked by TF-IDF.
///
/// Only tokens tagged with one of [`WEIGHTED_POS_TAGS`] participate. Weights
/// are jieba's raw scores; scaling to integer weights happens in the
/// ranking stage.
pub fn extract_weighted(text: &str, top_k: usize) -> Vec<WeightedKeyword> {
    if text.trim().is_empty() || top_k == 0 {
        return Vec::new();
    }
    let allowed = WEIGHTED_POS_TAGS
        .iter()
        .map(|tag| (*tag).to_string())
        .collect();
    EXTRACTOR
        .extract_keywords(&SEGMENTER, text, top_k, allowed)
        .into_iter()
        .map(|Keyword { keyword, weight }| WeightedKeyword {
            token: keyword,
            weight,
        })
        .collect()
}
