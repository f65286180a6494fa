//! banji-analytics: keyword analytics over student question text.
//!
//! Turns the questions students type into ranked keyword data for class
//! reports. The pipeline has four stages:
//!
//! 1. [`Corpus`] — a per-student snapshot of prompt text, produced by a
//!    [`PromptSource`] (the SQLite store in production, fixtures in tests)
//! 2. [`segment`] / [`extract_weighted`] — mixed Chinese/English
//!    tokenization backed by jieba
//! 3. [`Stopwords`] — a fixed bilingual function-word filter
//! 4. [`keyword_histogram`] / [`weighted_keywords`] — frequency and
//!    TF-IDF ranking, shaped for the chart renderers
//!
//! Every stage is a pure function over its input; nothing here touches the
//! database or the filesystem.

#![warn(missing_docs)]

mod corpus;
mod rank;
mod segment;
mod stopwords;

pub use corpus::{ClassId, Corpus, PromptSource, StudentId};
pub use rank::{CLOUD_TOP_K, HISTOGRAM_TOP_N, Histogram, keyword_histogram, weighted_keywords};
pub use segment::{WEIGHTED_POS_TAGS, WeightedKeyword, extract_weighted, segment};
pub use stopwords::{Stopwords, is_stopword};
