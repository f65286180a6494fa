//! banji-report: class keyword report entry points.
//!
//! Ties the pipeline together: pull a prompt snapshot from a
//! [`PromptSource`], rank keywords, hand the result to a renderer. The
//! entry points are meant for batch report jobs, so they never panic and
//! never return an error: anything that goes wrong is logged through
//! `tracing` and the report is skipped.

#![warn(missing_docs)]

use banji_analytics::{
    CLOUD_TOP_K, ClassId, Corpus, HISTOGRAM_TOP_N, PromptSource, keyword_histogram,
    weighted_keywords,
};
use banji_render::{RenderConfig, render_histogram_chart, render_word_cloud_image};
use tracing::{debug, error, info, warn};

/// Renders the keyword frequency histogram for one class.
///
/// Fetches the class's prompt snapshot from `source`, counts keywords and
/// writes `{class_id}_frequency_hist.png` into the configured output
/// directory. Invalid ids, empty snapshots and render failures are logged
/// and swallowed; no file is written in those cases.
pub fn render_histogram<P: PromptSource>(source: &P, config: &RenderConfig, class: ClassId) {
    let Some(corpus) = class_corpus(source, class) else {
        return;
    };
    let histogram = keyword_histogram(&corpus.full_text(), HISTOGRAM_TOP_N);
    if histogram.is_empty() {
        warn!(
            class,
            "no keywords after filtering; skipping frequency histogram"
        );
        return;
    }
    match render_histogram_chart(&histogram, class, config) {
        Ok(path) => info!(class, path = %path.display(), "frequency histogram written"),
        Err(err) => error!(class, %err, "frequency histogram failed"),
    }
}

/// Renders the weighted keyword cloud for one class.
///
/// Same contract as [`render_histogram`], writing
/// `{class_id}_word_cloud.png` instead.
pub fn render_word_cloud<P: PromptSource>(source: &P, config: &RenderConfig, class: ClassId) {
    let Some(corpus) = class_corpus(source, class) else {
        return;
    };
    let weights = weighted_keywords(&corpus.full_text(), CLOUD_TOP_K);
    if weights.is_empty() {
        warn!(class, "no weighted keywords; skipping word cloud");
        return;
    }
    match render_word_cloud_image(&weights, class, config) {
        Ok(path) => info!(class, path = %path.display(), "word cloud written"),
        Err(err) => error!(class, %err, "word cloud failed"),
    }
}

/// Validates the class id and pulls its prompt snapshot.
///
/// Returns `None` (already logged) for non-positive ids and for snapshots
/// with no prompt text at all.
fn class_corpus<P: PromptSource>(source: &P, class: ClassId) -> Option<Corpus> {
    if class <= 0 {
        error!(class, "class id must be a positive integer");
        return None;
    }
    let corpus = source.student_prompts(Some(class));
    debug!(
        class,
        students = corpus.student_count(),
        prompts = corpus.prompt_count(),
        "collected prompt snapshot"
    );
    if corpus.is_empty() {
        warn!(class, "no prompts recorded; skipping report");
        return None;
    }
    Some(corpus)
}
