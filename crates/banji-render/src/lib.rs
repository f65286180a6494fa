//! banji-render: report images for keyword analytics.
//!
//! Two renderers, one per report style:
//! - [`render_histogram_chart`] — keyword frequency bar chart
//! - [`render_word_cloud_image`] — weighted keyword cloud
//!
//! Both draw PNG files named after the class id. Rendering is strict:
//! failures come back as [`RenderError`] and empty inputs are rejected, so
//! the caller decides whether to log, skip or abort. plotters is built
//! without the system font stack; the TrueType file named in
//! [`RenderConfig`] is registered at runtime and must cover CJK glyphs for
//! Chinese labels to be legible.

#![warn(missing_docs)]

use std::path::PathBuf;

mod cloud;
mod error;
mod font;
mod histogram;
mod layout;

pub use cloud::{CLOUD_HEIGHT, CLOUD_WIDTH, MAX_WORDS, render_word_cloud_image};
pub use error::RenderError;
pub use font::{FONT_FAMILY, ensure_font};
pub use histogram::{HIST_HEIGHT, HIST_WIDTH, render_histogram_chart};

/// Options shared by both renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// TrueType font used for all chart text; must cover CJK glyphs.
    pub font_path: PathBuf,
    /// Directory report images are written into.
    pub out_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("simhei.ttf"),
            out_dir: PathBuf::from("."),
        }
    }
}
