//! Keyword word-cloud rendering.
//!
//! Draws the weighted keyword table on a white canvas: heaviest word in the
//! centre at the largest size, the rest spiralling outward, colour cycling
//! by rank. Words that cannot fit are shrunk stepwise and dropped once they
//! fall below the minimum legible size. Output is
//! `{class_id}_word_cloud.png` in the configured directory.

use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;

use banji_analytics::ClassId;
use plotters::backend::BitMapBackend;
use plotters::drawing::IntoDrawingArea;
use plotters::element::Text;
use plotters::style::full_palette::{BLUE, BLUEGREY, BROWN, GREEN, ORANGE, PURPLE, RED, TEAL};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{IntoFont, RGBColor, WHITE};
use tracing::debug;

use crate::RenderConfig;
use crate::error::RenderError;
use crate::font::{FONT_FAMILY, ensure_font};
use crate::layout::{self, Rect};

/// Canvas width in pixels.
pub const CLOUD_WIDTH: u32 = 1000;

/// Canvas height in pixels.
pub const CLOUD_HEIGHT: u32 = 600;

/// Upper bound on words drawn, matching the ranking stage's candidate cap.
pub const MAX_WORDS: usize = 50;

/// How strongly font size tracks weight (0 = uniform, 1 = proportional).
const RELATIVE_SCALING: f64 = 0.8;

/// Font size of the heaviest keyword.
const MAX_FONT_SIZE: f64 = 96.0;

/// Smallest size a keyword may shrink to before it is dropped.
const MIN_FONT_SIZE: f64 = 14.0;

/// Shrink factor applied when a word fails to fit at its current size.
const SHRINK_STEP: f64 = 0.85;

/// Fill colours cycled by rank.
const PALETTE: [RGBColor; 8] = [BLUE, RED, GREEN, ORANGE, PURPLE, TEAL, BROWN, BLUEGREY];

/// Renders the word cloud for one class.
///
/// Zero-weight entries are dropped up front; an effectively empty table is
/// rejected with [`RenderError::EmptyInput`] so a blank canvas is never
/// written.
pub fn render_word_cloud_image(
    weights: &BTreeMap<String, u32>,
    class: ClassId,
    config: &RenderConfig,
) -> Result<PathBuf, RenderError> {
    let words = rank_words(weights);
    if words.is_empty() {
        return Err(RenderError::EmptyInput);
    }
    ensure_font(&config.font_path)?;

    let path = image_path(config, class);
    // The backend borrows its path until the final present(); draw against
    // a copy so the original can be returned.
    let backend_path = path.clone();
    let root = BitMapBackend::new(&backend_path, (CLOUD_WIDTH, CLOUD_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(to_draw_error)?;

    let heaviest = f64::from(words[0].1);
    let mut occupied: Vec<Rect> = Vec::new();
    let mut dropped = 0usize;
    for (rank, (token, weight)) in words.iter().enumerate() {
        let colour = PALETTE[rank % PALETTE.len()];
        let mut size = font_size(f64::from(*weight), heaviest);
        let mut placed = false;
        while size >= MIN_FONT_SIZE {
            let style = (FONT_FAMILY, size)
                .into_font()
                .color(&colour)
                .pos(Pos::new(HPos::Center, VPos::Center));
            let (width, height) = root
                .estimate_text_size(token, &style)
                .map_err(to_draw_error)?;
            let slot = layout::place(
                width as i32,
                height as i32,
                CLOUD_WIDTH as i32,
                CLOUD_HEIGHT as i32,
                &occupied,
            );
            if let Some((cx, cy)) = slot {
                root.draw(&Text::new(token.to_string(), (cx, cy), style))
                    .map_err(to_draw_error)?;
                occupied.push(Rect::centered(cx, cy, width as i32, height as i32));
                placed = true;
                break;
            }
            size *= SHRINK_STEP;
        }
        if !placed {
            dropped += 1;
        }
    }
    if dropped > 0 {
        debug!(class, dropped, "keywords did not fit on the cloud canvas");
    }

    root.present().map_err(to_draw_error)?;
    Ok(path)
}

/// Output file path for one class.
fn image_path(config: &RenderConfig, class: ClassId) -> PathBuf {
    config.out_dir.join(format!("{class}_word_cloud.png"))
}

/// Orders keywords heaviest first, token text breaking ties, capped at
/// [`MAX_WORDS`]. Zero weights have no drawable size and are dropped.
fn rank_words(weights: &BTreeMap<String, u32>) -> Vec<(&str, u32)> {
    let mut words: Vec<(&str, u32)> = weights
        .iter()
        .filter(|(_, weight)| **weight > 0)
        .map(|(token, weight)| (token.as_str(), *weight))
        .collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    words.truncate(MAX_WORDS);
    words
}

/// Font size for a weight relative to the heaviest keyword.
///
/// Blends proportional and uniform sizing by [`RELATIVE_SCALING`], so
/// mid-weight words stay legible next to a dominant top word. Never returns
/// less than [`MIN_FONT_SIZE`].
fn font_size(weight: f64, heaviest: f64) -> f64 {
    if heaviest <= 0.0 {
        return MIN_FONT_SIZE;
    }
    let ratio = RELATIVE_SCALING * (weight / heaviest) + (1.0 - RELATIVE_SCALING);
    (MAX_FONT_SIZE * ratio).max(MIN_FONT_SIZE)
}

/// Collapses backend drawing errors into a displayable message.
fn to_draw_error<E: Error>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}
