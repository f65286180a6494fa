//! Keyword frequency bar chart.
//!
//! Renders ranked keyword counts as a vertical bar chart: translucent blue
//! bars, keyword labels rotated 90 degrees under the axis, counts on the y
//! axis. Output is `{class_id}_frequency_hist.png` in the configured
//! directory.

use std::error::Error;
use std::path::PathBuf;

use banji_analytics::{ClassId, Histogram};
use plotters::prelude::*;
use plotters::series::Histogram as HistogramSeries;
use plotters::style::full_palette::BLUE as BAR_BLUE;

use crate::RenderConfig;
use crate::error::RenderError;
use crate::font::{FONT_FAMILY, ensure_font};

/// Output image width in pixels (12in at 150dpi).
pub const HIST_WIDTH: u32 = 1800;

/// Output image height in pixels (6in at 150dpi).
pub const HIST_HEIGHT: u32 = 900;

/// Opacity of the bar fill.
const BAR_ALPHA: f64 = 0.8;

/// Renders the frequency bar chart for one class.
///
/// Bars appear in rank order, highest count leftmost. Empty histograms are
/// rejected with [`RenderError::EmptyInput`] so a blank chart is never
/// written; the caller decides whether that means skip or abort.
pub fn render_histogram_chart(
    histogram: &Histogram,
    class: ClassId,
    config: &RenderConfig,
) -> Result<PathBuf, RenderError> {
    if histogram.is_empty() {
        return Err(RenderError::EmptyInput);
    }
    ensure_font(&config.font_path)?;

    let path = chart_path(config, class);
    // The backend borrows its path until the final present(); draw against
    // a copy so the original can be returned.
    let backend_path = path.clone();
    let root = BitMapBackend::new(&backend_path, (HIST_WIDTH, HIST_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(to_draw_error)?;

    // Counts are ordered descending, so the first entry is the y ceiling.
    let y_max = histogram.counts.first().copied().unwrap_or(1);
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Class {class} - Query Keyword Frequency Statistics"),
            (FONT_FAMILY, 36),
        )
        .margin(20)
        .x_label_area_size(160)
        .y_label_area_size(80)
        .build_cartesian_2d((0..histogram.len()).into_segmented(), 0u64..y_max + 1)
        .map_err(to_draw_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Keywords")
        .y_desc("Frequency (Count)")
        .axis_desc_style((FONT_FAMILY, 24))
        .label_style((FONT_FAMILY, 18))
        .x_label_style(
            (FONT_FAMILY, 18)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_labels(histogram.len())
        .x_label_formatter(&|position| x_label(histogram, position))
        .draw()
        .map_err(to_draw_error)?;

    chart
        .draw_series(
            HistogramSeries::vertical(&chart)
                .style(BAR_BLUE.mix(BAR_ALPHA).filled())
                .margin(8)
                .data(histogram.counts.iter().copied().enumerate()),
        )
        .map_err(to_draw_error)?;

    root.present().map_err(to_draw_error)?;
    Ok(path)
}

/// Output file path for one class.
fn chart_path(config: &RenderConfig, class: ClassId) -> PathBuf {
    config.out_dir.join(format!("{class}_frequency_hist.png"))
}

/// Maps a segmented axis position back to its keyword label.
fn x_label(histogram: &Histogram, position: &SegmentValue<usize>) -> String {
    match position {
        SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => {
            histogram.labels.get(*index).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

/// Collapses backend drawing errors into a displayable message.
fn to_draw_error<E: Error>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}
