//! Implementation of `banji report`.
//!
//! Thin wrapper over the report entry points, which never fail the
//! caller: problems (bad class id, empty class, missing font) are logged
//! and the command still exits successfully, matching the batch-job
//! contract of the pipeline.

use std::process::ExitCode;

use banji_report::{render_histogram, render_word_cloud};

use crate::cli::args::ReportWhat;
use crate::cli::context::CommandContext;

/// Generates keyword report images for one class.
pub fn run(ctx: &CommandContext, what: ReportWhat) -> ExitCode {
    let store = match ctx.open_store() {
        Ok(store) => store,
        Err(code) => return code,
    };
    let render = ctx.render_config();
    match what {
        ReportWhat::Hist { class } => render_histogram(&store, &render, class),
        ReportWhat::Cloud { class } => render_word_cloud(&store, &render, class),
        ReportWhat::All { class } => {
            // Each report stands alone; a word-cloud failure must not
            // block the histogram, so both always run.
            render_histogram(&store, &render, class);
            render_word_cloud(&store, &render, class);
        }
    }
    ExitCode::SUCCESS
}
