//! Implementation of `banji stats`.

use std::process::ExitCode;

use banji_store::grades::{self, ScoreSummary};
use banji_store::{Store, StoreError, queries, students};
use serde::Serialize;

use crate::cli::args::StatsWhat;
use crate::cli::context::CommandContext;
use crate::cli::output::{print_json, table};

/// One row of `banji stats counts`.
#[derive(Debug, Serialize)]
struct CountRow {
    /// Student id.
    student_id: i64,
    /// Student name, empty when the row is gone.
    name: String,
    /// Number of recorded questions.
    questions: u64,
}

/// One row of `banji stats scores`.
#[derive(Debug, Serialize)]
struct ScoreRow {
    /// Student id.
    student_id: i64,
    /// Student name, empty when the row is gone.
    name: String,
    /// Score aggregate.
    #[serde(flatten)]
    summary: ScoreSummary,
}

/// Prints per-student statistics as a table or JSON.
pub fn run(ctx: &CommandContext, what: &StatsWhat) -> ExitCode {
    let store = match ctx.open_store() {
        Ok(store) => store,
        Err(code) => return code,
    };
    let result = match what {
        StatsWhat::Counts { class, json } => counts(&store, *class, *json),
        StatsWhat::Scores { class, json } => scores(&store, *class, *json),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Question counts per enrolled student.
fn counts(store: &Store, class: Option<i64>, json: bool) -> Result<ExitCode, StoreError> {
    let counts = queries::query_counts(store, class)?;
    let ids: Vec<i64> = counts.keys().copied().collect();
    let names = students::student_names(store, &ids)?;
    let rows: Vec<CountRow> = counts
        .into_iter()
        .zip(names)
        .map(|((student_id, questions), name)| CountRow {
            student_id,
            name,
            questions,
        })
        .collect();

    if json {
        return Ok(print_json(&rows));
    }
    if rows.is_empty() {
        println!("No enrolled students.");
        return Ok(ExitCode::SUCCESS);
    }
    let mut out = table(&["id", "name", "questions"]);
    for row in rows {
        out.add_row(vec![
            row.student_id.to_string(),
            row.name,
            row.questions.to_string(),
        ]);
    }
    println!("{out}");
    Ok(ExitCode::SUCCESS)
}

/// Score totals and averages per enrolled student.
fn scores(store: &Store, class: Option<i64>, json: bool) -> Result<ExitCode, StoreError> {
    let summaries = grades::score_summary(store, class)?;
    let ids: Vec<i64> = summaries.keys().copied().collect();
    let names = students::student_names(store, &ids)?;
    let rows: Vec<ScoreRow> = summaries
        .into_iter()
        .zip(names)
        .map(|((student_id, summary), name)| ScoreRow {
            student_id,
            name,
            summary,
        })
        .collect();

    if json {
        return Ok(print_json(&rows));
    }
    if rows.is_empty() {
        println!("No enrolled students.");
        return Ok(ExitCode::SUCCESS);
    }
    let mut out = table(&["id", "name", "graded", "total", "average"]);
    for row in rows {
        out.add_row(vec![
            row.student_id.to_string(),
            row.name,
            row.summary.scores.len().to_string(),
            format!("{:.2}", row.summary.total),
            format!("{:.2}", row.summary.average),
        ]);
    }
    println!("{out}");
    Ok(ExitCode::SUCCESS)
}
