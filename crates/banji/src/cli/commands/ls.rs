//! Implementation of `banji ls`.

use std::process::ExitCode;

use banji_store::{classes, students};

use crate::cli::args::LsWhat;
use crate::cli::context::CommandContext;
use crate::cli::output::table;

/// Lists students or classes as a table.
pub fn run(ctx: &CommandContext, what: LsWhat) -> ExitCode {
    let store = match ctx.open_store() {
        Ok(store) => store,
        Err(code) => return code,
    };
    match what {
        LsWhat::Students => {
            let students = match students::list_students(&store) {
                Ok(students) => students,
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            if students.is_empty() {
                println!("No students recorded.");
                return ExitCode::SUCCESS;
            }
            let mut out = table(&["id", "name", "number", "age", "grade"]);
            for s in students {
                out.add_row(vec![
                    s.id.to_string(),
                    s.name,
                    s.student_number.unwrap_or_default(),
                    s.age.map(|a| a.to_string()).unwrap_or_default(),
                    s.grade.unwrap_or_default(),
                ]);
            }
            println!("{out}");
        }
        LsWhat::Classes => {
            let classes = match classes::list_classes(&store) {
                Ok(classes) => classes,
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            if classes.is_empty() {
                println!("No classes recorded.");
                return ExitCode::SUCCESS;
            }
            let mut out = table(&["id", "name", "teacher", "term", "kind"]);
            for c in classes {
                out.add_row(vec![
                    c.id.to_string(),
                    c.name,
                    c.teacher_id.map(|t| t.to_string()).unwrap_or_default(),
                    c.term.unwrap_or_default(),
                    c.kind.unwrap_or_default(),
                ]);
            }
            println!("{out}");
        }
    }
    ExitCode::SUCCESS
}
