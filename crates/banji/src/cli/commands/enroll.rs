//! Implementation of `banji enroll`.

use std::process::ExitCode;

use banji_store::classes;

use crate::cli::context::CommandContext;

/// Enrolls a student in a class.
pub fn run(ctx: &CommandContext, student: i64, class: i64) -> ExitCode {
    let store = match ctx.open_store() {
        Ok(store) => store,
        Err(code) => return code,
    };
    match classes::enroll(&store, student, class) {
        Ok(()) => {
            println!("Enrolled student {student} in class {class}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
