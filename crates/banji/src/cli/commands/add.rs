//! Implementation of `banji add`.

use std::process::ExitCode;

use banji_store::classes::{self, NewClass};
use banji_store::queries::{self, NewQuery};
use banji_store::students::{self, NewStudent};
use banji_store::teachers::{self, NewTeacher};

use crate::cli::args::AddWhat;
use crate::cli::context::CommandContext;

/// Adds one record and prints its new id.
pub fn run(ctx: &CommandContext, what: &AddWhat) -> ExitCode {
    let store = match ctx.open_store() {
        Ok(store) => store,
        Err(code) => return code,
    };
    let added = match what {
        AddWhat::Student {
            name,
            number,
            age,
            email,
            grade,
        } => students::add_student(
            &store,
            &NewStudent {
                name,
                student_number: number.as_deref(),
                age: *age,
                email: email.as_deref(),
                grade: grade.as_deref(),
                ..NewStudent::default()
            },
        )
        .map(|id| ("student", id)),
        AddWhat::Teacher {
            name,
            subject,
            room,
        } => teachers::add_teacher(
            &store,
            &NewTeacher {
                name,
                subject: subject.as_deref(),
                room: room.as_deref(),
                homeroom: None,
            },
        )
        .map(|id| ("teacher", id)),
        AddWhat::Class {
            name,
            teacher,
            subject,
            term,
        } => classes::add_class(
            &store,
            &NewClass {
                name,
                teacher_id: *teacher,
                subject: subject.as_deref(),
                term: term.as_deref(),
                ..NewClass::default()
            },
        )
        .map(|id| ("class", id)),
        AddWhat::Query {
            student,
            question,
            class,
            teacher,
            answer,
        } => queries::add_query(
            &store,
            &NewQuery {
                student: *student,
                teacher: *teacher,
                class: *class,
                question,
                answer: answer.as_deref(),
                asked_at: None,
            },
        )
        .map(|id| ("query", id)),
    };

    match added {
        Ok((kind, id)) => {
            println!("Added {kind} {id}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
