//! Implementation of `banji demo`.
//!
//! Seeds a small math classroom with bilingual questions so the keyword
//! reports have something real to chew on straight after `banji init`.

use std::process::ExitCode;

use banji_store::announcements;
use banji_store::assignments::{self, NewAssignment};
use banji_store::classes::{self, NewClass};
use banji_store::grades;
use banji_store::queries::{self, NewQuery};
use banji_store::students::{self, NewStudent};
use banji_store::teachers::{self, NewTeacher};
use banji_store::{Store, StoreError};

use crate::cli::context::CommandContext;

/// The sample questions, mixed Chinese and English like real classroom data.
const QUESTIONS: &[&str] = &[
    "什么是一元二次方程 how to solve quadratic equation",
    "数学的函数图像怎么画 function graph 解题技巧",
    "一元二次方程的求根公式是什么",
    "二次函数的顶点式和一般式转换",
    "how to calculate the discriminant of quadratic equation",
    "数学题的解题步骤 详细讲解",
    "函数的定义域和值域怎么求",
    "一元二次方程无解的条件是什么",
    "二次函数开口方向判断方法",
    "equation 的解法有哪几种",
    "数学公式记不住怎么办",
    "一元二次方程应用题解题思路",
    "vertex form of quadratic function 中文解释",
];

/// Seeds the sample classroom.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let store = match ctx.open_store() {
        Ok(store) => store,
        Err(code) => return code,
    };
    match seed(&store) {
        Ok(class) => {
            println!("Seeded demo classroom as class {class}");
            println!("Try: banji report all {class}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: demo seed failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Creates the teacher, class, students, questions, grades and notices.
fn seed(store: &Store) -> Result<i64, StoreError> {
    let teacher = teachers::add_teacher(
        store,
        &NewTeacher {
            name: "王老师",
            subject: Some("数学"),
            room: Some("301"),
            homeroom: None,
        },
    )?;
    let class = classes::add_class(
        store,
        &NewClass {
            name: "初三数学",
            teacher_id: Some(teacher),
            subject: Some("数学"),
            term: Some("2026 Fall"),
            grade: Some("G9"),
            kind: Some("compulsory"),
            ..NewClass::default()
        },
    )?;

    let names = ["李明", "张伟", "王芳", "Alice"];
    let mut roster = Vec::with_capacity(names.len());
    for name in names {
        let student = students::add_student(
            store,
            &NewStudent {
                name,
                ..NewStudent::default()
            },
        )?;
        classes::enroll(store, student, class)?;
        roster.push(student);
    }

    // Round-robin the questions over the first three students; the fourth
    // stays quiet so reports exercise the empty-list path.
    for (i, question) in QUESTIONS.iter().enumerate() {
        queries::add_query(
            store,
            &NewQuery {
                student: roster[i % 3],
                teacher: Some(teacher),
                class: Some(class),
                question,
                ..NewQuery::default()
            },
        )?;
    }

    let homework = assignments::add_assignment(
        store,
        &NewAssignment {
            title: "一元二次方程练习",
            description: Some("教材第3章习题 1-12"),
            due_at: "2026-09-10 23:59:00",
            class,
            teacher,
            total_points: Some(100.0),
            kind: Some("homework"),
        },
    )?;
    for (student, score) in roster.iter().zip([92.0, 85.5, 78.0]) {
        grades::record_grade(store, *student, homework, Some(score), None)?;
    }

    announcements::add_announcement(
        store,
        "期中考试安排",
        "期中考试下周三上午进行，覆盖一元二次方程与二次函数。",
        teacher,
        Some(class),
    )?;

    Ok(class)
}
