//! Grades.
//!
//! One grade row per student×assignment pair. [`score_summary`] is the
//! aggregate the class reports use: per-student total, two-decimal
//! average, and the ordered list of scores, with zeros for students who
//! have nothing graded yet.

use std::collections::BTreeMap;

use rusqlite::{OptionalExtension, params};
use serde::Serialize;

use crate::{
    AssignmentId, ClassId, Store, StoreError, StudentId, assignments, require, students,
};

/// Identifier for a grade row.
pub type GradeId = i64;

/// Per-student score aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// Sum of all graded scores, two decimals.
    pub total: f64,
    /// Average of all graded scores, two decimals; zero when ungraded.
    pub average: f64,
    /// Every graded score in grading order, each two decimals.
    pub scores: Vec<f64>,
}

/// Records a grade for a student on an assignment.
///
/// The student×assignment pair is unique; re-recording replaces the
/// earlier row so a regrade does not need a separate code path.
pub fn record_grade(
    store: &Store,
    student: StudentId,
    assignment: AssignmentId,
    score: Option<f64>,
    comment: Option<&str>,
) -> Result<GradeId, StoreError> {
    validate_score(score)?;
    students::require_student(store, student)?;
    assignments::require_assignment(store, assignment)?;
    store.conn().execute(
        "INSERT INTO grades (student_id, assignment_id, score, comment)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (student_id, assignment_id)
         DO UPDATE SET score = excluded.score, comment = excluded.comment",
        params![student, assignment, score, comment],
    )?;
    let id = store.conn().query_row(
        "SELECT id FROM grades WHERE student_id = ?1 AND assignment_id = ?2",
        params![student, assignment],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Reads one score, `None` when ungraded or unrecorded.
pub fn get_score(
    store: &Store,
    student: StudentId,
    assignment: AssignmentId,
) -> Result<Option<f64>, StoreError> {
    let score = store
        .conn()
        .query_row(
            "SELECT score FROM grades WHERE student_id = ?1 AND assignment_id = ?2",
            params![student, assignment],
            |row| row.get(0),
        )
        .optional()?;
    Ok(score.flatten())
}

/// Changes the score on an existing grade row.
pub fn set_score(
    store: &Store,
    student: StudentId,
    assignment: AssignmentId,
    score: Option<f64>,
) -> Result<(), StoreError> {
    validate_score(score)?;
    let changed = store.conn().execute(
        "UPDATE grades SET score = ?1 WHERE student_id = ?2 AND assignment_id = ?3",
        params![score, student, assignment],
    )?;
    require(changed > 0, "grade for student", student)
}

/// Changes the feedback comment on an existing grade row.
pub fn set_feedback(
    store: &Store,
    student: StudentId,
    assignment: AssignmentId,
    feedback: Option<&str>,
) -> Result<(), StoreError> {
    let changed = store.conn().execute(
        "UPDATE grades SET comment = ?1 WHERE student_id = ?2 AND assignment_id = ?3",
        params![feedback, student, assignment],
    )?;
    require(changed > 0, "grade for student", student)
}

/// Reads the feedback comment, `None` when absent.
pub fn get_feedback(
    store: &Store,
    student: StudentId,
    assignment: AssignmentId,
) -> Result<Option<String>, StoreError> {
    let comment = store
        .conn()
        .query_row(
            "SELECT comment FROM grades WHERE student_id = ?1 AND assignment_id = ?2",
            params![student, assignment],
            |row| row.get(0),
        )
        .optional()?;
    Ok(comment.flatten())
}

/// Score aggregates for every enrolled student.
///
/// Scoped to one class's roster when `class` is given. Like the prompt
/// snapshot, every enrolled student gets an entry; students with nothing
/// graded keep the zero-valued default.
pub fn score_summary(
    store: &Store,
    class: Option<ClassId>,
) -> Result<BTreeMap<StudentId, ScoreSummary>, StoreError> {
    let mut summaries: BTreeMap<StudentId, ScoreSummary> = BTreeMap::new();
    let roster_sql = "SELECT DISTINCT student_id FROM enrollments
                      WHERE ?1 IS NULL OR class_id = ?1
                      ORDER BY student_id";
    let mut stmt = store.conn().prepare(roster_sql)?;
    let roster = stmt.query_map(params![class], |row| row.get::<_, StudentId>(0))?;
    for student in roster {
        summaries.insert(student?, ScoreSummary::default());
    }

    let grades_sql = "SELECT g.student_id, g.score
                      FROM grades g
                      WHERE g.score IS NOT NULL
                      ORDER BY g.student_id, g.graded_at, g.id";
    let mut stmt = store.conn().prepare(grades_sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, StudentId>(0)?, row.get::<_, f64>(1)?))
    })?;
    for row in rows {
        let (student, score) = row?;
        if let Some(summary) = summaries.get_mut(&student) {
            summary.scores.push(round2(score));
        }
    }

    for summary in summaries.values_mut() {
        if summary.scores.is_empty() {
            continue;
        }
        let total: f64 = summary.scores.iter().sum();
        summary.total = round2(total);
        summary.average = round2(summary.total / summary.scores.len() as f64);
    }
    Ok(summaries)
}

/// Rejects negative scores before they reach SQL.
fn validate_score(score: Option<f64>) -> Result<(), StoreError> {
    if let Some(score) = score
        && score < 0.0
    {
        return Err(StoreError::Invalid {
            field: "score",
            reason: "must be non-negative",
        });
    }
    Ok(())
}

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assignments::NewAssignment;
    use crate::classes::{self, NewClass};
    use crate::students::{self, NewStudent};
    use crate::teachers::{self, NewTeacher};

    struct Fixture {
        store: Store,
        class: ClassId,
        students: Vec<StudentId>,
        assignment: AssignmentId,
    }

    fn fixture(names: &[&str]) -> Fixture {
        let store = Store::open_in_memory().unwrap();
        let teacher = teachers::add_teacher(
            &store,
            &NewTeacher {
                name: "t",
                ..NewTeacher::default()
            },
        )
        .unwrap();
        let class = classes::add_class(
            &store,
            &NewClass {
                name: "math",
                ..NewClass::default()
            },
        )
        .unwrap();
        let ids = names
            .iter()
            .map(|name| {
                let id = students::add_student(
                    &store,
                    &NewStudent {
                        name,
                        ..NewStudent::default()
                    },
                )
                .unwrap();
                classes::enroll(&store, id, class).unwrap();
                id
            })
            .collect();
        let assignment = assignments::add_assignment(
            &store,
            &NewAssignment {
                title: "hw1",
                description: None,
                due_at: "2026-09-10 23:59:00",
                class,
                teacher,
                total_points: Some(100.0),
                kind: None,
            },
        )
        .unwrap();
        Fixture {
            store,
            class,
            students: ids,
            assignment,
        }
    }

    #[test]
    fn record_and_read_back() {
        let f = fixture(&["a"]);
        record_grade(&f.store, f.students[0], f.assignment, Some(87.5), Some("好")).unwrap();
        assert_eq!(
            get_score(&f.store, f.students[0], f.assignment).unwrap(),
            Some(87.5)
        );
        assert_eq!(
            get_feedback(&f.store, f.students[0], f.assignment).unwrap(),
            Some("好".to_string())
        );
    }

    #[test]
    fn re_recording_replaces_the_grade() {
        let f = fixture(&["a"]);
        record_grade(&f.store, f.students[0], f.assignment, Some(60.0), None).unwrap();
        record_grade(&f.store, f.students[0], f.assignment, Some(72.0), Some("regrade")).unwrap();
        assert_eq!(
            get_score(&f.store, f.students[0], f.assignment).unwrap(),
            Some(72.0)
        );
        let count: i64 = f
            .store
            .conn()
            .query_row("SELECT COUNT(*) FROM grades", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn negative_scores_are_rejected() {
        let f = fixture(&["a"]);
        assert!(record_grade(&f.store, f.students[0], f.assignment, Some(-1.0), None).is_err());
        record_grade(&f.store, f.students[0], f.assignment, Some(50.0), None).unwrap();
        assert!(set_score(&f.store, f.students[0], f.assignment, Some(-2.0)).is_err());
    }

    #[test]
    fn setters_need_an_existing_grade_row() {
        let f = fixture(&["a"]);
        assert!(set_score(&f.store, f.students[0], f.assignment, Some(1.0)).is_err());
        assert!(set_feedback(&f.store, f.students[0], f.assignment, Some("x")).is_err());
    }

    #[test]
    fn summary_has_zeros_for_ungraded_students() {
        let f = fixture(&["graded", "ungraded"]);
        record_grade(&f.store, f.students[0], f.assignment, Some(80.0), None).unwrap();

        let summary = score_summary(&f.store, Some(f.class)).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[&f.students[0]].total, 80.0);
        assert_eq!(summary[&f.students[0]].average, 80.0);
        assert_eq!(summary[&f.students[1]], ScoreSummary::default());
    }

    #[test]
    fn summary_averages_to_two_decimals() {
        let f = fixture(&["a"]);
        let teacher = teachers::add_teacher(
            &f.store,
            &NewTeacher {
                name: "t2",
                ..NewTeacher::default()
            },
        )
        .unwrap();
        let hw2 = assignments::add_assignment(
            &f.store,
            &NewAssignment {
                title: "hw2",
                description: None,
                due_at: "2026-09-20 23:59:00",
                class: f.class,
                teacher,
                total_points: None,
                kind: None,
            },
        )
        .unwrap();
        record_grade(&f.store, f.students[0], f.assignment, Some(85.0), None).unwrap();
        record_grade(&f.store, f.students[0], hw2, Some(90.5), None).unwrap();

        let summary = score_summary(&f.store, Some(f.class)).unwrap();
        let entry = &summary[&f.students[0]];
        assert_eq!(entry.scores, vec![85.0, 90.5]);
        assert_eq!(entry.total, 175.5);
        assert_eq!(entry.average, 87.75);
    }

    #[test]
    fn null_scores_stay_out_of_the_summary() {
        let f = fixture(&["a"]);
        record_grade(&f.store, f.students[0], f.assignment, None, Some("pending")).unwrap();
        let summary = score_summary(&f.store, Some(f.class)).unwrap();
        assert_eq!(summary[&f.students[0]], ScoreSummary::default());
    }
}
