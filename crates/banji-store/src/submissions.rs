//! Assignment submissions.
//!
//! A student may submit the same assignment several times; each row
//! carries an attempt number and the triple (student, assignment,
//! attempt) is unique. [`add_submission`] picks the next attempt number
//! itself so callers never race their own reads.

use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::{
    AssignmentId, ClassId, Store, StoreError, StudentId, SubmissionId, assignments, classes,
    require, students,
};

/// One row of the `submissions` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Row id.
    pub id: SubmissionId,
    /// Submission timestamp.
    pub submitted_at: String,
    /// Uploaded file path; `None` for text-only submissions.
    pub file_path: Option<String>,
    /// Submitting student.
    pub student_id: StudentId,
    /// Class the assignment belongs to.
    pub class_id: ClassId,
    /// Whether the submission arrived after the due time.
    pub is_late: bool,
    /// Target assignment.
    pub assignment_id: AssignmentId,
    /// Attempt number, starting at 1.
    pub attempt: i64,
}

/// Records a submission as the next attempt and returns the new row id.
pub fn add_submission(
    store: &Store,
    student: StudentId,
    class: ClassId,
    assignment: AssignmentId,
    file_path: Option<&str>,
) -> Result<SubmissionId, StoreError> {
    students::require_student(store, student)?;
    classes::require_class(store, class)?;
    assignments::require_assignment(store, assignment)?;
    let attempt = latest_attempt(store, student, assignment)?.unwrap_or(0) + 1;
    store.conn().execute(
        "INSERT INTO submissions (student_id, class_id, assignment_id, file_path, attempt)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![student, class, assignment, file_path, attempt],
    )?;
    let id = store.conn().last_insert_rowid();
    debug!(id, student, assignment, attempt, "submission recorded");
    Ok(id)
}

/// Highest attempt number a student has recorded for an assignment.
pub fn latest_attempt(
    store: &Store,
    student: StudentId,
    assignment: AssignmentId,
) -> Result<Option<i64>, StoreError> {
    let attempt = store
        .conn()
        .query_row(
            "SELECT MAX(attempt) FROM submissions
             WHERE student_id = ?1 AND assignment_id = ?2",
            params![student, assignment],
            |row| row.get::<_, Option<i64>>(0),
        )
        .optional()?;
    Ok(attempt.flatten())
}

/// Reads one submission by id.
pub fn get_submission(store: &Store, id: SubmissionId) -> Result<Option<Submission>, StoreError> {
    let submission = store
        .conn()
        .query_row(
            "SELECT id, submitted_at, file_path, student_id, class_id, is_late,
                    assignment_id, attempt
             FROM submissions WHERE id = ?1",
            [id],
            |row| {
                Ok(Submission {
                    id: row.get(0)?,
                    submitted_at: row.get(1)?,
                    file_path: row.get(2)?,
                    student_id: row.get(3)?,
                    class_id: row.get(4)?,
                    is_late: row.get(5)?,
                    assignment_id: row.get(6)?,
                    attempt: row.get(7)?,
                })
            },
        )
        .optional()?;
    Ok(submission)
}

/// Flags or unflags a submission as late.
pub fn mark_late(store: &Store, id: SubmissionId, late: bool) -> Result<(), StoreError> {
    let changed = store.conn().execute(
        "UPDATE submissions SET is_late = ?1 WHERE id = ?2",
        params![late, id],
    )?;
    require(changed > 0, "submission", id)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assignments::NewAssignment;
    use crate::classes::NewClass;
    use crate::students::NewStudent;
    use crate::teachers::{self, NewTeacher};

    fn fixture() -> (Store, StudentId, ClassId, AssignmentId) {
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
        let student = students::add_student(
            &store,
            &NewStudent {
                name: "s",
                ..NewStudent::default()
            },
        )
        .unwrap();
        let assignment = assignments::add_assignment(
            &store,
            &NewAssignment {
                title: "hw1",
                description: None,
                due_at: "2026-09-10 23:59:00",
                class,
                teacher,
                total_points: None,
                kind: None,
            },
        )
        .unwrap();
        (store, student, class, assignment)
    }

    #[test]
    fn attempts_count_up_from_one() {
        let (store, student, class, assignment) = fixture();
        assert_eq!(latest_attempt(&store, student, assignment).unwrap(), None);

        let first = add_submission(&store, student, class, assignment, None).unwrap();
        let second =
            add_submission(&store, student, class, assignment, Some("/uploads/v2.pdf")).unwrap();

        assert_eq!(get_submission(&store, first).unwrap().unwrap().attempt, 1);
        let row = get_submission(&store, second).unwrap().unwrap();
        assert_eq!(row.attempt, 2);
        assert_eq!(row.file_path.as_deref(), Some("/uploads/v2.pdf"));
        assert_eq!(latest_attempt(&store, student, assignment).unwrap(), Some(2));
    }

    #[test]
    fn late_flag_round_trips() {
        let (store, student, class, assignment) = fixture();
        let id = add_submission(&store, student, class, assignment, None).unwrap();
        assert!(!get_submission(&store, id).unwrap().unwrap().is_late);

        mark_late(&store, id, true).unwrap();
        assert!(get_submission(&store, id).unwrap().unwrap().is_late);

        assert!(mark_late(&store, 99, true).is_err());
    }

    #[test]
    fn unknown_references_are_rejected() {
        let (store, student, class, assignment) = fixture();
        assert!(add_submission(&store, 99, class, assignment, None).is_err());
        assert!(add_submission(&store, student, 99, assignment, None).is_err());
        assert!(add_submission(&store, student, class, 99, None).is_err());
    }
}
