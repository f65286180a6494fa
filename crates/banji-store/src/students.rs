//! Student records.

use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::{Store, StoreError, StudentId, require, required_text};

/// One row of the `students` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Row id.
    pub id: StudentId,
    /// Full name.
    pub name: String,
    /// School-issued student number, unique when present.
    pub student_number: Option<String>,
    /// Age in years.
    pub age: Option<i64>,
    /// Free-form gender text.
    pub gender: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Grade level label, e.g. `G9`.
    pub grade: Option<String>,
    /// Expected graduation year.
    pub graduation_year: Option<i64>,
}

/// Fields for inserting a student; only `name` is required.
#[derive(Debug, Clone, Default)]
pub struct NewStudent<'a> {
    /// Full name, must be non-empty.
    pub name: &'a str,
    /// School-issued student number.
    pub student_number: Option<&'a str>,
    /// Age in years, must be positive when given.
    pub age: Option<i64>,
    /// Free-form gender text.
    pub gender: Option<&'a str>,
    /// Contact email.
    pub email: Option<&'a str>,
    /// Grade level label.
    pub grade: Option<&'a str>,
    /// Expected graduation year.
    pub graduation_year: Option<i64>,
}

/// Inserts a student and returns the new row id.
pub fn add_student(store: &Store, new: &NewStudent<'_>) -> Result<StudentId, StoreError> {
    required_text("student name", new.name)?;
    if let Some(age) = new.age
        && age <= 0
    {
        return Err(StoreError::Invalid {
            field: "student age",
            reason: "must be positive",
        });
    }
    store.conn().execute(
        "INSERT INTO students
             (name, student_number, age, gender, email, grade, graduation_year)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.name,
            new.student_number,
            new.age,
            new.gender,
            new.email,
            new.grade,
            new.graduation_year,
        ],
    )?;
    let id = store.conn().last_insert_rowid();
    debug!(id, name = new.name, "student added");
    Ok(id)
}

/// Looks up one student by id.
pub fn get_student(store: &Store, id: StudentId) -> Result<Option<Student>, StoreError> {
    let student = store
        .conn()
        .query_row(
            "SELECT id, name, student_number, age, gender, email, grade, graduation_year
             FROM students WHERE id = ?1",
            [id],
            row_to_student,
        )
        .optional()?;
    Ok(student)
}

/// All students in ascending id order.
pub fn list_students(store: &Store) -> Result<Vec<Student>, StoreError> {
    let mut stmt = store.conn().prepare(
        "SELECT id, name, student_number, age, gender, email, grade, graduation_year
         FROM students ORDER BY id",
    )?;
    let students = stmt
        .query_map([], row_to_student)?
        .collect::<Result<_, _>>()?;
    Ok(students)
}

/// Resolves student ids to names, preserving the input order.
///
/// Unknown ids come back as empty strings rather than failing the whole
/// lookup, so callers can zip the result with their id list directly.
pub fn student_names(store: &Store, ids: &[StudentId]) -> Result<Vec<String>, StoreError> {
    let mut stmt = store
        .conn()
        .prepare("SELECT name FROM students WHERE id = ?1")?;
    let mut names = Vec::with_capacity(ids.len());
    for id in ids {
        let name: Option<String> = stmt.query_row([id], |row| row.get(0)).optional()?;
        names.push(name.unwrap_or_default());
    }
    Ok(names)
}

/// Errors unless the student id exists.
pub(crate) fn require_student(store: &Store, id: StudentId) -> Result<(), StoreError> {
    let mut stmt = store
        .conn()
        .prepare("SELECT 1 FROM students WHERE id = ?1")?;
    require(stmt.exists([id])?, "student", id)
}

/// Maps a full student row.
fn row_to_student(row: &rusqlite::Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        student_number: row.get(2)?,
        age: row.get(3)?,
        gender: row.get(4)?,
        email: row.get(5)?,
        grade: row.get(6)?,
        graduation_year: row.get(7)?,
    })
}
