//! Classes and enrollment.
//!
//! Enrollment lives here rather than in its own module because every
//! operation on the junction table is really a class operation: who is in
//! the class, which classes a student or teacher belongs to. Roster and
//! class-list reads come back sorted and deduplicated.

use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::{
    ClassId, Store, StoreError, StudentId, TeacherId, require, required_text, students, teachers,
};

/// One row of the `classes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// Row id.
    pub id: ClassId,
    /// Class name, e.g. `初三数学`.
    pub name: String,
    /// Teacher in charge, if assigned.
    pub teacher_id: Option<TeacherId>,
    /// Subject label.
    pub subject: Option<String>,
    /// Room label.
    pub room: Option<String>,
    /// Term label, e.g. `2026 Spring`.
    pub term: Option<String>,
    /// Grade level label.
    pub grade: Option<String>,
    /// Class kind, e.g. `compulsory`, `optional`, `IB`, `AP`.
    pub kind: Option<String>,
}

/// Fields for inserting a class; only `name` is required.
#[derive(Debug, Clone, Default)]
pub struct NewClass<'a> {
    /// Class name, must be non-empty.
    pub name: &'a str,
    /// Teacher in charge; must exist when given.
    pub teacher_id: Option<TeacherId>,
    /// Subject label.
    pub subject: Option<&'a str>,
    /// Room label.
    pub room: Option<&'a str>,
    /// Term label.
    pub term: Option<&'a str>,
    /// Grade level label.
    pub grade: Option<&'a str>,
    /// Class kind.
    pub kind: Option<&'a str>,
}

/// Inserts a class and returns the new row id.
pub fn add_class(store: &Store, new: &NewClass<'_>) -> Result<ClassId, StoreError> {
    required_text("class name", new.name)?;
    if let Some(teacher) = new.teacher_id {
        teachers::require_teacher(store, teacher)?;
    }
    store.conn().execute(
        "INSERT INTO classes (name, teacher_id, subject, room, term, grade, kind)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.name,
            new.teacher_id,
            new.subject,
            new.room,
            new.term,
            new.grade,
            new.kind,
        ],
    )?;
    let id = store.conn().last_insert_rowid();
    debug!(id, name = new.name, "class added");
    Ok(id)
}

/// Looks up one class by id.
pub fn get_class(store: &Store, id: ClassId) -> Result<Option<Class>, StoreError> {
    let class = store
        .conn()
        .query_row(
            "SELECT id, name, teacher_id, subject, room, term, grade, kind
             FROM classes WHERE id = ?1",
            [id],
            row_to_class,
        )
        .optional()?;
    Ok(class)
}

/// All classes in ascending id order.
pub fn list_classes(store: &Store) -> Result<Vec<Class>, StoreError> {
    let mut stmt = store.conn().prepare(
        "SELECT id, name, teacher_id, subject, room, term, grade, kind
         FROM classes ORDER BY id",
    )?;
    let classes = stmt
        .query_map([], row_to_class)?
        .collect::<Result<_, _>>()?;
    Ok(classes)
}

/// Renames a class.
pub fn set_class_name(store: &Store, id: ClassId, name: &str) -> Result<(), StoreError> {
    required_text("class name", name)?;
    let changed = store
        .conn()
        .execute("UPDATE classes SET name = ?1 WHERE id = ?2", params![name, id])?;
    require(changed > 0, "class", id)
}

/// Changes a class's term label.
pub fn set_class_term(store: &Store, id: ClassId, term: &str) -> Result<(), StoreError> {
    let changed = store
        .conn()
        .execute("UPDATE classes SET term = ?1 WHERE id = ?2", params![term, id])?;
    require(changed > 0, "class", id)
}

/// Reassigns (or unassigns) the teacher in charge.
pub fn set_class_teacher(
    store: &Store,
    id: ClassId,
    teacher: Option<TeacherId>,
) -> Result<(), StoreError> {
    if let Some(teacher) = teacher {
        teachers::require_teacher(store, teacher)?;
    }
    let changed = store.conn().execute(
        "UPDATE classes SET teacher_id = ?1 WHERE id = ?2",
        params![teacher, id],
    )?;
    require(changed > 0, "class", id)
}

/// Enrolls a student in a class. Re-enrolling is a no-op.
pub fn enroll(store: &Store, student: StudentId, class: ClassId) -> Result<(), StoreError> {
    students::require_student(store, student)?;
    require_class(store, class)?;
    store.conn().execute(
        "INSERT OR IGNORE INTO enrollments (student_id, class_id) VALUES (?1, ?2)",
        params![student, class],
    )?;
    debug!(student, class, "student enrolled");
    Ok(())
}

/// Removes a student from a class.
///
/// Errors with a missing-row if the enrollment did not exist, so callers
/// can tell a real withdrawal from a typo'd id.
pub fn withdraw(store: &Store, student: StudentId, class: ClassId) -> Result<(), StoreError> {
    let changed = store.conn().execute(
        "DELETE FROM enrollments WHERE student_id = ?1 AND class_id = ?2",
        params![student, class],
    )?;
    require(changed > 0, "enrollment for student", student)
}

/// Students enrolled in a class, ascending by id.
pub fn class_roster(store: &Store, class: ClassId) -> Result<Vec<StudentId>, StoreError> {
    let mut stmt = store.conn().prepare(
        "SELECT DISTINCT student_id FROM enrollments WHERE class_id = ?1 ORDER BY student_id",
    )?;
    let roster = stmt
        .query_map([class], |row| row.get(0))?
        .collect::<Result<_, _>>()?;
    Ok(roster)
}

/// Classes a student is enrolled in, ascending by id.
pub fn student_classes(store: &Store, student: StudentId) -> Result<Vec<ClassId>, StoreError> {
    let mut stmt = store.conn().prepare(
        "SELECT DISTINCT class_id FROM enrollments WHERE student_id = ?1 ORDER BY class_id",
    )?;
    let classes = stmt
        .query_map([student], |row| row.get(0))?
        .collect::<Result<_, _>>()?;
    Ok(classes)
}

/// Classes a teacher is in charge of, ascending by id.
pub fn teacher_classes(store: &Store, teacher: TeacherId) -> Result<Vec<ClassId>, StoreError> {
    let mut stmt = store
        .conn()
        .prepare("SELECT DISTINCT id FROM classes WHERE teacher_id = ?1 ORDER BY id")?;
    let classes = stmt
        .query_map([teacher], |row| row.get(0))?
        .collect::<Result<_, _>>()?;
    Ok(classes)
}

/// Errors unless the class id exists.
pub(crate) fn require_class(store: &Store, id: ClassId) -> Result<(), StoreError> {
    let mut stmt = store.conn().prepare("SELECT 1 FROM classes WHERE id = ?1")?;
    require(stmt.exists([id])?, "class", id)
}

/// Maps a full class row.
fn row_to_class(row: &rusqlite::Row<'_>) -> rusqlite::Result<Class> {
    Ok(Class {
        id: row.get(0)?,
        name: row.get(1)?,
        teacher_id: row.get(2)?,
        subject: row.get(3)?,
        room: row.get(4)?,
        term: row.get(5)?,
        grade: row.get(6)?,
        kind: row.get(7)?,
    })
}
