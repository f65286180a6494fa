//! Teacher records.

use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::{Store, StoreError, TeacherId, require, required_text};

/// One row of the `teachers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    /// Row id.
    pub id: TeacherId,
    /// Full name.
    pub name: String,
    /// Subject taught.
    pub subject: Option<String>,
    /// Office or classroom.
    pub room: Option<String>,
    /// Homeroom class label, if any.
    pub homeroom: Option<String>,
}

/// Fields for inserting a teacher; only `name` is required.
#[derive(Debug, Clone, Default)]
pub struct NewTeacher<'a> {
    /// Full name, must be non-empty.
    pub name: &'a str,
    /// Subject taught.
    pub subject: Option<&'a str>,
    /// Office or classroom.
    pub room: Option<&'a str>,
    /// Homeroom class label.
    pub homeroom: Option<&'a str>,
}

/// Inserts a teacher and returns the new row id.
pub fn add_teacher(store: &Store, new: &NewTeacher<'_>) -> Result<TeacherId, StoreError> {
    required_text("teacher name", new.name)?;
    store.conn().execute(
        "INSERT INTO teachers (name, subject, room, homeroom) VALUES (?1, ?2, ?3, ?4)",
        params![new.name, new.subject, new.room, new.homeroom],
    )?;
    let id = store.conn().last_insert_rowid();
    debug!(id, name = new.name, "teacher added");
    Ok(id)
}

/// Looks up one teacher by id.
pub fn get_teacher(store: &Store, id: TeacherId) -> Result<Option<Teacher>, StoreError> {
    let teacher = store
        .conn()
        .query_row(
            "SELECT id, name, subject, room, homeroom FROM teachers WHERE id = ?1",
            [id],
            row_to_teacher,
        )
        .optional()?;
    Ok(teacher)
}

/// All teachers in ascending id order.
pub fn list_teachers(store: &Store) -> Result<Vec<Teacher>, StoreError> {
    let mut stmt = store
        .conn()
        .prepare("SELECT id, name, subject, room, homeroom FROM teachers ORDER BY id")?;
    let teachers = stmt
        .query_map([], row_to_teacher)?
        .collect::<Result<_, _>>()?;
    Ok(teachers)
}

/// Errors unless the teacher id exists.
pub(crate) fn require_teacher(store: &Store, id: TeacherId) -> Result<(), StoreError> {
    let mut stmt = store
        .conn()
        .prepare("SELECT 1 FROM teachers WHERE id = ?1")?;
    require(stmt.exists([id])?, "teacher", id)
}

/// Maps a full teacher row.
fn row_to_teacher(row: &rusqlite::Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get(0)?,
        name: row.get(1)?,
        subject: row.get(2)?,
        room: row.get(3)?,
        homeroom: row.get(4)?,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_and_get_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let id = add_teacher(
            &store,
            &NewTeacher {
                name: "王老师",
                subject: Some("数学"),
                room: Some("301"),
                homeroom: None,
            },
        )
        .unwrap();

        let teacher = get_teacher(&store, id).unwrap().unwrap();
        assert_eq!(teacher.name, "王老师");
        assert_eq!(teacher.subject.as_deref(), Some("数学"));
        assert_eq!(teacher.homeroom, None);
    }

    #[test]
    fn blank_name_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        let err = add_teacher(
            &store,
            &NewTeacher {
                name: "   ",
                ..NewTeacher::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::Invalid { .. }));
    }

    #[test]
    fn missing_teacher_lookup_is_none() {
        let store = Store::open_in_memory().unwrap();
        assert!(get_teacher(&store, 42).unwrap().is_none());
        assert!(list_teachers(&store).unwrap().is_empty());
    }
}
