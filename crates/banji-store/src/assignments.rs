//! Assignments.

use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::{
    AssignmentId, ClassId, Store, StoreError, TeacherId, classes, require, required_text, teachers,
};

/// One row of the `assignments` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Row id.
    pub id: AssignmentId,
    /// Title.
    pub title: String,
    /// Longer description, if any.
    pub description: Option<String>,
    /// Publication timestamp.
    pub published_at: String,
    /// Timestamp the assignment becomes visible to students.
    pub visible_from: String,
    /// Due timestamp.
    pub due_at: String,
    /// Owning class.
    pub class_id: ClassId,
    /// Issuing teacher.
    pub teacher_id: TeacherId,
    /// Maximum obtainable points, if graded.
    pub total_points: Option<f64>,
    /// Kind label, e.g. `homework`, `quiz`.
    pub kind: Option<String>,
}

/// Fields for inserting an assignment.
#[derive(Debug, Clone)]
pub struct NewAssignment<'a> {
    /// Title, must be non-empty.
    pub title: &'a str,
    /// Longer description.
    pub description: Option<&'a str>,
    /// Due timestamp, must be non-empty.
    pub due_at: &'a str,
    /// Owning class; must exist.
    pub class: ClassId,
    /// Issuing teacher; must exist.
    pub teacher: TeacherId,
    /// Maximum obtainable points; non-negative when given.
    pub total_points: Option<f64>,
    /// Kind label.
    pub kind: Option<&'a str>,
}

/// Inserts an assignment and returns the new row id.
pub fn add_assignment(store: &Store, new: &NewAssignment<'_>) -> Result<AssignmentId, StoreError> {
    required_text("assignment title", new.title)?;
    required_text("assignment due time", new.due_at)?;
    if let Some(points) = new.total_points
        && points < 0.0
    {
        return Err(StoreError::Invalid {
            field: "total points",
            reason: "must be non-negative",
        });
    }
    classes::require_class(store, new.class)?;
    teachers::require_teacher(store, new.teacher)?;
    store.conn().execute(
        "INSERT INTO assignments (title, description, due_at, class_id, teacher_id, total_points, kind)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.title,
            new.description,
            new.due_at,
            new.class,
            new.teacher,
            new.total_points,
            new.kind,
        ],
    )?;
    let id = store.conn().last_insert_rowid();
    debug!(id, title = new.title, "assignment added");
    Ok(id)
}

/// Looks up one assignment by id.
pub fn get_assignment(store: &Store, id: AssignmentId) -> Result<Option<Assignment>, StoreError> {
    let assignment = store
        .conn()
        .query_row(
            "SELECT id, title, description, published_at, visible_from, due_at,
                    class_id, teacher_id, total_points, kind
             FROM assignments WHERE id = ?1",
            [id],
            |row| {
                Ok(Assignment {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    published_at: row.get(3)?,
                    visible_from: row.get(4)?,
                    due_at: row.get(5)?,
                    class_id: row.get(6)?,
                    teacher_id: row.get(7)?,
                    total_points: row.get(8)?,
                    kind: row.get(9)?,
                })
            },
        )
        .optional()?;
    Ok(assignment)
}

/// Assignments belonging to one class, ascending by id.
pub fn assignments_for_class(
    store: &Store,
    class: ClassId,
) -> Result<Vec<AssignmentId>, StoreError> {
    let mut stmt = store
        .conn()
        .prepare("SELECT id FROM assignments WHERE class_id = ?1 ORDER BY id")?;
    let ids = stmt
        .query_map([class], |row| row.get(0))?
        .collect::<Result<_, _>>()?;
    Ok(ids)
}

/// Retitles an assignment.
pub fn set_title(store: &Store, id: AssignmentId, title: &str) -> Result<(), StoreError> {
    required_text("assignment title", title)?;
    let changed = store.conn().execute(
        "UPDATE assignments SET title = ?1 WHERE id = ?2",
        params![title, id],
    )?;
    require(changed > 0, "assignment", id)
}

/// Moves an assignment's due time.
pub fn set_due_at(store: &Store, id: AssignmentId, due_at: &str) -> Result<(), StoreError> {
    required_text("assignment due time", due_at)?;
    let changed = store.conn().execute(
        "UPDATE assignments SET due_at = ?1 WHERE id = ?2",
        params![due_at, id],
    )?;
    require(changed > 0, "assignment", id)
}

/// Replaces an assignment's description.
pub fn set_description(
    store: &Store,
    id: AssignmentId,
    description: Option<&str>,
) -> Result<(), StoreError> {
    let changed = store.conn().execute(
        "UPDATE assignments SET description = ?1 WHERE id = ?2",
        params![description, id],
    )?;
    require(changed > 0, "assignment", id)
}

/// Changes the maximum obtainable points.
pub fn set_total_points(
    store: &Store,
    id: AssignmentId,
    points: Option<f64>,
) -> Result<(), StoreError> {
    if let Some(points) = points
        && points < 0.0
    {
        return Err(StoreError::Invalid {
            field: "total points",
            reason: "must be non-negative",
        });
    }
    let changed = store.conn().execute(
        "UPDATE assignments SET total_points = ?1 WHERE id = ?2",
        params![points, id],
    )?;
    require(changed > 0, "assignment", id)
}

/// Errors unless the assignment id exists.
pub(crate) fn require_assignment(store: &Store, id: AssignmentId) -> Result<(), StoreError> {
    let mut stmt = store
        .conn()
        .prepare("SELECT 1 FROM assignments WHERE id = ?1")?;
    require(stmt.exists([id])?, "assignment", id)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::classes::NewClass;
    use crate::teachers::NewTeacher;

    fn seed(store: &Store) -> (ClassId, TeacherId) {
        let teacher = teachers::add_teacher(
            store,
            &NewTeacher {
                name: "王老师",
                ..NewTeacher::default()
            },
        )
        .unwrap();
        let class = classes::add_class(
            store,
            &NewClass {
                name: "math",
                teacher_id: Some(teacher),
                ..NewClass::default()
            },
        )
        .unwrap();
        (class, teacher)
    }

    fn homework<'a>(class: ClassId, teacher: TeacherId) -> NewAssignment<'a> {
        NewAssignment {
            title: "一元二次方程练习",
            description: None,
            due_at: "2026-09-10 23:59:00",
            class,
            teacher,
            total_points: Some(100.0),
            kind: Some("homework"),
        }
    }

    #[test]
    fn add_and_get_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let (class, teacher) = seed(&store);
        let id = add_assignment(&store, &homework(class, teacher)).unwrap();

        let row = get_assignment(&store, id).unwrap().unwrap();
        assert_eq!(row.title, "一元二次方程练习");
        assert_eq!(row.due_at, "2026-09-10 23:59:00");
        assert_eq!(row.total_points, Some(100.0));
        // Defaults come from the schema.
        assert!(!row.published_at.is_empty());
        assert_eq!(assignments_for_class(&store, class).unwrap(), vec![id]);
    }

    #[test]
    fn unknown_class_or_teacher_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        let (class, teacher) = seed(&store);
        let mut bad_class = homework(class, teacher);
        bad_class.class = 99;
        assert!(add_assignment(&store, &bad_class).is_err());
        let mut bad_teacher = homework(class, teacher);
        bad_teacher.teacher = 99;
        assert!(add_assignment(&store, &bad_teacher).is_err());
    }

    #[test]
    fn negative_points_are_rejected() {
        let store = Store::open_in_memory().unwrap();
        let (class, teacher) = seed(&store);
        let mut new = homework(class, teacher);
        new.total_points = Some(-1.0);
        assert!(matches!(
            add_assignment(&store, &new).unwrap_err(),
            StoreError::Invalid { .. }
        ));
        let id = add_assignment(&store, &homework(class, teacher)).unwrap();
        assert!(set_total_points(&store, id, Some(-0.5)).is_err());
    }

    #[test]
    fn setters_update_or_error_on_missing_rows() {
        let store = Store::open_in_memory().unwrap();
        let (class, teacher) = seed(&store);
        let id = add_assignment(&store, &homework(class, teacher)).unwrap();

        set_title(&store, id, "二次函数练习").unwrap();
        set_due_at(&store, id, "2026-09-12 23:59:00").unwrap();
        set_description(&store, id, Some("第3章")).unwrap();
        set_total_points(&store, id, None).unwrap();

        let row = get_assignment(&store, id).unwrap().unwrap();
        assert_eq!(row.title, "二次函数练习");
        assert_eq!(row.description.as_deref(), Some("第3章"));
        assert_eq!(row.total_points, None);

        assert!(set_title(&store, 99, "x").is_err());
        assert!(set_due_at(&store, 99, "2026-01-01 00:00:00").is_err());
    }
}
