//! Calendar events.
//!
//! Exam dates, homework deadlines and school activities live on one
//! calendar. An event belongs to a class or, with no class id, to the
//! whole school; the creator is a student or a teacher, stored the same
//! way as discussion authors.

use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::discussions::Author;
use crate::{
    CalendarEventId, ClassId, Store, StoreError, classes, required_text, students, teachers,
};

/// One row of the `calendar_events` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Row id.
    pub id: CalendarEventId,
    /// Event title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Start timestamp.
    pub starts_at: String,
    /// End timestamp.
    pub ends_at: String,
    /// Class context; `None` for school-wide events.
    pub class_id: Option<ClassId>,
    /// Who created the event.
    pub created_by: Author,
}

/// Fields for adding a calendar event.
#[derive(Debug, Clone)]
pub struct NewCalendarEvent<'a> {
    /// Title, must be non-empty.
    pub title: &'a str,
    /// Longer description.
    pub description: Option<&'a str>,
    /// Start timestamp, must be non-empty.
    pub starts_at: &'a str,
    /// End timestamp, must be non-empty.
    pub ends_at: &'a str,
    /// Class context; must exist when given.
    pub class: Option<ClassId>,
    /// Creator; must exist in the matching table.
    pub created_by: Author,
}

/// Adds a calendar event and returns the new row id.
pub fn add_event(store: &Store, new: &NewCalendarEvent<'_>) -> Result<CalendarEventId, StoreError> {
    required_text("event title", new.title)?;
    required_text("event start time", new.starts_at)?;
    required_text("event end time", new.ends_at)?;
    match new.created_by {
        Author::Student(id) => students::require_student(store, id)?,
        Author::Teacher(id) => teachers::require_teacher(store, id)?,
    }
    if let Some(class) = new.class {
        classes::require_class(store, class)?;
    }
    store.conn().execute(
        "INSERT INTO calendar_events
         (title, description, starts_at, ends_at, class_id, author_id, author_kind)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.title,
            new.description,
            new.starts_at,
            new.ends_at,
            new.class,
            new.created_by.id(),
            new.created_by.kind(),
        ],
    )?;
    let id = store.conn().last_insert_rowid();
    debug!(id, title = new.title, "calendar event added");
    Ok(id)
}

/// Reads one event by id.
pub fn get_event(store: &Store, id: CalendarEventId) -> Result<Option<CalendarEvent>, StoreError> {
    let event = store
        .conn()
        .query_row(
            "SELECT id, title, description, starts_at, ends_at, class_id, author_id, author_kind
             FROM calendar_events WHERE id = ?1",
            [id],
            row_to_event,
        )
        .optional()?;
    Ok(event)
}

/// Events a class's students should see, soonest first.
///
/// Includes school-wide events. Ordering is by start time, then id, so a
/// shared start time lists in creation order.
pub fn events_for_class(store: &Store, class: ClassId) -> Result<Vec<CalendarEvent>, StoreError> {
    let mut stmt = store.conn().prepare(
        "SELECT id, title, description, starts_at, ends_at, class_id, author_id, author_kind
         FROM calendar_events
         WHERE class_id = ?1 OR class_id IS NULL
         ORDER BY starts_at, id",
    )?;
    let events = stmt
        .query_map([class], row_to_event)?
        .collect::<Result<_, _>>()?;
    Ok(events)
}

/// Maps a full calendar row.
fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<CalendarEvent> {
    let author_id: i64 = row.get(6)?;
    let author_kind: String = row.get(7)?;
    Ok(CalendarEvent {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        starts_at: row.get(3)?,
        ends_at: row.get(4)?,
        class_id: row.get(5)?,
        created_by: Author::from_row(&author_kind, author_id),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::classes::NewClass;
    use crate::teachers::{self, NewTeacher};

    fn fixture() -> (Store, i64, ClassId) {
        let store = Store::open_in_memory().unwrap();
        let teacher = teachers::add_teacher(
            &store,
            &NewTeacher {
                name: "王老师",
                ..NewTeacher::default()
            },
        )
        .unwrap();
        let class = classes::add_class(
            &store,
            &NewClass {
                name: "初三数学",
                teacher_id: Some(teacher),
                ..NewClass::default()
            },
        )
        .unwrap();
        (store, teacher, class)
    }

    #[test]
    fn add_and_get_round_trip() {
        let (store, teacher, class) = fixture();
        let id = add_event(
            &store,
            &NewCalendarEvent {
                title: "期中考试",
                description: Some("覆盖第1-3章"),
                starts_at: "2026-09-16 09:00:00",
                ends_at: "2026-09-16 11:00:00",
                class: Some(class),
                created_by: Author::Teacher(teacher),
            },
        )
        .unwrap();

        let event = get_event(&store, id).unwrap().unwrap();
        assert_eq!(event.title, "期中考试");
        assert_eq!(event.class_id, Some(class));
        assert_eq!(event.created_by, Author::Teacher(teacher));
        assert!(get_event(&store, id + 1).unwrap().is_none());
    }

    #[test]
    fn unknown_creator_is_rejected() {
        let (store, _, class) = fixture();
        let err = add_event(
            &store,
            &NewCalendarEvent {
                title: "自习",
                description: None,
                starts_at: "2026-09-01 19:00:00",
                ends_at: "2026-09-01 21:00:00",
                class: Some(class),
                created_by: Author::Student(99),
            },
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::MissingRow { entity, .. } if entity == "student"));
    }

    #[test]
    fn blank_title_and_times_are_rejected() {
        let (store, teacher, _) = fixture();
        for (title, starts_at, ends_at) in [
            ("  ", "2026-09-01 08:00:00", "2026-09-01 09:00:00"),
            ("晨会", "", "2026-09-01 09:00:00"),
            ("晨会", "2026-09-01 08:00:00", "  "),
        ] {
            let err = add_event(
                &store,
                &NewCalendarEvent {
                    title,
                    description: None,
                    starts_at,
                    ends_at,
                    class: None,
                    created_by: Author::Teacher(teacher),
                },
            )
            .unwrap_err();
            assert!(matches!(err, StoreError::Invalid { .. }));
        }
    }

    #[test]
    fn class_listing_includes_school_wide_events_soonest_first() {
        let (store, teacher, class) = fixture();
        let other = classes::add_class(
            &store,
            &NewClass {
                name: "初三英语",
                ..NewClass::default()
            },
        )
        .unwrap();
        let event = |title, starts_at, class| NewCalendarEvent {
            title,
            description: None,
            starts_at,
            ends_at: "2026-09-30 00:00:00",
            class,
            created_by: Author::Teacher(teacher),
        };
        add_event(&store, &event("班级测验", "2026-09-20 09:00:00", Some(class))).unwrap();
        add_event(&store, &event("全校运动会", "2026-09-10 08:00:00", None)).unwrap();
        add_event(&store, &event("别班活动", "2026-09-05 08:00:00", Some(other))).unwrap();

        let titles: Vec<String> = events_for_class(&store, class)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["全校运动会", "班级测验"]);
    }
}
