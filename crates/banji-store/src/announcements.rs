//! Announcements.

use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::{
    AnnouncementId, ClassId, Store, StoreError, TeacherId, require, required_text, teachers,
};

/// One row of the `announcements` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    /// Row id.
    pub id: AnnouncementId,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Whether the announcement is pinned to the top of listings.
    pub pinned: bool,
    /// Whether students can currently see the announcement.
    pub visible: bool,
    /// Publication timestamp.
    pub published_at: String,
    /// Posting teacher.
    pub teacher_id: TeacherId,
    /// Target class; `None` for school-wide announcements.
    pub class_id: Option<ClassId>,
}

/// Posts an announcement and returns the new row id.
///
/// `class` of `None` makes it school-wide. New announcements start
/// visible and unpinned.
pub fn add_announcement(
    store: &Store,
    title: &str,
    content: &str,
    teacher: TeacherId,
    class: Option<ClassId>,
) -> Result<AnnouncementId, StoreError> {
    required_text("announcement title", title)?;
    required_text("announcement content", content)?;
    teachers::require_teacher(store, teacher)?;
    store.conn().execute(
        "INSERT INTO announcements (title, content, teacher_id, class_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![title, content, teacher, class],
    )?;
    let id = store.conn().last_insert_rowid();
    debug!(id, title, "announcement posted");
    Ok(id)
}

/// Reads one announcement by id.
pub fn get_announcement(
    store: &Store,
    id: AnnouncementId,
) -> Result<Option<Announcement>, StoreError> {
    let announcement = store
        .conn()
        .query_row(
            "SELECT id, title, content, pinned, visible, published_at, teacher_id, class_id
             FROM announcements WHERE id = ?1",
            [id],
            row_to_announcement,
        )
        .optional()?;
    Ok(announcement)
}

/// Pins or unpins an announcement.
pub fn set_pinned(store: &Store, id: AnnouncementId, pinned: bool) -> Result<(), StoreError> {
    let changed = store.conn().execute(
        "UPDATE announcements SET pinned = ?1 WHERE id = ?2",
        params![pinned, id],
    )?;
    require(changed > 0, "announcement", id)
}

/// Shows or hides an announcement.
pub fn set_visible(store: &Store, id: AnnouncementId, visible: bool) -> Result<(), StoreError> {
    let changed = store.conn().execute(
        "UPDATE announcements SET visible = ?1 WHERE id = ?2",
        params![visible, id],
    )?;
    require(changed > 0, "announcement", id)
}

/// Visible announcements a class's students should see.
///
/// Includes school-wide announcements; pinned ones come first, then
/// newest first.
pub fn announcements_for_class(
    store: &Store,
    class: ClassId,
) -> Result<Vec<Announcement>, StoreError> {
    let mut stmt = store.conn().prepare(
        "SELECT id, title, content, pinned, visible, published_at, teacher_id, class_id
         FROM announcements
         WHERE visible = 1 AND (class_id = ?1 OR class_id IS NULL)
         ORDER BY pinned DESC, published_at DESC, id DESC",
    )?;
    let announcements = stmt
        .query_map([class], row_to_announcement)?
        .collect::<Result<_, _>>()?;
    Ok(announcements)
}

/// Maps a full announcement row.
fn row_to_announcement(row: &rusqlite::Row<'_>) -> rusqlite::Result<Announcement> {
    Ok(Announcement {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        pinned: row.get(3)?,
        visible: row.get(4)?,
        published_at: row.get(5)?,
        teacher_id: row.get(6)?,
        class_id: row.get(7)?,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::classes::{self, NewClass};
    use crate::teachers::NewTeacher;

    fn fixture() -> (Store, TeacherId, ClassId) {
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
        (store, teacher, class)
    }

    #[test]
    fn post_and_read_back() {
        let (store, teacher, class) = fixture();
        let id = add_announcement(&store, "期中考试", "下周三上午", teacher, Some(class)).unwrap();
        let row = get_announcement(&store, id).unwrap().unwrap();
        assert_eq!(row.title, "期中考试");
        assert!(row.visible);
        assert!(!row.pinned);
        assert_eq!(row.class_id, Some(class));
    }

    #[test]
    fn blank_title_or_content_is_rejected() {
        let (store, teacher, _) = fixture();
        assert!(add_announcement(&store, " ", "body", teacher, None).is_err());
        assert!(add_announcement(&store, "title", "", teacher, None).is_err());
    }

    #[test]
    fn class_listing_includes_school_wide_and_orders_pinned_first() {
        let (store, teacher, class) = fixture();
        let other = classes::add_class(
            &store,
            &NewClass {
                name: "art",
                ..NewClass::default()
            },
        )
        .unwrap();
        let school_wide = add_announcement(&store, "运动会", "周五", teacher, None).unwrap();
        let for_class = add_announcement(&store, "作业提醒", "交作业", teacher, Some(class)).unwrap();
        let _elsewhere = add_announcement(&store, "素描课", "带铅笔", teacher, Some(other)).unwrap();
        set_pinned(&store, school_wide, true).unwrap();

        let listed = announcements_for_class(&store, class).unwrap();
        let ids: Vec<AnnouncementId> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![school_wide, for_class]);
    }

    #[test]
    fn hidden_announcements_stay_out_of_listings() {
        let (store, teacher, class) = fixture();
        let id = add_announcement(&store, "草稿", "先别发", teacher, Some(class)).unwrap();
        set_visible(&store, id, false).unwrap();
        assert!(announcements_for_class(&store, class).unwrap().is_empty());

        set_visible(&store, id, true).unwrap();
        assert_eq!(announcements_for_class(&store, class).unwrap().len(), 1);
    }

    #[test]
    fn flag_setters_error_on_missing_rows() {
        let (store, _, _) = fixture();
        assert!(set_pinned(&store, 9, true).is_err());
        assert!(set_visible(&store, 9, false).is_err());
    }
}
