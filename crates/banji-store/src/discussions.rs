//! Discussion threads.
//!
//! Posts form a tree through `parent_id`; a post with no parent starts a
//! thread. Authors are students or teachers, distinguished by a kind
//! column rather than separate tables.

use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::{
    ClassId, DiscussionId, Store, StoreError, StudentId, TeacherId, require, required_text,
    students, teachers,
};

/// Who wrote a discussion post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    /// A student, by student id.
    Student(StudentId),
    /// A teacher, by teacher id.
    Teacher(TeacherId),
}

impl Author {
    /// The kind string stored in the author_kind column.
    pub(crate) fn kind(self) -> &'static str {
        match self {
            Self::Student(_) => "student",
            Self::Teacher(_) => "teacher",
        }
    }

    /// The underlying row id.
    pub(crate) fn id(self) -> i64 {
        match self {
            Self::Student(id) | Self::Teacher(id) => id,
        }
    }

    /// Rebuilds an author from stored columns.
    pub(crate) fn from_row(kind: &str, id: i64) -> Self {
        if kind == "teacher" {
            Self::Teacher(id)
        } else {
            Self::Student(id)
        }
    }
}

/// One row of the `discussions` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discussion {
    /// Row id.
    pub id: DiscussionId,
    /// Thread topic; replies repeat the opener's topic.
    pub topic: String,
    /// Body text.
    pub content: String,
    /// Post author.
    pub author: Author,
    /// Class context; `None` for school-wide threads.
    pub class_id: Option<ClassId>,
    /// Post timestamp.
    pub posted_at: String,
    /// Parent post for replies; `None` for thread openers.
    pub parent_id: Option<DiscussionId>,
}

/// Fields for posting to a discussion.
#[derive(Debug, Clone)]
pub struct NewDiscussion<'a> {
    /// Topic, must be non-empty.
    pub topic: &'a str,
    /// Body text, must be non-empty.
    pub content: &'a str,
    /// Author; must exist in the matching table.
    pub author: Author,
    /// Class context.
    pub class: Option<ClassId>,
    /// Parent post when replying; must exist.
    pub parent: Option<DiscussionId>,
}

/// Posts a thread opener or a reply and returns the new row id.
pub fn post_discussion(store: &Store, new: &NewDiscussion<'_>) -> Result<DiscussionId, StoreError> {
    required_text("discussion topic", new.topic)?;
    required_text("discussion content", new.content)?;
    match new.author {
        Author::Student(id) => students::require_student(store, id)?,
        Author::Teacher(id) => teachers::require_teacher(store, id)?,
    }
    if let Some(parent) = new.parent {
        require_discussion(store, parent)?;
    }
    store.conn().execute(
        "INSERT INTO discussions (topic, content, author_id, author_kind, class_id, parent_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.topic,
            new.content,
            new.author.id(),
            new.author.kind(),
            new.class,
            new.parent,
        ],
    )?;
    let id = store.conn().last_insert_rowid();
    debug!(id, topic = new.topic, reply = new.parent.is_some(), "discussion posted");
    Ok(id)
}

/// Reads one post by id.
pub fn get_discussion(store: &Store, id: DiscussionId) -> Result<Option<Discussion>, StoreError> {
    let post = store
        .conn()
        .query_row(
            "SELECT id, topic, content, author_id, author_kind, class_id, posted_at, parent_id
             FROM discussions WHERE id = ?1",
            [id],
            row_to_discussion,
        )
        .optional()?;
    Ok(post)
}

/// A whole thread: the post with `id` plus every transitive reply.
///
/// Posts come back in ascending id order, which for a single store is
/// also posting order. Errors if `id` does not exist.
pub fn thread(store: &Store, id: DiscussionId) -> Result<Vec<Discussion>, StoreError> {
    require_discussion(store, id)?;
    let mut stmt = store.conn().prepare(
        "WITH RECURSIVE members(id) AS (
             SELECT id FROM discussions WHERE id = ?1
             UNION ALL
             SELECT d.id FROM discussions d JOIN members m ON d.parent_id = m.id
         )
         SELECT d.id, d.topic, d.content, d.author_id, d.author_kind, d.class_id,
                d.posted_at, d.parent_id
         FROM discussions d JOIN members m ON d.id = m.id
         ORDER BY d.id",
    )?;
    let posts = stmt
        .query_map([id], row_to_discussion)?
        .collect::<Result<_, _>>()?;
    Ok(posts)
}

/// Errors unless the discussion id exists.
fn require_discussion(store: &Store, id: DiscussionId) -> Result<(), StoreError> {
    let mut stmt = store
        .conn()
        .prepare("SELECT 1 FROM discussions WHERE id = ?1")?;
    require(stmt.exists([id])?, "discussion", id)
}

/// Maps a full discussion row.
fn row_to_discussion(row: &rusqlite::Row<'_>) -> rusqlite::Result<Discussion> {
    let kind: String = row.get(4)?;
    Ok(Discussion {
        id: row.get(0)?,
        topic: row.get(1)?,
        content: row.get(2)?,
        author: Author::from_row(&kind, row.get(3)?),
        class_id: row.get(5)?,
        posted_at: row.get(6)?,
        parent_id: row.get(7)?,
    })
}
