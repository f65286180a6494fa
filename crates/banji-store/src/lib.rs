//! banji-store: SQLite persistence for the school data model.
//!
//! One [`Store`] owns one connection to the school database and creates the
//! schema on open. Entity operations live in per-table modules
//! ([`students`], [`classes`], [`queries`], ...) as free functions taking
//! the store, so each file stays focused on one table family.
//!
//! Two rules hold everywhere:
//! - every statement is parameterized; no SQL is ever assembled from
//!   caller strings
//! - reads that feed the report pipeline come back in deterministic order
//!
//! The store also implements [`banji_analytics::PromptSource`] (see
//! [`queries`]), which is how report generation pulls per-student prompt
//! snapshots without knowing about SQL.

#![warn(missing_docs)]

use std::path::Path;

use rusqlite::Connection;

pub mod announcements;
pub mod assignments;
pub mod auth;
pub mod calendar;
pub mod classes;
pub mod discussions;
mod error;
pub mod grades;
pub mod queries;
mod schema;
pub mod students;
pub mod submissions;
pub mod teachers;

pub use banji_analytics::{ClassId, StudentId};
pub use error::StoreError;

/// Identifier for a teacher row.
pub type TeacherId = i64;

/// Identifier for an assignment row.
pub type AssignmentId = i64;

/// Identifier for a recorded student question.
pub type QueryId = i64;

/// Identifier for a unified auth user row.
pub type UserId = i64;

/// Identifier for an announcement row.
pub type AnnouncementId = i64;

/// Identifier for a discussion message row.
pub type DiscussionId = i64;

/// Identifier for a submission row.
pub type SubmissionId = i64;

/// Identifier for a calendar event row.
pub type CalendarEventId = i64;

/// Timestamp layout used across all tables, e.g. `2026-03-01 08:30:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Handle to one open school database.
pub struct Store {
    /// The single underlying connection.
    conn: Connection,
}

impl Store {
    /// Opens the database at `path`, creating file and schema if needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    /// Applies pragmas and ensures the schema exists.
    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", true)?;
        schema::init(&conn)?;
        Ok(Self { conn })
    }

    /// The raw connection, for the entity modules.
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Current wall-clock time in [`TIMESTAMP_FORMAT`].
pub(crate) fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Turns an existence check into a [`StoreError::MissingRow`].
pub(crate) fn require(found: bool, entity: &'static str, id: i64) -> Result<(), StoreError> {
    if found {
        Ok(())
    } else {
        Err(StoreError::MissingRow { entity, id })
    }
}

/// Rejects text fields that are empty or whitespace-only.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        Err(StoreError::Invalid {
            field,
            reason: "must not be empty",
        })
    } else {
        Ok(())
    }
}
