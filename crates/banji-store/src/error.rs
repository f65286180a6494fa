//! Storage error types.

use thiserror::Error;

/// Errors from the SQLite store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An underlying SQLite operation failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A referenced row does not exist.
    #[error("{entity} {id} does not exist")]
    MissingRow {
        /// Table the id was checked against.
        entity: &'static str,
        /// The id that failed the lookup.
        id: i64,
    },

    /// Caller-supplied data was rejected before reaching SQL.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}
