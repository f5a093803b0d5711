//! # Database Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sqlx::Error ─────────┐                                                 │
//! │  MigrateError ────────┼──► DbError ──► RoomStore                        │
//! │  CoreError (codec) ───┘                 open:   Codec → defaults        │
//! │                                         mutate: warn! + failure count   │
//! │                                         flush:  returned to the caller  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use roomplan_core::{CoreError, StorageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The database could not be opened: unwritable directory, locked or
    /// damaged file, or a pool that has been closed.
    #[error("Cannot open room database: {0}")]
    ConnectionFailed(String),

    #[error("Schema migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement.
    #[error("Statement failed: {0}")]
    QueryFailed(String),

    /// No connection became free within the acquire timeout.
    #[error("Timed out waiting for a database connection")]
    PoolExhausted,

    /// The stored record could not be encoded or decoded.
    ///
    /// ## When This Occurs
    /// - The row was edited by hand into invalid JSON
    /// - A field holds a value of the wrong type
    #[error("Stored record under '{key}' is unreadable: {source}")]
    Codec {
        key: String,
        #[source]
        source: CoreError,
    },

    #[error("Unexpected database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Wraps a codec failure with the key it happened on.
    pub fn codec(key: impl Into<String>, source: CoreError) -> Self {
        DbError::Codec {
            key: key.into(),
            source,
        }
    }

    /// Whether retrying later could succeed, as opposed to bad data.
    pub fn is_transient(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_) | DbError::PoolExhausted)
    }
}

impl StorageError for DbError {
    fn is_unreadable_record(&self) -> bool {
        matches!(self, DbError::Codec { .. })
    }
}

/// ## Error Mapping
/// ```text
/// Database(..)   → QueryFailed     (constraint, missing table, ...)
/// PoolTimedOut   → PoolExhausted
/// PoolClosed     → ConnectionFailed
/// Io(..)         → ConnectionFailed
/// anything else  → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) => DbError::QueryFailed(e.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map() {
        assert!(matches!(DbError::from(sqlx::Error::PoolTimedOut), DbError::PoolExhausted));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::Internal(_)
        ));
    }

    #[test]
    fn test_transient_errors() {
        assert!(DbError::PoolExhausted.is_transient());
        assert!(DbError::from(sqlx::Error::PoolClosed).is_transient());
        assert!(!DbError::QueryFailed("no such table".to_string()).is_transient());
        assert!(!DbError::PoolExhausted.is_unreadable_record());
    }

    #[test]
    fn test_codec_error_names_key() {
        let source = roomplan_core::decode_room("nope").unwrap_err();
        let err = DbError::codec("room", source);

        assert!(!err.is_transient());
        assert!(err.is_unreadable_record());
        assert!(err
            .to_string()
            .starts_with("Stored record under 'room' is unreadable"));
    }
}
