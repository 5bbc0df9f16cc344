//! Storage-specific error types for SQLite operations.
//!
//! This module wraps Diesel, r2d2 and I/O errors and classifies them into the
//! database-agnostic [`DatabaseError`] signals defined in `ratekeeper_core`.
//! Repositories translate those signals into the domain taxonomy with
//! [`StorageError::translate`], which knows the operation and the record key.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use ratekeeper_core::errors::{
    translate_storage_error, DatabaseError, EntityKind, Error, StorageOp,
};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `ratekeeper_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Database file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Stored value could not be decoded: {0}")]
    SerializationError(String),

    /// A domain error raised inside a write job, carried through the transaction.
    #[error(transparent)]
    Core(#[from] Error),
}

/// SQLite messages that mean the database itself cannot be used right now.
const UNAVAILABLE_MARKERS: [&str; 5] = [
    "unable to open",
    "disk i/o",
    "database is locked",
    "database is busy",
    "readonly database",
];

fn is_unavailable_message(message: &str) -> bool {
    let message = message.to_lowercase();
    UNAVAILABLE_MARKERS.iter().any(|m| message.contains(m))
}

impl StorageError {
    /// Classifies this error into a storage signal.
    pub fn signal(&self) -> DatabaseError {
        match self {
            StorageError::ConnectionFailed(e) => DatabaseError::Unavailable(e.to_string()),
            StorageError::PoolError(e) => DatabaseError::Unavailable(e.to_string()),
            StorageError::Io(e) => DatabaseError::Unavailable(e.to_string()),
            StorageError::QueryFailed(DieselError::NotFound) => {
                DatabaseError::NotFound("Record not found".to_string())
            }
            StorageError::QueryFailed(DieselError::DatabaseError(kind, info)) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => DatabaseError::UniqueViolation(message),
                    DatabaseErrorKind::ForeignKeyViolation => {
                        DatabaseError::ForeignKeyViolation(message)
                    }
                    DatabaseErrorKind::ClosedConnection
                    | DatabaseErrorKind::UnableToSendCommand => DatabaseError::Unavailable(message),
                    _ if is_unavailable_message(&message) => DatabaseError::Unavailable(message),
                    _ => DatabaseError::QueryFailed(message),
                }
            }
            StorageError::QueryFailed(e) => DatabaseError::QueryFailed(e.to_string()),
            StorageError::MigrationFailed(e) => DatabaseError::QueryFailed(e.clone()),
            StorageError::SerializationError(e) => DatabaseError::QueryFailed(e.clone()),
            StorageError::Core(e) => DatabaseError::QueryFailed(e.to_string()),
        }
    }

    /// Translates into the domain taxonomy for an operation on a known record.
    pub fn translate(self, op: StorageOp, kind: EntityKind, key: &str) -> Error {
        match self {
            StorageError::Core(e) => e,
            other => translate_storage_error(other.signal(), op, kind, key),
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Core(e) => e,
            other => Error::from(other.signal()),
        }
    }
}
