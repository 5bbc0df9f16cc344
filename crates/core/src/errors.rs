//! Core error types for the Ratekeeper engine.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are classified into [`DatabaseError`] signals by
//! the storage layer and translated into the domain taxonomy exactly once, at
//! the repository boundary, by [`translate_storage_error`].

use std::collections::BTreeMap;
use std::fmt;

use ratekeeper_market_data::FeedError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The persisted entities errors can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Currency,
    ExchangeRate,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Currency => write!(f, "Currency"),
            EntityKind::ExchangeRate => write!(f, "Exchange rate"),
        }
    }
}

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{kind} with key '{key}' already exists")]
    DuplicateEntity { kind: EntityKind, key: String },

    #[error("{kind} with key '{key}' not found")]
    EntityNotFound { kind: EntityKind, key: String },

    #[error("{kind} with key '{key}' is still referenced and cannot be deleted")]
    EntityInUse { kind: EntityKind, key: String },

    #[error("Storage is unavailable: {0}")]
    ResourceFailure(String),

    #[error("Unexpected storage error: {0}")]
    UnexpectedStorage(String),

    #[error("Failed to fetch exchange rates: {0}")]
    Feed(#[from] FeedError),

    #[error("Failed to convert between currencies: {0}")]
    ConversionFailed(String),
}

impl Error {
    pub fn duplicate(kind: EntityKind, key: impl Into<String>) -> Self {
        Error::DuplicateEntity {
            kind,
            key: key.into(),
        }
    }

    pub fn not_found(kind: EntityKind, key: impl Into<String>) -> Self {
        Error::EntityNotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn in_use(kind: EntityKind, key: impl Into<String>) -> Self {
        Error::EntityInUse {
            kind,
            key: key.into(),
        }
    }
}

/// Field-level input violations, collected for a whole request.
///
/// Keys are the input field names (`code`, `fullName`, `sign`, `nominal`,
/// `rate`); values are human-readable messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    field_errors: BTreeMap<String, String>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation. The first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    pub fn into_field_errors(self) -> BTreeMap<String, String> {
        self.field_errors
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.field_errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Database-agnostic storage failure signal.
///
/// The storage layer classifies driver errors into one of these; the message
/// is kept only for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// The targeted record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The database could not be reached (pool timeout, cannot open, I/O, locked).
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// Any other failure.
    #[error("Database query failed: {0}")]
    QueryFailed(String),
}

/// The storage operation a signal was raised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Read,
    Insert,
    Update,
    Delete,
}

/// Translates a storage signal into the domain taxonomy.
///
/// `kind` and `key` identify the record the operation targeted. A foreign-key
/// violation on a write means the referenced currency is gone; on a delete it
/// means a dependent row still points at the record.
pub fn translate_storage_error(
    signal: DatabaseError,
    op: StorageOp,
    kind: EntityKind,
    key: impl Into<String>,
) -> Error {
    let key = key.into();
    match signal {
        DatabaseError::UniqueViolation(_) => Error::duplicate(kind, key),
        DatabaseError::ForeignKeyViolation(_) if op == StorageOp::Delete => {
            Error::in_use(kind, key)
        }
        DatabaseError::ForeignKeyViolation(_) => Error::not_found(EntityKind::Currency, key),
        DatabaseError::NotFound(_) if matches!(op, StorageOp::Update | StorageOp::Delete) => {
            Error::not_found(kind, key)
        }
        DatabaseError::Unavailable(message) => Error::ResourceFailure(message),
        other => Error::UnexpectedStorage(other.to_string()),
    }
}

/// Context-free translation, used where no record key is at hand (listings).
impl From<DatabaseError> for Error {
    fn from(signal: DatabaseError) -> Self {
        match signal {
            DatabaseError::Unavailable(message) => Error::ResourceFailure(message),
            other => Error::UnexpectedStorage(other.to_string()),
        }
    }
}
