//! Error types for hbnb.
//!
//! Storage, model, configuration and I/O failures all surface as [`Error`].
//! Constraint violations raised by `SQLite` during a save are lifted into
//! [`Error::Constraint`] so callers can tell bad data from a broken database.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hbnb operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// A save was rejected by a database constraint (missing required
    /// field, dangling foreign key, negative count, ...).
    #[error("constraint violation: {message}")]
    Constraint {
        /// The message reported by the database engine.
        message: String,
    },

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// The JSON storage file could not be read back.
    #[error("invalid storage file {path}: {message}")]
    StorageFile {
        /// Path to the storage file.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    // === Model Errors ===
    /// A serialized object names a class that does not exist.
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// An attribute holds a value that cannot be persisted.
    #[error("invalid attribute {key}.{attribute}: {message}")]
    InvalidAttribute {
        /// Storage key of the object.
        key: String,
        /// Attribute name.
        attribute: &'static str,
        /// Description of the problem.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for hbnb operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Classify a `SQLite` error, lifting constraint failures into
    /// [`Error::Constraint`].
    #[must_use]
    pub fn from_sqlite(err: rusqlite::Error) -> Self {
        if err.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) {
            Self::Constraint {
                message: err.to_string(),
            }
        } else {
            Self::DatabaseQuery(err)
        }
    }

    /// Check if this error is a constraint violation.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::Constraint { .. })
    }
}
