//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (apps/booknest) ← code + message for the screen              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - Login with wrong credentials → `Ok(None)`
//! - Deleting an id that is already gone → `Ok(())`

use booknest_core::ValidationError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Registration used an email that already has an account.
    ///
    /// Recoverable: the existing row is untouched and the caller should
    /// re-prompt.
    #[error("An account with email '{email}' already exists")]
    DuplicateEmail { email: String },

    /// Unique constraint violation other than the user email.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Input rejected before reaching the database.
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),

    /// Database could not be opened.
    ///
    /// ## When This Occurs
    /// - Database file can't be created (permissions, missing directory)
    /// - Disk full
    ///
    /// Fatal at startup.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema migration failed. Fatal at startup.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True for errors raised while the storage engine was being built.
    ///
    /// These cannot be recovered from by retrying a single operation.
    pub fn is_construction_failure(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_) | DbError::MigrationFailed(_))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite: "UNIQUE constraint failed: <table>.<column>"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::duplicate(field, "unknown")
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_email_message() {
        let err = DbError::DuplicateEmail {
            email: "a@b.com".to_string(),
        };
        assert_eq!(err.to_string(), "An account with email 'a@b.com' already exists");
        assert!(!err.is_construction_failure());
    }

    #[test]
    fn test_construction_failures() {
        assert!(DbError::ConnectionFailed("disk".into()).is_construction_failure());
        assert!(DbError::MigrationFailed("bad sql".into()).is_construction_failure());
        assert!(!DbError::PoolExhausted.is_construction_failure());
    }

    #[test]
    fn test_validation_converts() {
        let err: DbError = ValidationError::Required {
            field: "title".to_string(),
        }
        .into();
        assert!(matches!(err, DbError::Invalid(_)));
    }
}
