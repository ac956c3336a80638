//! # App Error Type
//!
//! Unified error type returned by the screen state holders.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in BookNest                               │
//! │                                                                         │
//! │  Screen                     State holder                                │
//! │  ──────                     ────────────                                │
//! │                                                                         │
//! │  auth.register()                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  AppResult<T>                                                    │  │
//! │  │         │                                                        │  │
//! │  │  DbError::DuplicateEmail ───────────────► EMAIL_TAKEN           │  │
//! │  │  DbError::Invalid / CoreError::Validation ► VALIDATION_ERROR     │  │
//! │  │  DbError::ConnectionFailed / Migration ──► STORAGE_UNAVAILABLE   │  │
//! │  │  anything else ───────────────────────────► DATABASE_ERROR       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The screen shows `message` and branches on `code`.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages are safe to show to the user: storage internals are logged, not
//! returned.

use booknest_core::{CoreError, ValidationError};
use booknest_db::DbError;
use serde::Serialize;

use crate::config::ConfigError;

/// Message shown for any failed login.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password";

/// Message shown when a registration email is taken.
pub const EMAIL_TAKEN_MESSAGE: &str =
    "An account with this email already exists. Please use another email.";

/// Error returned to the presentation layer.
///
/// ## Serialization
/// ```json
/// {
///   "code": "EMAIL_TAKEN",
///   "message": "An account with this email already exists. Please use another email."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Registration with an email that already has an account
    EmailTaken,

    /// Login did not match any account
    InvalidCredentials,

    /// Item missing from a session list
    NotFound,

    /// Business rule rejected the action (e.g. empty order)
    BusinessLogic,

    /// Storage could not be opened; the app cannot continue
    StorageUnavailable,

    /// Database operation failed
    DatabaseError,

    /// Invalid configuration
    ConfigError,
}

/// Result alias for state holder operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates the generic login failure.
    pub fn invalid_credentials() -> Self {
        AppError::new(ErrorCode::InvalidCredentials, LOGIN_FAILED_MESSAGE)
    }

    /// True when the error means the app cannot run at all.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::StorageUnavailable | ErrorCode::ConfigError
        )
    }
}

/// Converts database errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::DuplicateEmail { .. } => AppError::new(ErrorCode::EmailTaken, EMAIL_TAKEN_MESSAGE),
            DbError::UniqueViolation { field, .. } => {
                AppError::validation(format!("{} already exists", field))
            }
            DbError::Invalid(e) => AppError::validation(e.to_string()),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::StorageUnavailable, "Local storage could not be opened")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::StorageUnavailable, "Local storage could not be prepared")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database is busy, please try again")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BookNotFound(title) => {
                AppError::new(ErrorCode::NotFound, format!("Book not found: {}", title))
            }
            CoreError::EmptyOrder => {
                AppError::new(ErrorCode::BusinessLogic, "Your order has no items")
            }
            CoreError::TotalOverflow => {
                AppError::new(ErrorCode::BusinessLogic, "Order total is too large")
            }
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
