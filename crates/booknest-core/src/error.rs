//! # Error Types
//!
//! Domain-specific error types for booknest-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  booknest-core errors (this file)                                      │
//! │  ├── CoreError        - Session/business rule failures                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  booknest-db errors (separate crate)                                   │
//! │  └── DbError          - Storage failures, DuplicateEmail               │
//! │                                                                         │
//! │  App errors (apps/booknest)                                            │
//! │  └── AppError         - What the screen shows (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError/DbError → AppError → Screen          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations in the in-memory session state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The book is not present in the list being edited.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Order placement was attempted with no lines.
    #[error("Order has no items")]
    EmptyOrder,

    /// The order total does not fit in a money amount.
    #[error("Order total is too large")]
    TotalOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything reaches storage, so a rejected registration or
/// product insert never touches the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::TotalOverflow.to_string(), "Order total is too large");
        assert_eq!(CoreError::EmptyOrder.to_string(), "Order has no items");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");
        assert_eq!(err.field(), "email");

        let err = ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        };
        assert_eq!(err.to_string(), "rating must be between 1 and 5");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "comment".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
