//! # Validation Module
//!
//! Input validation for BookNest.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen                                                       │
//! │  └── Immediate feedback on empty fields                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository (Rust)                                            │
//! │  └── THIS MODULE: checked before any SQL runs                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE(email)                                                     │
//! │  └── CHECK(price_cents >= 0)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are checked, never rewritten: an email is not lower-cased or
//! trimmed here, because login matching is exact.

use crate::error::ValidationError;
use crate::types::{NewProduct, NewUser};
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS, MAX_RATING, MIN_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_EMAIL_LEN: usize = 254;
const MAX_PASSWORD_LEN: usize = 128;
const MAX_NAME_LEN: usize = 100;
const MAX_COMMENT_LEN: usize = 1000;

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Product
// =============================================================================

/// Validates a book title.
///
/// ## Example
/// ```rust
/// use booknest_core::validation::validate_title;
///
/// assert!(validate_title("Atomic Habits").is_ok());
/// assert!(validate_title("   ").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    required("title", title)?;
    max_len("title", title, MAX_TITLE_LEN)
}

/// Validates a price in cents: zero (free books) up to `MAX_PRICE_CENTS`.
///
/// ## Example
/// ```rust
/// use booknest_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(125_000).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-1).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates every field of a product before insert.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_title(&product.title)?;
    max_len("description", &product.description, MAX_DESCRIPTION_LEN)?;
    validate_price_cents(product.price_cents)
}

// =============================================================================
// User
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@` with a non-empty local part and a dotted domain
/// - No whitespace anywhere (nothing is trimmed on login either)
pub fn validate_email(email: &str) -> ValidationResult<()> {
    required("email", email)?;
    max_len("email", email, MAX_EMAIL_LEN)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must have exactly one '@' after a name"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a '.'"));
    }

    Ok(())
}

/// Validates a password at registration.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    max_len("password", password, MAX_PASSWORD_LEN)
}

/// Validates a registration form.
pub fn validate_new_user(user: &NewUser) -> ValidationResult<()> {
    validate_email(&user.email)?;
    validate_password(&user.password)?;
    if let Some(name) = &user.name {
        max_len("name", name, MAX_NAME_LEN)?;
    }
    Ok(())
}

// =============================================================================
// Session
// =============================================================================

/// Validates a star rating (1..=5).
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING as i64,
            max: MAX_RATING as i64,
        });
    }
    Ok(())
}

/// Validates a review comment.
pub fn validate_comment(comment: &str) -> ValidationResult<()> {
    required("comment", comment)?;
    max_len("comment", comment, MAX_COMMENT_LEN)
}

/// Validates an order line quantity (1..=MAX_ITEM_QUANTITY).
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 || qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("1984").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("  ").is_err());
        assert!(validate_title(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        assert!(validate_new_product(&NewProduct::new("Dune", "", 0, "")).is_ok());
        assert!(validate_new_product(&NewProduct::new("Dune", "", -5, "")).is_err());
        assert!(validate_new_product(&NewProduct::new("", "x", 10, "")).is_err());
    }

    #[test]
    fn test_validate_price_upper_bound() {
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());

        let err = validate_price_cents(MAX_PRICE_CENTS + 1).unwrap_err();
        assert_eq!(err.field(), "price");
        assert!(validate_price_cents(i64::MAX - 1).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("A@b.com").is_ok());
        assert!(validate_email("first.last@mail.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("ab.com").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a@b.").is_err());
        assert!(validate_email("a@@b.com").is_err());
        assert!(validate_email(" a@b.com").is_err());
    }

    #[test]
    fn test_validate_new_user() {
        assert!(validate_new_user(&NewUser::new("a@b.com", "pw1").with_name("Ann")).is_ok());

        let err = validate_new_user(&NewUser::new("a@b.com", "")).unwrap_err();
        assert_eq!(err.field(), "password");

        let err = validate_new_user(&NewUser::new("a@b.com", "pw").with_name("N".repeat(101)))
            .unwrap_err();
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(100).is_err());
    }

    #[test]
    fn test_validate_comment() {
        assert!(validate_comment("Great read").is_ok());
        assert!(validate_comment("   ").is_err());
    }
}
