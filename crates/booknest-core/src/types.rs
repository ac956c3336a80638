//! # Domain Types
//!
//! Core domain types used throughout BookNest.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  PERSISTED (SQLite)                                                    │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Product      │   │      User       │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id (auto)      │   │  id (auto)      │                             │
//! │  │  title          │   │  email (unique) │                             │
//! │  │  description    │   │  password_hash  │                             │
//! │  │  price_cents    │   │  name           │                             │
//! │  │  image_ref      │   │  created_at     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  SESSION ONLY (in-memory, lost on process exit)                        │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Review      │   │  WishlistItem   │   │   OrderLine     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Persisted entities get their `id` from the storage engine
//! (`INTEGER PRIMARY KEY AUTOINCREMENT`). Ids are never reused, so a stale
//! id can only ever miss, never hit a different row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Storage-assigned product identifier.
pub type ProductId = i64;

/// Storage-assigned user identifier.
pub type UserId = i64;

// =============================================================================
// Product
// =============================================================================

/// A book listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Storage-assigned identifier, immutable once assigned.
    pub id: ProductId,

    /// Display title. Never empty.
    pub title: String,

    /// Free-form blurb shown on the detail screen.
    pub description: String,

    /// Price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Opaque image handle (asset name or URI).
    pub image_ref: String,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A product that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    #[serde(default)]
    pub image_ref: String,
}

impl NewProduct {
    /// Convenience constructor used by the catalog seed and tests.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price_cents: i64,
        image_ref: impl Into<String>,
    ) -> Self {
        NewProduct {
            title: title.into(),
            description: description.into(),
            price_cents,
            image_ref: image_ref.into(),
        }
    }

    /// Attaches a storage-assigned id.
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            price_cents: self.price_cents,
            image_ref: self.image_ref,
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// `password_hash` is an argon2 PHC string. It is never serialized, so a
/// `User` can be handed to any presentation layer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,

    /// Login key. Unique and compared case-sensitively.
    pub email: String,

    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Optional display name.
    pub name: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name to greet the user with: display name if set, otherwise the email.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Registration input, holding the plain-text password until it is hashed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        NewUser {
            email: email.into(),
            password: password.into(),
            name: None,
        }
    }

    /// Sets the optional display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

// =============================================================================
// Session Types
// =============================================================================

/// A reader review shown on the reviews screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub username: String,
    /// Star rating, 1..=5.
    pub rating: u8,
    pub comment: String,
    pub posted_at: DateTime<Utc>,
}

/// A book saved for later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub title: String,
    pub author: String,
    pub image_ref: String,
}

impl WishlistItem {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        WishlistItem {
            title: title.into(),
            author: author.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// A line in the pending order (cart).
///
/// Price is frozen when the line is created, so later catalog edits do not
/// change an order the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub title: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub image_ref: String,
}

impl OrderLine {
    pub fn new(
        title: impl Into<String>,
        quantity: u32,
        unit_price_cents: i64,
        image_ref: impl Into<String>,
    ) -> Self {
        OrderLine {
            title: title.into(),
            quantity,
            unit_price_cents,
            image_ref: image_ref.into(),
        }
    }

    /// Creates a single-quantity line from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        OrderLine::new(&product.title, 1, product.price_cents, &product.image_ref)
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total (unit price × quantity), or `None` if it overflows.
    #[inline]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price().checked_mul_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(name: Option<&str>) -> User {
        User {
            id: 1,
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            name: name.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let json = serde_json::to_string(&sample_user(Some("Ann"))).unwrap();
        assert!(json.contains("\"email\":\"a@b.com\""));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("passwordHash"));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(sample_user(Some("Ann")).display_name(), "Ann");
        assert_eq!(sample_user(None).display_name(), "a@b.com");
        assert_eq!(sample_user(Some("  ")).display_name(), "a@b.com");
    }

    #[test]
    fn test_new_user_debug_redacts_password() {
        let user = NewUser::new("a@b.com", "pw1").with_name("Ann");
        let debug = format!("{:?}", user);
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("pw1"));
    }

    #[test]
    fn test_order_line_total() {
        let line = OrderLine::new("1984", 2, 98_000, "book");
        assert_eq!(line.line_total(), Some(Money::from_cents(196_000)));

        let line = OrderLine::new("Huge", 3, i64::MAX / 2, "book");
        assert_eq!(line.line_total(), None);
    }

    #[test]
    fn test_new_product_with_id() {
        let product = NewProduct::new("Dune", "Spice", 150_000, "book").with_id(7);
        assert_eq!(product.id, 7);
        assert_eq!(product.price().cents(), 150_000);
        assert_eq!(OrderLine::from_product(&product).quantity, 1);
    }
}
