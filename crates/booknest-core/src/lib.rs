//! # booknest-core: Pure Domain Logic for BookNest
//!
//! This crate holds the entity definitions and the rules that apply to them,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BookNest Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Screen State Holders (apps/booknest)            │   │
//! │  │    Auth ──► Catalog ──► Wishlist ──► Reviews ──► Order          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  booknest-db (Repositories)                     │   │
//! │  │              SQLite queries, migrations, DAOs                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ booknest-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  starter  │  │   rules   │  │   │
//! │  │   │   User    │  │  totals   │  │   books   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Product, User) and session types (Review, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`catalog`] - The starter catalog seeded into an empty store
//!
//! ## Example Usage
//!
//! ```rust
//! use booknest_core::money::Money;
//!
//! let price = Money::from_major_minor(1250, 0); // Ksh 1,250.00
//! let line = price * 2;
//! assert_eq!(line.cents(), 250_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lowest star rating a review may carry.
pub const MIN_RATING: u8 = 1;

/// Highest star rating a review may carry.
pub const MAX_RATING: u8 = 5;

/// Highest price a book may carry: Ksh 10,000,000.00.
///
/// Keeps order totals (price × quantity summed over lines) well inside i64.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

/// Maximum quantity of a single book in an order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10).
pub const MAX_ITEM_QUANTITY: u32 = 99;
