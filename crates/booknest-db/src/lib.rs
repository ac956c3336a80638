//! # booknest-db: Local Persistence for BookNest
//!
//! This crate owns everything BookNest stores on the device: the catalog of
//! books and the registered accounts. It uses SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BookNest Data Flow                               │
//! │                                                                         │
//! │  Screen state holder (CatalogState, AuthState)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   booknest-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────────┐   ┌───────────────┐   ┌──────────────┐  │   │
//! │  │  │ DatabaseProvider │   │ Repositories  │   │     DAOs     │  │   │
//! │  │  │    (pool.rs)     │   │               │   │              │  │   │
//! │  │  │                  │   │ ProductRepo   │──►│ SQLite       │  │   │
//! │  │  │ lazy, once-only  │──►│ UserRepo      │   │ In-memory    │  │   │
//! │  │  │ SqlitePool       │   │               │   │              │  │   │
//! │  │  └──────────────────┘   └───────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/booknest/booknest.db  (products, users)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Storage handle, pool configuration, lazy provider
//! - [`migrations`] - Embedded database migrations
//! - [`dao`] - Per-entity storage interfaces and their engines
//! - [`repository`] - Product and user repositories
//! - [`password`] - argon2 hashing for account passwords
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use booknest_db::{DatabaseProvider, DbConfig};
//!
//! let provider = DatabaseProvider::new(DbConfig::new("booknest.db"));
//! let db = provider.get().await?;
//!
//! let books = db.products().get_all_products().await?;
//! let user = db.users().login_user("ann@x.com", "pw1").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dao;
pub mod error;
pub mod migrations;
pub mod password;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DatabaseProvider, DbConfig};

// Repository re-exports for convenience
pub use repository::product::{CatalogChanges, ProductFeed, ProductRepository};
pub use repository::user::UserRepository;
