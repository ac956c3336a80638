//! # State Module
//!
//! One state holder per screen. Each owns what its screen needs and
//! nothing else.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        AppContext                               │   │
//! │  │  ctx.auth_state()  ctx.catalog_state()  ctx.order_state(..)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │          │                   │                        │                 │
//! │          ▼                   ▼                        ▼                 │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────────┐  │
//! │  │  AuthState   │  │  CatalogState    │  │ WishlistState            │  │
//! │  │              │  │                  │  │ ReviewState              │  │
//! │  │ UserRepo     │  │ ProductRepo      │  │ OrderState               │  │
//! │  │ form fields  │  │ cached listing   │  │ (in memory only)         │  │
//! │  │ current user │  │ change feed task │  │                          │  │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Repositories share the SQLite pool (thread-safe)                    │
//! │  • Each holder guards its own data with a Mutex, never across .await   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod catalog;
mod order;
mod review;
mod wishlist;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use auth::{AuthSnapshot, AuthState};
pub use catalog::CatalogState;
pub use order::{OrderReceipt, OrderState};
pub use review::ReviewState;
pub use wishlist::WishlistState;

/// Locks a state mutex, recovering the data if a holder panicked mid-update.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
