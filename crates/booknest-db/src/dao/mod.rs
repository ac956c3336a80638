//! # Data-Access Objects
//!
//! Narrow storage interfaces, one per entity. Each exposes only the
//! operations its repository needs.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │           ProductDao                         UserDao                    │
//! │   insert / upsert / delete /          insert / find_by_email /          │
//! │   select_all / find_by_id / count     find_by_credentials               │
//! │        │              │                  │              │               │
//! │        ▼              ▼                  ▼              ▼               │
//! │  SqliteProductDao  MemoryProductDao  SqliteUserDao  MemoryUserDao       │
//! │   (SqlitePool)     (Mutex<Vec>)      (SqlitePool)   (Mutex<Vec>)        │
//! │                                                                         │
//! │  Chosen once, at construction time. Repositories hold an               │
//! │  `Arc<dyn ...Dao>` and never know which one they got.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Debug;

use async_trait::async_trait;
use booknest_core::{NewProduct, Product, ProductId, User};

use crate::error::DbResult;
use crate::password;

pub mod memory;
pub mod sqlite;

pub use memory::{MemoryProductDao, MemoryUserDao};
pub use sqlite::{SqliteProductDao, SqliteUserDao};

/// Storage operations for the `products` table.
#[async_trait]
pub trait ProductDao: Send + Sync + Debug {
    /// Inserts a new row and returns the assigned id.
    async fn insert(&self, product: &NewProduct) -> DbResult<ProductId>;

    /// Inserts the row at `product.id`, replacing any row already there.
    async fn upsert(&self, product: &Product) -> DbResult<()>;

    /// Deletes by id. Returns `false` when nothing matched.
    async fn delete(&self, id: ProductId) -> DbResult<bool>;

    /// All rows in id (insertion) order.
    async fn select_all(&self) -> DbResult<Vec<Product>>;

    async fn find_by_id(&self, id: ProductId) -> DbResult<Option<Product>>;

    async fn count(&self) -> DbResult<i64>;
}

/// A registration ready for storage: password already hashed.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
}

/// Storage operations for the `users` table.
#[async_trait]
pub trait UserDao: Send + Sync + Debug {
    /// Inserts a new account.
    ///
    /// Fails with `DbError::DuplicateEmail` when the email is taken; the
    /// existing row is left as it was.
    async fn insert(&self, record: &UserRecord) -> DbResult<User>;

    /// Exact, case-sensitive email lookup.
    async fn find_by_email(&self, email: &str) -> DbResult<Option<User>>;

    /// Returns the user only when both the email and the password match.
    ///
    /// An unknown email still pays for one hash verification.
    async fn find_by_credentials(&self, email: &str, password: &str) -> DbResult<Option<User>> {
        let user = self.find_by_email(email).await?;
        let stored = user.as_ref().map(|u| u.password_hash.clone());

        let matched = password::verify_stored_blocking(password.to_string(), stored).await?;

        Ok(user.filter(|_| matched))
    }
}
