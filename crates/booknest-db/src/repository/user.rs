//! # User Repository
//!
//! Account registration and login.
//!
//! Passwords never reach storage in the clear: `register_user` hashes with
//! argon2 before the DAO sees the record, and `login_user` verifies against
//! the stored hash. Both run the hashing work off the async runtime.

use std::sync::Arc;

use booknest_core::validation::validate_new_user;
use booknest_core::{NewUser, User};
use tracing::{debug, info, warn};

use crate::dao::{MemoryUserDao, UserDao, UserRecord};
use crate::error::{DbError, DbResult};
use crate::password::hash_password_blocking;

/// Repository for account operations.
///
/// ## Usage
/// ```rust,ignore
/// let users = db.users();
/// users.register_user(&NewUser::new("ann@x.com", "pw1")).await?;
///
/// let ann = users.login_user("ann@x.com", "pw1").await?;   // Some(user)
/// let nobody = users.login_user("ann@x.com", "nope").await?; // None
/// ```
#[derive(Debug, Clone)]
pub struct UserRepository {
    dao: Arc<dyn UserDao>,
}

impl UserRepository {
    pub fn new(dao: Arc<dyn UserDao>) -> Self {
        UserRepository { dao }
    }

    /// Repository over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryUserDao::new()))
    }

    /// Creates an account.
    ///
    /// ## Returns
    /// * `Ok(User)` - the stored account (with its password hash, never the password)
    /// * `Err(DbError::DuplicateEmail)` - email taken; the existing account is untouched
    /// * `Err(DbError::Invalid)` - malformed email, empty password, or overlong name
    pub async fn register_user(&self, user: &NewUser) -> DbResult<User> {
        validate_new_user(user)?;

        let record = UserRecord {
            email: user.email.clone(),
            password_hash: hash_password_blocking(user.password.clone()).await?,
            name: user.name.clone(),
        };

        match self.dao.insert(&record).await {
            Ok(stored) => {
                info!(user_id = stored.id, "User registered");
                Ok(stored)
            }
            Err(err @ DbError::DuplicateEmail { .. }) => {
                warn!("Registration rejected: email already registered");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Looks up an account by email and password.
    ///
    /// Returns `Ok(None)` for an unknown email and for a wrong password
    /// alike, so callers cannot tell the two apart. Email matching is exact.
    pub async fn login_user(&self, email: &str, password: &str) -> DbResult<Option<User>> {
        let user = self.dao.find_by_credentials(email, password).await?;

        match &user {
            Some(found) => debug!(user_id = found.id, "Login succeeded"),
            None => debug!("Login failed"),
        }

        Ok(user)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
