//! # Composition Root
//!
//! Owns the storage handle and builds the state holders.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. AppConfig::load() ── BOOKNEST_* env vars + platform data dir       │
//! │                                                                         │
//! │  2. DatabaseProvider::new(config.db_config())                          │
//! │                                                                         │
//! │  3. provider.get() ── opens SQLite, runs migrations (exactly once)     │
//! │     • failure here is fatal: AppError { STORAGE_UNAVAILABLE }          │
//! │                                                                         │
//! │  4. Seed starter catalog when enabled and the catalog is empty         │
//! │                                                                         │
//! │  5. Screens ask the context for their state holder                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use booknest_core::catalog::starter_catalog;
use booknest_db::{Database, DatabaseProvider, ProductRepository, UserRepository};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::state::{AuthState, CatalogState, OrderState, ReviewState, WishlistState};

/// Application context shared by every screen.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: Arc<AppConfig>,
    provider: Arc<DatabaseProvider>,
    db: Database,
}

impl AppContext {
    /// Opens storage and prepares the catalog.
    ///
    /// ## Returns
    /// * `Ok(AppContext)` - ready to serve screens
    /// * `Err(AppError)` - with `is_fatal()` set when storage could not be opened
    pub async fn bootstrap(config: AppConfig) -> AppResult<Self> {
        let provider = Arc::new(DatabaseProvider::new(config.db_config()));
        Self::with_provider(config, provider).await
    }

    /// Bootstraps over an existing provider (shared with other components).
    pub async fn with_provider(
        config: AppConfig,
        provider: Arc<DatabaseProvider>,
    ) -> AppResult<Self> {
        info!(path = %config.database_path.display(), "Opening local storage");

        let db = provider.get().await.map_err(|e| {
            error!(error = %e, "Local storage could not be opened");
            e
        })?;

        if config.seed_catalog {
            let seeded = db.products().seed_if_empty(&starter_catalog()).await?;
            if seeded > 0 {
                info!(seeded, "Starter catalog installed");
            }
        }

        Ok(AppContext {
            config: Arc::new(config),
            provider,
            db,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The provider the storage handle came from.
    pub fn provider(&self) -> &DatabaseProvider {
        &self.provider
    }

    pub fn products(&self) -> ProductRepository {
        self.db.products()
    }

    pub fn users(&self) -> UserRepository {
        self.db.users()
    }

    // -------------------------------------------------------------------------
    // State holders
    // -------------------------------------------------------------------------

    pub fn auth_state(&self) -> AuthState {
        AuthState::new(self.users())
    }

    pub fn catalog_state(&self) -> CatalogState {
        CatalogState::new(self.products(), self.config.currency_symbol.clone())
    }

    /// Wishlist opened from a book's detail screen.
    pub fn wishlist_state(&self, title: &str, description: &str) -> WishlistState {
        WishlistState::new(title, description)
    }

    pub fn review_state(&self) -> ReviewState {
        ReviewState::new()
    }

    /// Order opened from a book's detail screen.
    pub fn order_state(&self, title: &str) -> OrderState {
        OrderState::new(title, self.config.currency_symbol.clone())
    }

    /// Closes the storage pool.
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_bootstrap_seeds_catalog() {
        let config = AppConfig {
            seed_catalog: true,
            ..AppConfig::in_memory()
        };
        let ctx = AppContext::bootstrap(config).await.unwrap();

        let count = ctx.products().count().await.unwrap();
        assert_eq!(count, starter_catalog().len() as i64);
        assert_eq!(ctx.provider().construction_count(), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_without_seed_is_empty() {
        let ctx = AppContext::bootstrap(AppConfig::in_memory()).await.unwrap();
        assert_eq!(ctx.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_repositories_share_one_store() {
        let ctx = AppContext::bootstrap(AppConfig::in_memory()).await.unwrap();
        let other = AppContext::bootstrap(AppConfig::in_memory()).await.unwrap();

        ctx.users()
            .register_user(&booknest_core::NewUser::new("ann@x.com", "pw1"))
            .await
            .unwrap();

        // Same context, different repository instances: same data.
        assert!(ctx.users().login_user("ann@x.com", "pw1").await.unwrap().is_some());
        // A separately bootstrapped in-memory store is a different database.
        assert!(other.users().login_user("ann@x.com", "pw1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unopenable_storage_is_fatal() {
        let config = AppConfig {
            database_path: PathBuf::from("/nonexistent-dir/definitely/missing/booknest.db"),
            ..AppConfig::in_memory()
        };

        let err = AppContext::bootstrap(config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageUnavailable);
        assert!(err.is_fatal());
    }
}
