//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite, plus the lazy
//! single-initialization provider.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storage Handle Lifecycle                           │
//! │                                                                         │
//! │  App Startup (AppContext::bootstrap)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DatabaseProvider::new(config)  ← nothing opened yet                   │
//! │       │                                                                 │
//! │       │  provider.get().await   (any number of concurrent callers)     │
//! │       ▼                                                                 │
//! │  OnceCell ── first caller ──► Database::new(config)                    │
//! │          │                     • open pool (WAL, foreign keys)         │
//! │          │                     • run migrations                        │
//! │          └─ everyone else ──► wait, then share the same handle         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.products() / db.users() ← repositories share the pool              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled so catalog reads do not
//! wait on a registration write and vice versa.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::dao::{SqliteProductDao, SqliteUserDao};
use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::{CatalogChanges, ProductRepository};
use crate::repository::user::UserRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/booknest.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (plenty for a single-user app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Each `Database::new` on this config gets its own private database,
    /// which is exactly what makes a second construction observable in
    /// tests: its writes would land somewhere else.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Storage handle providing repository access.
///
/// Cloning is cheap: clones share the pool and the catalog change signal.
/// The composition root owns the original and hands clones (or
/// repositories) to whoever needs them.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Bumped after every product write, observed by product feeds.
    catalog_changes: CatalogChanges,
}

impl Database {
    /// Opens the database and prepares the schema.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - Foreign keys enabled
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed | MigrationFailed)` - fatal at startup
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // sqlite://path creates file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            pool,
            catalog_changes: CatalogChanges::new(),
        };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Idempotent: applied migrations are tracked in `_sqlx_migrations`.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// Prefer using repository methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = db.products().get_all_products().await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::with_changes(
            Arc::new(SqliteProductDao::new(self.pool.clone())),
            self.catalog_changes.clone(),
        )
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(Arc::new(SqliteUserDao::new(self.pool.clone())))
    }

    /// Closes the database connection pool.
    ///
    /// ## Note
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Lazy Provider
// =============================================================================

/// Opens the database on first use, exactly once.
///
/// ```text
/// task A ─┐
/// task B ─┼─► provider.get() ──► OnceCell::get_or_try_init ──► Database::new
/// task C ─┘                        (one runs, the others wait)
/// ```
///
/// If construction fails the cell stays empty and the error goes to the
/// caller that triggered it; the composition root treats that as fatal.
#[derive(Debug)]
pub struct DatabaseProvider {
    config: DbConfig,
    cell: OnceCell<Database>,
    constructions: AtomicUsize,
}

impl DatabaseProvider {
    /// Creates a provider. Nothing is opened until [`get`](Self::get).
    pub fn new(config: DbConfig) -> Self {
        DatabaseProvider {
            config,
            cell: OnceCell::new(),
            constructions: AtomicUsize::new(0),
        }
    }

    /// Returns the shared handle, opening the database on first call.
    pub async fn get(&self) -> DbResult<Database> {
        let db = self
            .cell
            .get_or_try_init(|| async {
                self.constructions.fetch_add(1, Ordering::SeqCst);
                Database::new(self.config.clone()).await
            })
            .await?;

        Ok(db.clone())
    }

    /// True once a handle has been constructed.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// Number of construction attempts made so far (diagnostics).
    pub fn construction_count(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use booknest_core::NewProduct;

    #[tokio::test]
    async fn test_in_memory_database() {
        let config = DbConfig::in_memory();
        let db = Database::new(config).await.unwrap();

        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
    }

    #[tokio::test]
    async fn test_provider_is_lazy() {
        let provider = DatabaseProvider::new(DbConfig::in_memory());
        assert!(!provider.is_initialized());
        assert_eq!(provider.construction_count(), 0);

        provider.get().await.unwrap();
        provider.get().await.unwrap();

        assert!(provider.is_initialized());
        assert_eq!(provider.construction_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_access_constructs_once() {
        let provider = Arc::new(DatabaseProvider::new(DbConfig::in_memory()));

        let mut handles = Vec::new();
        for i in 0..16 {
            let provider = Arc::clone(&provider);
            handles.push(tokio::spawn(async move {
                let db = provider.get().await.unwrap();
                db.products()
                    .insert_product(&NewProduct::new(format!("Book {}", i), "", 100, ""))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(provider.construction_count(), 1);

        // Every in-memory construction is a separate database, so a second
        // construction would have swallowed some of these writes.
        let db = provider.get().await.unwrap();
        assert_eq!(db.products().count().await.unwrap(), 16);
    }

    #[tokio::test]
    async fn test_construction_failure_is_reported() {
        let provider = DatabaseProvider::new(
            DbConfig::new("/nonexistent-dir/definitely/missing/booknest.db")
                .connect_timeout(Duration::from_secs(1)),
        );

        let err = provider.get().await.unwrap_err();
        assert!(err.is_construction_failure());
        assert!(!provider.is_initialized());
    }
}
