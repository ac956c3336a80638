//! # Product Repository
//!
//! Catalog operations exposed to the screen state holders.
//!
//! ## Key Operations
//! - Insert (new id) and replace (known id)
//! - List all, and a change feed that re-lists after every write
//! - Delete, where an absent id is a no-op
//!
//! ## Change Feed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How observe_products Works                           │
//! │                                                                         │
//! │  insert / replace / delete ──► CatalogChanges.bump()                   │
//! │                                    │  (watch channel, version += 1)    │
//! │                                    ▼                                    │
//! │  ProductFeed::next() ◄──── changed() wakes every feed                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dao.select_all() ──► fresh Vec<Product>                               │
//! │                                                                         │
//! │  Several writes between two next() calls collapse into one snapshot.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use booknest_core::validation::{validate_new_product, validate_price_cents, validate_title};
use booknest_core::{NewProduct, Product, ProductId};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::dao::ProductDao;
use crate::error::DbResult;

// =============================================================================
// Change Signal
// =============================================================================

/// Version counter shared by every repository on the same storage handle.
#[derive(Debug, Clone)]
pub struct CatalogChanges {
    sender: Arc<watch::Sender<u64>>,
}

impl CatalogChanges {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        CatalogChanges {
            sender: Arc::new(sender),
        }
    }

    /// Marks the catalog as changed. Works with or without subscribers.
    fn bump(&self) {
        self.sender.send_modify(|version| *version += 1);
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }

    /// Current version (number of writes seen).
    pub fn version(&self) -> u64 {
        *self.sender.borrow()
    }
}

impl Default for CatalogChanges {
    fn default() -> Self {
        Self::new()
    }
}

/// Push-updated view of the catalog.
///
/// The first [`next`](ProductFeed::next) returns the current rows at once;
/// each later call waits for a write and returns the rows after it.
#[derive(Debug)]
pub struct ProductFeed {
    dao: Arc<dyn ProductDao>,
    changes: watch::Receiver<u64>,
    primed: bool,
}

impl ProductFeed {
    /// Waits for the next snapshot. `None` once every repository sharing
    /// the change signal has been dropped.
    pub async fn next(&mut self) -> Option<DbResult<Vec<Product>>> {
        if self.primed {
            self.changes.changed().await.ok()?;
        } else {
            self.primed = true;
        }
        self.changes.borrow_and_update();

        Some(self.dao.select_all().await)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let dune = repo.insert_product(&NewProduct::new("Dune", "...", 145_000, "book")).await?;
/// let all = repo.get_all_products().await?;
/// repo.delete_product(&dune).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    dao: Arc<dyn ProductDao>,
    changes: CatalogChanges,
}

impl ProductRepository {
    /// Creates a repository with its own change signal.
    ///
    /// Use this with a standalone DAO (e.g. `MemoryProductDao`).
    pub fn new(dao: Arc<dyn ProductDao>) -> Self {
        Self::with_changes(dao, CatalogChanges::new())
    }

    /// Creates a repository that shares a change signal with others.
    pub fn with_changes(dao: Arc<dyn ProductDao>, changes: CatalogChanges) -> Self {
        ProductRepository { dao, changes }
    }

    /// Inserts a new product and returns it with its assigned id.
    ///
    /// ## Returns
    /// * `Ok(Product)` - stored product
    /// * `Err(DbError::Invalid)` - empty title or negative price
    pub async fn insert_product(&self, product: &NewProduct) -> DbResult<Product> {
        validate_new_product(product)?;

        let id = self.dao.insert(product).await?;
        self.changes.bump();

        debug!(id, title = %product.title, "Product inserted");
        Ok(product.clone().with_id(id))
    }

    /// Inserts or replaces the row at `product.id`.
    ///
    /// Idempotent: replacing with identical data leaves the table unchanged.
    pub async fn replace_product(&self, product: &Product) -> DbResult<()> {
        validate_title(&product.title)?;
        validate_price_cents(product.price_cents)?;

        self.dao.upsert(product).await?;
        self.changes.bump();

        debug!(id = product.id, "Product replaced");
        Ok(())
    }

    /// Lists every product in insertion order (one-shot snapshot).
    pub async fn get_all_products(&self) -> DbResult<Vec<Product>> {
        let products = self.dao.select_all().await?;
        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Returns a feed that yields a fresh listing after every write.
    pub fn observe_products(&self) -> ProductFeed {
        ProductFeed {
            dao: Arc::clone(&self.dao),
            changes: self.changes.subscribe(),
            primed: false,
        }
    }

    /// Gets a product by id.
    pub async fn get_product(&self, id: ProductId) -> DbResult<Option<Product>> {
        self.dao.find_by_id(id).await
    }

    /// Deletes the row matching the product's id.
    ///
    /// A product that is already gone is not an error.
    pub async fn delete_product(&self, product: &Product) -> DbResult<()> {
        self.delete_product_by_id(product.id).await
    }

    /// Deletes by id; absent ids are ignored.
    pub async fn delete_product_by_id(&self, id: ProductId) -> DbResult<()> {
        if self.dao.delete(id).await? {
            self.changes.bump();
            debug!(id, "Product deleted");
        } else {
            debug!(id, "Delete skipped, product already absent");
        }
        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        self.dao.count().await
    }

    /// Inserts `products` only when the catalog is empty.
    ///
    /// ## Returns
    /// Number of products inserted (0 when the catalog already had rows).
    pub async fn seed_if_empty(&self, products: &[NewProduct]) -> DbResult<usize> {
        if self.count().await? > 0 {
            debug!("Catalog already populated, skipping seed");
            return Ok(0);
        }

        for product in products {
            self.insert_product(product).await?;
        }

        info!(count = products.len(), "Seeded catalog");
        Ok(products.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
