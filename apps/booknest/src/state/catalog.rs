//! # Catalog State
//!
//! Backs the home (book grid) and book detail screens.
//!
//! The listing is a cached copy of the products table. It is refreshed on
//! demand, after this holder's own writes, and, once [`CatalogState::follow`]
//! has been started, after every write made anywhere on the same storage.

use std::sync::{Arc, Mutex};

use booknest_core::{NewProduct, Product, ProductId};
use booknest_db::ProductRepository;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::lock;
use crate::error::AppResult;

/// State holder for the catalog screens.
#[derive(Debug)]
pub struct CatalogState {
    products: ProductRepository,
    listing: Mutex<Vec<Product>>,
    currency_symbol: String,
}

impl CatalogState {
    pub fn new(products: ProductRepository, currency_symbol: impl Into<String>) -> Self {
        CatalogState {
            products,
            listing: Mutex::new(Vec::new()),
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Reloads the listing from storage. Returns the number of books.
    pub async fn refresh(&self) -> AppResult<usize> {
        let products = self.products.get_all_products().await?;
        let count = products.len();
        *lock(&self.listing) = products;
        Ok(count)
    }

    /// Keeps the listing current by consuming the product change feed.
    ///
    /// The task ends when the storage handle goes away; abort the returned
    /// handle to stop it earlier.
    pub fn follow(self: &Arc<Self>) -> JoinHandle<()> {
        let state = Arc::clone(self);
        let mut feed = self.products.observe_products();

        tokio::spawn(async move {
            while let Some(snapshot) = feed.next().await {
                match snapshot {
                    Ok(products) => {
                        debug!(count = products.len(), "Catalog listing updated");
                        *lock(&state.listing) = products;
                    }
                    Err(e) => warn!(error = %e, "Catalog refresh failed"),
                }
            }
        })
    }

    /// Current listing, in catalog order.
    pub fn products(&self) -> Vec<Product> {
        lock(&self.listing).clone()
    }

    /// Adds a book and reloads the listing.
    pub async fn add_product(&self, product: NewProduct) -> AppResult<Product> {
        let stored = self.products.insert_product(&product).await?;
        self.refresh().await?;
        Ok(stored)
    }

    /// Removes a book and reloads the listing. Removing a book that is
    /// already gone is not an error.
    pub async fn remove_product(&self, id: ProductId) -> AppResult<()> {
        self.products.delete_product_by_id(id).await?;
        self.refresh().await?;
        Ok(())
    }

    /// Finds a listed book by title, ignoring case and surrounding spaces.
    ///
    /// The detail screen is reached by title, so this is how it resolves
    /// the book it shows.
    pub fn find_by_title(&self, title: &str) -> Option<Product> {
        let wanted = title.trim();
        lock(&self.listing)
            .iter()
            .find(|p| p.title.eq_ignore_ascii_case(wanted))
            .cloned()
    }

    /// Price formatted for display, e.g. `Ksh 1,250.00`.
    pub fn price_label(&self, product: &Product) -> String {
        product.price().format_with_symbol(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::context::AppContext;
    use crate::error::ErrorCode;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    async fn context() -> AppContext {
        let config = AppConfig {
            seed_catalog: true,
            ..AppConfig::in_memory()
        };
        AppContext::bootstrap(config).await.unwrap()
    }

    #[tokio::test]
    async fn test_refresh_loads_seeded_catalog() {
        let ctx = context().await;
        let catalog = ctx.catalog_state();
        assert!(catalog.products().is_empty());

        let count = catalog.refresh().await.unwrap();
        assert_eq!(count, 12);

        let gatsby = catalog.find_by_title("  the great gatsby ").unwrap();
        assert_eq!(catalog.price_label(&gatsby), "Ksh 1,350.00");
        assert!(catalog.find_by_title("Unknown Book").is_none());
    }

    #[tokio::test]
    async fn test_add_and_remove_product() {
        let ctx = context().await;
        let catalog = ctx.catalog_state();

        let added = catalog
            .add_product(NewProduct::new("Sula", "Toni Morrison", 99_000, "book"))
            .await
            .unwrap();
        assert_eq!(catalog.products().len(), 13);
        assert_eq!(catalog.find_by_title("Sula"), Some(added.clone()));

        catalog.remove_product(added.id).await.unwrap();
        assert_eq!(catalog.products().len(), 12);
        assert!(catalog.find_by_title("Sula").is_none());

        // Already gone: still fine.
        catalog.remove_product(added.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_product_is_rejected() {
        let ctx = context().await;
        let catalog = ctx.catalog_state();

        let err = catalog
            .add_product(NewProduct::new("   ", "", 100, ""))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_follow_picks_up_writes_from_elsewhere() {
        let ctx = context().await;
        let catalog = Arc::new(ctx.catalog_state());
        let task = catalog.follow();

        ctx.products()
            .insert_product(&NewProduct::new("Sula", "", 99_000, "book"))
            .await
            .unwrap();

        timeout(Duration::from_secs(5), async {
            while catalog.find_by_title("Sula").is_none() {
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("listing never saw the new book");

        assert_eq!(catalog.products().len(), 13);
        task.abort();
    }
}
