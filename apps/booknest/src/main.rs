//! BookNest entry point.
//!
//! Opens local storage, installs the starter catalog on first run, and
//! prints the catalog. Exits non-zero when storage cannot be opened.

use std::process::ExitCode;

use booknest_app::telemetry::init_tracing;
use booknest_app::{AppConfig, AppContext, AppResult};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    info!("Starting BookNest");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, "{}", e.message);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let config = AppConfig::load()?;
    let ctx = AppContext::bootstrap(config).await?;

    let catalog = ctx.catalog_state();
    let count = catalog.refresh().await?;
    info!(count, "Catalog loaded");

    for product in catalog.products() {
        println!("  {:<30} {}", product.title, catalog.price_label(&product));
    }

    ctx.shutdown().await;
    Ok(())
}
