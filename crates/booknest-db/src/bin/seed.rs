//! # Catalog Seeder
//!
//! Populates a BookNest database with the starter catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the starter catalog into ./booknest_dev.db
//! cargo run -p booknest-db --bin seed
//!
//! # Specify database path
//! cargo run -p booknest-db --bin seed -- --db ./data/booknest.db
//!
//! # Load books from a JSON file instead ([{"title": ..., "priceCents": ...}])
//! cargo run -p booknest-db --bin seed -- --file books.json
//!
//! # Insert even if the catalog already has books
//! cargo run -p booknest-db --bin seed -- --force
//! ```

use std::env;
use std::fs;

use booknest_core::catalog::starter_catalog;
use booknest_core::NewProduct;
use booknest_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./booknest_dev.db");
    let mut catalog_file: Option<String> = None;
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    catalog_file = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--force" => force = true,
            "--help" | "-h" => {
                println!("BookNest Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>     Database file path (default: ./booknest_dev.db)");
                println!("  -f, --file <PATH>   JSON array of books to insert");
                println!("      --force         Insert even if the catalog is not empty");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let books: Vec<NewProduct> = match &catalog_file {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => starter_catalog(),
    };

    info!(database = %db_path, books = books.len(), "Seeding catalog");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let products = db.products();

    let existing = products.count().await?;
    if existing > 0 && !force {
        warn!(
            existing,
            "Catalog already has books, skipping seed (use --force to insert anyway)"
        );
        db.close().await;
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut inserted = 0;

    for book in &books {
        match products.insert_product(book).await {
            Ok(stored) => {
                inserted += 1;
                println!("  #{:<4} {:<30} {}", stored.id, stored.title, stored.price());
            }
            Err(e) => warn!(title = %book.title, error = %e, "Failed to insert book"),
        }
    }

    info!(inserted, elapsed = ?start.elapsed(), "Seed complete");

    db.close().await;
    Ok(())
}
