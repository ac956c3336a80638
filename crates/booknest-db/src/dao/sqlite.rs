//! # SQLite DAOs
//!
//! DAO implementations backed by the shared `SqlitePool`.
//!
//! Every operation is a single statement, so each one commits on its own;
//! SQLite serializes the writers.

use async_trait::async_trait;
use booknest_core::{NewProduct, Product, ProductId, User};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::{ProductDao, UserDao, UserRecord};
use crate::error::{DbError, DbResult};

// =============================================================================
// Products
// =============================================================================

/// `ProductDao` over SQLite.
#[derive(Debug, Clone)]
pub struct SqliteProductDao {
    pool: SqlitePool,
}

impl SqliteProductDao {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteProductDao { pool }
    }
}

#[async_trait]
impl ProductDao for SqliteProductDao {
    async fn insert(&self, product: &NewProduct) -> DbResult<ProductId> {
        debug!(title = %product.title, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (title, description, price_cents, image_ref)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.image_ref)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn upsert(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Replacing product");

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO products (id, title, description, price_cents, image_ref)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.image_ref)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: ProductId) -> DbResult<bool> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn select_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, description, price_cents, image_ref
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, description, price_cents, image_ref
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Users
// =============================================================================

/// `UserDao` over SQLite.
#[derive(Debug, Clone)]
pub struct SqliteUserDao {
    pool: SqlitePool,
}

impl SqliteUserDao {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteUserDao { pool }
    }
}

#[async_trait]
impl UserDao for SqliteUserDao {
    async fn insert(&self, record: &UserRecord) -> DbResult<User> {
        debug!(email = %record.email, "Inserting user");

        let created_at = Utc::now();

        // Plain INSERT (no OR REPLACE): the UNIQUE(email) constraint rejects
        // a second account atomically and the first row stays as it was.
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(&record.name)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)
        .map_err(|err| match err {
            DbError::UniqueViolation { ref field, .. } if field == "users.email" => {
                DbError::DuplicateEmail {
                    email: record.email.clone(),
                }
            }
            other => other,
        })?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: record.email.clone(),
            password_hash: record.password_hash.clone(),
            name: record.name.clone(),
            created_at,
        })
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
