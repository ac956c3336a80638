//! # In-Memory DAOs
//!
//! Substitute engines for tests and previews. They follow the same contract
//! as the SQLite DAOs: ids start at 1 and are never reused, emails are unique
//! and compared case-sensitively, and deletes of absent ids report `false`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use booknest_core::{NewProduct, Product, ProductId, User, UserId};
use chrono::Utc;

use super::{ProductDao, UserDao, UserRecord};
use crate::error::{DbError, DbResult};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Default)]
struct ProductTable {
    rows: Vec<Product>,
    last_id: ProductId,
}

impl ProductTable {
    fn next_id(&mut self) -> ProductId {
        self.last_id += 1;
        self.last_id
    }
}

/// `ProductDao` over a vector kept in id order.
#[derive(Debug, Default)]
pub struct MemoryProductDao {
    table: Mutex<ProductTable>,
}

impl MemoryProductDao {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductDao for MemoryProductDao {
    async fn insert(&self, product: &NewProduct) -> DbResult<ProductId> {
        let mut table = lock(&self.table);
        let id = table.next_id();
        table.rows.push(product.clone().with_id(id));
        Ok(id)
    }

    async fn upsert(&self, product: &Product) -> DbResult<()> {
        let mut table = lock(&self.table);

        match table.rows.binary_search_by_key(&product.id, |p| p.id) {
            Ok(pos) => table.rows[pos] = product.clone(),
            Err(pos) => table.rows.insert(pos, product.clone()),
        }
        // Mirrors AUTOINCREMENT: an explicit id raises the high-water mark.
        table.last_id = table.last_id.max(product.id);

        Ok(())
    }

    async fn delete(&self, id: ProductId) -> DbResult<bool> {
        let mut table = lock(&self.table);
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);
        Ok(table.rows.len() != before)
    }

    async fn select_all(&self) -> DbResult<Vec<Product>> {
        Ok(lock(&self.table).rows.clone())
    }

    async fn find_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        Ok(lock(&self.table).rows.iter().find(|p| p.id == id).cloned())
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(lock(&self.table).rows.len() as i64)
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Default)]
struct UserTable {
    rows: Vec<User>,
    last_id: UserId,
}

/// `UserDao` over a vector.
#[derive(Debug, Default)]
pub struct MemoryUserDao {
    table: Mutex<UserTable>,
}

impl MemoryUserDao {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDao for MemoryUserDao {
    async fn insert(&self, record: &UserRecord) -> DbResult<User> {
        // Check and insert under one lock: same atomicity as UNIQUE(email).
        let mut table = lock(&self.table);

        if table.rows.iter().any(|u| u.email == record.email) {
            return Err(DbError::DuplicateEmail {
                email: record.email.clone(),
            });
        }

        table.last_id += 1;
        let user = User {
            id: table.last_id,
            email: record.email.clone(),
            password_hash: record.password_hash.clone(),
            name: record.name.clone(),
            created_at: Utc::now(),
        };
        table.rows.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_product_ids_are_not_reused() {
        let dao = MemoryProductDao::new();
        let first = dao.insert(&NewProduct::new("A", "", 100, "")).await.unwrap();
        assert!(dao.delete(first).await.unwrap());

        let second = dao.insert(&NewProduct::new("B", "", 100, "")).await.unwrap();
        assert!(second > first);
        assert!(!dao.delete(first).await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_keeps_id_order() {
        let dao = MemoryProductDao::new();
        dao.upsert(&NewProduct::new("C", "", 1, "").with_id(3)).await.unwrap();
        dao.upsert(&NewProduct::new("A", "", 1, "").with_id(1)).await.unwrap();
        dao.upsert(&NewProduct::new("A2", "", 2, "").with_id(1)).await.unwrap();

        let all = dao.select_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(all[0].title, "A2");

        let next = dao.insert(&NewProduct::new("D", "", 1, "")).await.unwrap();
        assert_eq!(next, 4);
    }

    #[tokio::test]
    async fn test_user_email_is_unique_and_case_sensitive() {
        let dao = MemoryUserDao::new();
        let record = UserRecord {
            email: "a@b.com".to_string(),
            password_hash: "h1".to_string(),
            name: None,
        };
        dao.insert(&record).await.unwrap();

        let again = dao.insert(&record).await;
        assert!(matches!(again, Err(DbError::DuplicateEmail { .. })));

        let upper = UserRecord {
            email: "A@b.com".to_string(),
            ..record
        };
        assert!(dao.insert(&upper).await.is_ok());
        assert!(dao.find_by_email("A@B.COM").await.unwrap().is_none());
    }
}
