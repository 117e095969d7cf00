//! In-process product store
//!
//! Mirrors the Postgres repository closely enough to drive the HTTP layer in
//! tests and local demos: ids come from a sequence that never rewinds, and
//! prices are rounded to two decimals the way `NUMERIC(10,2)` does.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::products::{DbError, ProductStore};
use crate::models::{Page, Product, ProductId, ProductPayload};

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
    failure: Option<String>,
}

/// Mutex-guarded map of products keyed by id
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with this message.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves the map intact
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn guard(&self) -> Result<MutexGuard<'_, Inner>, DbError> {
        let inner = self.lock();
        if let Some(message) = inner.failure.clone() {
            return Err(DbError::Unavailable(message));
        }
        Ok(inner)
    }
}

fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn fetch(&self, id: ProductId) -> Result<Product, DbError> {
        self.guard()?
            .rows
            .get(&id.get())
            .cloned()
            .ok_or(DbError::NotFound { id })
    }

    async fn list(&self, page: Page) -> Result<Vec<Product>, DbError> {
        let inner = self.guard()?;
        let start = usize::try_from(page.start).unwrap_or(usize::MAX);
        let count = usize::try_from(page.count).unwrap_or(0);

        Ok(inner.rows.values().skip(start).take(count).cloned().collect())
    }

    async fn insert(&self, product: &ProductPayload) -> Result<ProductId, DbError> {
        let mut inner = self.guard()?;
        inner.last_id += 1;
        let id = inner.last_id;

        inner.rows.insert(
            id,
            Product {
                id,
                name: product.name.clone(),
                price: round_cents(product.price),
            },
        );

        Ok(ProductId::from(id))
    }

    async fn update(&self, id: ProductId, product: &ProductPayload) -> Result<u64, DbError> {
        let mut inner = self.guard()?;
        match inner.rows.get_mut(&id.get()) {
            Some(row) => {
                row.name = product.name.clone();
                row.price = round_cents(product.price);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<u64, DbError> {
        let mut inner = self.guard()?;
        Ok(inner.rows.remove(&id.get()).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.guard().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, price: f64) -> ProductPayload {
        ProductPayload {
            name: name.to_owned(),
            price,
        }
    }

    #[tokio::test]
    async fn ids_increase_and_are_not_reused() {
        let store = MemoryStore::new();
        let first = store.insert(&payload("a", 1.0)).await.unwrap();
        assert_eq!(first.get(), 1);

        store.delete(first).await.unwrap();
        let second = store.insert(&payload("b", 1.0)).await.unwrap();
        assert_eq!(second.get(), 2);
    }

    #[tokio::test]
    async fn rounds_price_to_cents() {
        let store = MemoryStore::new();
        let id = store.insert(&payload("a", 1.239)).await.unwrap();
        assert_eq!(store.fetch(id).await.unwrap().price, 1.24);
    }

    #[tokio::test]
    async fn list_skips_and_limits() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.insert(&payload(&format!("p{i}"), 1.0)).await.unwrap();
        }

        let ids: Vec<i64> = store
            .list(Page::new(3, 10))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[tokio::test]
    async fn missing_rows_affect_nothing() {
        let store = MemoryStore::new();
        let id = ProductId::from(7);
        assert_eq!(store.update(id, &payload("x", 1.0)).await.unwrap(), 0);
        assert_eq!(store.delete(id).await.unwrap(), 0);
        assert!(matches!(
            store.fetch(id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn failure_mode_surfaces_unavailable() {
        let store = MemoryStore::new();
        store.fail_with("connection refused");
        let err = store.list(Page::default()).await.unwrap_err();
        assert!(matches!(err, DbError::Unavailable(_)));
    }
}
