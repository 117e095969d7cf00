//! Product repository
//!
//! The only place that knows the `products` table:
//! - fetch: single row by id, missing row is `DbError::NotFound`
//! - list: offset/limit window ordered by id
//! - insert: returns the store-assigned id
//! - update/delete: unconditional, report affected rows

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Page, Product, ProductId, ProductPayload};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: product '{id}'")]
    NotFound { id: ProductId },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence contract for products (testable)
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch one product by id.
    async fn fetch(&self, id: ProductId) -> Result<Product, DbError>;

    /// List products in id order, skipping `page.start` and returning at most `page.count`.
    async fn list(&self, page: Page) -> Result<Vec<Product>, DbError>;

    /// Insert a product and return the id assigned by the store.
    async fn insert(&self, product: &ProductPayload) -> Result<ProductId, DbError>;

    /// Overwrite name and price of the row with this id. Returns affected rows.
    async fn update(&self, id: ProductId, product: &ProductPayload) -> Result<u64, DbError>;

    /// Hard-delete the row with this id. Returns affected rows.
    async fn delete(&self, id: ProductId) -> Result<u64, DbError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

/// Postgres-backed product repository
#[derive(Clone)]
pub struct ProductRepo {
    pool: PgPool,
}

impl ProductRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for ProductRepo {
    async fn fetch(&self, id: ProductId) -> Result<Product, DbError> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id::int8 AS id, name, price::float8 AS price
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound { id })
    }

    async fn list(&self, page: Page) -> Result<Vec<Product>, DbError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id::int8 AS id, name, price::float8 AS price
            FROM products
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.count)
        .bind(page.start)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn insert(&self, product: &ProductPayload) -> Result<ProductId, DbError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO products (name, price)
            VALUES ($1, $2::numeric)
            RETURNING id::int8
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(ProductId::from(id))
    }

    async fn update(&self, id: ProductId, product: &ProductPayload) -> Result<u64, DbError> {
        let result = sqlx::query("UPDATE products SET name = $1, price = $2::numeric WHERE id = $3")
            .bind(&product.name)
            .bind(product.price)
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: ProductId) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, ensure_schema};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p catalog-server -- --ignored --test-threads=1

    async fn fresh_repo() -> ProductRepo {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        ensure_schema(&pool).await.expect("schema bootstrap failed");
        sqlx::query("TRUNCATE products RESTART IDENTITY")
            .execute(&pool)
            .await
            .expect("truncate failed");
        ProductRepo::new(pool)
    }

    fn payload(name: &str, price: f64) -> ProductPayload {
        ProductPayload {
            name: name.to_owned(),
            price,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_fetch() {
        let repo = fresh_repo().await;

        let id = repo.insert(&payload("test product", 45.67)).await.unwrap();
        assert_eq!(id.get(), 1);

        let product = repo.fetch(id).await.unwrap();
        assert_eq!(product.name, "test product");
        assert_eq!(product.price, 45.67);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn store_rounds_price() {
        let repo = fresh_repo().await;

        let id = repo.insert(&payload("rounded", 1.239)).await.unwrap();
        assert_eq!(repo.fetch(id).await.unwrap().price, 1.24);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn fetch_missing_is_not_found() {
        let repo = fresh_repo().await;

        let err = repo.fetch(ProductId::from(11)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_windows_in_id_order() {
        let repo = fresh_repo().await;
        for i in 0..5 {
            repo.insert(&payload(&format!("Product {i}"), (i + 1) as f64 * 10.0))
                .await
                .unwrap();
        }

        let page = repo.list(Page::new(1, 2)).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);

        assert!(repo.list(Page::new(10, 2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_and_delete_report_affected_rows() {
        let repo = fresh_repo().await;
        let id = repo.insert(&payload("before", 1.0)).await.unwrap();

        assert_eq!(repo.update(id, &payload("after", 2.0)).await.unwrap(), 1);
        assert_eq!(repo.fetch(id).await.unwrap().name, "after");

        assert_eq!(repo.delete(id).await.unwrap(), 1);
        assert_eq!(repo.delete(id).await.unwrap(), 0);
        assert_eq!(repo.update(id, &payload("gone", 3.0)).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ids_are_not_reused() {
        let repo = fresh_repo().await;
        let first = repo.insert(&payload("a", 1.0)).await.unwrap();
        repo.delete(first).await.unwrap();

        let second = repo.insert(&payload("b", 1.0)).await.unwrap();
        assert!(second > first);
    }
}
