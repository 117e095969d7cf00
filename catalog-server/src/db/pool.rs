//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Table definition used by `ensure_schema`.
///
/// `NUMERIC(10,2)` makes the store round prices to two decimal places.
const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products
(
    id SERIAL,
    name TEXT NOT NULL,
    price NUMERIC(10,2) NOT NULL DEFAULT 0.00,
    CONSTRAINT products_pkey PRIMARY KEY (id)
)
"#;

/// Create a PostgreSQL connection pool.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/catalog").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Create the `products` table if it does not exist yet.
///
/// This is a bootstrap for fresh databases and tests, not a migration tool.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PRODUCTS_TABLE).execute(pool).await?;
    tracing::debug!("products table ensured");
    Ok(())
}
