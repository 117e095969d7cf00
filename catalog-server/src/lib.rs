//! catalog-server: product catalog HTTP service
//!
//! Exposes create/read/update/delete on products stored in Postgres, and
//! serves the pre-built front-end bundle with its landing page.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, MemoryStore, ProductRepo, ProductStore};
pub use http::{build_router, run_server, ServerConfig};
pub use models::{Page, Product, ProductId, ProductPayload};
