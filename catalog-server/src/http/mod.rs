//! HTTP server layer
//!
//! Axum server with:
//! - Product CRUD under /api/products
//! - Landing page and static bundle
//! - CORS (localhost only by default)
//! - Request tracing and timeout
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::frontend::FrontendAssets;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
