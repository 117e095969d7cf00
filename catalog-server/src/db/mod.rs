//! Database layer - connection pool and product repository
//!
//! # Design Principles
//!
//! - Connection pool, shared by every in-flight request - no Arc<Mutex<Connection>>
//! - One parameterised statement per operation - no multi-statement transactions
//! - Only the repository issues SQL

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, ensure_schema, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
