//! Repository implementations for product persistence
//!
//! - `ProductRepo`: Postgres, one statement per operation
//! - `MemoryStore`: in-process map with the same contract

pub mod memory;
pub mod products;

pub use memory::MemoryStore;
pub use products::{DbError, ProductRepo, ProductStore};
