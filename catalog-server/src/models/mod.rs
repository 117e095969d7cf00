//! Domain models with validation at construction
//!
//! Path and query input is normalised into these types before any
//! repository call. Invalid input returns ValidationError, not panic.

pub mod pagination;
pub mod product;
pub mod validation;

pub use pagination::{Page, DEFAULT_COUNT, MAX_COUNT};
pub use product::{Product, ProductId, ProductPayload};
pub use validation::ValidationError;
