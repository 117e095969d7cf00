//! Product record and id validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Id pattern: plain decimal digits, no sign
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("invalid id regex"));

/// Product as stored and as returned on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// Body of create and update requests
///
/// Any `id` in the body is ignored: the store assigns it on create and the
/// path supplies it on update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
}

impl ProductPayload {
    /// Attach an id, producing the record echoed back to the caller.
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id: id.get(),
            name: self.name,
            price: self.price,
        }
    }
}

/// Validated product id taken from a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(i64);

impl ProductId {
    /// Parse a path segment into an id.
    ///
    /// # Example
    /// ```
    /// use catalog_server::models::ProductId;
    ///
    /// assert_eq!(ProductId::parse("42").unwrap().get(), 42);
    /// assert!(ProductId::parse("-1").is_err());
    /// assert!(ProductId::parse("abc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !ID_RE.is_match(s) {
            return Err(ValidationError::InvalidId { raw: s.to_owned() });
        }

        // Digits only, so the only failure left is overflow
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidId { raw: s.to_owned() })
    }

    /// Get the raw id.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
