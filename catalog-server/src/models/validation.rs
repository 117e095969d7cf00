//! Validation error types

use std::fmt;

/// Validation error for request input
///
/// The `Display` text is what clients see, so it stays short and stable.
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Path id is not a non-negative integer that fits in 64 bits
    InvalidId { raw: String },

    /// Request body could not be decoded into a product
    InvalidPayload { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { .. } => write!(f, "Invalid product ID"),
            Self::InvalidPayload { .. } => write!(f, "Invalid request payload"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidId { raw: "abc".into() };
        assert_eq!(err.to_string(), "Invalid product ID");

        let err = ValidationError::InvalidPayload {
            reason: "expected value at line 1 column 1".into(),
        };
        assert_eq!(err.to_string(), "Invalid request payload");
    }
}
