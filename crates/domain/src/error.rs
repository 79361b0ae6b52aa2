//! Error type for domain operations.
//!
//! The domain only fails while decoding external text into its types; richer
//! failure taxonomies (not-found, validation) live with the layers that own
//! those decisions.

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum DomainError {
    /// Parse error (for value objects and enum codes)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
