//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unknown model: {0}")]
    InvalidModel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::InvalidModel("x".into()).to_string(),
            "Unknown model: x"
        );
        assert_eq!(
            DomainError::InvalidQuery("empty text".into()).to_string(),
            "Invalid query: empty text"
        );
    }
}
