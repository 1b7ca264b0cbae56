//! Storage error model.

use thiserror::Error;

use stockroom_core::DomainError;

/// Error returned by the persistence gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write was rejected before or by the store (bad payload, dangling reference).
    #[error("{0}")]
    Validation(String),

    /// No row matched the given id.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A stored row could not be mapped back to a domain value.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound(entity)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_validation_keeps_message() {
        let err: StoreError = DomainError::validation("name cannot be empty").into();
        assert_eq!(err.to_string(), "name cannot be empty");
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = StoreError::not_found("product");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "product not found");
    }
}
