//! Domain-specific error types and error handling.

mod types;

// Re-export all error types and utilities
pub use types::{
    extract_chinese_message, extract_english_message, ErrorResponse, KeyStoreError, TokenError,
};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
}

impl DomainError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Token(err) => err.code(),
            DomainError::KeyStore(err) => err.code(),
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Token(err) => err.into(),
            DomainError::KeyStore(err) => err.into(),
            other => ErrorResponse::new(other.code(), other),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
