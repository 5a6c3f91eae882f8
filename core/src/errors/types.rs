//! Error types for signing key storage and token issuance
//!
//! Messages are bilingual (English and Chinese), separated by ` | `.
//! Rejected tokens are not errors: they are reported through
//! [`TokenStatus`](crate::domain::entities::token::TokenStatus) flags.
//! Everything here is a dependency failure or a violated precondition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Signing key store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyStoreError {
    #[error("Signing key not found: {name} | 未找到签名密钥: {name}")]
    NotFound { name: String },

    #[error("Signing key already exists: {name} | 签名密钥已存在: {name}")]
    AlreadyExists { name: String },

    #[error("Stored signing key is corrupted: {name} ({message}) | 存储的签名密钥已损坏: {name} ({message})")]
    Corrupted { name: String, message: String },

    #[error("Invalid signing key name: {name} | 无效的签名密钥名称: {name}")]
    InvalidName { name: String },

    #[error("Key store backend failure: {message} | 密钥存储后端故障: {message}")]
    Backend { message: String },
}

impl KeyStoreError {
    /// Shorthand for a backend failure carrying the underlying error text
    pub fn backend(err: impl std::fmt::Display) -> Self {
        KeyStoreError::Backend {
            message: err.to_string(),
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            KeyStoreError::NotFound { .. } => "SIGNING_KEY_NOT_FOUND",
            KeyStoreError::AlreadyExists { .. } => "SIGNING_KEY_ALREADY_EXISTS",
            KeyStoreError::Corrupted { .. } => "SIGNING_KEY_CORRUPTED",
            KeyStoreError::InvalidName { .. } => "INVALID_SIGNING_KEY_NAME",
            KeyStoreError::Backend { .. } => "KEY_STORE_UNAVAILABLE",
        }
    }
}

/// Token issuance errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("No signing key provisioned | 未配置签名密钥")]
    NoSigningKeyProvisioned,

    #[error("Token encoding failed: {message} | 令牌编码失败: {message}")]
    Encoding { message: String },
}

impl TokenError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::NoSigningKeyProvisioned => "NO_SIGNING_KEY_PROVISIONED",
            TokenError::Encoding { .. } => "TOKEN_ENCODING_FAILED",
        }
    }
}

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message (bilingual)
    pub message: String,
    /// Additional error details if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a single detail to the error response
    pub fn with_detail(mut self, key: impl ToString, value: serde_json::Value) -> Self {
        let mut details = self.details.unwrap_or_default();
        details.insert(key.to_string(), value);
        self.details = Some(details);
        self
    }
}

impl From<KeyStoreError> for ErrorResponse {
    fn from(err: KeyStoreError) -> Self {
        let response = ErrorResponse::new(err.code(), &err);
        match &err {
            KeyStoreError::NotFound { name }
            | KeyStoreError::AlreadyExists { name }
            | KeyStoreError::Corrupted { name, .. }
            | KeyStoreError::InvalidName { name } => {
                response.with_detail("key_name", serde_json::Value::String(name.clone()))
            }
            KeyStoreError::Backend { .. } => response,
        }
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        ErrorResponse::new(err.code(), err)
    }
}

/// Helper function to extract English message from bilingual error
pub fn extract_english_message(message: &str) -> &str {
    message.split(" | ").next().unwrap_or(message)
}

/// Helper function to extract Chinese message from bilingual error
pub fn extract_chinese_message(message: &str) -> &str {
    message.split(" | ").nth(1).unwrap_or(message)
}
