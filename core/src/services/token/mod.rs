//! Token service module
//!
//! This module handles all session token operations:
//! - Wire encoding and decoding of signed tokens
//! - Issuance with the newest signing key
//! - Verification against every key in the keyring
//! - Introspection with transparent refresh near expiry

pub mod codec;
mod config;
mod service;


pub use codec::{DecodedToken, MalformedToken};
pub use config::TokenServiceConfig;
pub use service::TokenService;
