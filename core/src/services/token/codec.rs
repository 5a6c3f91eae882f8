//! Wire format for signed session tokens
//!
//! A token is three unpadded base64url segments joined by `.`:
//! `{header}.{payload}.{signature}`. Header and payload are JSON documents;
//! the signature is Ed25519 over the ASCII text `{header}.{payload}`.
//!
//! Decoding never fails with an error value: anything that does not parse is
//! reported as [`MalformedToken`], which callers fold into a malformed status.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::token::{Token, TokenHeader};
use crate::errors::TokenError;

/// Separator between token segments
pub const SEGMENT_SEPARATOR: char = '.';

/// Token segment, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Payload,
    Signature,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Header => write!(f, "header"),
            Segment::Payload => write!(f, "payload"),
            Segment::Signature => write!(f, "signature"),
        }
    }
}

/// Reason a token string could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedToken {
    #[error("expected 3 segments, found {0}")]
    SegmentCount(usize),

    #[error("{0} segment is not unpadded base64url")]
    Base64(Segment),

    #[error("{segment} segment is not valid JSON: {message}")]
    Json { segment: Segment, message: String },

    #[error("signature segment has invalid length")]
    SignatureLength,
}

/// A token whose segments parsed, with its signature not yet checked
#[derive(Debug, Clone)]
pub struct DecodedToken<P> {
    pub token: Token<P>,
    signing_input: String,
    signature: Signature,
}

impl<P> DecodedToken<P> {
    /// Check the signature against one public key
    pub fn is_signed_by(&self, key: &VerifyingKey) -> bool {
        key.verify(self.signing_input.as_bytes(), &self.signature)
            .is_ok()
    }
}

/// Serialize and sign a token
pub fn encode<P: Serialize>(token: &Token<P>, key: &SigningKey) -> Result<String, TokenError> {
    let header = encode_segment(&token.header)?;
    let payload = encode_segment(&token.payload)?;

    let signing_input = format!("{}{}{}", header, SEGMENT_SEPARATOR, payload);
    let signature = key.sign(signing_input.as_bytes());

    Ok(format!(
        "{}{}{}",
        signing_input,
        SEGMENT_SEPARATOR,
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    ))
}

/// Split and parse a token string without verifying its signature
pub fn decode<P: DeserializeOwned>(raw: &str) -> Result<DecodedToken<P>, MalformedToken> {
    let parts: Vec<&str> = raw.split(SEGMENT_SEPARATOR).collect();
    let [header_b64, payload_b64, signature_b64] = parts.as_slice() else {
        return Err(MalformedToken::SegmentCount(parts.len()));
    };

    let header_json = decode_base64(header_b64, Segment::Header)?;
    let payload_json = decode_base64(payload_b64, Segment::Payload)?;
    let signature_bytes = decode_base64(signature_b64, Segment::Signature)?;

    let signature =
        Signature::from_slice(&signature_bytes).map_err(|_| MalformedToken::SignatureLength)?;
    let header: TokenHeader = parse_json(&header_json, Segment::Header)?;
    let payload: P = parse_json(&payload_json, Segment::Payload)?;

    Ok(DecodedToken {
        token: Token { header, payload },
        signing_input: format!("{}{}{}", header_b64, SEGMENT_SEPARATOR, payload_b64),
        signature,
    })
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|e| TokenError::Encoding {
        message: e.to_string(),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_base64(segment: &str, which: Segment) -> Result<Vec<u8>, MalformedToken> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| MalformedToken::Base64(which))
}

fn parse_json<T: DeserializeOwned>(bytes: &[u8], which: Segment) -> Result<T, MalformedToken> {
    serde_json::from_slice(bytes).map_err(|e| MalformedToken::Json {
        segment: which,
        message: e.to_string(),
    })
}
