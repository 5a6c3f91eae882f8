//! PKCS#8 PEM encoding shared by the storage backends

use std::ops::Deref;

use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use ed25519_dalek::SigningKey;

use crate::KeyStoreError;

/// Encode a signing key as a `PRIVATE KEY` PEM document
pub(crate) fn encode(key: &SigningKey) -> Result<impl Deref<Target = String>, KeyStoreError> {
    key.to_pkcs8_pem(LineEnding::LF)
        .map_err(KeyStoreError::backend)
}

/// Decode stored PEM bytes; anything unreadable is reported as corrupted
pub(crate) fn decode(name: &str, bytes: &[u8]) -> Result<SigningKey, KeyStoreError> {
    let corrupted = |message: String| KeyStoreError::Corrupted {
        name: name.to_string(),
        message,
    };

    let text = std::str::from_utf8(bytes).map_err(|e| corrupted(e.to_string()))?;
    SigningKey::from_pkcs8_pem(text).map_err(|e| corrupted(e.to_string()))
}
