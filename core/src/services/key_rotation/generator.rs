//! Default key and key-name generation

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use uuid::Uuid;

/// Generate a new Ed25519 signing key from the OS random number generator
pub fn generate_signing_key() -> SigningKey {
    SigningKey::generate(&mut OsRng)
}

/// Fresh unique name for a newly stored key
pub fn new_key_name() -> String {
    Uuid::new_v4().to_string()
}
