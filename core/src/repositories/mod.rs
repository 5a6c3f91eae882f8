//! Storage contracts consumed by the core services.

pub mod key_store;

pub use key_store::SecretKeyStore;

#[cfg(test)]
pub use key_store::MockSecretKeyStore;
