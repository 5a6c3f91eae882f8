//! Unit tests for the mock secret key store implementation

use chrono::{Duration, Utc};
use ed25519_dalek::SigningKey;

use crate::errors::KeyStoreError;
use crate::repositories::key_store::{MockSecretKeyStore, SecretKeyStore};

fn key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

#[tokio::test]
async fn test_write_and_read_key() {
    let store = MockSecretKeyStore::new();

    let written = store.write(&key(1), "k1").await.unwrap();
    assert_eq!(written.name, "k1");

    let read = store.read("k1").await.unwrap();
    assert_eq!(read.key.to_bytes(), key(1).to_bytes());
    assert_eq!(read.created_at, written.created_at);
}

#[tokio::test]
async fn test_empty_store_lists_empty_keyring() {
    let store = MockSecretKeyStore::new();
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let store = MockSecretKeyStore::new();
    let now = Utc::now();

    store.seed("middle", key(2), now - Duration::hours(1)).await;
    store.seed("oldest", key(1), now - Duration::hours(2)).await;
    store.write(&key(3), "newest").await.unwrap();

    let names: Vec<_> = store.list().await.unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_same_timestamp_orders_latest_insert_first() {
    let store = MockSecretKeyStore::new();
    let at = Utc::now();

    store.seed("first", key(1), at).await;
    store.seed("second", key(2), at).await;

    assert_eq!(store.names().await, vec!["second", "first"]);
}

#[tokio::test]
async fn test_not_found() {
    let store = MockSecretKeyStore::new();

    assert!(matches!(
        store.read("missing").await,
        Err(KeyStoreError::NotFound { .. })
    ));
    assert!(matches!(
        store.delete("missing").await,
        Err(KeyStoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_duplicate_write_rejected() {
    let store = MockSecretKeyStore::new();
    store.write(&key(1), "k1").await.unwrap();

    let result = store.write(&key(2), "k1").await;
    assert!(matches!(result, Err(KeyStoreError::AlreadyExists { .. })));
}

#[tokio::test]
async fn test_injected_failures() {
    let store = MockSecretKeyStore::new();
    store.write(&key(1), "k1").await.unwrap();

    store.fail_writes(true).await;
    assert!(matches!(
        store.write(&key(2), "k2").await,
        Err(KeyStoreError::Backend { .. })
    ));

    store.fail_lists(true).await;
    assert!(store.list().await.is_err());

    store.fail_delete_of("k1").await;
    assert!(store.delete("k1").await.is_err());

    store.heal().await;
    store.delete("k1").await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
}
