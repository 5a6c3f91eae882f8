//! Tokens issued before a rotation across the retention window

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use ed25519_dalek::SigningKey;

use crate::repositories::MockSecretKeyStore;
use crate::services::key_rotation::{KeyRotationConfig, KeyRotationService};
use crate::services::token::{TokenService, TokenServiceConfig};

fn sequential_keys() -> impl Fn() -> SigningKey + Send + Sync {
    let next = AtomicU8::new(1);
    move || SigningKey::from_bytes(&[next.fetch_add(1, Ordering::SeqCst); 32])
}

#[tokio::test]
async fn test_old_token_valid_until_its_key_is_evicted() {
    let store = Arc::new(MockSecretKeyStore::new());
    let tokens = TokenService::new(store.clone(), TokenServiceConfig::default());
    let generate = Arc::new(sequential_keys());
    let rotate_with = |retention: usize| {
        let generate = generate.clone();
        KeyRotationService::new(
            store.clone(),
            move || (*generate)(),
            KeyRotationConfig::new(retention).unwrap(),
        )
    };
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();

    // keyA
    rotate_with(2).rotate().await.unwrap();
    let issued = tokens.issue_token("subject-1".to_string(), now).await.unwrap();

    // keyB joins; keyring = [keyB, keyA]
    rotate_with(2).rotate().await.unwrap();
    assert_eq!(store.names().await.len(), 2);

    let later = now + Duration::minutes(5);
    let status = tokens
        .get_token_status::<String>(&issued.raw_token, later)
        .await
        .unwrap();
    assert!(status.ok);

    // Retention 1 evicts keyA; keyring = [keyC]
    rotate_with(1).rotate().await.unwrap();
    assert_eq!(store.names().await.len(), 1);

    let status = tokens
        .get_token_status::<String>(&issued.raw_token, later)
        .await
        .unwrap();
    assert!(status.expired);
    assert!(!status.ok);
    assert_eq!(status.payload().map(String::as_str), Some("subject-1"));
}
