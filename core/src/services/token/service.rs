//! Main token service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::token::{Token, TokenHeader, TokenStatus};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::SecretKeyStore;

use super::codec;
use super::config::TokenServiceConfig;

/// Service issuing, verifying and refreshing session tokens
///
/// Every operation reads the keyring fresh from the store, so a rotation is
/// visible to the next request without any cache invalidation. Tokens are
/// signed with the newest key and accepted if any stored key verifies them.
pub struct TokenService<S: SecretKeyStore + ?Sized> {
    store: Arc<S>,
    config: TokenServiceConfig,
}

impl<S: SecretKeyStore + ?Sized> TokenService<S> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `store` - Key store holding the signing keyring
    /// * `config` - Token lifetimes
    pub fn new(store: Arc<S>, config: TokenServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a token for `payload` under an explicit session identifier
    ///
    /// The token is valid from `now` until `now + token_ttl` and is signed
    /// with the newest key in the store.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenStatus)` - An `ok` status carrying the token and its wire form
    /// * `Err(DomainError::Token(NoSigningKeyProvisioned))` - The keyring is empty
    /// * `Err(DomainError::KeyStore(_))` - The store could not be read
    pub async fn generate_token<P: Serialize>(
        &self,
        payload: P,
        session_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<TokenStatus<P>> {
        let keyring = self.store.list().await?;
        let signing_key = keyring
            .first()
            .ok_or(TokenError::NoSigningKeyProvisioned)?;

        let token = Token {
            header: TokenHeader::new(now, self.config.token_ttl, session_id),
            payload,
        };
        let raw_token = codec::encode(&token, &signing_key.key)?;

        debug!(key = %signing_key.name, %session_id, "Issued session token");
        Ok(TokenStatus::valid(token, raw_token))
    }

    /// Issues a token for `payload` under a fresh random session identifier
    pub async fn issue_token<P: Serialize>(
        &self,
        payload: P,
        now: DateTime<Utc>,
    ) -> DomainResult<TokenStatus<P>> {
        self.generate_token(payload, Uuid::new_v4(), now).await
    }

    /// Classifies a presented token against the current keyring
    ///
    /// Rejections are reported through the returned status, never as errors:
    ///
    /// * empty input - no flag set
    /// * unparseable, or nil session identifier - `malformed`
    /// * no stored key verifies the signature - `expired`, with the decoded
    ///   claims still attached and no temporal checks applied
    /// * issued after `now` - `not_issued`
    /// * expired before `now` - `expired`
    ///
    /// # Returns
    ///
    /// * `Ok(TokenStatus)` - Classification of the token
    /// * `Err(DomainError::KeyStore(_))` - The keyring could not be loaded
    pub async fn get_token_status<P: DeserializeOwned>(
        &self,
        raw_token: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<TokenStatus<P>> {
        if raw_token.is_empty() {
            return Ok(TokenStatus::absent());
        }

        let decoded = match codec::decode::<P>(raw_token) {
            Ok(decoded) => decoded,
            Err(reason) => {
                debug!(%reason, "Rejected malformed token");
                return Ok(TokenStatus::malformed(raw_token));
            }
        };

        let keyring = self.store.list().await?;
        // Newest first: live tokens are mostly signed with the current key
        let Some(signing_key) = keyring
            .iter()
            .find(|record| decoded.is_signed_by(&record.verifying_key()))
        else {
            warn!(
                session_id = %decoded.token.header.session_id,
                keys = keyring.len(),
                "Token signature matches no stored key"
            );
            return Ok(TokenStatus::expired(decoded.token, raw_token));
        };

        let token = decoded.token;
        let header = &token.header;
        if header.session_id.is_nil() {
            debug!(key = %signing_key.name, "Rejected token without session identifier");
            return Ok(TokenStatus::malformed(raw_token));
        }
        if header.issued_at > now {
            debug!(session_id = %header.session_id, "Rejected token issued in the future");
            return Ok(TokenStatus::not_issued(token, raw_token));
        }
        if header.expires_at < now {
            debug!(session_id = %header.session_id, "Rejected expired token");
            return Ok(TokenStatus::expired(token, raw_token));
        }

        Ok(TokenStatus::valid(token, raw_token))
    }

    /// Verifies a token and, when asked, re-issues it if close to expiry
    ///
    /// Non-`ok` statuses are returned unchanged. With `auto_refresh`, an `ok`
    /// token whose remaining lifetime is at or below `refresh_threshold` is
    /// replaced by a new token for the same payload under a new session
    /// identifier, signed with the current newest key. Pass `auto_refresh =
    /// false` for checks that must not extend the session.
    pub async fn introspect_token<P: Serialize + DeserializeOwned>(
        &self,
        raw_token: &str,
        now: DateTime<Utc>,
        auto_refresh: bool,
    ) -> DomainResult<TokenStatus<P>> {
        let status = self.get_token_status::<P>(raw_token, now).await?;
        if !(auto_refresh && status.ok) {
            return Ok(status);
        }

        let token = match status.token {
            Some(token) if token.header.remaining(now) <= self.config.refresh_threshold => token,
            token => return Ok(TokenStatus { token, ..status }),
        };

        let refreshed = self.issue_token(token.payload, now).await?;
        if let Some(header) = refreshed.header() {
            debug!(
                previous_session = %token.header.session_id,
                session_id = %header.session_id,
                "Refreshed session token"
            );
        }
        Ok(refreshed)
    }
}
