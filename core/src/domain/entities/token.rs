//! Session token entities.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signed token header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Issuance timestamp
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,

    /// Identifier of this issuance; a new one is drawn on every refresh
    pub session_id: Uuid,
}

impl TokenHeader {
    pub fn new(now: DateTime<Utc>, ttl: Duration, session_id: Uuid) -> Self {
        Self {
            issued_at: now,
            expires_at: now + ttl,
            session_id,
        }
    }

    /// Time left until expiry; negative once expired
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.expires_at - now
    }
}

/// A decoded token: header plus a caller-defined payload carried unmodified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token<P> {
    pub header: TokenHeader,
    pub payload: P,
}

/// Classification of a presented token
///
/// At most one of `ok`, `expired`, `not_issued` and `malformed` is set. None
/// is set when no token was presented at all. `token` is populated whenever
/// the header and payload could be decoded, including for expired tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStatus<P> {
    pub ok: bool,
    pub expired: bool,
    pub not_issued: bool,
    pub malformed: bool,
    pub token: Option<Token<P>>,
    pub raw_token: String,
}

impl<P> TokenStatus<P> {
    /// No token presented
    pub fn absent() -> Self {
        Self {
            ok: false,
            expired: false,
            not_issued: false,
            malformed: false,
            token: None,
            raw_token: String::new(),
        }
    }

    pub fn valid(token: Token<P>, raw_token: impl Into<String>) -> Self {
        Self {
            ok: true,
            token: Some(token),
            raw_token: raw_token.into(),
            ..Self::absent()
        }
    }

    pub fn expired(token: Token<P>, raw_token: impl Into<String>) -> Self {
        Self {
            expired: true,
            token: Some(token),
            raw_token: raw_token.into(),
            ..Self::absent()
        }
    }

    pub fn not_issued(token: Token<P>, raw_token: impl Into<String>) -> Self {
        Self {
            not_issued: true,
            token: Some(token),
            raw_token: raw_token.into(),
            ..Self::absent()
        }
    }

    /// Unparseable token; decoded parts are dropped
    pub fn malformed(raw_token: impl Into<String>) -> Self {
        Self {
            malformed: true,
            raw_token: raw_token.into(),
            ..Self::absent()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// True when no token was presented
    pub fn is_absent(&self) -> bool {
        !(self.ok || self.expired || self.not_issued || self.malformed)
    }

    pub fn header(&self) -> Option<&TokenHeader> {
        self.token.as_ref().map(|t| &t.header)
    }

    pub fn payload(&self) -> Option<&P> {
        self.token.as_ref().map(|t| &t.payload)
    }

    pub fn into_token(self) -> Option<Token<P>> {
        self.token
    }
}
