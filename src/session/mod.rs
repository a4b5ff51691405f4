//! Session and credential handling
//!
//! Holds the signed-in user's bearer token. The user snapshot itself lives
//! in the cache under [`crate::cache::keys::USER`]; the session only owns
//! the credential needed to authenticate requests.

use chrono::{DateTime, Utc};
use std::sync::RwLock;
use tracing::debug;

/// A bearer credential for the signed-in user
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// The raw token value
    value: String,

    /// When the token expires, if known
    expires_at: Option<DateTime<Utc>>,
}

impl AuthToken {
    /// Create a token with no known expiry
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    /// Create a token that expires at the given time
    pub fn with_expiry(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            // 60 second buffer to prevent sending almost-expired tokens
            Some(expires_at) => Utc::now() >= expires_at - chrono::Duration::seconds(60),
            None => false,
        }
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

/// Current sign-in state
///
/// Accessors take self by shared reference so a single `Arc<Session>` can be
/// handed to every call site.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<AuthToken>>,
}

impl Session {
    /// Create a signed-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the credential for a freshly signed-in user
    pub fn sign_in(&self, token: AuthToken) {
        debug!("session signed in");
        *self.token.write().expect("session lock poisoned") = Some(token);
    }

    /// Drop the stored credential
    pub fn sign_out(&self) {
        debug!("session signed out");
        *self.token.write().expect("session lock poisoned") = None;
    }

    /// Get the current credential, if signed in
    pub fn token(&self) -> Option<AuthToken> {
        self.token.read().expect("session lock poisoned").clone()
    }

    /// Whether a credential is present (it may still be expired)
    pub fn is_authenticated(&self) -> bool {
        self.token.read().expect("session lock poisoned").is_some()
    }
}
