use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::Username;

/// Raw token payload returned by the service when a flow completes. Handed to
/// the credential-issuance collaborator for validation; never used directly.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Validated credential bundle produced by the issuance collaborator from a
/// raw `TokenResponse`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub scopes: Vec<String>,
}

impl AuthTokens {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("expires_at", &self.expires_at)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

/// Account signed in as the terminal result of a successful flow.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub username: Username,
    pub tokens: AuthTokens,
}

impl UserAccount {
    /// Returns the access token while it is still fresh. An expired token
    /// must be refreshed through the issuance collaborator before reuse.
    pub fn access_token(&self) -> Option<&str> {
        if self.tokens.is_expired() {
            None
        } else {
            Some(&self.tokens.access_token)
        }
    }
}
