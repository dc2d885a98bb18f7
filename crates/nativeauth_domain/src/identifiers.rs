use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation id attached to one user-initiated flow invocation.
///
/// Propagated unchanged across every request of that invocation and carried
/// on every log line and telemetry event it produces.
#[derive(
    Clone,
    Copy,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::Display,
    PartialEq,
    Eq,
    Hash,
    Debug,
)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque server-issued token scoping a flow to a specific step.
///
/// Carried forward on every subsequent request of the flow. `Display` and
/// `Debug` render only a short prefix; the full value never reaches logs.
#[derive(Clone, Serialize, Deserialize, derive_more::From, PartialEq, Eq)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{prefix}…")
    }
}

impl From<&str> for ContinuationToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl fmt::Debug for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContinuationToken({})", self.redacted())
    }
}

/// Username identifying the account a flow operates on.
#[derive(
    Clone,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::Display,
    derive_more::Deref,
    PartialEq,
    Eq,
    Debug,
)]
#[serde(transparent)]
pub struct Username(String);

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// User password. Never printed.
#[derive(Clone, Serialize, Deserialize, derive_more::From, PartialEq, Eq)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password(…)")
    }
}

/// One-time code entered by the user. Redacted in logs.
#[derive(Clone, Serialize, Deserialize, derive_more::From, PartialEq, Eq)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OtpCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OtpCode(…)")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_continuation_token_display_is_redacted() {
        let token = ContinuationToken::from("cExtremelySecretValue123");
        assert_eq!(token.to_string(), "cExtre…");
        assert_eq!(format!("{token:?}"), "ContinuationToken(cExtre…)");
    }

    #[test]
    fn test_continuation_token_shorter_than_prefix() {
        let token = ContinuationToken::from("ab");
        assert_eq!(token.to_string(), "ab…");
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::from("hunter2");
        assert_eq!(format!("{password:?}"), "Password(…)");
        assert_eq!(password.secret(), "hunter2");
    }

    #[test]
    fn test_correlation_ids_are_unique() {
        assert_ne!(CorrelationId::new(), CorrelationId::new());
    }
}
