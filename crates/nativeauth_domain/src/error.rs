/// Error taxonomy for the native-auth flows.
///
/// `FlowError` is the terminal classification delivered to delegate error
/// callbacks; the remaining types live at collaborator boundaries and are
/// converted into a `FlowError` (or swallowed, for cache writes) before they
/// reach a caller.

/// Password-policy rejection reported by the service. Recoverable: the caller
/// is returned to the same continuation state to resubmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyError {
    #[error("password is too weak")]
    TooWeak,

    #[error("password is too short")]
    TooShort,

    #[error("password is too long")]
    TooLong,

    #[error("password was used too recently")]
    RecentlyUsed,

    #[error("password is not allowed")]
    Banned,
}

/// Classification of a failed (or suspended-with-error) flow invocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The server demands a browser-based flow this client does not implement.
    #[error("browser-based authentication is required to continue")]
    BrowserRequired,

    /// Transport failure, undecodable payload, or a response outside the
    /// protocol this client understands. Never retried automatically.
    #[error("the service returned an unexpected response")]
    General,

    /// The invoked operation is not legal for the current continuation state.
    /// Reported immediately, no network call is issued.
    #[error("operation is not valid for the current flow state")]
    InvalidState,

    #[error("no account was found for this username")]
    UserNotFound,

    #[error("an account already exists for this username")]
    UserAlreadyExists,

    #[error("the username or password is incorrect")]
    InvalidCredentials,

    #[error("the one-time code is incorrect")]
    InvalidCode,

    #[error(transparent)]
    PasswordPolicy(#[from] PasswordPolicyError),

    #[error("the continuation token has expired, restart the flow")]
    ExpiredToken,

    #[error("too many requests, retry later")]
    RateLimited,

    #[error("account configuration is not supported: {0}")]
    UnsupportedAccount(String),

    #[error("one or more attributes failed validation")]
    AttributeValidationFailed,

    #[error("the password reset did not complete")]
    ResetPasswordFailed,
}

/// Failure raised by the transport or while constructing a request. Converted
/// to the generic unexpected-error outcome at the validator boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("request could not be built: {0}")]
    RequestBuild(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("response could not be decoded: {0}")]
    Decode(String),
}

/// Failure persisting tokens. Logged by the controller, never surfaced to the
/// caller.
#[derive(Debug, Clone, thiserror::Error)]
#[error("token cache write failed: {0}")]
pub struct CacheError(pub String);

/// Failure validating or exchanging a raw token response into usable
/// credentials.
#[derive(Debug, Clone, thiserror::Error)]
#[error("token response validation failed: {0}")]
pub struct ExchangeError(pub String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_password_policy_error_is_transparent() {
        let error = FlowError::from(PasswordPolicyError::TooShort);
        assert_eq!(error.to_string(), "password is too short");
    }

    #[test]
    fn test_flow_error_display() {
        assert_eq!(
            FlowError::BrowserRequired.to_string(),
            "browser-based authentication is required to continue"
        );
        assert_eq!(
            FlowError::InvalidState.to_string(),
            "operation is not valid for the current flow state"
        );
    }
}
