use nativeauth_domain::{ChallengeType, ChannelType, ContinuationToken, TokenResponse};
use serde::Deserialize;

/// Success payload of the sign-up start request.
///
/// A tenant that requires no verification may complete the sign-up in one
/// round trip, in which case the token payload is attached directly.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpStartResponse {
    pub challenge_type: Option<ChallengeType>,
    pub signup_token: Option<ContinuationToken>,
    pub token_response: Option<TokenResponse>,
}

/// Success payload of the sign-up challenge request.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpChallengeResponse {
    pub challenge_type: Option<ChallengeType>,
    pub challenge_target_label: Option<String>,
    pub challenge_channel: Option<ChannelType>,
    pub code_length: Option<u32>,
    pub signup_token: Option<ContinuationToken>,
}

/// Success payload of the sign-up continue request. Success always means the
/// sign-up completed; intermediate requirements come back as error codes.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpContinueResponse {
    pub token_response: Option<TokenResponse>,
}

/// Error codes the start step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignUpStartCode {
    UserAlreadyExists,
    AttributesRequired,
    VerificationRequired,
    UnsupportedChallengeType,
    InvalidRequest,
    InvalidClient,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpStartApiError {
    pub error: SignUpStartCode,
    pub error_description: Option<String>,
    /// Issued alongside `attributes_required` so the flow can resume at the
    /// attribute-collection step.
    pub signup_token: Option<ContinuationToken>,
}

/// Error codes the challenge step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignUpChallengeCode {
    InvalidRequest,
    InvalidClient,
    ExpiredToken,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpChallengeApiError {
    pub error: SignUpChallengeCode,
    pub error_description: Option<String>,
}

/// Error codes the continue step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignUpContinueCode {
    InvalidOobValue,
    AttributesRequired,
    AttributeValidationFailed,
    PasswordTooWeak,
    PasswordTooShort,
    PasswordTooLong,
    PasswordRecentlyUsed,
    PasswordBanned,
    UserNotFound,
    InvalidGrant,
    ExpiredToken,
    InvalidRequest,
    InvalidClient,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpContinueApiError {
    pub error: SignUpContinueCode,
    pub error_description: Option<String>,
    /// Reissued alongside recoverable codes so the same step can be retried
    /// without restarting the flow.
    pub signup_token: Option<ContinuationToken>,
}
