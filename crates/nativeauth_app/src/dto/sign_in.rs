use nativeauth_domain::{ChallengeType, ChannelType, ContinuationToken};
use serde::Deserialize;

/// Success payload of the sign-in initiate request.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInInitiateResponse {
    pub challenge_type: Option<ChallengeType>,
    pub credential_token: Option<ContinuationToken>,
}

/// Success payload of the sign-in challenge request.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInChallengeResponse {
    pub challenge_type: Option<ChallengeType>,
    pub challenge_target_label: Option<String>,
    pub challenge_channel: Option<ChannelType>,
    pub code_length: Option<u32>,
    pub credential_token: Option<ContinuationToken>,
}

/// Error codes the initiate step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInInitiateCode {
    UserNotFound,
    InvalidRequest,
    InvalidClient,
    UnsupportedChallengeType,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInInitiateApiError {
    pub error: SignInInitiateCode,
    pub error_description: Option<String>,
}

/// Error codes the challenge step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInChallengeCode {
    InvalidRequest,
    InvalidClient,
    ExpiredToken,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInChallengeApiError {
    pub error: SignInChallengeCode,
    pub error_description: Option<String>,
}

/// Error codes the token step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInTokenCode {
    InvalidOobValue,
    InvalidCredentials,
    InvalidGrant,
    ExpiredToken,
    SlowDown,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInTokenApiError {
    pub error: SignInTokenCode,
    pub error_description: Option<String>,
    /// Reissued alongside `invalid_oob_value` so the code step can be
    /// retried without restarting the flow.
    pub credential_token: Option<ContinuationToken>,
}
