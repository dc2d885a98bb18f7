use nativeauth_domain::{ChallengeType, ChannelType, ContinuationToken};
use serde::Deserialize;

/// Success payload of the reset-password start request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordStartResponse {
    pub challenge_type: Option<ChallengeType>,
    pub password_reset_token: Option<ContinuationToken>,
}

/// Success payload of the reset-password challenge request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordChallengeResponse {
    pub challenge_type: Option<ChallengeType>,
    pub challenge_target_label: Option<String>,
    pub challenge_channel: Option<ChannelType>,
    pub code_length: Option<u32>,
    pub password_reset_token: Option<ContinuationToken>,
}

/// Success payload of the reset-password continue request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordContinueResponse {
    pub password_submit_token: ContinuationToken,
}

/// Success payload of the reset-password submit request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordSubmitResponse {
    pub password_reset_token: ContinuationToken,
    /// Seconds the client should wait between completion polls.
    pub poll_interval: u64,
}

/// Server-side progress of an accepted password reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPasswordPollStatus {
    NotStarted,
    InProgress,
    Succeeded,
    Failed,
}

/// Success payload of the reset-password poll-completion request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordPollCompletionResponse {
    pub status: ResetPasswordPollStatus,
    /// Issued once the reset succeeds; lets the user sign in without
    /// re-entering the new password.
    pub continuation_token: Option<ContinuationToken>,
}

/// Error codes the start step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPasswordStartCode {
    InvalidRequest,
    InvalidClient,
    UserNotFound,
    UnsupportedChallengeType,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordStartApiError {
    pub error: ResetPasswordStartCode,
    pub error_description: Option<String>,
}

/// Error codes the challenge step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPasswordChallengeCode {
    InvalidRequest,
    InvalidClient,
    ExpiredToken,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordChallengeApiError {
    pub error: ResetPasswordChallengeCode,
    pub error_description: Option<String>,
}

/// Error codes the continue step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPasswordContinueCode {
    InvalidOobValue,
    InvalidClient,
    InvalidGrant,
    ExpiredToken,
    InvalidRequest,
    VerificationRequired,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordContinueApiError {
    pub error: ResetPasswordContinueCode,
    pub error_description: Option<String>,
    /// Reissued alongside `invalid_oob_value` so the same step can be
    /// retried without restarting the flow.
    pub password_reset_token: Option<ContinuationToken>,
}

/// Error codes the submit step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPasswordSubmitCode {
    PasswordTooWeak,
    PasswordTooShort,
    PasswordTooLong,
    PasswordRecentlyUsed,
    PasswordBanned,
    InvalidRequest,
    InvalidClient,
    ExpiredToken,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordSubmitApiError {
    pub error: ResetPasswordSubmitCode,
    pub error_description: Option<String>,
    pub password_submit_token: Option<ContinuationToken>,
}

/// Error codes the poll-completion step is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPasswordPollCode {
    PasswordTooWeak,
    PasswordTooShort,
    PasswordTooLong,
    PasswordRecentlyUsed,
    PasswordBanned,
    UserNotFound,
    InvalidRequest,
    InvalidClient,
    ExpiredToken,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordPollApiError {
    pub error: ResetPasswordPollCode,
    pub error_description: Option<String>,
    pub password_submit_token: Option<ContinuationToken>,
}
