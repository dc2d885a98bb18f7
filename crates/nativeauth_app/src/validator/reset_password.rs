use nativeauth_domain::{
    ChallengeType, ChannelType, ContinuationToken, CorrelationId, PasswordPolicyError,
};
use tracing::error;

use crate::dto::{
    ResetPasswordChallengeApiError, ResetPasswordChallengeCode, ResetPasswordChallengeResponse,
    ResetPasswordContinueApiError, ResetPasswordContinueCode, ResetPasswordContinueResponse,
    ResetPasswordPollApiError, ResetPasswordPollCode, ResetPasswordPollCompletionResponse,
    ResetPasswordPollStatus, ResetPasswordStartApiError, ResetPasswordStartCode,
    ResetPasswordStartResponse, ResetPasswordSubmitApiError, ResetPasswordSubmitCode,
    ResetPasswordSubmitResponse,
};
use crate::services::NetworkResult;

/// Classified outcome of the reset-password start step.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetPasswordStartValidated {
    Success { password_reset_token: ContinuationToken },
    Redirect,
    Error(ResetPasswordStartCode),
    UnexpectedError,
}

/// Classified outcome of the reset-password challenge step.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetPasswordChallengeValidated {
    Success {
        display_name: String,
        channel: ChannelType,
        code_length: u32,
        password_reset_token: ContinuationToken,
    },
    Redirect,
    Error(ResetPasswordChallengeCode),
    UnexpectedError,
}

/// Classified outcome of the reset-password continue step.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetPasswordContinueValidated {
    Success { password_submit_token: ContinuationToken },
    /// The one-time code was wrong; the reissued token lets the caller retry
    /// the same step without restarting the flow.
    InvalidOob { password_reset_token: ContinuationToken },
    Error(ResetPasswordContinueCode),
    UnexpectedError,
}

/// Classified outcome of the reset-password submit step.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetPasswordSubmitValidated {
    Success {
        password_reset_token: ContinuationToken,
        poll_interval: u64,
    },
    PasswordError {
        error: PasswordPolicyError,
        password_submit_token: Option<ContinuationToken>,
    },
    Error(ResetPasswordSubmitCode),
    UnexpectedError,
}

/// Classified outcome of the reset-password poll-completion step.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetPasswordPollValidated {
    Success {
        status: ResetPasswordPollStatus,
        continuation_token: Option<ContinuationToken>,
    },
    PasswordError {
        error: PasswordPolicyError,
        password_submit_token: Option<ContinuationToken>,
    },
    Error(ResetPasswordPollCode),
    UnexpectedError,
}

pub fn validate_start(
    result: NetworkResult<ResetPasswordStartResponse, ResetPasswordStartApiError>,
    correlation_id: CorrelationId,
) -> ResetPasswordStartValidated {
    match result {
        NetworkResult::Success(response) => handle_start_success(response, correlation_id),
        NetworkResult::ApiError(error) => handle_start_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "reset password start failed in transport");
            ResetPasswordStartValidated::UnexpectedError
        }
    }
}

fn handle_start_success(
    response: ResetPasswordStartResponse,
    correlation_id: CorrelationId,
) -> ResetPasswordStartValidated {
    if response.challenge_type == Some(ChallengeType::Redirect) {
        return ResetPasswordStartValidated::Redirect;
    }
    match response.password_reset_token {
        Some(password_reset_token) => ResetPasswordStartValidated::Success { password_reset_token },
        None => {
            error!(correlation_id = %correlation_id, "password reset token missing from start response");
            ResetPasswordStartValidated::UnexpectedError
        }
    }
}

fn handle_start_error(
    api_error: ResetPasswordStartApiError,
    correlation_id: CorrelationId,
) -> ResetPasswordStartValidated {
    match api_error.error {
        ResetPasswordStartCode::Unknown => {
            error!(correlation_id = %correlation_id, "reset password start returned an unrecognized error code");
            ResetPasswordStartValidated::UnexpectedError
        }
        code => ResetPasswordStartValidated::Error(code),
    }
}

pub fn validate_challenge(
    result: NetworkResult<ResetPasswordChallengeResponse, ResetPasswordChallengeApiError>,
    correlation_id: CorrelationId,
) -> ResetPasswordChallengeValidated {
    match result {
        NetworkResult::Success(response) => handle_challenge_success(response, correlation_id),
        NetworkResult::ApiError(error) => handle_challenge_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "reset password challenge failed in transport");
            ResetPasswordChallengeValidated::UnexpectedError
        }
    }
}

fn handle_challenge_success(
    response: ResetPasswordChallengeResponse,
    correlation_id: CorrelationId,
) -> ResetPasswordChallengeValidated {
    match response.challenge_type {
        Some(ChallengeType::Redirect) => ResetPasswordChallengeValidated::Redirect,
        Some(ChallengeType::Password) | Some(ChallengeType::Oob) => {
            if let (Some(display_name), Some(channel), Some(code_length), Some(token)) = (
                response.challenge_target_label,
                response.challenge_channel,
                response.code_length,
                response.password_reset_token,
            ) {
                ResetPasswordChallengeValidated::Success {
                    display_name,
                    channel,
                    code_length,
                    password_reset_token: token,
                }
            } else {
                error!(correlation_id = %correlation_id, "expected fields missing from challenge response");
                ResetPasswordChallengeValidated::UnexpectedError
            }
        }
        Some(ChallengeType::Otp) => {
            error!(correlation_id = %correlation_id, "otp challenge type is not supported");
            ResetPasswordChallengeValidated::UnexpectedError
        }
        None => {
            error!(correlation_id = %correlation_id, "challenge type missing from challenge response");
            ResetPasswordChallengeValidated::UnexpectedError
        }
    }
}

fn handle_challenge_error(
    api_error: ResetPasswordChallengeApiError,
    correlation_id: CorrelationId,
) -> ResetPasswordChallengeValidated {
    match api_error.error {
        ResetPasswordChallengeCode::Unknown => {
            error!(correlation_id = %correlation_id, "reset password challenge returned an unrecognized error code");
            ResetPasswordChallengeValidated::UnexpectedError
        }
        code => ResetPasswordChallengeValidated::Error(code),
    }
}

pub fn validate_continue(
    result: NetworkResult<ResetPasswordContinueResponse, ResetPasswordContinueApiError>,
    correlation_id: CorrelationId,
) -> ResetPasswordContinueValidated {
    match result {
        NetworkResult::Success(response) => ResetPasswordContinueValidated::Success {
            password_submit_token: response.password_submit_token,
        },
        NetworkResult::ApiError(error) => handle_continue_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "reset password continue failed in transport");
            ResetPasswordContinueValidated::UnexpectedError
        }
    }
}

fn handle_continue_error(
    api_error: ResetPasswordContinueApiError,
    correlation_id: CorrelationId,
) -> ResetPasswordContinueValidated {
    match api_error.error {
        ResetPasswordContinueCode::InvalidOobValue => match api_error.password_reset_token {
            Some(password_reset_token) => {
                ResetPasswordContinueValidated::InvalidOob { password_reset_token }
            }
            None => {
                error!(correlation_id = %correlation_id, "password reset token missing from invalid_oob_value error");
                ResetPasswordContinueValidated::UnexpectedError
            }
        },
        ResetPasswordContinueCode::VerificationRequired => {
            error!(correlation_id = %correlation_id, "verification_required is not supported");
            ResetPasswordContinueValidated::UnexpectedError
        }
        ResetPasswordContinueCode::Unknown => {
            error!(correlation_id = %correlation_id, "reset password continue returned an unrecognized error code");
            ResetPasswordContinueValidated::UnexpectedError
        }
        code => ResetPasswordContinueValidated::Error(code),
    }
}

pub fn validate_submit(
    result: NetworkResult<ResetPasswordSubmitResponse, ResetPasswordSubmitApiError>,
    correlation_id: CorrelationId,
) -> ResetPasswordSubmitValidated {
    match result {
        NetworkResult::Success(response) => ResetPasswordSubmitValidated::Success {
            password_reset_token: response.password_reset_token,
            poll_interval: response.poll_interval,
        },
        NetworkResult::ApiError(error) => handle_submit_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "reset password submit failed in transport");
            ResetPasswordSubmitValidated::UnexpectedError
        }
    }
}

fn handle_submit_error(
    api_error: ResetPasswordSubmitApiError,
    correlation_id: CorrelationId,
) -> ResetPasswordSubmitValidated {
    if let Some(error) = submit_password_policy(api_error.error) {
        return ResetPasswordSubmitValidated::PasswordError {
            error,
            password_submit_token: api_error.password_submit_token,
        };
    }
    match api_error.error {
        ResetPasswordSubmitCode::Unknown => {
            error!(correlation_id = %correlation_id, "reset password submit returned an unrecognized error code");
            ResetPasswordSubmitValidated::UnexpectedError
        }
        code => ResetPasswordSubmitValidated::Error(code),
    }
}

fn submit_password_policy(code: ResetPasswordSubmitCode) -> Option<PasswordPolicyError> {
    match code {
        ResetPasswordSubmitCode::PasswordTooWeak => Some(PasswordPolicyError::TooWeak),
        ResetPasswordSubmitCode::PasswordTooShort => Some(PasswordPolicyError::TooShort),
        ResetPasswordSubmitCode::PasswordTooLong => Some(PasswordPolicyError::TooLong),
        ResetPasswordSubmitCode::PasswordRecentlyUsed => Some(PasswordPolicyError::RecentlyUsed),
        ResetPasswordSubmitCode::PasswordBanned => Some(PasswordPolicyError::Banned),
        _ => None,
    }
}

pub fn validate_poll_completion(
    result: NetworkResult<ResetPasswordPollCompletionResponse, ResetPasswordPollApiError>,
    correlation_id: CorrelationId,
) -> ResetPasswordPollValidated {
    match result {
        NetworkResult::Success(response) => ResetPasswordPollValidated::Success {
            status: response.status,
            continuation_token: response.continuation_token,
        },
        NetworkResult::ApiError(error) => handle_poll_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "reset password poll completion failed in transport");
            ResetPasswordPollValidated::UnexpectedError
        }
    }
}

fn handle_poll_error(
    api_error: ResetPasswordPollApiError,
    correlation_id: CorrelationId,
) -> ResetPasswordPollValidated {
    if let Some(error) = poll_password_policy(api_error.error) {
        return ResetPasswordPollValidated::PasswordError {
            error,
            password_submit_token: api_error.password_submit_token,
        };
    }
    match api_error.error {
        ResetPasswordPollCode::Unknown => {
            error!(correlation_id = %correlation_id, "reset password poll completion returned an unrecognized error code");
            ResetPasswordPollValidated::UnexpectedError
        }
        code => ResetPasswordPollValidated::Error(code),
    }
}

fn poll_password_policy(code: ResetPasswordPollCode) -> Option<PasswordPolicyError> {
    match code {
        ResetPasswordPollCode::PasswordTooWeak => Some(PasswordPolicyError::TooWeak),
        ResetPasswordPollCode::PasswordTooShort => Some(PasswordPolicyError::TooShort),
        ResetPasswordPollCode::PasswordTooLong => Some(PasswordPolicyError::TooLong),
        ResetPasswordPollCode::PasswordRecentlyUsed => Some(PasswordPolicyError::RecentlyUsed),
        ResetPasswordPollCode::PasswordBanned => Some(PasswordPolicyError::Banned),
        _ => None,
    }
}
