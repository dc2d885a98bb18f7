use nativeauth_domain::{
    ChallengeType, ChannelType, ContinuationToken, CorrelationId, PasswordPolicyError,
    TokenResponse,
};
use tracing::error;

use crate::dto::{
    SignUpChallengeApiError, SignUpChallengeCode, SignUpChallengeResponse, SignUpContinueApiError,
    SignUpContinueCode, SignUpContinueResponse, SignUpStartApiError, SignUpStartCode,
    SignUpStartResponse,
};
use crate::services::NetworkResult;

/// Classified outcome of the sign-up start step.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpStartValidated {
    Success { signup_token: ContinuationToken },
    /// The tenant required no verification and completed the sign-up in one
    /// round trip.
    Completed(TokenResponse),
    AttributesRequired { signup_token: ContinuationToken },
    Redirect,
    Error(SignUpStartCode),
    UnexpectedError,
}

/// Classified outcome of the sign-up challenge step.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpChallengeValidated {
    CodeRequired {
        signup_token: ContinuationToken,
        display_name: String,
        channel: ChannelType,
        code_length: u32,
    },
    PasswordRequired {
        signup_token: ContinuationToken,
    },
    Redirect,
    Error(SignUpChallengeCode),
    UnexpectedError,
}

/// Classified outcome of the sign-up continue step.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpContinueValidated {
    Completed(TokenResponse),
    /// The one-time code was wrong; the reissued token lets the caller retry
    /// the same step without restarting the flow.
    InvalidOob {
        signup_token: ContinuationToken,
    },
    AttributesRequired {
        signup_token: ContinuationToken,
    },
    AttributeValidationFailed {
        signup_token: ContinuationToken,
    },
    PasswordError {
        error: PasswordPolicyError,
        signup_token: Option<ContinuationToken>,
    },
    Error(SignUpContinueCode),
    UnexpectedError,
}

pub fn validate_start(
    result: NetworkResult<SignUpStartResponse, SignUpStartApiError>,
    correlation_id: CorrelationId,
) -> SignUpStartValidated {
    match result {
        NetworkResult::Success(response) => handle_start_success(response, correlation_id),
        NetworkResult::ApiError(error) => handle_start_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "sign up start failed in transport");
            SignUpStartValidated::UnexpectedError
        }
    }
}

fn handle_start_success(
    response: SignUpStartResponse,
    correlation_id: CorrelationId,
) -> SignUpStartValidated {
    if response.challenge_type == Some(ChallengeType::Redirect) {
        return SignUpStartValidated::Redirect;
    }
    if let Some(token_response) = response.token_response {
        return SignUpStartValidated::Completed(token_response);
    }
    match response.signup_token {
        Some(signup_token) => SignUpStartValidated::Success { signup_token },
        None => {
            error!(correlation_id = %correlation_id, "signup token missing from start response");
            SignUpStartValidated::UnexpectedError
        }
    }
}

fn handle_start_error(
    api_error: SignUpStartApiError,
    correlation_id: CorrelationId,
) -> SignUpStartValidated {
    match api_error.error {
        SignUpStartCode::AttributesRequired => match api_error.signup_token {
            Some(signup_token) => SignUpStartValidated::AttributesRequired { signup_token },
            None => {
                error!(correlation_id = %correlation_id, "signup token missing from attributes_required error");
                SignUpStartValidated::UnexpectedError
            }
        },
        SignUpStartCode::VerificationRequired => {
            error!(correlation_id = %correlation_id, "verification_required is not supported");
            SignUpStartValidated::UnexpectedError
        }
        SignUpStartCode::Unknown => {
            error!(correlation_id = %correlation_id, "sign up start returned an unrecognized error code");
            SignUpStartValidated::UnexpectedError
        }
        code => SignUpStartValidated::Error(code),
    }
}

pub fn validate_challenge(
    result: NetworkResult<SignUpChallengeResponse, SignUpChallengeApiError>,
    correlation_id: CorrelationId,
) -> SignUpChallengeValidated {
    match result {
        NetworkResult::Success(response) => handle_challenge_success(response, correlation_id),
        NetworkResult::ApiError(error) => handle_challenge_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "sign up challenge failed in transport");
            SignUpChallengeValidated::UnexpectedError
        }
    }
}

fn handle_challenge_success(
    response: SignUpChallengeResponse,
    correlation_id: CorrelationId,
) -> SignUpChallengeValidated {
    match response.challenge_type {
        Some(ChallengeType::Redirect) => SignUpChallengeValidated::Redirect,
        Some(ChallengeType::Oob) => {
            if let (Some(display_name), Some(channel), Some(code_length), Some(token)) = (
                response.challenge_target_label,
                response.challenge_channel,
                response.code_length,
                response.signup_token,
            ) {
                SignUpChallengeValidated::CodeRequired {
                    signup_token: token,
                    display_name,
                    channel,
                    code_length,
                }
            } else {
                error!(correlation_id = %correlation_id, "expected fields missing from oob challenge");
                SignUpChallengeValidated::UnexpectedError
            }
        }
        Some(ChallengeType::Password) => match response.signup_token {
            Some(signup_token) => SignUpChallengeValidated::PasswordRequired { signup_token },
            None => {
                error!(correlation_id = %correlation_id, "signup token missing from password challenge");
                SignUpChallengeValidated::UnexpectedError
            }
        },
        Some(ChallengeType::Otp) => {
            error!(correlation_id = %correlation_id, "otp challenge type is not supported");
            SignUpChallengeValidated::UnexpectedError
        }
        None => {
            error!(correlation_id = %correlation_id, "challenge type missing from challenge response");
            SignUpChallengeValidated::UnexpectedError
        }
    }
}

fn handle_challenge_error(
    api_error: SignUpChallengeApiError,
    correlation_id: CorrelationId,
) -> SignUpChallengeValidated {
    match api_error.error {
        SignUpChallengeCode::Unknown => {
            error!(correlation_id = %correlation_id, "sign up challenge returned an unrecognized error code");
            SignUpChallengeValidated::UnexpectedError
        }
        code => SignUpChallengeValidated::Error(code),
    }
}

pub fn validate_continue(
    result: NetworkResult<SignUpContinueResponse, SignUpContinueApiError>,
    correlation_id: CorrelationId,
) -> SignUpContinueValidated {
    match result {
        NetworkResult::Success(response) => handle_continue_success(response, correlation_id),
        NetworkResult::ApiError(error) => handle_continue_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "sign up continue failed in transport");
            SignUpContinueValidated::UnexpectedError
        }
    }
}

fn handle_continue_success(
    response: SignUpContinueResponse,
    correlation_id: CorrelationId,
) -> SignUpContinueValidated {
    match response.token_response {
        Some(token_response) => SignUpContinueValidated::Completed(token_response),
        None => {
            error!(correlation_id = %correlation_id, "token response missing from continue response");
            SignUpContinueValidated::UnexpectedError
        }
    }
}

fn handle_continue_error(
    api_error: SignUpContinueApiError,
    correlation_id: CorrelationId,
) -> SignUpContinueValidated {
    if let Some(error) = continue_password_policy(api_error.error) {
        return SignUpContinueValidated::PasswordError {
            error,
            signup_token: api_error.signup_token,
        };
    }
    match api_error.error {
        SignUpContinueCode::InvalidOobValue => match api_error.signup_token {
            Some(signup_token) => SignUpContinueValidated::InvalidOob { signup_token },
            None => {
                error!(correlation_id = %correlation_id, "signup token missing from invalid_oob_value error");
                SignUpContinueValidated::UnexpectedError
            }
        },
        SignUpContinueCode::AttributesRequired => match api_error.signup_token {
            Some(signup_token) => SignUpContinueValidated::AttributesRequired { signup_token },
            None => {
                error!(correlation_id = %correlation_id, "signup token missing from attributes_required error");
                SignUpContinueValidated::UnexpectedError
            }
        },
        SignUpContinueCode::AttributeValidationFailed => match api_error.signup_token {
            Some(signup_token) => {
                SignUpContinueValidated::AttributeValidationFailed { signup_token }
            }
            None => {
                error!(correlation_id = %correlation_id, "signup token missing from attribute_validation_failed error");
                SignUpContinueValidated::UnexpectedError
            }
        },
        SignUpContinueCode::Unknown => {
            error!(correlation_id = %correlation_id, "sign up continue returned an unrecognized error code");
            SignUpContinueValidated::UnexpectedError
        }
        code => SignUpContinueValidated::Error(code),
    }
}

fn continue_password_policy(code: SignUpContinueCode) -> Option<PasswordPolicyError> {
    match code {
        SignUpContinueCode::PasswordTooWeak => Some(PasswordPolicyError::TooWeak),
        SignUpContinueCode::PasswordTooShort => Some(PasswordPolicyError::TooShort),
        SignUpContinueCode::PasswordTooLong => Some(PasswordPolicyError::TooLong),
        SignUpContinueCode::PasswordRecentlyUsed => Some(PasswordPolicyError::RecentlyUsed),
        SignUpContinueCode::PasswordBanned => Some(PasswordPolicyError::Banned),
        _ => None,
    }
}
