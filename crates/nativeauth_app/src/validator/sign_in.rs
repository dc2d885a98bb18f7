use nativeauth_domain::{
    ChallengeType, ChannelType, ContinuationToken, CorrelationId, TokenResponse,
};
use tracing::error;

use crate::dto::{
    SignInChallengeApiError, SignInChallengeCode, SignInChallengeResponse, SignInInitiateApiError,
    SignInInitiateCode, SignInInitiateResponse, SignInTokenApiError, SignInTokenCode,
};
use crate::services::NetworkResult;

/// Classified outcome of the sign-in initiate step.
#[derive(Debug, Clone, PartialEq)]
pub enum SignInInitiateValidated {
    Success { credential_token: ContinuationToken },
    Redirect,
    Error(SignInInitiateCode),
    UnexpectedError,
}

/// Classified outcome of the sign-in challenge step.
#[derive(Debug, Clone, PartialEq)]
pub enum SignInChallengeValidated {
    PasswordRequired {
        credential_token: ContinuationToken,
    },
    CodeRequired {
        credential_token: ContinuationToken,
        display_name: String,
        channel: ChannelType,
        code_length: u32,
    },
    Redirect,
    Error(SignInChallengeCode),
    UnexpectedError,
}

/// Classified outcome of the sign-in token step.
#[derive(Debug, Clone, PartialEq)]
pub enum SignInTokenValidated {
    Success(TokenResponse),
    /// The one-time code was wrong; the reissued token lets the caller retry
    /// the same step without restarting the flow.
    InvalidOob { credential_token: ContinuationToken },
    Error(SignInTokenCode),
    UnexpectedError,
}

pub fn validate_initiate(
    result: NetworkResult<SignInInitiateResponse, SignInInitiateApiError>,
    correlation_id: CorrelationId,
) -> SignInInitiateValidated {
    match result {
        NetworkResult::Success(response) => handle_initiate_success(response, correlation_id),
        NetworkResult::ApiError(error) => handle_initiate_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "sign in initiate failed in transport");
            SignInInitiateValidated::UnexpectedError
        }
    }
}

fn handle_initiate_success(
    response: SignInInitiateResponse,
    correlation_id: CorrelationId,
) -> SignInInitiateValidated {
    if response.challenge_type == Some(ChallengeType::Redirect) {
        return SignInInitiateValidated::Redirect;
    }
    match response.credential_token {
        Some(credential_token) => SignInInitiateValidated::Success { credential_token },
        None => {
            error!(correlation_id = %correlation_id, "credential token missing from initiate response");
            SignInInitiateValidated::UnexpectedError
        }
    }
}

fn handle_initiate_error(
    api_error: SignInInitiateApiError,
    correlation_id: CorrelationId,
) -> SignInInitiateValidated {
    match api_error.error {
        SignInInitiateCode::Unknown => {
            error!(correlation_id = %correlation_id, "sign in initiate returned an unrecognized error code");
            SignInInitiateValidated::UnexpectedError
        }
        code => SignInInitiateValidated::Error(code),
    }
}

pub fn validate_challenge(
    result: NetworkResult<SignInChallengeResponse, SignInChallengeApiError>,
    correlation_id: CorrelationId,
) -> SignInChallengeValidated {
    match result {
        NetworkResult::Success(response) => handle_challenge_success(response, correlation_id),
        NetworkResult::ApiError(error) => handle_challenge_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "sign in challenge failed in transport");
            SignInChallengeValidated::UnexpectedError
        }
    }
}

fn handle_challenge_success(
    response: SignInChallengeResponse,
    correlation_id: CorrelationId,
) -> SignInChallengeValidated {
    match response.challenge_type {
        Some(ChallengeType::Redirect) => SignInChallengeValidated::Redirect,
        Some(ChallengeType::Password) => match response.credential_token {
            Some(credential_token) => SignInChallengeValidated::PasswordRequired { credential_token },
            None => {
                error!(correlation_id = %correlation_id, "credential token missing from password challenge");
                SignInChallengeValidated::UnexpectedError
            }
        },
        Some(ChallengeType::Oob) => {
            if let (Some(display_name), Some(channel), Some(code_length), Some(token)) = (
                response.challenge_target_label,
                response.challenge_channel,
                response.code_length,
                response.credential_token,
            ) {
                SignInChallengeValidated::CodeRequired {
                    credential_token: token,
                    display_name,
                    channel,
                    code_length,
                }
            } else {
                error!(correlation_id = %correlation_id, "expected fields missing from oob challenge");
                SignInChallengeValidated::UnexpectedError
            }
        }
        Some(ChallengeType::Otp) => {
            error!(correlation_id = %correlation_id, "otp challenge type is not supported");
            SignInChallengeValidated::UnexpectedError
        }
        None => {
            error!(correlation_id = %correlation_id, "challenge type missing from challenge response");
            SignInChallengeValidated::UnexpectedError
        }
    }
}

fn handle_challenge_error(
    api_error: SignInChallengeApiError,
    correlation_id: CorrelationId,
) -> SignInChallengeValidated {
    match api_error.error {
        SignInChallengeCode::Unknown => {
            error!(correlation_id = %correlation_id, "sign in challenge returned an unrecognized error code");
            SignInChallengeValidated::UnexpectedError
        }
        code => SignInChallengeValidated::Error(code),
    }
}

pub fn validate_token(
    result: NetworkResult<TokenResponse, SignInTokenApiError>,
    correlation_id: CorrelationId,
) -> SignInTokenValidated {
    match result {
        NetworkResult::Success(response) => SignInTokenValidated::Success(response),
        NetworkResult::ApiError(error) => handle_token_error(error, correlation_id),
        NetworkResult::Failure(error) => {
            error!(correlation_id = %correlation_id, error = %error, "sign in token request failed in transport");
            SignInTokenValidated::UnexpectedError
        }
    }
}

fn handle_token_error(
    api_error: SignInTokenApiError,
    correlation_id: CorrelationId,
) -> SignInTokenValidated {
    match api_error.error {
        SignInTokenCode::InvalidOobValue => match api_error.credential_token {
            Some(credential_token) => SignInTokenValidated::InvalidOob { credential_token },
            None => {
                error!(correlation_id = %correlation_id, "credential token missing from invalid_oob_value error");
                SignInTokenValidated::UnexpectedError
            }
        },
        SignInTokenCode::Unknown => {
            error!(correlation_id = %correlation_id, "sign in token request returned an unrecognized error code");
            SignInTokenValidated::UnexpectedError
        }
        code => SignInTokenValidated::Error(code),
    }
}
