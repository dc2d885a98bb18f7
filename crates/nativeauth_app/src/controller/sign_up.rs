use std::sync::Arc;

use nativeauth_domain::{
    ChannelType, CorrelationId, FlowError, NativeAuthConfig, OtpCode, Password, SignUpParameters,
    TokenResponse, UserAccount, Username,
};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::dto::{SignUpChallengeCode, SignUpContinueCode, SignUpStartCode};
use crate::services::{
    CacheAccessor, CredentialExchanger, SignUpContinueRequest, SignUpGrant, SignUpRequestProvider,
    TelemetrySink,
};
use crate::state::{
    SignUpAttributesRequiredState, SignUpCodeRequiredState, SignUpPasswordRequiredState,
};
use crate::telemetry::{ApiId, TelemetryScope};
use crate::validator::sign_up::{
    SignUpChallengeValidated, SignUpContinueValidated, SignUpStartValidated, validate_challenge,
    validate_continue, validate_start,
};

/// Drives the sign-up flow: start, challenge, then continue requests carrying
/// the code, password, or attribute grants until the account is created.
pub struct SignUpController {
    config: NativeAuthConfig,
    provider: Arc<dyn SignUpRequestProvider>,
    cache: Arc<dyn CacheAccessor>,
    exchanger: Arc<dyn CredentialExchanger>,
    telemetry: Arc<dyn TelemetrySink>,
}

pub enum SignUpStartOutcome {
    Completed(UserAccount),
    CodeRequired {
        state: SignUpCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    },
    PasswordRequired(SignUpPasswordRequiredState),
    AttributesRequired(SignUpAttributesRequiredState),
    Error(FlowError),
}

pub enum SignUpSubmitCodeOutcome {
    Completed(UserAccount),
    AttributesRequired(SignUpAttributesRequiredState),
    /// The code was rejected but the step can be retried on the new state.
    RetryCode {
        error: FlowError,
        state: SignUpCodeRequiredState,
    },
    Error(FlowError),
}

pub enum SignUpResendCodeOutcome {
    CodeRequired {
        state: SignUpCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    },
    Error(FlowError),
}

pub enum SignUpSubmitPasswordOutcome {
    Completed(UserAccount),
    AttributesRequired(SignUpAttributesRequiredState),
    /// The password violated policy; the step can be retried on the new state.
    RetryPassword {
        error: FlowError,
        state: SignUpPasswordRequiredState,
    },
    Error(FlowError),
}

pub enum SignUpSubmitAttributesOutcome {
    Completed(UserAccount),
    /// The server needs further attributes beyond the ones just submitted.
    AttributesRequired(SignUpAttributesRequiredState),
    /// One or more attributes failed validation; retry on the new state.
    RetryAttributes {
        error: FlowError,
        state: SignUpAttributesRequiredState,
    },
    Error(FlowError),
}

impl SignUpController {
    pub fn new(
        config: NativeAuthConfig,
        provider: Arc<dyn SignUpRequestProvider>,
        cache: Arc<dyn CacheAccessor>,
        exchanger: Arc<dyn CredentialExchanger>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self { config, provider, cache, exchanger, telemetry }
    }

    pub async fn start(self: &Arc<Self>, params: &SignUpParameters) -> SignUpStartOutcome {
        let correlation_id = params.correlation_id;
        let mut scope =
            TelemetryScope::start(self.telemetry.clone(), ApiId::SignUpStart, correlation_id);
        debug!(correlation_id = %correlation_id, username = %params.username, "starting sign up");

        let signup_token = match validate_start(self.provider.start(params).await, correlation_id) {
            SignUpStartValidated::Redirect => {
                return SignUpStartOutcome::Error(FlowError::BrowserRequired);
            }
            SignUpStartValidated::Completed(token_response) => {
                return match self
                    .complete(token_response, params.username.clone(), correlation_id)
                    .await
                {
                    Ok(account) => {
                        scope.succeed();
                        SignUpStartOutcome::Completed(account)
                    }
                    Err(error) => SignUpStartOutcome::Error(error),
                };
            }
            SignUpStartValidated::AttributesRequired { signup_token } => {
                scope.succeed();
                return SignUpStartOutcome::AttributesRequired(SignUpAttributesRequiredState::new(
                    Arc::clone(self),
                    signup_token,
                    params.username.clone(),
                    correlation_id,
                ));
            }
            SignUpStartValidated::Success { signup_token } => signup_token,
            SignUpStartValidated::Error(code) => {
                return SignUpStartOutcome::Error(map_start_code(code));
            }
            SignUpStartValidated::UnexpectedError => {
                return SignUpStartOutcome::Error(FlowError::General);
            }
        };

        let challenge = self.provider.challenge(&signup_token, correlation_id).await;
        match validate_challenge(challenge, correlation_id) {
            SignUpChallengeValidated::CodeRequired {
                signup_token,
                display_name,
                channel,
                code_length,
            } => {
                scope.succeed();
                SignUpStartOutcome::CodeRequired {
                    state: SignUpCodeRequiredState::new(
                        Arc::clone(self),
                        signup_token,
                        params.username.clone(),
                        correlation_id,
                        code_length,
                    ),
                    sent_to: display_name,
                    channel,
                    code_length,
                }
            }
            SignUpChallengeValidated::PasswordRequired { signup_token } => {
                scope.succeed();
                SignUpStartOutcome::PasswordRequired(SignUpPasswordRequiredState::new(
                    Arc::clone(self),
                    signup_token,
                    params.username.clone(),
                    correlation_id,
                ))
            }
            SignUpChallengeValidated::Redirect => {
                SignUpStartOutcome::Error(FlowError::BrowserRequired)
            }
            SignUpChallengeValidated::Error(code) => {
                SignUpStartOutcome::Error(map_challenge_code(code))
            }
            SignUpChallengeValidated::UnexpectedError => {
                SignUpStartOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn submit_code(
        self: &Arc<Self>,
        state: &SignUpCodeRequiredState,
        code: &OtpCode,
    ) -> SignUpSubmitCodeOutcome {
        let correlation_id = state.correlation_id();
        let mut scope =
            TelemetryScope::start(self.telemetry.clone(), ApiId::SignUpSubmitCode, correlation_id);

        let request = SignUpContinueRequest {
            signup_token: state.signup_token.clone(),
            grant: SignUpGrant::OobCode(code.clone()),
            correlation_id,
        };
        match validate_continue(self.provider.continue_flow(&request).await, correlation_id) {
            SignUpContinueValidated::Completed(token_response) => {
                match self
                    .complete(token_response, state.username().clone(), correlation_id)
                    .await
                {
                    Ok(account) => {
                        scope.succeed();
                        SignUpSubmitCodeOutcome::Completed(account)
                    }
                    Err(error) => SignUpSubmitCodeOutcome::Error(error),
                }
            }
            SignUpContinueValidated::AttributesRequired { signup_token } => {
                scope.succeed();
                SignUpSubmitCodeOutcome::AttributesRequired(SignUpAttributesRequiredState::new(
                    Arc::clone(self),
                    signup_token,
                    state.username().clone(),
                    correlation_id,
                ))
            }
            SignUpContinueValidated::InvalidOob { signup_token } => {
                SignUpSubmitCodeOutcome::RetryCode {
                    error: FlowError::InvalidCode,
                    state: SignUpCodeRequiredState::new(
                        Arc::clone(self),
                        signup_token,
                        state.username().clone(),
                        correlation_id,
                        state.code_length(),
                    ),
                }
            }
            SignUpContinueValidated::AttributeValidationFailed { .. }
            | SignUpContinueValidated::PasswordError { .. } => {
                error!(correlation_id = %correlation_id, "continue outcome not legal while verifying the code");
                SignUpSubmitCodeOutcome::Error(FlowError::General)
            }
            SignUpContinueValidated::Error(code) => {
                SignUpSubmitCodeOutcome::Error(map_continue_code(code))
            }
            SignUpContinueValidated::UnexpectedError => {
                SignUpSubmitCodeOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn resend_code(
        self: &Arc<Self>,
        state: &SignUpCodeRequiredState,
    ) -> SignUpResendCodeOutcome {
        let correlation_id = state.correlation_id();
        let mut scope =
            TelemetryScope::start(self.telemetry.clone(), ApiId::SignUpResendCode, correlation_id);

        let challenge = self.provider.challenge(&state.signup_token, correlation_id).await;
        match validate_challenge(challenge, correlation_id) {
            SignUpChallengeValidated::CodeRequired {
                signup_token,
                display_name,
                channel,
                code_length,
            } => {
                scope.succeed();
                SignUpResendCodeOutcome::CodeRequired {
                    state: SignUpCodeRequiredState::new(
                        Arc::clone(self),
                        signup_token,
                        state.username().clone(),
                        correlation_id,
                        code_length,
                    ),
                    sent_to: display_name,
                    channel,
                    code_length,
                }
            }
            SignUpChallengeValidated::PasswordRequired { .. } => {
                error!(correlation_id = %correlation_id, "resend code challenge switched to password");
                SignUpResendCodeOutcome::Error(FlowError::General)
            }
            SignUpChallengeValidated::Redirect => {
                SignUpResendCodeOutcome::Error(FlowError::BrowserRequired)
            }
            SignUpChallengeValidated::Error(code) => {
                SignUpResendCodeOutcome::Error(map_challenge_code(code))
            }
            SignUpChallengeValidated::UnexpectedError => {
                SignUpResendCodeOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn submit_password(
        self: &Arc<Self>,
        state: &SignUpPasswordRequiredState,
        password: &Password,
    ) -> SignUpSubmitPasswordOutcome {
        let correlation_id = state.correlation_id();
        let mut scope = TelemetryScope::start(
            self.telemetry.clone(),
            ApiId::SignUpSubmitPassword,
            correlation_id,
        );

        let request = SignUpContinueRequest {
            signup_token: state.signup_token.clone(),
            grant: SignUpGrant::Password(password.clone()),
            correlation_id,
        };
        match validate_continue(self.provider.continue_flow(&request).await, correlation_id) {
            SignUpContinueValidated::Completed(token_response) => {
                match self
                    .complete(token_response, state.username().clone(), correlation_id)
                    .await
                {
                    Ok(account) => {
                        scope.succeed();
                        SignUpSubmitPasswordOutcome::Completed(account)
                    }
                    Err(error) => SignUpSubmitPasswordOutcome::Error(error),
                }
            }
            SignUpContinueValidated::AttributesRequired { signup_token } => {
                scope.succeed();
                SignUpSubmitPasswordOutcome::AttributesRequired(
                    SignUpAttributesRequiredState::new(
                        Arc::clone(self),
                        signup_token,
                        state.username().clone(),
                        correlation_id,
                    ),
                )
            }
            SignUpContinueValidated::PasswordError { error, signup_token } => {
                // The retry state keeps the current token when the server did
                // not reissue one.
                let token = signup_token.unwrap_or_else(|| state.signup_token.clone());
                SignUpSubmitPasswordOutcome::RetryPassword {
                    error: FlowError::PasswordPolicy(error),
                    state: SignUpPasswordRequiredState::new(
                        Arc::clone(self),
                        token,
                        state.username().clone(),
                        correlation_id,
                    ),
                }
            }
            SignUpContinueValidated::InvalidOob { .. }
            | SignUpContinueValidated::AttributeValidationFailed { .. } => {
                error!(correlation_id = %correlation_id, "continue outcome not legal while submitting the password");
                SignUpSubmitPasswordOutcome::Error(FlowError::General)
            }
            SignUpContinueValidated::Error(code) => {
                SignUpSubmitPasswordOutcome::Error(map_continue_code(code))
            }
            SignUpContinueValidated::UnexpectedError => {
                SignUpSubmitPasswordOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn submit_attributes(
        self: &Arc<Self>,
        state: &SignUpAttributesRequiredState,
        attributes: &Map<String, Value>,
    ) -> SignUpSubmitAttributesOutcome {
        let correlation_id = state.correlation_id();
        let mut scope = TelemetryScope::start(
            self.telemetry.clone(),
            ApiId::SignUpSubmitAttributes,
            correlation_id,
        );

        let request = SignUpContinueRequest {
            signup_token: state.signup_token.clone(),
            grant: SignUpGrant::Attributes(attributes.clone()),
            correlation_id,
        };
        match validate_continue(self.provider.continue_flow(&request).await, correlation_id) {
            SignUpContinueValidated::Completed(token_response) => {
                match self
                    .complete(token_response, state.username().clone(), correlation_id)
                    .await
                {
                    Ok(account) => {
                        scope.succeed();
                        SignUpSubmitAttributesOutcome::Completed(account)
                    }
                    Err(error) => SignUpSubmitAttributesOutcome::Error(error),
                }
            }
            SignUpContinueValidated::AttributesRequired { signup_token } => {
                scope.succeed();
                SignUpSubmitAttributesOutcome::AttributesRequired(
                    SignUpAttributesRequiredState::new(
                        Arc::clone(self),
                        signup_token,
                        state.username().clone(),
                        correlation_id,
                    ),
                )
            }
            SignUpContinueValidated::AttributeValidationFailed { signup_token } => {
                SignUpSubmitAttributesOutcome::RetryAttributes {
                    error: FlowError::AttributeValidationFailed,
                    state: SignUpAttributesRequiredState::new(
                        Arc::clone(self),
                        signup_token,
                        state.username().clone(),
                        correlation_id,
                    ),
                }
            }
            SignUpContinueValidated::InvalidOob { .. }
            | SignUpContinueValidated::PasswordError { .. } => {
                error!(correlation_id = %correlation_id, "continue outcome not legal while submitting attributes");
                SignUpSubmitAttributesOutcome::Error(FlowError::General)
            }
            SignUpContinueValidated::Error(code) => {
                SignUpSubmitAttributesOutcome::Error(map_continue_code(code))
            }
            SignUpContinueValidated::UnexpectedError => {
                SignUpSubmitAttributesOutcome::Error(FlowError::General)
            }
        }
    }

    async fn complete(
        &self,
        token_response: TokenResponse,
        username: Username,
        correlation_id: CorrelationId,
    ) -> Result<UserAccount, FlowError> {
        let tokens = match self.exchanger.exchange(token_response, &self.config).await {
            Ok(tokens) => tokens,
            Err(error) => {
                error!(correlation_id = %correlation_id, error = %error, "token response failed validation");
                return Err(FlowError::General);
            }
        };

        // Caching is best effort: tokens still go back to the caller when the
        // write fails.
        if let Err(error) = self.cache.save(&tokens, &self.config).await {
            warn!(correlation_id = %correlation_id, error = %error, "failed to cache tokens (ignoring)");
        }

        Ok(UserAccount { username, tokens })
    }
}

fn map_start_code(code: SignUpStartCode) -> FlowError {
    match code {
        SignUpStartCode::UserAlreadyExists => FlowError::UserAlreadyExists,
        SignUpStartCode::UnsupportedChallengeType => FlowError::UnsupportedAccount(
            "no supported challenge type for this account".to_string(),
        ),
        SignUpStartCode::AttributesRequired
        | SignUpStartCode::VerificationRequired
        | SignUpStartCode::InvalidRequest
        | SignUpStartCode::InvalidClient
        | SignUpStartCode::Unknown => FlowError::General,
    }
}

fn map_challenge_code(code: SignUpChallengeCode) -> FlowError {
    match code {
        SignUpChallengeCode::ExpiredToken => FlowError::ExpiredToken,
        SignUpChallengeCode::InvalidRequest
        | SignUpChallengeCode::InvalidClient
        | SignUpChallengeCode::Unknown => FlowError::General,
    }
}

fn map_continue_code(code: SignUpContinueCode) -> FlowError {
    match code {
        SignUpContinueCode::ExpiredToken => FlowError::ExpiredToken,
        SignUpContinueCode::UserNotFound => FlowError::UserNotFound,
        _ => FlowError::General,
    }
}
