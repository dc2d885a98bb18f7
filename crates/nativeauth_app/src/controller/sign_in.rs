use std::sync::Arc;

use nativeauth_domain::{
    ChannelType, ContinuationToken, CorrelationId, FlowError, NativeAuthConfig, OtpCode, Password,
    SignInParameters, TokenResponse, UserAccount, Username,
};
use tracing::{debug, error, warn};

use crate::dto::{SignInChallengeCode, SignInInitiateCode, SignInTokenCode};
use crate::services::{
    CacheAccessor, CredentialExchanger, SignInGrant, SignInRequestProvider, SignInTokenRequest,
    TelemetrySink,
};
use crate::state::{SignInCodeRequiredState, SignInPasswordRequiredState};
use crate::telemetry::{ApiId, TelemetryScope};
use crate::validator::sign_in::{
    SignInChallengeValidated, SignInInitiateValidated, SignInTokenValidated, validate_challenge,
    validate_initiate, validate_token,
};

/// Drives the sign-in flow: initiate, challenge, then one or more token
/// requests, strictly in order. Every outcome is classified before the next
/// step is attempted.
pub struct SignInController {
    config: NativeAuthConfig,
    provider: Arc<dyn SignInRequestProvider>,
    cache: Arc<dyn CacheAccessor>,
    exchanger: Arc<dyn CredentialExchanger>,
    telemetry: Arc<dyn TelemetrySink>,
}

/// Outcome of a sign-in started without a password.
pub enum SignInStartOutcome {
    CodeRequired {
        state: SignInCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    },
    PasswordRequired(SignInPasswordRequiredState),
    Error(FlowError),
}

/// Outcome of a sign-in started with a password.
pub enum SignInPasswordStartOutcome {
    Completed(UserAccount),
    CodeRequired {
        state: SignInCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    },
    Error(FlowError),
}

pub enum SignInSubmitCodeOutcome {
    Completed(UserAccount),
    /// The code was rejected but the step can be retried on the new state.
    RetryCode {
        error: FlowError,
        state: SignInCodeRequiredState,
    },
    Error(FlowError),
}

pub enum SignInResendCodeOutcome {
    CodeRequired {
        state: SignInCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    },
    Error(FlowError),
}

pub enum SignInSubmitPasswordOutcome {
    Completed(UserAccount),
    Error(FlowError),
}

pub enum SignInAfterResetOutcome {
    Completed(UserAccount),
    Error(FlowError),
}

impl SignInController {
    pub fn new(
        config: NativeAuthConfig,
        provider: Arc<dyn SignInRequestProvider>,
        cache: Arc<dyn CacheAccessor>,
        exchanger: Arc<dyn CredentialExchanger>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self { config, provider, cache, exchanger, telemetry }
    }

    pub async fn start_with_code(self: &Arc<Self>, params: &SignInParameters) -> SignInStartOutcome {
        let correlation_id = params.correlation_id;
        let mut scope =
            TelemetryScope::start(self.telemetry.clone(), ApiId::SignInStart, correlation_id);
        debug!(correlation_id = %correlation_id, username = %params.username, "starting sign in");

        let credential_token = match self.initiate(params).await {
            Ok(token) => token,
            Err(error) => return SignInStartOutcome::Error(error),
        };

        let challenge = self.provider.challenge(&credential_token, correlation_id).await;
        match validate_challenge(challenge, correlation_id) {
            SignInChallengeValidated::CodeRequired {
                credential_token,
                display_name,
                channel,
                code_length,
            } => {
                scope.succeed();
                SignInStartOutcome::CodeRequired {
                    state: SignInCodeRequiredState::new(
                        Arc::clone(self),
                        credential_token,
                        params.username.clone(),
                        params.scopes.clone(),
                        correlation_id,
                        code_length,
                    ),
                    sent_to: display_name,
                    channel,
                    code_length,
                }
            }
            SignInChallengeValidated::PasswordRequired { credential_token } => {
                scope.succeed();
                SignInStartOutcome::PasswordRequired(SignInPasswordRequiredState::new(
                    Arc::clone(self),
                    credential_token,
                    params.username.clone(),
                    params.scopes.clone(),
                    correlation_id,
                ))
            }
            SignInChallengeValidated::Redirect => {
                SignInStartOutcome::Error(FlowError::BrowserRequired)
            }
            SignInChallengeValidated::Error(code) => {
                SignInStartOutcome::Error(map_challenge_code(code))
            }
            SignInChallengeValidated::UnexpectedError => {
                SignInStartOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn start_with_password(
        self: &Arc<Self>,
        params: &SignInParameters,
    ) -> SignInPasswordStartOutcome {
        let correlation_id = params.correlation_id;
        let mut scope =
            TelemetryScope::start(self.telemetry.clone(), ApiId::SignInStart, correlation_id);
        debug!(correlation_id = %correlation_id, username = %params.username, "starting sign in with password");

        let Some(password) = params.password.clone() else {
            warn!(correlation_id = %correlation_id, "password sign in invoked without a password");
            return SignInPasswordStartOutcome::Error(FlowError::InvalidState);
        };

        let credential_token = match self.initiate(params).await {
            Ok(token) => token,
            Err(error) => return SignInPasswordStartOutcome::Error(error),
        };

        let challenge = self.provider.challenge(&credential_token, correlation_id).await;
        match validate_challenge(challenge, correlation_id) {
            SignInChallengeValidated::PasswordRequired { credential_token } => {
                match self
                    .request_tokens(
                        credential_token,
                        SignInGrant::Password(password),
                        params.scopes.clone(),
                        params.username.clone(),
                        correlation_id,
                    )
                    .await
                {
                    Ok(account) => {
                        scope.succeed();
                        SignInPasswordStartOutcome::Completed(account)
                    }
                    Err(error) => SignInPasswordStartOutcome::Error(error),
                }
            }
            SignInChallengeValidated::CodeRequired {
                credential_token,
                display_name,
                channel,
                code_length,
            } => {
                scope.succeed();
                SignInPasswordStartOutcome::CodeRequired {
                    state: SignInCodeRequiredState::new(
                        Arc::clone(self),
                        credential_token,
                        params.username.clone(),
                        params.scopes.clone(),
                        correlation_id,
                        code_length,
                    ),
                    sent_to: display_name,
                    channel,
                    code_length,
                }
            }
            SignInChallengeValidated::Redirect => {
                SignInPasswordStartOutcome::Error(FlowError::BrowserRequired)
            }
            SignInChallengeValidated::Error(code) => {
                SignInPasswordStartOutcome::Error(map_challenge_code(code))
            }
            SignInChallengeValidated::UnexpectedError => {
                SignInPasswordStartOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn submit_code(
        self: &Arc<Self>,
        state: &SignInCodeRequiredState,
        code: &OtpCode,
    ) -> SignInSubmitCodeOutcome {
        let correlation_id = state.correlation_id();
        let mut scope =
            TelemetryScope::start(self.telemetry.clone(), ApiId::SignInSubmitCode, correlation_id);

        let request = SignInTokenRequest {
            credential_token: state.credential_token.clone(),
            grant: SignInGrant::OobCode(code.clone()),
            scopes: state.scopes.clone(),
            correlation_id,
        };
        match validate_token(self.provider.token(&request).await, correlation_id) {
            SignInTokenValidated::Success(token_response) => {
                match self
                    .complete(token_response, state.username().clone(), correlation_id)
                    .await
                {
                    Ok(account) => {
                        scope.succeed();
                        SignInSubmitCodeOutcome::Completed(account)
                    }
                    Err(error) => SignInSubmitCodeOutcome::Error(error),
                }
            }
            SignInTokenValidated::InvalidOob { credential_token } => {
                SignInSubmitCodeOutcome::RetryCode {
                    error: FlowError::InvalidCode,
                    state: SignInCodeRequiredState::new(
                        Arc::clone(self),
                        credential_token,
                        state.username().clone(),
                        state.scopes.clone(),
                        correlation_id,
                        state.code_length(),
                    ),
                }
            }
            SignInTokenValidated::Error(code) => {
                SignInSubmitCodeOutcome::Error(map_token_code(code))
            }
            SignInTokenValidated::UnexpectedError => {
                SignInSubmitCodeOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn resend_code(
        self: &Arc<Self>,
        state: &SignInCodeRequiredState,
    ) -> SignInResendCodeOutcome {
        let correlation_id = state.correlation_id();
        let mut scope =
            TelemetryScope::start(self.telemetry.clone(), ApiId::SignInResendCode, correlation_id);

        let challenge = self.provider.challenge(&state.credential_token, correlation_id).await;
        match validate_challenge(challenge, correlation_id) {
            SignInChallengeValidated::CodeRequired {
                credential_token,
                display_name,
                channel,
                code_length,
            } => {
                scope.succeed();
                SignInResendCodeOutcome::CodeRequired {
                    state: SignInCodeRequiredState::new(
                        Arc::clone(self),
                        credential_token,
                        state.username().clone(),
                        state.scopes.clone(),
                        correlation_id,
                        code_length,
                    ),
                    sent_to: display_name,
                    channel,
                    code_length,
                }
            }
            SignInChallengeValidated::PasswordRequired { .. } => {
                error!(correlation_id = %correlation_id, "resend code challenge switched to password");
                SignInResendCodeOutcome::Error(FlowError::General)
            }
            SignInChallengeValidated::Redirect => {
                SignInResendCodeOutcome::Error(FlowError::BrowserRequired)
            }
            SignInChallengeValidated::Error(code) => {
                SignInResendCodeOutcome::Error(map_challenge_code(code))
            }
            SignInChallengeValidated::UnexpectedError => {
                SignInResendCodeOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn submit_password(
        self: &Arc<Self>,
        state: &SignInPasswordRequiredState,
        password: &Password,
    ) -> SignInSubmitPasswordOutcome {
        let correlation_id = state.correlation_id();
        let mut scope = TelemetryScope::start(
            self.telemetry.clone(),
            ApiId::SignInSubmitPassword,
            correlation_id,
        );

        match self
            .request_tokens(
                state.credential_token.clone(),
                SignInGrant::Password(password.clone()),
                state.scopes.clone(),
                state.username().clone(),
                correlation_id,
            )
            .await
        {
            Ok(account) => {
                scope.succeed();
                SignInSubmitPasswordOutcome::Completed(account)
            }
            Err(error) => SignInSubmitPasswordOutcome::Error(error),
        }
    }

    /// Signs in with the continuation token issued by a completed
    /// reset-password flow, without asking the user for the new password
    /// again.
    pub async fn sign_in_after_reset(
        self: &Arc<Self>,
        continuation_token: ContinuationToken,
        username: Username,
        scopes: Vec<String>,
        correlation_id: CorrelationId,
    ) -> SignInAfterResetOutcome {
        let mut scope = TelemetryScope::start(
            self.telemetry.clone(),
            ApiId::SignInAfterResetPassword,
            correlation_id,
        );

        match self
            .request_tokens(
                continuation_token,
                SignInGrant::ContinuationToken,
                scopes,
                username,
                correlation_id,
            )
            .await
        {
            Ok(account) => {
                scope.succeed();
                SignInAfterResetOutcome::Completed(account)
            }
            Err(error) => SignInAfterResetOutcome::Error(error),
        }
    }

    async fn initiate(&self, params: &SignInParameters) -> Result<ContinuationToken, FlowError> {
        let result = self.provider.initiate(params).await;
        match validate_initiate(result, params.correlation_id) {
            SignInInitiateValidated::Success { credential_token } => Ok(credential_token),
            SignInInitiateValidated::Redirect => Err(FlowError::BrowserRequired),
            SignInInitiateValidated::Error(code) => Err(map_initiate_code(code)),
            SignInInitiateValidated::UnexpectedError => Err(FlowError::General),
        }
    }

    /// Issues a token request and exchanges the response. Only usable for
    /// grants that terminate the flow on success.
    async fn request_tokens(
        &self,
        credential_token: ContinuationToken,
        grant: SignInGrant,
        scopes: Vec<String>,
        username: Username,
        correlation_id: CorrelationId,
    ) -> Result<UserAccount, FlowError> {
        let request = SignInTokenRequest { credential_token, grant, scopes, correlation_id };
        match validate_token(self.provider.token(&request).await, correlation_id) {
            SignInTokenValidated::Success(token_response) => {
                self.complete(token_response, username, correlation_id).await
            }
            SignInTokenValidated::InvalidOob { .. } => {
                error!(correlation_id = %correlation_id, "invalid_oob_value returned for a non-code grant");
                Err(FlowError::General)
            }
            SignInTokenValidated::Error(code) => Err(map_token_code(code)),
            SignInTokenValidated::UnexpectedError => Err(FlowError::General),
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

fn map_initiate_code(code: SignInInitiateCode) -> FlowError {
    match code {
        SignInInitiateCode::UserNotFound => FlowError::UserNotFound,
        SignInInitiateCode::UnsupportedChallengeType => FlowError::UnsupportedAccount(
            "no supported challenge type for this account".to_string(),
        ),
        SignInInitiateCode::InvalidRequest
        | SignInInitiateCode::InvalidClient
        | SignInInitiateCode::Unknown => FlowError::General,
    }
}

fn map_challenge_code(code: SignInChallengeCode) -> FlowError {
    match code {
        SignInChallengeCode::ExpiredToken => FlowError::ExpiredToken,
        SignInChallengeCode::InvalidRequest
        | SignInChallengeCode::InvalidClient
        | SignInChallengeCode::Unknown => FlowError::General,
    }
}

fn map_token_code(code: SignInTokenCode) -> FlowError {
    match code {
        SignInTokenCode::InvalidCredentials | SignInTokenCode::InvalidGrant => {
            FlowError::InvalidCredentials
        }
        SignInTokenCode::ExpiredToken => FlowError::ExpiredToken,
        SignInTokenCode::SlowDown => FlowError::RateLimited,
        SignInTokenCode::InvalidOobValue | SignInTokenCode::Unknown => FlowError::General,
    }
}
