use std::sync::Arc;
use std::time::Duration;

use backon::{ConstantBuilder, Retryable};
use nativeauth_domain::{
    ChannelType, ContinuationToken, CorrelationId, FlowError, OtpCode, Password,
    PasswordPolicyError, ResetPasswordParameters,
};
use tracing::{debug, error};

use crate::dto::{
    ResetPasswordChallengeCode, ResetPasswordContinueCode, ResetPasswordPollCode,
    ResetPasswordPollStatus, ResetPasswordStartCode, ResetPasswordSubmitCode,
};
use crate::services::{ResetPasswordRequestProvider, TelemetrySink};
use crate::state::{
    ResetPasswordCodeRequiredState, ResetPasswordRequiredState, SignInAfterResetPasswordState,
};
use crate::telemetry::{ApiId, TelemetryScope};
use crate::validator::reset_password::{
    ResetPasswordChallengeValidated, ResetPasswordContinueValidated, ResetPasswordPollValidated,
    ResetPasswordStartValidated, ResetPasswordSubmitValidated, validate_challenge,
    validate_continue, validate_poll_completion, validate_start, validate_submit,
};
use crate::SignInController;

/// Polls stop after this many attempts; a server that never settles must not
/// hold the invocation open forever.
const MAX_POLL_ATTEMPTS: usize = 5;

/// Drives the reset-password flow: start, challenge, continue (code), submit
/// (new password), then a completion-poll loop. A successful reset hands back
/// a sign-in continuation so the user does not re-enter the new password.
pub struct ResetPasswordController {
    provider: Arc<dyn ResetPasswordRequestProvider>,
    sign_in: Arc<SignInController>,
    telemetry: Arc<dyn TelemetrySink>,
}

pub enum ResetPasswordStartOutcome {
    CodeRequired {
        state: ResetPasswordCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    },
    Error(FlowError),
}

pub enum ResetPasswordSubmitCodeOutcome {
    PasswordRequired(ResetPasswordRequiredState),
    /// The code was rejected but the step can be retried on the new state.
    RetryCode {
        error: FlowError,
        state: ResetPasswordCodeRequiredState,
    },
    Error(FlowError),
}

pub enum ResetPasswordResendCodeOutcome {
    CodeRequired {
        state: ResetPasswordCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    },
    Error(FlowError),
}

pub enum ResetPasswordSubmitPasswordOutcome {
    /// The reset completed; the state signs the user in with the issued
    /// continuation token.
    Completed(SignInAfterResetPasswordState),
    /// The password violated policy; the step can be retried on the new state.
    RetryPassword {
        error: FlowError,
        state: ResetPasswordRequiredState,
    },
    Error(FlowError),
}

enum PollError {
    InProgress,
    Password(PasswordPolicyError),
    Terminal(FlowError),
}

impl ResetPasswordController {
    pub fn new(
        provider: Arc<dyn ResetPasswordRequestProvider>,
        sign_in: Arc<SignInController>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self { provider, sign_in, telemetry }
    }

    pub async fn start(
        self: &Arc<Self>,
        params: &ResetPasswordParameters,
    ) -> ResetPasswordStartOutcome {
        let correlation_id = params.correlation_id;
        let mut scope = TelemetryScope::start(
            self.telemetry.clone(),
            ApiId::ResetPasswordStart,
            correlation_id,
        );
        debug!(correlation_id = %correlation_id, username = %params.username, "starting password reset");

        let password_reset_token =
            match validate_start(self.provider.start(params).await, correlation_id) {
                ResetPasswordStartValidated::Success { password_reset_token } => {
                    password_reset_token
                }
                ResetPasswordStartValidated::Redirect => {
                    return ResetPasswordStartOutcome::Error(FlowError::BrowserRequired);
                }
                ResetPasswordStartValidated::Error(code) => {
                    return ResetPasswordStartOutcome::Error(map_start_code(code));
                }
                ResetPasswordStartValidated::UnexpectedError => {
                    return ResetPasswordStartOutcome::Error(FlowError::General);
                }
            };

        let challenge = self.provider.challenge(&password_reset_token, correlation_id).await;
        match validate_challenge(challenge, correlation_id) {
            ResetPasswordChallengeValidated::Success {
                display_name,
                channel,
                code_length,
                password_reset_token,
            } => {
                scope.succeed();
                ResetPasswordStartOutcome::CodeRequired {
                    state: ResetPasswordCodeRequiredState::new(
                        Arc::clone(self),
                        password_reset_token,
                        params.username.clone(),
                        correlation_id,
                        code_length,
                    ),
                    sent_to: display_name,
                    channel,
                    code_length,
                }
            }
            ResetPasswordChallengeValidated::Redirect => {
                ResetPasswordStartOutcome::Error(FlowError::BrowserRequired)
            }
            ResetPasswordChallengeValidated::Error(code) => {
                ResetPasswordStartOutcome::Error(map_challenge_code(code))
            }
            ResetPasswordChallengeValidated::UnexpectedError => {
                ResetPasswordStartOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn submit_code(
        self: &Arc<Self>,
        state: &ResetPasswordCodeRequiredState,
        code: &OtpCode,
    ) -> ResetPasswordSubmitCodeOutcome {
        let correlation_id = state.correlation_id();
        let mut scope = TelemetryScope::start(
            self.telemetry.clone(),
            ApiId::ResetPasswordSubmitCode,
            correlation_id,
        );

        let result = self
            .provider
            .continue_flow(&state.password_reset_token, code, correlation_id)
            .await;
        match validate_continue(result, correlation_id) {
            ResetPasswordContinueValidated::Success { password_submit_token } => {
                scope.succeed();
                ResetPasswordSubmitCodeOutcome::PasswordRequired(ResetPasswordRequiredState::new(
                    Arc::clone(self),
                    password_submit_token,
                    state.username().clone(),
                    correlation_id,
                ))
            }
            ResetPasswordContinueValidated::InvalidOob { password_reset_token } => {
                ResetPasswordSubmitCodeOutcome::RetryCode {
                    error: FlowError::InvalidCode,
                    state: ResetPasswordCodeRequiredState::new(
                        Arc::clone(self),
                        password_reset_token,
                        state.username().clone(),
                        correlation_id,
                        state.code_length(),
                    ),
                }
            }
            ResetPasswordContinueValidated::Error(code) => {
                ResetPasswordSubmitCodeOutcome::Error(map_continue_code(code))
            }
            ResetPasswordContinueValidated::UnexpectedError => {
                ResetPasswordSubmitCodeOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn resend_code(
        self: &Arc<Self>,
        state: &ResetPasswordCodeRequiredState,
    ) -> ResetPasswordResendCodeOutcome {
        let correlation_id = state.correlation_id();
        let mut scope = TelemetryScope::start(
            self.telemetry.clone(),
            ApiId::ResetPasswordResendCode,
            correlation_id,
        );

        let challenge = self.provider.challenge(&state.password_reset_token, correlation_id).await;
        match validate_challenge(challenge, correlation_id) {
            ResetPasswordChallengeValidated::Success {
                display_name,
                channel,
                code_length,
                password_reset_token,
            } => {
                scope.succeed();
                ResetPasswordResendCodeOutcome::CodeRequired {
                    state: ResetPasswordCodeRequiredState::new(
                        Arc::clone(self),
                        password_reset_token,
                        state.username().clone(),
                        correlation_id,
                        code_length,
                    ),
                    sent_to: display_name,
                    channel,
                    code_length,
                }
            }
            ResetPasswordChallengeValidated::Redirect => {
                ResetPasswordResendCodeOutcome::Error(FlowError::BrowserRequired)
            }
            ResetPasswordChallengeValidated::Error(code) => {
                ResetPasswordResendCodeOutcome::Error(map_challenge_code(code))
            }
            ResetPasswordChallengeValidated::UnexpectedError => {
                ResetPasswordResendCodeOutcome::Error(FlowError::General)
            }
        }
    }

    pub async fn submit_password(
        self: &Arc<Self>,
        state: &ResetPasswordRequiredState,
        new_password: &Password,
    ) -> ResetPasswordSubmitPasswordOutcome {
        let correlation_id = state.correlation_id();
        let mut scope = TelemetryScope::start(
            self.telemetry.clone(),
            ApiId::ResetPasswordSubmitPassword,
            correlation_id,
        );

        let result = self
            .provider
            .submit(&state.password_submit_token, new_password, correlation_id)
            .await;
        let (password_reset_token, poll_interval) = match validate_submit(result, correlation_id) {
            ResetPasswordSubmitValidated::Success { password_reset_token, poll_interval } => {
                (password_reset_token, poll_interval)
            }
            ResetPasswordSubmitValidated::PasswordError { error, password_submit_token } => {
                // The retry state keeps the current token when the server did
                // not reissue one.
                let token =
                    password_submit_token.unwrap_or_else(|| state.password_submit_token.clone());
                return ResetPasswordSubmitPasswordOutcome::RetryPassword {
                    error: FlowError::PasswordPolicy(error),
                    state: ResetPasswordRequiredState::new(
                        Arc::clone(self),
                        token,
                        state.username().clone(),
                        correlation_id,
                    ),
                };
            }
            ResetPasswordSubmitValidated::Error(code) => {
                return ResetPasswordSubmitPasswordOutcome::Error(map_submit_code(code));
            }
            ResetPasswordSubmitValidated::UnexpectedError => {
                return ResetPasswordSubmitPasswordOutcome::Error(FlowError::General);
            }
        };

        match self
            .poll_until_complete(&password_reset_token, poll_interval, correlation_id)
            .await
        {
            Ok(continuation_token) => {
                scope.succeed();
                ResetPasswordSubmitPasswordOutcome::Completed(SignInAfterResetPasswordState::new(
                    Arc::clone(&self.sign_in),
                    continuation_token,
                    state.username().clone(),
                    correlation_id,
                ))
            }
            Err(PollError::Password(error)) => ResetPasswordSubmitPasswordOutcome::RetryPassword {
                error: FlowError::PasswordPolicy(error),
                state: ResetPasswordRequiredState::new(
                    Arc::clone(self),
                    state.password_submit_token.clone(),
                    state.username().clone(),
                    correlation_id,
                ),
            },
            Err(PollError::Terminal(error)) => ResetPasswordSubmitPasswordOutcome::Error(error),
            Err(PollError::InProgress) => {
                error!(correlation_id = %correlation_id, "password reset still pending after {MAX_POLL_ATTEMPTS} polls");
                ResetPasswordSubmitPasswordOutcome::Error(FlowError::ResetPasswordFailed)
            }
        }
    }

    /// Polls the completion endpoint at the server-provided interval until the
    /// reset settles, retrying only while the server reports it as pending.
    async fn poll_until_complete(
        &self,
        password_reset_token: &ContinuationToken,
        poll_interval: u64,
        correlation_id: CorrelationId,
    ) -> Result<Option<ContinuationToken>, PollError> {
        let delay = Duration::from_secs(poll_interval.max(1));
        let backoff = ConstantBuilder::default()
            .with_delay(delay)
            .with_max_times(MAX_POLL_ATTEMPTS);

        (|| async { self.poll_once(password_reset_token, correlation_id).await })
            .retry(backoff)
            .when(|error| matches!(error, PollError::InProgress))
            .await
    }

    async fn poll_once(
        &self,
        password_reset_token: &ContinuationToken,
        correlation_id: CorrelationId,
    ) -> Result<Option<ContinuationToken>, PollError> {
        let result = self.provider.poll_completion(password_reset_token, correlation_id).await;
        match validate_poll_completion(result, correlation_id) {
            ResetPasswordPollValidated::Success { status, continuation_token } => match status {
                ResetPasswordPollStatus::Succeeded => Ok(continuation_token),
                ResetPasswordPollStatus::Failed => {
                    Err(PollError::Terminal(FlowError::ResetPasswordFailed))
                }
                ResetPasswordPollStatus::InProgress | ResetPasswordPollStatus::NotStarted => {
                    Err(PollError::InProgress)
                }
            },
            ResetPasswordPollValidated::PasswordError { error, .. } => {
                Err(PollError::Password(error))
            }
            ResetPasswordPollValidated::Error(code) => {
                Err(PollError::Terminal(map_poll_code(code)))
            }
            ResetPasswordPollValidated::UnexpectedError => {
                Err(PollError::Terminal(FlowError::General))
            }
        }
    }
}

fn map_start_code(code: ResetPasswordStartCode) -> FlowError {
    match code {
        ResetPasswordStartCode::UserNotFound => FlowError::UserNotFound,
        ResetPasswordStartCode::UnsupportedChallengeType => FlowError::UnsupportedAccount(
            "no supported challenge type for this account".to_string(),
        ),
        ResetPasswordStartCode::InvalidRequest
        | ResetPasswordStartCode::InvalidClient
        | ResetPasswordStartCode::Unknown => FlowError::General,
    }
}

fn map_challenge_code(code: ResetPasswordChallengeCode) -> FlowError {
    match code {
        ResetPasswordChallengeCode::ExpiredToken => FlowError::ExpiredToken,
        ResetPasswordChallengeCode::InvalidRequest
        | ResetPasswordChallengeCode::InvalidClient
        | ResetPasswordChallengeCode::Unknown => FlowError::General,
    }
}

fn map_continue_code(code: ResetPasswordContinueCode) -> FlowError {
    match code {
        ResetPasswordContinueCode::ExpiredToken => FlowError::ExpiredToken,
        _ => FlowError::General,
    }
}

fn map_submit_code(code: ResetPasswordSubmitCode) -> FlowError {
    match code {
        ResetPasswordSubmitCode::ExpiredToken => FlowError::ExpiredToken,
        _ => FlowError::General,
    }
}

fn map_poll_code(code: ResetPasswordPollCode) -> FlowError {
    match code {
        ResetPasswordPollCode::ExpiredToken => FlowError::ExpiredToken,
        ResetPasswordPollCode::UserNotFound => FlowError::UserNotFound,
        _ => FlowError::General,
    }
}
