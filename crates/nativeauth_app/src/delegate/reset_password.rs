use async_trait::async_trait;
use nativeauth_domain::{ChannelType, FlowError};

use crate::controller::reset_password::{
    ResetPasswordResendCodeOutcome, ResetPasswordStartOutcome, ResetPasswordSubmitCodeOutcome,
    ResetPasswordSubmitPasswordOutcome,
};
use crate::state::reset_password::{ResetPasswordCodeRequiredState, ResetPasswordRequiredState};
use crate::state::sign_in::SignInAfterResetPasswordState;

/// Callbacks reachable from the start of a password reset.
#[async_trait]
pub trait ResetPasswordStartDelegate: Send + Sync {
    async fn on_code_required(
        &self,
        state: ResetPasswordCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    );
    async fn on_error(&self, error: FlowError);
}

/// Callbacks reachable while verifying a reset-password one-time code.
#[async_trait]
pub trait ResetPasswordVerifyCodeDelegate: Send + Sync {
    async fn on_password_required(&self, state: ResetPasswordRequiredState);
    /// `retry_state` is present for recoverable errors (wrong code) and
    /// absent for terminal ones.
    async fn on_verify_code_error(
        &self,
        error: FlowError,
        retry_state: Option<ResetPasswordCodeRequiredState>,
    );
}

/// Callbacks reachable from a reset-password resend-code request.
#[async_trait]
pub trait ResetPasswordResendCodeDelegate: Send + Sync {
    async fn on_code_required(
        &self,
        state: ResetPasswordCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    );
    async fn on_resend_code_error(&self, error: FlowError);
}

/// Callbacks reachable while submitting the new password.
#[async_trait]
pub trait ResetPasswordRequiredDelegate: Send + Sync {
    /// The reset completed. The state signs the user in without re-entering
    /// the new password.
    async fn on_completed(&self, state: SignInAfterResetPasswordState);
    /// `retry_state` is present for password-policy rejections and absent for
    /// terminal errors.
    async fn on_password_error(
        &self,
        error: FlowError,
        retry_state: Option<ResetPasswordRequiredState>,
    );
}

pub(crate) async fn dispatch_start(
    outcome: ResetPasswordStartOutcome,
    delegate: &dyn ResetPasswordStartDelegate,
) {
    match outcome {
        ResetPasswordStartOutcome::CodeRequired { state, sent_to, channel, code_length } => {
            delegate.on_code_required(state, sent_to, channel, code_length).await
        }
        ResetPasswordStartOutcome::Error(error) => delegate.on_error(error).await,
    }
}

pub(crate) async fn dispatch_verify_code(
    outcome: ResetPasswordSubmitCodeOutcome,
    delegate: &dyn ResetPasswordVerifyCodeDelegate,
) {
    match outcome {
        ResetPasswordSubmitCodeOutcome::PasswordRequired(state) => {
            delegate.on_password_required(state).await
        }
        ResetPasswordSubmitCodeOutcome::RetryCode { error, state } => {
            delegate.on_verify_code_error(error, Some(state)).await
        }
        ResetPasswordSubmitCodeOutcome::Error(error) => {
            delegate.on_verify_code_error(error, None).await
        }
    }
}

pub(crate) async fn dispatch_resend_code(
    outcome: ResetPasswordResendCodeOutcome,
    delegate: &dyn ResetPasswordResendCodeDelegate,
) {
    match outcome {
        ResetPasswordResendCodeOutcome::CodeRequired { state, sent_to, channel, code_length } => {
            delegate.on_code_required(state, sent_to, channel, code_length).await
        }
        ResetPasswordResendCodeOutcome::Error(error) => delegate.on_resend_code_error(error).await,
    }
}

pub(crate) async fn dispatch_submit_password(
    outcome: ResetPasswordSubmitPasswordOutcome,
    delegate: &dyn ResetPasswordRequiredDelegate,
) {
    match outcome {
        ResetPasswordSubmitPasswordOutcome::Completed(state) => delegate.on_completed(state).await,
        ResetPasswordSubmitPasswordOutcome::RetryPassword { error, state } => {
            delegate.on_password_error(error, Some(state)).await
        }
        ResetPasswordSubmitPasswordOutcome::Error(error) => {
            delegate.on_password_error(error, None).await
        }
    }
}
