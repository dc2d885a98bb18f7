use async_trait::async_trait;
use nativeauth_domain::{ChannelType, FlowError, UserAccount};

use crate::controller::sign_in::{
    SignInAfterResetOutcome, SignInPasswordStartOutcome, SignInResendCodeOutcome,
    SignInStartOutcome, SignInSubmitCodeOutcome, SignInSubmitPasswordOutcome,
};
use crate::state::sign_in::{SignInCodeRequiredState, SignInPasswordRequiredState};

/// Callbacks reachable from a sign-in started without a password.
#[async_trait]
pub trait SignInStartDelegate: Send + Sync {
    async fn on_code_required(
        &self,
        state: SignInCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    );
    async fn on_password_required(&self, state: SignInPasswordRequiredState);
    async fn on_error(&self, error: FlowError);
}

/// Callbacks reachable from a sign-in started with a password.
#[async_trait]
pub trait SignInPasswordStartDelegate: Send + Sync {
    async fn on_completed(&self, account: UserAccount);
    async fn on_code_required(
        &self,
        state: SignInCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    );
    async fn on_error(&self, error: FlowError);
}

/// Callbacks reachable while verifying a sign-in one-time code.
#[async_trait]
pub trait SignInVerifyCodeDelegate: Send + Sync {
    async fn on_completed(&self, account: UserAccount);
    /// `retry_state` is present for recoverable errors (wrong code) and
    /// absent for terminal ones.
    async fn on_verify_code_error(
        &self,
        error: FlowError,
        retry_state: Option<SignInCodeRequiredState>,
    );
}

/// Callbacks reachable from a sign-in resend-code request.
#[async_trait]
pub trait SignInResendCodeDelegate: Send + Sync {
    async fn on_code_required(
        &self,
        state: SignInCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    );
    async fn on_resend_code_error(&self, error: FlowError);
}

/// Callbacks reachable while submitting the sign-in password.
#[async_trait]
pub trait SignInPasswordRequiredDelegate: Send + Sync {
    async fn on_completed(&self, account: UserAccount);
    async fn on_password_error(&self, error: FlowError);
}

/// Callbacks reachable when signing in after a completed password reset.
#[async_trait]
pub trait SignInAfterResetPasswordDelegate: Send + Sync {
    async fn on_completed(&self, account: UserAccount);
    async fn on_error(&self, error: FlowError);
}

pub(crate) async fn dispatch_start(outcome: SignInStartOutcome, delegate: &dyn SignInStartDelegate) {
    match outcome {
        SignInStartOutcome::CodeRequired { state, sent_to, channel, code_length } => {
            delegate.on_code_required(state, sent_to, channel, code_length).await
        }
        SignInStartOutcome::PasswordRequired(state) => delegate.on_password_required(state).await,
        SignInStartOutcome::Error(error) => delegate.on_error(error).await,
    }
}

pub(crate) async fn dispatch_password_start(
    outcome: SignInPasswordStartOutcome,
    delegate: &dyn SignInPasswordStartDelegate,
) {
    match outcome {
        SignInPasswordStartOutcome::Completed(account) => delegate.on_completed(account).await,
        SignInPasswordStartOutcome::CodeRequired { state, sent_to, channel, code_length } => {
            delegate.on_code_required(state, sent_to, channel, code_length).await
        }
        SignInPasswordStartOutcome::Error(error) => delegate.on_error(error).await,
    }
}

pub(crate) async fn dispatch_verify_code(
    outcome: SignInSubmitCodeOutcome,
    delegate: &dyn SignInVerifyCodeDelegate,
) {
    match outcome {
        SignInSubmitCodeOutcome::Completed(account) => delegate.on_completed(account).await,
        SignInSubmitCodeOutcome::RetryCode { error, state } => {
            delegate.on_verify_code_error(error, Some(state)).await
        }
        SignInSubmitCodeOutcome::Error(error) => delegate.on_verify_code_error(error, None).await,
    }
}

pub(crate) async fn dispatch_resend_code(
    outcome: SignInResendCodeOutcome,
    delegate: &dyn SignInResendCodeDelegate,
) {
    match outcome {
        SignInResendCodeOutcome::CodeRequired { state, sent_to, channel, code_length } => {
            delegate.on_code_required(state, sent_to, channel, code_length).await
        }
        SignInResendCodeOutcome::Error(error) => delegate.on_resend_code_error(error).await,
    }
}

pub(crate) async fn dispatch_submit_password(
    outcome: SignInSubmitPasswordOutcome,
    delegate: &dyn SignInPasswordRequiredDelegate,
) {
    match outcome {
        SignInSubmitPasswordOutcome::Completed(account) => delegate.on_completed(account).await,
        SignInSubmitPasswordOutcome::Error(error) => delegate.on_password_error(error).await,
    }
}

pub(crate) async fn dispatch_after_reset(
    outcome: SignInAfterResetOutcome,
    delegate: &dyn SignInAfterResetPasswordDelegate,
) {
    match outcome {
        SignInAfterResetOutcome::Completed(account) => delegate.on_completed(account).await,
        SignInAfterResetOutcome::Error(error) => delegate.on_error(error).await,
    }
}
