use async_trait::async_trait;
use nativeauth_domain::{ChannelType, FlowError, UserAccount};

use crate::controller::sign_up::{
    SignUpResendCodeOutcome, SignUpStartOutcome, SignUpSubmitAttributesOutcome,
    SignUpSubmitCodeOutcome, SignUpSubmitPasswordOutcome,
};
use crate::state::sign_up::{
    SignUpAttributesRequiredState, SignUpCodeRequiredState, SignUpPasswordRequiredState,
};

/// Callbacks reachable from the start of a sign-up.
#[async_trait]
pub trait SignUpStartDelegate: Send + Sync {
    async fn on_code_required(
        &self,
        state: SignUpCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    );
    async fn on_password_required(&self, state: SignUpPasswordRequiredState);
    async fn on_attributes_required(&self, state: SignUpAttributesRequiredState);
    async fn on_completed(&self, account: UserAccount);
    async fn on_error(&self, error: FlowError);
}

/// Callbacks reachable while verifying a sign-up one-time code.
#[async_trait]
pub trait SignUpVerifyCodeDelegate: Send + Sync {
    async fn on_completed(&self, account: UserAccount);
    async fn on_attributes_required(&self, state: SignUpAttributesRequiredState);
    /// `retry_state` is present for recoverable errors (wrong code) and
    /// absent for terminal ones.
    async fn on_verify_code_error(
        &self,
        error: FlowError,
        retry_state: Option<SignUpCodeRequiredState>,
    );
}

/// Callbacks reachable from a sign-up resend-code request.
#[async_trait]
pub trait SignUpResendCodeDelegate: Send + Sync {
    async fn on_code_required(
        &self,
        state: SignUpCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    );
    async fn on_resend_code_error(&self, error: FlowError);
}

/// Callbacks reachable while submitting the new account's password.
#[async_trait]
pub trait SignUpPasswordRequiredDelegate: Send + Sync {
    async fn on_completed(&self, account: UserAccount);
    async fn on_attributes_required(&self, state: SignUpAttributesRequiredState);
    /// `retry_state` is present for password-policy rejections and absent for
    /// terminal errors.
    async fn on_password_error(
        &self,
        error: FlowError,
        retry_state: Option<SignUpPasswordRequiredState>,
    );
}

/// Callbacks reachable while submitting account attributes.
#[async_trait]
pub trait SignUpAttributesRequiredDelegate: Send + Sync {
    async fn on_completed(&self, account: UserAccount);
    /// The server needs further attributes beyond the ones just submitted.
    async fn on_attributes_required(&self, state: SignUpAttributesRequiredState);
    /// `retry_state` is present for validation rejections and absent for
    /// terminal errors.
    async fn on_attributes_error(
        &self,
        error: FlowError,
        retry_state: Option<SignUpAttributesRequiredState>,
    );
}

pub(crate) async fn dispatch_start(outcome: SignUpStartOutcome, delegate: &dyn SignUpStartDelegate) {
    match outcome {
        SignUpStartOutcome::Completed(account) => delegate.on_completed(account).await,
        SignUpStartOutcome::CodeRequired { state, sent_to, channel, code_length } => {
            delegate.on_code_required(state, sent_to, channel, code_length).await
        }
        SignUpStartOutcome::PasswordRequired(state) => delegate.on_password_required(state).await,
        SignUpStartOutcome::AttributesRequired(state) => {
            delegate.on_attributes_required(state).await
        }
        SignUpStartOutcome::Error(error) => delegate.on_error(error).await,
    }
}

pub(crate) async fn dispatch_verify_code(
    outcome: SignUpSubmitCodeOutcome,
    delegate: &dyn SignUpVerifyCodeDelegate,
) {
    match outcome {
        SignUpSubmitCodeOutcome::Completed(account) => delegate.on_completed(account).await,
        SignUpSubmitCodeOutcome::AttributesRequired(state) => {
            delegate.on_attributes_required(state).await
        }
        SignUpSubmitCodeOutcome::RetryCode { error, state } => {
            delegate.on_verify_code_error(error, Some(state)).await
        }
        SignUpSubmitCodeOutcome::Error(error) => delegate.on_verify_code_error(error, None).await,
    }
}

pub(crate) async fn dispatch_resend_code(
    outcome: SignUpResendCodeOutcome,
    delegate: &dyn SignUpResendCodeDelegate,
) {
    match outcome {
        SignUpResendCodeOutcome::CodeRequired { state, sent_to, channel, code_length } => {
            delegate.on_code_required(state, sent_to, channel, code_length).await
        }
        SignUpResendCodeOutcome::Error(error) => delegate.on_resend_code_error(error).await,
    }
}

pub(crate) async fn dispatch_submit_password(
    outcome: SignUpSubmitPasswordOutcome,
    delegate: &dyn SignUpPasswordRequiredDelegate,
) {
    match outcome {
        SignUpSubmitPasswordOutcome::Completed(account) => delegate.on_completed(account).await,
        SignUpSubmitPasswordOutcome::AttributesRequired(state) => {
            delegate.on_attributes_required(state).await
        }
        SignUpSubmitPasswordOutcome::RetryPassword { error, state } => {
            delegate.on_password_error(error, Some(state)).await
        }
        SignUpSubmitPasswordOutcome::Error(error) => {
            delegate.on_password_error(error, None).await
        }
    }
}

pub(crate) async fn dispatch_submit_attributes(
    outcome: SignUpSubmitAttributesOutcome,
    delegate: &dyn SignUpAttributesRequiredDelegate,
) {
    match outcome {
        SignUpSubmitAttributesOutcome::Completed(account) => delegate.on_completed(account).await,
        SignUpSubmitAttributesOutcome::AttributesRequired(state) => {
            delegate.on_attributes_required(state).await
        }
        SignUpSubmitAttributesOutcome::RetryAttributes { error, state } => {
            delegate.on_attributes_error(error, Some(state)).await
        }
        SignUpSubmitAttributesOutcome::Error(error) => {
            delegate.on_attributes_error(error, None).await
        }
    }
}
