use std::sync::Arc;

use nativeauth_domain::{ContinuationToken, CorrelationId, FlowError, OtpCode, Password, Username};
use tracing::warn;

use crate::ResetPasswordController;
use crate::delegate::reset_password::{
    dispatch_resend_code, dispatch_submit_password, dispatch_verify_code,
};
use crate::state::FlowGuard;
use crate::{
    ResetPasswordRequiredDelegate, ResetPasswordResendCodeDelegate, ResetPasswordVerifyCodeDelegate,
};

/// Password reset suspended waiting for the one-time code sent to the user.
#[derive(Clone)]
pub struct ResetPasswordCodeRequiredState {
    controller: Arc<ResetPasswordController>,
    pub(crate) password_reset_token: ContinuationToken,
    username: Username,
    correlation_id: CorrelationId,
    code_length: u32,
    guard: FlowGuard,
}

impl ResetPasswordCodeRequiredState {
    pub(crate) fn new(
        controller: Arc<ResetPasswordController>,
        password_reset_token: ContinuationToken,
        username: Username,
        correlation_id: CorrelationId,
        code_length: u32,
    ) -> Self {
        Self {
            controller,
            password_reset_token,
            username,
            correlation_id,
            code_length,
            guard: FlowGuard::new(),
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    pub fn code_length(&self) -> u32 {
        self.code_length
    }

    pub async fn submit_code(&self, code: OtpCode, delegate: &dyn ResetPasswordVerifyCodeDelegate) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "reset password continuation state reused");
            delegate.on_verify_code_error(FlowError::InvalidState, None).await;
            return;
        }
        let outcome = self.controller.submit_code(self, &code).await;
        dispatch_verify_code(outcome, delegate).await;
    }

    pub async fn resend_code(&self, delegate: &dyn ResetPasswordResendCodeDelegate) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "reset password continuation state reused");
            delegate.on_resend_code_error(FlowError::InvalidState).await;
            return;
        }
        let outcome = self.controller.resend_code(self).await;
        dispatch_resend_code(outcome, delegate).await;
    }
}

/// Password reset suspended waiting for the new password.
#[derive(Clone)]
pub struct ResetPasswordRequiredState {
    controller: Arc<ResetPasswordController>,
    pub(crate) password_submit_token: ContinuationToken,
    username: Username,
    correlation_id: CorrelationId,
    guard: FlowGuard,
}

impl ResetPasswordRequiredState {
    pub(crate) fn new(
        controller: Arc<ResetPasswordController>,
        password_submit_token: ContinuationToken,
        username: Username,
        correlation_id: CorrelationId,
    ) -> Self {
        Self { controller, password_submit_token, username, correlation_id, guard: FlowGuard::new() }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    pub async fn submit_password(
        &self,
        new_password: Password,
        delegate: &dyn ResetPasswordRequiredDelegate,
    ) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "reset password continuation state reused");
            delegate.on_password_error(FlowError::InvalidState, None).await;
            return;
        }
        let outcome = self.controller.submit_password(self, &new_password).await;
        dispatch_submit_password(outcome, delegate).await;
    }
}
