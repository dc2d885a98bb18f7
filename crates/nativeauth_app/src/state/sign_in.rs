use std::sync::Arc;

use nativeauth_domain::{ContinuationToken, CorrelationId, FlowError, OtpCode, Password, Username};
use tracing::warn;

use crate::SignInController;
use crate::delegate::sign_in::{
    dispatch_resend_code, dispatch_submit_password, dispatch_verify_code,
};
use crate::state::FlowGuard;
use crate::{
    SignInAfterResetPasswordDelegate, SignInPasswordRequiredDelegate, SignInResendCodeDelegate,
    SignInVerifyCodeDelegate,
};

/// Sign-in suspended waiting for the one-time code sent to the user.
#[derive(Clone)]
pub struct SignInCodeRequiredState {
    controller: Arc<SignInController>,
    pub(crate) credential_token: ContinuationToken,
    pub(crate) scopes: Vec<String>,
    username: Username,
    correlation_id: CorrelationId,
    code_length: u32,
    guard: FlowGuard,
}

impl SignInCodeRequiredState {
    pub(crate) fn new(
        controller: Arc<SignInController>,
        credential_token: ContinuationToken,
        username: Username,
        scopes: Vec<String>,
        correlation_id: CorrelationId,
        code_length: u32,
    ) -> Self {
        Self {
            controller,
            credential_token,
            scopes,
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

    pub async fn submit_code(&self, code: OtpCode, delegate: &dyn SignInVerifyCodeDelegate) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "sign in continuation state reused");
            delegate.on_verify_code_error(FlowError::InvalidState, None).await;
            return;
        }
        let outcome = self.controller.submit_code(self, &code).await;
        dispatch_verify_code(outcome, delegate).await;
    }

    pub async fn resend_code(&self, delegate: &dyn SignInResendCodeDelegate) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "sign in continuation state reused");
            delegate.on_resend_code_error(FlowError::InvalidState).await;
            return;
        }
        let outcome = self.controller.resend_code(self).await;
        dispatch_resend_code(outcome, delegate).await;
    }
}

/// Sign-in suspended waiting for the account password.
#[derive(Clone)]
pub struct SignInPasswordRequiredState {
    controller: Arc<SignInController>,
    pub(crate) credential_token: ContinuationToken,
    pub(crate) scopes: Vec<String>,
    username: Username,
    correlation_id: CorrelationId,
    guard: FlowGuard,
}

impl SignInPasswordRequiredState {
    pub(crate) fn new(
        controller: Arc<SignInController>,
        credential_token: ContinuationToken,
        username: Username,
        scopes: Vec<String>,
        correlation_id: CorrelationId,
    ) -> Self {
        Self { controller, credential_token, scopes, username, correlation_id, guard: FlowGuard::new() }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    pub async fn submit_password(
        &self,
        password: Password,
        delegate: &dyn SignInPasswordRequiredDelegate,
    ) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "sign in continuation state reused");
            delegate.on_password_error(FlowError::InvalidState).await;
            return;
        }
        let outcome = self.controller.submit_password(self, &password).await;
        dispatch_submit_password(outcome, delegate).await;
    }
}

/// Created when a password reset completes. Signs the user in with the
/// continuation token issued by the reset, skipping the password prompt.
#[derive(Clone)]
pub struct SignInAfterResetPasswordState {
    controller: Arc<SignInController>,
    continuation_token: Option<ContinuationToken>,
    username: Username,
    correlation_id: CorrelationId,
    guard: FlowGuard,
}

impl SignInAfterResetPasswordState {
    pub(crate) fn new(
        controller: Arc<SignInController>,
        continuation_token: Option<ContinuationToken>,
        username: Username,
        correlation_id: CorrelationId,
    ) -> Self {
        Self { controller, continuation_token, username, correlation_id, guard: FlowGuard::new() }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    pub async fn sign_in(
        &self,
        scopes: Vec<String>,
        delegate: &dyn SignInAfterResetPasswordDelegate,
    ) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "sign in continuation state reused");
            delegate.on_error(FlowError::InvalidState).await;
            return;
        }
        let Some(continuation_token) = self.continuation_token.clone() else {
            warn!(correlation_id = %self.correlation_id, "no continuation token was issued by the reset");
            delegate.on_error(FlowError::InvalidState).await;
            return;
        };
        let outcome = self
            .controller
            .sign_in_after_reset(
                continuation_token,
                self.username.clone(),
                scopes,
                self.correlation_id,
            )
            .await;
        crate::delegate::sign_in::dispatch_after_reset(outcome, delegate).await;
    }
}
