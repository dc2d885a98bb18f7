use std::sync::Arc;

use nativeauth_domain::{ContinuationToken, CorrelationId, FlowError, OtpCode, Password, Username};
use serde_json::{Map, Value};
use tracing::warn;

use crate::SignUpController;
use crate::delegate::sign_up::{
    dispatch_resend_code, dispatch_submit_attributes, dispatch_submit_password,
    dispatch_verify_code,
};
use crate::state::FlowGuard;
use crate::{
    SignUpAttributesRequiredDelegate, SignUpPasswordRequiredDelegate, SignUpResendCodeDelegate,
    SignUpVerifyCodeDelegate,
};

/// Sign-up suspended waiting for the one-time code sent to the user.
#[derive(Clone)]
pub struct SignUpCodeRequiredState {
    controller: Arc<SignUpController>,
    pub(crate) signup_token: ContinuationToken,
    username: Username,
    correlation_id: CorrelationId,
    code_length: u32,
    guard: FlowGuard,
}

impl SignUpCodeRequiredState {
    pub(crate) fn new(
        controller: Arc<SignUpController>,
        signup_token: ContinuationToken,
        username: Username,
        correlation_id: CorrelationId,
        code_length: u32,
    ) -> Self {
        Self { controller, signup_token, username, correlation_id, code_length, guard: FlowGuard::new() }
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

    pub async fn submit_code(&self, code: OtpCode, delegate: &dyn SignUpVerifyCodeDelegate) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "sign up continuation state reused");
            delegate.on_verify_code_error(FlowError::InvalidState, None).await;
            return;
        }
        let outcome = self.controller.submit_code(self, &code).await;
        dispatch_verify_code(outcome, delegate).await;
    }

    pub async fn resend_code(&self, delegate: &dyn SignUpResendCodeDelegate) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "sign up continuation state reused");
            delegate.on_resend_code_error(FlowError::InvalidState).await;
            return;
        }
        let outcome = self.controller.resend_code(self).await;
        dispatch_resend_code(outcome, delegate).await;
    }
}

/// Sign-up suspended waiting for the new account's password.
#[derive(Clone)]
pub struct SignUpPasswordRequiredState {
    controller: Arc<SignUpController>,
    pub(crate) signup_token: ContinuationToken,
    username: Username,
    correlation_id: CorrelationId,
    guard: FlowGuard,
}

impl SignUpPasswordRequiredState {
    pub(crate) fn new(
        controller: Arc<SignUpController>,
        signup_token: ContinuationToken,
        username: Username,
        correlation_id: CorrelationId,
    ) -> Self {
        Self { controller, signup_token, username, correlation_id, guard: FlowGuard::new() }
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
        delegate: &dyn SignUpPasswordRequiredDelegate,
    ) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "sign up continuation state reused");
            delegate.on_password_error(FlowError::InvalidState, None).await;
            return;
        }
        let outcome = self.controller.submit_password(self, &password).await;
        dispatch_submit_password(outcome, delegate).await;
    }
}

/// Sign-up suspended waiting for account attributes.
#[derive(Clone)]
pub struct SignUpAttributesRequiredState {
    controller: Arc<SignUpController>,
    pub(crate) signup_token: ContinuationToken,
    username: Username,
    correlation_id: CorrelationId,
    guard: FlowGuard,
}

impl SignUpAttributesRequiredState {
    pub(crate) fn new(
        controller: Arc<SignUpController>,
        signup_token: ContinuationToken,
        username: Username,
        correlation_id: CorrelationId,
    ) -> Self {
        Self { controller, signup_token, username, correlation_id, guard: FlowGuard::new() }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    pub async fn submit_attributes(
        &self,
        attributes: Map<String, Value>,
        delegate: &dyn SignUpAttributesRequiredDelegate,
    ) {
        if !self.guard.consume() {
            warn!(correlation_id = %self.correlation_id, "sign up continuation state reused");
            delegate.on_attributes_error(FlowError::InvalidState, None).await;
            return;
        }
        let outcome = self.controller.submit_attributes(self, &attributes).await;
        dispatch_submit_attributes(outcome, delegate).await;
    }
}
