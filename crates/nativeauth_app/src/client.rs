use std::sync::Arc;

use nativeauth_domain::{
    NativeAuthConfig, ResetPasswordParameters, SignInParameters, SignUpParameters,
};

use crate::services::{
    CacheAccessor, CredentialExchanger, ResetPasswordRequestProvider, SignInRequestProvider,
    SignUpRequestProvider, TelemetrySink,
};
use crate::{
    ResetPasswordController, ResetPasswordStartDelegate, SignInController,
    SignInPasswordStartDelegate, SignInStartDelegate, SignUpController, SignUpStartDelegate,
};

/// Entry point for the native-auth flows. One controller per flow family;
/// every public method drives its flow to a terminal or continuation outcome
/// and delivers exactly one callback on the supplied delegate.
pub struct NativeAuthClient {
    sign_up: Arc<SignUpController>,
    sign_in: Arc<SignInController>,
    reset_password: Arc<ResetPasswordController>,
}

impl NativeAuthClient {
    pub fn new(
        config: NativeAuthConfig,
        sign_up_provider: Arc<dyn SignUpRequestProvider>,
        sign_in_provider: Arc<dyn SignInRequestProvider>,
        reset_password_provider: Arc<dyn ResetPasswordRequestProvider>,
        cache: Arc<dyn CacheAccessor>,
        exchanger: Arc<dyn CredentialExchanger>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let sign_in = Arc::new(SignInController::new(
            config.clone(),
            sign_in_provider,
            cache.clone(),
            exchanger.clone(),
            telemetry.clone(),
        ));
        let sign_up = Arc::new(SignUpController::new(
            config,
            sign_up_provider,
            cache,
            exchanger,
            telemetry.clone(),
        ));
        let reset_password = Arc::new(ResetPasswordController::new(
            reset_password_provider,
            Arc::clone(&sign_in),
            telemetry,
        ));

        Self { sign_up, sign_in, reset_password }
    }

    /// Signs up a new account. The password, when present in the parameters,
    /// is sent with the start request; tenants that require more proof come
    /// back as code/password/attribute continuations.
    pub async fn sign_up(&self, params: SignUpParameters, delegate: &dyn SignUpStartDelegate) {
        let outcome = self.sign_up.start(&params).await;
        crate::delegate::sign_up::dispatch_start(outcome, delegate).await;
    }

    /// Signs in without a password; the server decides whether a code or a
    /// password is required next.
    pub async fn sign_in(&self, params: SignInParameters, delegate: &dyn SignInStartDelegate) {
        let outcome = self.sign_in.start_with_code(&params).await;
        crate::delegate::sign_in::dispatch_start(outcome, delegate).await;
    }

    /// Signs in with the password carried in the parameters; completes in one
    /// invocation unless the server asks for a one-time code first.
    pub async fn sign_in_with_password(
        &self,
        params: SignInParameters,
        delegate: &dyn SignInPasswordStartDelegate,
    ) {
        let outcome = self.sign_in.start_with_password(&params).await;
        crate::delegate::sign_in::dispatch_password_start(outcome, delegate).await;
    }

    /// Starts a password reset for the given username.
    pub async fn reset_password(
        &self,
        params: ResetPasswordParameters,
        delegate: &dyn ResetPasswordStartDelegate,
    ) {
        let outcome = self.reset_password.start(&params).await;
        crate::delegate::reset_password::dispatch_start(outcome, delegate).await;
    }
}
