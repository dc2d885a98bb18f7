#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use nativeauth_app::dto::{
    ResetPasswordChallengeApiError, ResetPasswordChallengeResponse, ResetPasswordContinueApiError,
    ResetPasswordContinueResponse, ResetPasswordPollApiError, ResetPasswordPollCompletionResponse,
    ResetPasswordStartApiError, ResetPasswordStartResponse, ResetPasswordSubmitApiError,
    ResetPasswordSubmitResponse, SignInChallengeApiError, SignInChallengeResponse,
    SignInInitiateApiError, SignInInitiateResponse, SignInTokenApiError, SignUpChallengeApiError,
    SignUpChallengeResponse, SignUpContinueApiError, SignUpContinueResponse, SignUpStartApiError,
    SignUpStartResponse,
};
use nativeauth_app::{
    CacheAccessor, CredentialExchanger, NativeAuthClient, NetworkResult,
    ResetPasswordCodeRequiredState, ResetPasswordRequestProvider, ResetPasswordRequiredState,
    ResetPasswordRequiredDelegate, ResetPasswordResendCodeDelegate, ResetPasswordStartDelegate,
    ResetPasswordVerifyCodeDelegate, SignInAfterResetPasswordDelegate,
    SignInAfterResetPasswordState, SignInCodeRequiredState, SignInGrant,
    SignInPasswordRequiredDelegate, SignInPasswordRequiredState, SignInPasswordStartDelegate,
    SignInRequestProvider, SignInResendCodeDelegate, SignInStartDelegate, SignInTokenRequest,
    SignInVerifyCodeDelegate, SignUpAttributesRequiredDelegate, SignUpAttributesRequiredState,
    SignUpCodeRequiredState, SignUpContinueRequest, SignUpPasswordRequiredDelegate,
    SignUpPasswordRequiredState, SignUpRequestProvider, SignUpResendCodeDelegate,
    SignUpStartDelegate, SignUpVerifyCodeDelegate, TelemetryEvent, TelemetrySink,
};
use nativeauth_domain::{
    AuthTokens, CacheError, ChallengeType, ChannelType, ContinuationToken, CorrelationId,
    ExchangeError, FlowError, NativeAuthConfig, OtpCode, Password, ResetPasswordParameters,
    SignInParameters, SignUpParameters, TokenResponse, TransportError, UserAccount,
};
use url::Url;

type Scripted<T, E> = Mutex<VecDeque<NetworkResult<T, E>>>;

fn pop<T, E>(queue: &Scripted<T, E>) -> NetworkResult<T, E> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| NetworkResult::Failure(TransportError::Network("no scripted response".to_string())))
}

pub fn token_response() -> TokenResponse {
    TokenResponse {
        access_token: "at-1".to_string(),
        refresh_token: Some("rt-1".to_string()),
        id_token: None,
        token_type: Some("Bearer".to_string()),
        expires_in: Some(3600),
        scope: Some("openid profile".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Request provider mocks
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockSignUpProvider {
    pub start_responses: Scripted<SignUpStartResponse, SignUpStartApiError>,
    pub challenge_responses: Scripted<SignUpChallengeResponse, SignUpChallengeApiError>,
    pub continue_responses: Scripted<SignUpContinueResponse, SignUpContinueApiError>,
    pub start_calls: AtomicUsize,
    pub challenge_calls: Mutex<Vec<String>>,
    pub continue_calls: Mutex<Vec<String>>,
}

#[async_trait]
impl SignUpRequestProvider for MockSignUpProvider {
    async fn start(
        &self,
        _params: &SignUpParameters,
    ) -> NetworkResult<SignUpStartResponse, SignUpStartApiError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        pop(&self.start_responses)
    }

    async fn challenge(
        &self,
        signup_token: &ContinuationToken,
        _correlation_id: CorrelationId,
    ) -> NetworkResult<SignUpChallengeResponse, SignUpChallengeApiError> {
        self.challenge_calls.lock().unwrap().push(signup_token.secret().to_string());
        pop(&self.challenge_responses)
    }

    async fn continue_flow(
        &self,
        request: &SignUpContinueRequest,
    ) -> NetworkResult<SignUpContinueResponse, SignUpContinueApiError> {
        self.continue_calls.lock().unwrap().push(request.signup_token.secret().to_string());
        pop(&self.continue_responses)
    }
}

#[derive(Default)]
pub struct MockSignInProvider {
    pub initiate_responses: Scripted<SignInInitiateResponse, SignInInitiateApiError>,
    pub challenge_responses: Scripted<SignInChallengeResponse, SignInChallengeApiError>,
    pub token_responses: Scripted<TokenResponse, SignInTokenApiError>,
    pub initiate_calls: AtomicUsize,
    pub challenge_calls: Mutex<Vec<String>>,
    pub token_calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SignInRequestProvider for MockSignInProvider {
    async fn initiate(
        &self,
        _params: &SignInParameters,
    ) -> NetworkResult<SignInInitiateResponse, SignInInitiateApiError> {
        self.initiate_calls.fetch_add(1, Ordering::SeqCst);
        pop(&self.initiate_responses)
    }

    async fn challenge(
        &self,
        credential_token: &ContinuationToken,
        _correlation_id: CorrelationId,
    ) -> NetworkResult<SignInChallengeResponse, SignInChallengeApiError> {
        self.challenge_calls.lock().unwrap().push(credential_token.secret().to_string());
        pop(&self.challenge_responses)
    }

    async fn token(
        &self,
        request: &SignInTokenRequest,
    ) -> NetworkResult<TokenResponse, SignInTokenApiError> {
        let grant = match &request.grant {
            SignInGrant::Password(_) => "password",
            SignInGrant::OobCode(_) => "oob",
            SignInGrant::ContinuationToken => "continuation_token",
        };
        self.token_calls
            .lock()
            .unwrap()
            .push((request.credential_token.secret().to_string(), grant.to_string()));
        pop(&self.token_responses)
    }
}

#[derive(Default)]
pub struct MockResetPasswordProvider {
    pub start_responses: Scripted<ResetPasswordStartResponse, ResetPasswordStartApiError>,
    pub challenge_responses: Scripted<ResetPasswordChallengeResponse, ResetPasswordChallengeApiError>,
    pub continue_responses: Scripted<ResetPasswordContinueResponse, ResetPasswordContinueApiError>,
    pub submit_responses: Scripted<ResetPasswordSubmitResponse, ResetPasswordSubmitApiError>,
    pub poll_responses: Scripted<ResetPasswordPollCompletionResponse, ResetPasswordPollApiError>,
    pub start_calls: AtomicUsize,
    pub challenge_calls: Mutex<Vec<String>>,
    pub continue_calls: Mutex<Vec<(String, String)>>,
    pub submit_calls: Mutex<Vec<String>>,
    pub poll_calls: Mutex<Vec<String>>,
}

#[async_trait]
impl ResetPasswordRequestProvider for MockResetPasswordProvider {
    async fn start(
        &self,
        _params: &ResetPasswordParameters,
    ) -> NetworkResult<ResetPasswordStartResponse, ResetPasswordStartApiError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        pop(&self.start_responses)
    }

    async fn challenge(
        &self,
        password_reset_token: &ContinuationToken,
        _correlation_id: CorrelationId,
    ) -> NetworkResult<ResetPasswordChallengeResponse, ResetPasswordChallengeApiError> {
        self.challenge_calls.lock().unwrap().push(password_reset_token.secret().to_string());
        pop(&self.challenge_responses)
    }

    async fn continue_flow(
        &self,
        password_reset_token: &ContinuationToken,
        code: &OtpCode,
        _correlation_id: CorrelationId,
    ) -> NetworkResult<ResetPasswordContinueResponse, ResetPasswordContinueApiError> {
        self.continue_calls
            .lock()
            .unwrap()
            .push((password_reset_token.secret().to_string(), code.secret().to_string()));
        pop(&self.continue_responses)
    }

    async fn submit(
        &self,
        password_submit_token: &ContinuationToken,
        _new_password: &Password,
        _correlation_id: CorrelationId,
    ) -> NetworkResult<ResetPasswordSubmitResponse, ResetPasswordSubmitApiError> {
        self.submit_calls.lock().unwrap().push(password_submit_token.secret().to_string());
        pop(&self.submit_responses)
    }

    async fn poll_completion(
        &self,
        password_reset_token: &ContinuationToken,
        _correlation_id: CorrelationId,
    ) -> NetworkResult<ResetPasswordPollCompletionResponse, ResetPasswordPollApiError> {
        self.poll_calls.lock().unwrap().push(password_reset_token.secret().to_string());
        pop(&self.poll_responses)
    }
}

// ---------------------------------------------------------------------------
// Cache, exchanger, telemetry
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockCache {
    pub fail: bool,
    pub saves: AtomicUsize,
}

impl MockCache {
    pub fn failing() -> Self {
        Self { fail: true, saves: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl CacheAccessor for MockCache {
    async fn save(&self, _tokens: &AuthTokens, _config: &NativeAuthConfig) -> Result<(), CacheError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(CacheError("scripted cache failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct MockExchanger {
    pub fail: bool,
}

#[async_trait]
impl CredentialExchanger for MockExchanger {
    async fn exchange(
        &self,
        response: TokenResponse,
        _config: &NativeAuthConfig,
    ) -> Result<AuthTokens, ExchangeError> {
        if self.fail {
            return Err(ExchangeError("scripted validation failure".to_string()));
        }
        Ok(AuthTokens {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            id_token: response.id_token,
            expires_at: Utc::now() + Duration::seconds(response.expires_in.unwrap_or(3600) as i64),
            scopes: response
                .scope
                .map(|scope| scope.split(' ').map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }
}

#[derive(Default)]
pub struct RecordingTelemetry {
    pub events: Mutex<Vec<TelemetryEvent>>,
}

impl TelemetrySink for RecordingTelemetry {
    fn record(&self, event: TelemetryEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct TestHarness {
    pub client: NativeAuthClient,
    pub sign_up: Arc<MockSignUpProvider>,
    pub sign_in: Arc<MockSignInProvider>,
    pub reset: Arc<MockResetPasswordProvider>,
    pub cache: Arc<MockCache>,
    pub telemetry: Arc<RecordingTelemetry>,
}

pub fn harness() -> TestHarness {
    harness_with_cache(MockCache::default())
}

pub fn harness_with_failing_cache() -> TestHarness {
    harness_with_cache(MockCache::failing())
}

fn harness_with_cache(cache: MockCache) -> TestHarness {
    let config = NativeAuthConfig::new(
        "client-id",
        Url::parse("https://contoso.ciamlogin.com/contoso.onmicrosoft.com").unwrap(),
        [ChallengeType::Oob, ChallengeType::Password],
    );
    let sign_up = Arc::new(MockSignUpProvider::default());
    let sign_in = Arc::new(MockSignInProvider::default());
    let reset = Arc::new(MockResetPasswordProvider::default());
    let cache = Arc::new(cache);
    let telemetry = Arc::new(RecordingTelemetry::default());

    let client = NativeAuthClient::new(
        config,
        sign_up.clone(),
        sign_in.clone(),
        reset.clone(),
        cache.clone(),
        Arc::new(MockExchanger::default()),
        telemetry.clone(),
    );

    TestHarness { client, sign_up, sign_in, reset, cache, telemetry }
}

// ---------------------------------------------------------------------------
// Delegate spies
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SignUpStartSpy {
    pub code_required: Mutex<Option<(SignUpCodeRequiredState, String, ChannelType, u32)>>,
    pub password_required: Mutex<Option<SignUpPasswordRequiredState>>,
    pub attributes_required: Mutex<Option<SignUpAttributesRequiredState>>,
    pub account: Mutex<Option<UserAccount>>,
    pub error: Mutex<Option<FlowError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignUpStartDelegate for SignUpStartSpy {
    async fn on_code_required(
        &self,
        state: SignUpCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.code_required.lock().unwrap() = Some((state, sent_to, channel, code_length));
    }

    async fn on_password_required(&self, state: SignUpPasswordRequiredState) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.password_required.lock().unwrap() = Some(state);
    }

    async fn on_attributes_required(&self, state: SignUpAttributesRequiredState) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.attributes_required.lock().unwrap() = Some(state);
    }

    async fn on_completed(&self, account: UserAccount) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.account.lock().unwrap() = Some(account);
    }

    async fn on_error(&self, error: FlowError) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some(error);
    }
}

#[derive(Default)]
pub struct SignUpVerifyCodeSpy {
    pub account: Mutex<Option<UserAccount>>,
    pub attributes_required: Mutex<Option<SignUpAttributesRequiredState>>,
    pub error: Mutex<Option<(FlowError, Option<SignUpCodeRequiredState>)>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignUpVerifyCodeDelegate for SignUpVerifyCodeSpy {
    async fn on_completed(&self, account: UserAccount) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.account.lock().unwrap() = Some(account);
    }

    async fn on_attributes_required(&self, state: SignUpAttributesRequiredState) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.attributes_required.lock().unwrap() = Some(state);
    }

    async fn on_verify_code_error(
        &self,
        error: FlowError,
        retry_state: Option<SignUpCodeRequiredState>,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some((error, retry_state));
    }
}

#[derive(Default)]
pub struct SignUpAttributesSpy {
    pub account: Mutex<Option<UserAccount>>,
    pub attributes_required: Mutex<Option<SignUpAttributesRequiredState>>,
    pub error: Mutex<Option<(FlowError, Option<SignUpAttributesRequiredState>)>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignUpAttributesRequiredDelegate for SignUpAttributesSpy {
    async fn on_completed(&self, account: UserAccount) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.account.lock().unwrap() = Some(account);
    }

    async fn on_attributes_required(&self, state: SignUpAttributesRequiredState) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.attributes_required.lock().unwrap() = Some(state);
    }

    async fn on_attributes_error(
        &self,
        error: FlowError,
        retry_state: Option<SignUpAttributesRequiredState>,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some((error, retry_state));
    }
}

#[derive(Default)]
pub struct SignUpPasswordSpy {
    pub account: Mutex<Option<UserAccount>>,
    pub attributes_required: Mutex<Option<SignUpAttributesRequiredState>>,
    pub error: Mutex<Option<(FlowError, Option<SignUpPasswordRequiredState>)>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignUpPasswordRequiredDelegate for SignUpPasswordSpy {
    async fn on_completed(&self, account: UserAccount) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.account.lock().unwrap() = Some(account);
    }

    async fn on_attributes_required(&self, state: SignUpAttributesRequiredState) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.attributes_required.lock().unwrap() = Some(state);
    }

    async fn on_password_error(
        &self,
        error: FlowError,
        retry_state: Option<SignUpPasswordRequiredState>,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some((error, retry_state));
    }
}

#[derive(Default)]
pub struct SignUpResendCodeSpy {
    pub code_required: Mutex<Option<(SignUpCodeRequiredState, String, ChannelType, u32)>>,
    pub error: Mutex<Option<FlowError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignUpResendCodeDelegate for SignUpResendCodeSpy {
    async fn on_code_required(
        &self,
        state: SignUpCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.code_required.lock().unwrap() = Some((state, sent_to, channel, code_length));
    }

    async fn on_resend_code_error(&self, error: FlowError) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some(error);
    }
}

#[derive(Default)]
pub struct SignInStartSpy {
    pub code_required: Mutex<Option<(SignInCodeRequiredState, String, ChannelType, u32)>>,
    pub password_required: Mutex<Option<SignInPasswordRequiredState>>,
    pub error: Mutex<Option<FlowError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignInStartDelegate for SignInStartSpy {
    async fn on_code_required(
        &self,
        state: SignInCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.code_required.lock().unwrap() = Some((state, sent_to, channel, code_length));
    }

    async fn on_password_required(&self, state: SignInPasswordRequiredState) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.password_required.lock().unwrap() = Some(state);
    }

    async fn on_error(&self, error: FlowError) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some(error);
    }
}

#[derive(Default)]
pub struct SignInPasswordStartSpy {
    pub account: Mutex<Option<UserAccount>>,
    pub code_required: Mutex<Option<(SignInCodeRequiredState, String, ChannelType, u32)>>,
    pub error: Mutex<Option<FlowError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignInPasswordStartDelegate for SignInPasswordStartSpy {
    async fn on_completed(&self, account: UserAccount) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.account.lock().unwrap() = Some(account);
    }

    async fn on_code_required(
        &self,
        state: SignInCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.code_required.lock().unwrap() = Some((state, sent_to, channel, code_length));
    }

    async fn on_error(&self, error: FlowError) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some(error);
    }
}

#[derive(Default)]
pub struct SignInVerifyCodeSpy {
    pub account: Mutex<Option<UserAccount>>,
    pub error: Mutex<Option<(FlowError, Option<SignInCodeRequiredState>)>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignInVerifyCodeDelegate for SignInVerifyCodeSpy {
    async fn on_completed(&self, account: UserAccount) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.account.lock().unwrap() = Some(account);
    }

    async fn on_verify_code_error(
        &self,
        error: FlowError,
        retry_state: Option<SignInCodeRequiredState>,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some((error, retry_state));
    }
}

#[derive(Default)]
pub struct SignInResendCodeSpy {
    pub code_required: Mutex<Option<(SignInCodeRequiredState, String, ChannelType, u32)>>,
    pub error: Mutex<Option<FlowError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignInResendCodeDelegate for SignInResendCodeSpy {
    async fn on_code_required(
        &self,
        state: SignInCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.code_required.lock().unwrap() = Some((state, sent_to, channel, code_length));
    }

    async fn on_resend_code_error(&self, error: FlowError) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some(error);
    }
}

#[derive(Default)]
pub struct SignInPasswordRequiredSpy {
    pub account: Mutex<Option<UserAccount>>,
    pub error: Mutex<Option<FlowError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignInPasswordRequiredDelegate for SignInPasswordRequiredSpy {
    async fn on_completed(&self, account: UserAccount) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.account.lock().unwrap() = Some(account);
    }

    async fn on_password_error(&self, error: FlowError) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some(error);
    }
}

#[derive(Default)]
pub struct SignInAfterResetSpy {
    pub account: Mutex<Option<UserAccount>>,
    pub error: Mutex<Option<FlowError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SignInAfterResetPasswordDelegate for SignInAfterResetSpy {
    async fn on_completed(&self, account: UserAccount) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.account.lock().unwrap() = Some(account);
    }

    async fn on_error(&self, error: FlowError) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some(error);
    }
}

#[derive(Default)]
pub struct ResetPasswordStartSpy {
    pub code_required: Mutex<Option<(ResetPasswordCodeRequiredState, String, ChannelType, u32)>>,
    pub error: Mutex<Option<FlowError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ResetPasswordStartDelegate for ResetPasswordStartSpy {
    async fn on_code_required(
        &self,
        state: ResetPasswordCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.code_required.lock().unwrap() = Some((state, sent_to, channel, code_length));
    }

    async fn on_error(&self, error: FlowError) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some(error);
    }
}

#[derive(Default)]
pub struct ResetPasswordVerifyCodeSpy {
    pub password_required: Mutex<Option<ResetPasswordRequiredState>>,
    pub error: Mutex<Option<(FlowError, Option<ResetPasswordCodeRequiredState>)>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ResetPasswordVerifyCodeDelegate for ResetPasswordVerifyCodeSpy {
    async fn on_password_required(&self, state: ResetPasswordRequiredState) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.password_required.lock().unwrap() = Some(state);
    }

    async fn on_verify_code_error(
        &self,
        error: FlowError,
        retry_state: Option<ResetPasswordCodeRequiredState>,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some((error, retry_state));
    }
}

#[derive(Default)]
pub struct ResetPasswordResendCodeSpy {
    pub code_required: Mutex<Option<(ResetPasswordCodeRequiredState, String, ChannelType, u32)>>,
    pub error: Mutex<Option<FlowError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ResetPasswordResendCodeDelegate for ResetPasswordResendCodeSpy {
    async fn on_code_required(
        &self,
        state: ResetPasswordCodeRequiredState,
        sent_to: String,
        channel: ChannelType,
        code_length: u32,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.code_required.lock().unwrap() = Some((state, sent_to, channel, code_length));
    }

    async fn on_resend_code_error(&self, error: FlowError) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some(error);
    }
}

#[derive(Default)]
pub struct ResetPasswordRequiredSpy {
    pub completed: Mutex<Option<SignInAfterResetPasswordState>>,
    pub error: Mutex<Option<(FlowError, Option<ResetPasswordRequiredState>)>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ResetPasswordRequiredDelegate for ResetPasswordRequiredSpy {
    async fn on_completed(&self, state: SignInAfterResetPasswordState) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.completed.lock().unwrap() = Some(state);
    }

    async fn on_password_error(
        &self,
        error: FlowError,
        retry_state: Option<ResetPasswordRequiredState>,
    ) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.error.lock().unwrap() = Some((error, retry_state));
    }
}
