/// Collaborator interfaces consumed by the flow controllers. Transport,
/// storage, and token issuance live behind these traits; the controllers only
/// ever see their typed results.
use async_trait::async_trait;
use nativeauth_domain::{
    AuthTokens, CacheError, ContinuationToken, CorrelationId, ExchangeError, NativeAuthConfig,
    OtpCode, Password, ResetPasswordParameters, SignInParameters, SignUpParameters, TokenResponse,
    TransportError,
};
use serde_json::{Map, Value};

use crate::dto::{
    ResetPasswordChallengeApiError, ResetPasswordChallengeResponse, ResetPasswordContinueApiError,
    ResetPasswordContinueResponse, ResetPasswordPollApiError, ResetPasswordPollCompletionResponse,
    ResetPasswordStartApiError, ResetPasswordStartResponse, ResetPasswordSubmitApiError,
    ResetPasswordSubmitResponse, SignInChallengeApiError, SignInChallengeResponse,
    SignInInitiateApiError, SignInInitiateResponse, SignInTokenApiError, SignUpChallengeApiError,
    SignUpChallengeResponse, SignUpContinueApiError, SignUpContinueResponse, SignUpStartApiError,
    SignUpStartResponse,
};
use crate::telemetry::TelemetryEvent;

/// Result of one network round trip: the raw success payload, the typed error
/// payload, or a transport-level failure. Validators classify all three.
#[derive(Debug, Clone)]
pub enum NetworkResult<T, E> {
    Success(T),
    ApiError(E),
    Failure(TransportError),
}

/// Grant submitted on a sign-up continue request.
#[derive(Debug, Clone)]
pub enum SignUpGrant {
    OobCode(OtpCode),
    Password(Password),
    Attributes(Map<String, Value>),
}

#[derive(Debug, Clone)]
pub struct SignUpContinueRequest {
    pub signup_token: ContinuationToken,
    pub grant: SignUpGrant,
    pub correlation_id: CorrelationId,
}

/// Grant submitted on a sign-in token request.
#[derive(Debug, Clone)]
pub enum SignInGrant {
    Password(Password),
    OobCode(OtpCode),
    /// Continuation token issued by a completed reset-password flow.
    ContinuationToken,
}

#[derive(Debug, Clone)]
pub struct SignInTokenRequest {
    pub credential_token: ContinuationToken,
    pub grant: SignInGrant,
    pub scopes: Vec<String>,
    pub correlation_id: CorrelationId,
}

/// Builds and sends the sign-up requests, one method per step kind.
#[async_trait]
pub trait SignUpRequestProvider: Send + Sync {
    async fn start(
        &self,
        params: &SignUpParameters,
    ) -> NetworkResult<SignUpStartResponse, SignUpStartApiError>;

    async fn challenge(
        &self,
        signup_token: &ContinuationToken,
        correlation_id: CorrelationId,
    ) -> NetworkResult<SignUpChallengeResponse, SignUpChallengeApiError>;

    async fn continue_flow(
        &self,
        request: &SignUpContinueRequest,
    ) -> NetworkResult<SignUpContinueResponse, SignUpContinueApiError>;
}

/// Builds and sends the sign-in requests.
#[async_trait]
pub trait SignInRequestProvider: Send + Sync {
    async fn initiate(
        &self,
        params: &SignInParameters,
    ) -> NetworkResult<SignInInitiateResponse, SignInInitiateApiError>;

    async fn challenge(
        &self,
        credential_token: &ContinuationToken,
        correlation_id: CorrelationId,
    ) -> NetworkResult<SignInChallengeResponse, SignInChallengeApiError>;

    async fn token(
        &self,
        request: &SignInTokenRequest,
    ) -> NetworkResult<TokenResponse, SignInTokenApiError>;
}

/// Builds and sends the reset-password requests.
#[async_trait]
pub trait ResetPasswordRequestProvider: Send + Sync {
    async fn start(
        &self,
        params: &ResetPasswordParameters,
    ) -> NetworkResult<ResetPasswordStartResponse, ResetPasswordStartApiError>;

    async fn challenge(
        &self,
        password_reset_token: &ContinuationToken,
        correlation_id: CorrelationId,
    ) -> NetworkResult<ResetPasswordChallengeResponse, ResetPasswordChallengeApiError>;

    async fn continue_flow(
        &self,
        password_reset_token: &ContinuationToken,
        code: &OtpCode,
        correlation_id: CorrelationId,
    ) -> NetworkResult<ResetPasswordContinueResponse, ResetPasswordContinueApiError>;

    async fn submit(
        &self,
        password_submit_token: &ContinuationToken,
        new_password: &Password,
        correlation_id: CorrelationId,
    ) -> NetworkResult<ResetPasswordSubmitResponse, ResetPasswordSubmitApiError>;

    async fn poll_completion(
        &self,
        password_reset_token: &ContinuationToken,
        correlation_id: CorrelationId,
    ) -> NetworkResult<ResetPasswordPollCompletionResponse, ResetPasswordPollApiError>;
}

/// Persists issued tokens. Implementations are shared across concurrent flow
/// invocations and must serialize access internally.
#[async_trait]
pub trait CacheAccessor: Send + Sync {
    async fn save(&self, tokens: &AuthTokens, config: &NativeAuthConfig) -> Result<(), CacheError>;
}

/// Validates a raw token response and turns it into usable credentials.
#[async_trait]
pub trait CredentialExchanger: Send + Sync {
    async fn exchange(
        &self,
        response: TokenResponse,
        config: &NativeAuthConfig,
    ) -> Result<AuthTokens, ExchangeError>;
}

/// Receives one event per public flow invocation. Side-effecting only; never
/// affects control flow.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, event: TelemetryEvent);
}
