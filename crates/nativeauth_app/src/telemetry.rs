use std::sync::Arc;

use chrono::{DateTime, Utc};
use nativeauth_domain::CorrelationId;
use tracing::debug;

use crate::services::TelemetrySink;

/// Public entry point an event was recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ApiId {
    SignUpStart,
    SignUpSubmitCode,
    SignUpResendCode,
    SignUpSubmitPassword,
    SignUpSubmitAttributes,
    SignInStart,
    SignInSubmitCode,
    SignInResendCode,
    SignInSubmitPassword,
    SignInAfterResetPassword,
    ResetPasswordStart,
    ResetPasswordSubmitCode,
    ResetPasswordResendCode,
    ResetPasswordSubmitPassword,
}

/// One completed flow invocation, regardless of how many internal steps it
/// took.
#[derive(Debug, Clone)]
pub struct TelemetryEvent {
    pub api_id: ApiId,
    pub correlation_id: CorrelationId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub success: bool,
}

/// Scoped telemetry for one controller entry point. Created before the first
/// network call; emits exactly one event when dropped, on every exit path.
/// An invocation counts as failed unless `succeed` was called.
pub(crate) struct TelemetryScope {
    sink: Arc<dyn TelemetrySink>,
    api_id: ApiId,
    correlation_id: CorrelationId,
    started_at: DateTime<Utc>,
    succeeded: bool,
}

impl TelemetryScope {
    pub fn start(sink: Arc<dyn TelemetrySink>, api_id: ApiId, correlation_id: CorrelationId) -> Self {
        debug!(correlation_id = %correlation_id, api_id = %api_id, "flow invocation started");
        Self { sink, api_id, correlation_id, started_at: Utc::now(), succeeded: false }
    }

    /// Marks the invocation successful. Continuation outcomes count as
    /// success; the flow suspended where it was supposed to.
    pub fn succeed(&mut self) {
        self.succeeded = true;
    }
}

impl Drop for TelemetryScope {
    fn drop(&mut self) {
        let event = TelemetryEvent {
            api_id: self.api_id,
            correlation_id: self.correlation_id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            success: self.succeeded,
        };
        debug!(
            correlation_id = %self.correlation_id,
            api_id = %self.api_id,
            success = self.succeeded,
            "flow invocation finished"
        );
        self.sink.record(event);
    }
}
