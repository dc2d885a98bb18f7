mod support;

use nativeauth_app::dto::{
    SignInChallengeResponse, SignInInitiateApiError, SignInInitiateCode, SignInInitiateResponse,
    SignInTokenApiError, SignInTokenCode,
};
use nativeauth_app::{ApiId, NetworkResult};
use nativeauth_domain::{
    ChallengeType, ChannelType, ContinuationToken, FlowError, OtpCode, Password, SignInParameters,
};
use pretty_assertions::assert_eq;
use support::*;

fn initiate_response(token: &str) -> SignInInitiateResponse {
    SignInInitiateResponse {
        challenge_type: None,
        credential_token: Some(ContinuationToken::from(token)),
    }
}

fn password_challenge(token: &str) -> SignInChallengeResponse {
    SignInChallengeResponse {
        challenge_type: Some(ChallengeType::Password),
        challenge_target_label: None,
        challenge_channel: None,
        code_length: None,
        credential_token: Some(ContinuationToken::from(token)),
    }
}

fn oob_challenge(token: &str) -> SignInChallengeResponse {
    SignInChallengeResponse {
        challenge_type: Some(ChallengeType::Oob),
        challenge_target_label: Some("u***@contoso.com".to_string()),
        challenge_channel: Some(ChannelType::Email),
        code_length: Some(6),
        credential_token: Some(ContinuationToken::from(token)),
    }
}

#[tokio::test]
async fn test_password_sign_in_completes_in_one_invocation() {
    let harness = harness();
    harness
        .sign_in
        .initiate_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(initiate_response("CT1")));
    harness
        .sign_in
        .challenge_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(password_challenge("CT2")));
    harness
        .sign_in
        .token_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(token_response()));

    let spy = SignInPasswordStartSpy::default();
    harness
        .client
        .sign_in_with_password(
            SignInParameters::new("user@contoso.com")
                .password(Password::from("Passw0rd!"))
                .scopes(vec!["openid".to_string()]),
            &spy,
        )
        .await;

    let account = spy.account.lock().unwrap().take().expect("account expected");
    assert_eq!(account.username.to_string(), "user@contoso.com");
    assert_eq!(account.access_token(), Some("at-1"));
    assert_eq!(account.tokens.scopes, vec!["openid".to_string(), "profile".to_string()]);
    assert_eq!(
        *harness.sign_in.token_calls.lock().unwrap(),
        vec![("CT2".to_string(), "password".to_string())]
    );
    assert_eq!(harness.cache.saves.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_code_sign_in_suspends_then_completes() {
    let harness = harness();
    harness
        .sign_in
        .initiate_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(initiate_response("CT1")));
    harness
        .sign_in
        .challenge_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(oob_challenge("CT2")));

    let spy = SignInStartSpy::default();
    harness
        .client
        .sign_in(SignInParameters::new("user@contoso.com"), &spy)
        .await;

    let (state, sent_to, channel, code_length) =
        spy.code_required.lock().unwrap().take().expect("code required expected");
    assert_eq!(sent_to, "u***@contoso.com");
    assert_eq!(channel, ChannelType::Email);
    assert_eq!(code_length, 6);

    harness
        .sign_in
        .token_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(token_response()));
    let code_spy = SignInVerifyCodeSpy::default();
    state.submit_code(OtpCode::from("123456"), &code_spy).await;

    let account = code_spy.account.lock().unwrap().take().expect("account expected");
    assert_eq!(account.username.to_string(), "user@contoso.com");
    assert_eq!(
        *harness.sign_in.token_calls.lock().unwrap(),
        vec![("CT2".to_string(), "oob".to_string())]
    );
}

#[tokio::test]
async fn test_password_required_continuation_without_password() {
    let harness = harness();
    harness
        .sign_in
        .initiate_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(initiate_response("CT1")));
    harness
        .sign_in
        .challenge_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(password_challenge("CT2")));

    let spy = SignInStartSpy::default();
    harness
        .client
        .sign_in(SignInParameters::new("user@contoso.com"), &spy)
        .await;

    let state = spy.password_required.lock().unwrap().take().expect("password required expected");

    harness
        .sign_in
        .token_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(token_response()));
    let password_spy = SignInPasswordRequiredSpy::default();
    state.submit_password(Password::from("Passw0rd!"), &password_spy).await;

    assert!(password_spy.account.lock().unwrap().is_some());
}

#[tokio::test]
async fn test_invalid_credentials_is_terminal() {
    let harness = harness();
    harness
        .sign_in
        .initiate_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(initiate_response("CT1")));
    harness
        .sign_in
        .challenge_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(password_challenge("CT2")));
    harness
        .sign_in
        .token_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::ApiError(SignInTokenApiError {
            error: SignInTokenCode::InvalidCredentials,
            error_description: None,
            credential_token: None,
        }));

    let spy = SignInPasswordStartSpy::default();
    harness
        .client
        .sign_in_with_password(
            SignInParameters::new("user@contoso.com").password(Password::from("wrong")),
            &spy,
        )
        .await;

    assert_eq!(*spy.error.lock().unwrap(), Some(FlowError::InvalidCredentials));
    assert!(spy.account.lock().unwrap().is_none());
    assert_eq!(harness.cache.saves.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_wrong_code_retry_then_success() {
    let harness = harness();
    harness
        .sign_in
        .initiate_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(initiate_response("CT1")));
    harness
        .sign_in
        .challenge_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(oob_challenge("CT2")));

    let spy = SignInStartSpy::default();
    harness
        .client
        .sign_in(SignInParameters::new("user@contoso.com"), &spy)
        .await;
    let (state, ..) = spy.code_required.lock().unwrap().take().expect("code required");

    harness
        .sign_in
        .token_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::ApiError(SignInTokenApiError {
            error: SignInTokenCode::InvalidOobValue,
            error_description: None,
            credential_token: Some(ContinuationToken::from("CT3")),
        }));
    let code_spy = SignInVerifyCodeSpy::default();
    state.submit_code(OtpCode::from("000000"), &code_spy).await;

    let (error, retry_state) = code_spy.error.lock().unwrap().take().expect("error expected");
    assert_eq!(error, FlowError::InvalidCode);
    let retry_state = retry_state.expect("retry state expected");
    assert_eq!(retry_state.code_length(), 6);

    harness
        .sign_in
        .token_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(token_response()));
    let retry_spy = SignInVerifyCodeSpy::default();
    retry_state.submit_code(OtpCode::from("123456"), &retry_spy).await;

    assert!(retry_spy.account.lock().unwrap().is_some());
    assert_eq!(
        *harness.sign_in.token_calls.lock().unwrap(),
        vec![
            ("CT2".to_string(), "oob".to_string()),
            ("CT3".to_string(), "oob".to_string())
        ]
    );
}

#[tokio::test]
async fn test_resend_code_issues_a_fresh_state() {
    let harness = harness();
    harness
        .sign_in
        .initiate_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(initiate_response("CT1")));
    harness
        .sign_in
        .challenge_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(oob_challenge("CT2")));

    let spy = SignInStartSpy::default();
    harness
        .client
        .sign_in(SignInParameters::new("user@contoso.com"), &spy)
        .await;
    let (state, ..) = spy.code_required.lock().unwrap().take().expect("code required");

    harness
        .sign_in
        .challenge_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(oob_challenge("CT3")));
    let resend_spy = SignInResendCodeSpy::default();
    state.resend_code(&resend_spy).await;

    let (new_state, ..) =
        resend_spy.code_required.lock().unwrap().take().expect("code required expected");

    harness
        .sign_in
        .token_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(token_response()));
    let code_spy = SignInVerifyCodeSpy::default();
    new_state.submit_code(OtpCode::from("123456"), &code_spy).await;

    assert_eq!(
        *harness.sign_in.token_calls.lock().unwrap(),
        vec![("CT3".to_string(), "oob".to_string())]
    );
}

#[tokio::test]
async fn test_user_not_found_on_initiate() {
    let harness = harness();
    harness
        .sign_in
        .initiate_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::ApiError(SignInInitiateApiError {
            error: SignInInitiateCode::UserNotFound,
            error_description: None,
        }));

    let spy = SignInStartSpy::default();
    harness
        .client
        .sign_in(SignInParameters::new("missing@contoso.com"), &spy)
        .await;

    assert_eq!(*spy.error.lock().unwrap(), Some(FlowError::UserNotFound));
    assert!(harness.sign_in.challenge_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_redirect_challenge_reports_browser_required() {
    let harness = harness();
    harness
        .sign_in
        .initiate_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(initiate_response("CT1")));
    harness
        .sign_in
        .challenge_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(SignInChallengeResponse {
            challenge_type: Some(ChallengeType::Redirect),
            challenge_target_label: None,
            challenge_channel: None,
            code_length: None,
            credential_token: None,
        }));

    let spy = SignInStartSpy::default();
    harness
        .client
        .sign_in(SignInParameters::new("user@contoso.com"), &spy)
        .await;

    assert_eq!(*spy.error.lock().unwrap(), Some(FlowError::BrowserRequired));
}

#[tokio::test]
async fn test_each_invocation_records_one_telemetry_event() {
    let harness = harness();
    harness
        .sign_in
        .initiate_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(initiate_response("CT1")));
    harness
        .sign_in
        .challenge_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(oob_challenge("CT2")));

    let spy = SignInStartSpy::default();
    harness
        .client
        .sign_in(SignInParameters::new("user@contoso.com"), &spy)
        .await;
    let (state, ..) = spy.code_required.lock().unwrap().take().expect("code required");

    harness
        .sign_in
        .token_responses
        .lock()
        .unwrap()
        .push_back(NetworkResult::Success(token_response()));
    let code_spy = SignInVerifyCodeSpy::default();
    state.submit_code(OtpCode::from("123456"), &code_spy).await;

    let events = harness.telemetry.events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].api_id, ApiId::SignInStart);
    assert!(events[0].success);
    assert_eq!(events[1].api_id, ApiId::SignInSubmitCode);
    assert!(events[1].success);
    assert_eq!(events[0].correlation_id, events[1].correlation_id);
}
