//! Login flow: email step, code step, logout, and session restore

mod common;

use std::time::Duration;

use assistant_client::{
    AssistantError, AuthFlowState, ChatStatistics, Endpoint, RequestBody, Session, StatusKind,
    UiEvent, UserIdentity, ValidationError,
};
use common::{MockTransport, Reply, assistant, drain, sign_in, user_info};
use serde_json::json;
use tokio_test::assert_err;

#[tokio::test]
async fn malformed_emails_never_reach_the_backend() {
    let mock = MockTransport::new();
    let (assistant, mut events) = assistant(&mock);

    for email in ["", "   ", "a", "a@corp", "@corp.com", "a@corp.", "a b@corp.com", "a@b@c.com"] {
        let err = assert_err!(assistant.submit_email(email).await);
        assert!(
            matches!(err, AssistantError::Validation(ValidationError::InvalidEmail)),
            "{email:?} gave {err:?}"
        );
    }

    assert_eq!(mock.total(), 0);
    assert_eq!(assistant.auth_state(), AuthFlowState::AwaitingEmail);
    assert!(drain(&mut events).iter().all(|e| matches!(
        e,
        UiEvent::AuthStatus { kind: StatusKind::Error, message }
            if message == "Please enter a valid organization email"
    )));
}

#[tokio::test]
async fn email_then_code_authenticates_and_fetches_user() {
    let mock = MockTransport::new();
    let (assistant, mut events) = assistant(&mock);

    mock.push(Endpoint::InitiateAuth, Reply::success());
    assistant.submit_email("a@corp.com").await.unwrap();
    assert_eq!(
        assistant.auth_state(),
        AuthFlowState::AwaitingCode {
            email: "a@corp.com".to_string()
        }
    );

    mock.push(Endpoint::VerifyCode, Reply::success())
        .push(Endpoint::UserInfo, user_info("Ada Lovelace", "IT"));
    assistant.submit_code("123456").await.unwrap();

    let session = assistant.session();
    assert!(session.authenticated);
    assert_eq!(
        session.user,
        Some(UserIdentity {
            name: "Ada Lovelace".to_string(),
            department: "IT".to_string(),
        })
    );
    assert_eq!(mock.count(Endpoint::UserInfo), 1);

    let requests = mock.requests();
    assert_eq!(requests[0].body, RequestBody::Json(json!({"email": "a@corp.com"})));
    assert!(!requests[0].with_credentials);
    assert_eq!(
        requests[1].body,
        RequestBody::Json(json!({"email": "a@corp.com", "code": "123456"}))
    );
    assert!(requests[1].with_credentials);
    assert!(requests[2].with_credentials);

    let events = drain(&mut events);
    assert!(events.contains(&UiEvent::ShowCodeStep {
        email: "a@corp.com".to_string()
    }));
    assert!(events.contains(&UiEvent::ShowMainView));
    assert!(events.contains(&UiEvent::AuthStatus {
        message: "Authentication successful!".to_string(),
        kind: StatusKind::Success,
    }));
}

#[tokio::test]
async fn flow_stays_at_code_step_after_login() {
    let mock = MockTransport::new();
    let (assistant, _events) = assistant(&mock);
    sign_in(&assistant, &mock).await;

    assert!(matches!(
        assistant.auth_state(),
        AuthFlowState::AwaitingCode { .. }
    ));
}

#[tokio::test]
async fn rejected_email_keeps_email_step_with_backend_message() {
    let mock = MockTransport::new();
    let (assistant, mut events) = assistant(&mock);
    mock.push(
        Endpoint::InitiateAuth,
        Reply::rejected("Email domain not authorized"),
    );

    let err = assert_err!(assistant.submit_email("a@elsewhere.com").await);
    assert!(matches!(err, AssistantError::Application(_)));
    assert_eq!(assistant.auth_state(), AuthFlowState::AwaitingEmail);
    assert_eq!(
        drain(&mut events).last(),
        Some(&UiEvent::AuthStatus {
            message: "Email domain not authorized".to_string(),
            kind: StatusKind::Error,
        })
    );
}

#[tokio::test]
async fn unreachable_backend_shows_generic_send_failure() {
    let mock = MockTransport::new();
    let (assistant, mut events) = assistant(&mock);
    mock.push(Endpoint::InitiateAuth, Reply::offline());

    let err = assert_err!(assistant.submit_email("a@corp.com").await);
    assert!(matches!(err, AssistantError::Request(_)));
    assert_eq!(
        drain(&mut events).last(),
        Some(&UiEvent::AuthStatus {
            message: "Failed to send verification code. Please try again.".to_string(),
            kind: StatusKind::Error,
        })
    );
}

#[tokio::test]
async fn codes_of_wrong_length_never_reach_the_backend() {
    let mock = MockTransport::new();
    let (assistant, _events) = assistant(&mock);
    mock.push(Endpoint::InitiateAuth, Reply::success());
    assistant.submit_email("a@corp.com").await.unwrap();

    for code in ["", "12345", "1234567", "   12  "] {
        let err = assert_err!(assistant.submit_code(code).await);
        assert!(matches!(
            err,
            AssistantError::Validation(ValidationError::InvalidCode)
        ));
    }
    assert_eq!(mock.count(Endpoint::VerifyCode), 0);
}

#[tokio::test]
async fn wrong_code_stays_at_code_step() {
    let mock = MockTransport::new();
    let (assistant, mut events) = assistant(&mock);
    mock.push(Endpoint::InitiateAuth, Reply::success()).push(
        Endpoint::VerifyCode,
        Reply::status(401, json!({"status": "error", "message": "Invalid verification code"})),
    );
    assistant.submit_email("a@corp.com").await.unwrap();

    let err = assert_err!(assistant.submit_code("000000").await);
    assert!(matches!(err, AssistantError::Application(_)));
    assert!(!assistant.session().authenticated);
    assert!(matches!(
        assistant.auth_state(),
        AuthFlowState::AwaitingCode { .. }
    ));
    assert_eq!(
        drain(&mut events).last(),
        Some(&UiEvent::AuthStatus {
            message: "Invalid verification code".to_string(),
            kind: StatusKind::Error,
        })
    );
}

#[tokio::test]
async fn code_before_email_is_invalid_state() {
    let mock = MockTransport::new();
    let (assistant, _events) = assistant(&mock);

    let err = assert_err!(assistant.submit_code("123456").await);
    assert!(matches!(err, AssistantError::InvalidState(_)));
    assert_eq!(mock.total(), 0);
}

#[tokio::test]
async fn failed_identity_fetch_keeps_session_authenticated() {
    let mock = MockTransport::new();
    let (assistant, _events) = assistant(&mock);
    mock.push(Endpoint::InitiateAuth, Reply::success())
        .push(Endpoint::VerifyCode, Reply::success())
        .push(Endpoint::UserInfo, Reply::offline());

    assistant.submit_email("a@corp.com").await.unwrap();
    assistant.submit_code("123456").await.unwrap();

    let session = assistant.session();
    assert!(session.authenticated);
    assert_eq!(session.user, None);
}

#[tokio::test]
async fn go_back_returns_to_email_step() {
    let mock = MockTransport::new();
    let (assistant, mut events) = assistant(&mock);
    mock.push(Endpoint::InitiateAuth, Reply::success());
    assistant.submit_email("a@corp.com").await.unwrap();
    drain(&mut events);

    assistant.go_back();
    assert_eq!(assistant.auth_state(), AuthFlowState::AwaitingEmail);
    assert_eq!(
        drain(&mut events),
        vec![UiEvent::ShowEmailStep, UiEvent::ClearAuthStatus]
    );

    assistant.go_back();
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn logout_resets_everything_even_when_the_server_call_fails() {
    for logout_reply in [Reply::success(), Reply::offline(), Reply::status(500, json!({}))] {
        let mock = MockTransport::new();
        let (assistant, mut events) = assistant(&mock);
        sign_in(&assistant, &mock).await;
        mock.push(
            Endpoint::Chat,
            Reply::ok(json!({"status": "success", "response": "Hi"})),
        );
        assistant.send("hello").await.unwrap();
        drain(&mut events);

        mock.push(Endpoint::Logout, logout_reply);
        assistant.logout().await;

        assert_eq!(assistant.session(), Session::default());
        assert_eq!(assistant.auth_state(), AuthFlowState::AwaitingEmail);
        assert!(assistant.messages().is_empty());
        assert_eq!(assistant.statistics(), ChatStatistics::default());
        assert_eq!(mock.count(Endpoint::Logout), 1);

        let events = drain(&mut events);
        assert_eq!(events.last(), Some(&UiEvent::ShowAuthView));
        assert!(events.contains(&UiEvent::UserChanged(None)));
    }
}

#[tokio::test]
async fn restore_session_uses_existing_credential() {
    let mock = MockTransport::new();
    let (assistant, mut events) = assistant(&mock);
    mock.push(Endpoint::UserInfo, user_info("Grace Hopper", "Navy"));

    assert!(assistant.restore_session().await);
    assert!(assistant.session().authenticated);
    assert!(mock.requests()[0].with_credentials);
    assert_eq!(drain(&mut events).last(), Some(&UiEvent::ShowMainView));

    mock.push(Endpoint::UserInfo, user_info("Grace Hopper", "Navy"));
    assert!(assistant.restore_session().await);
    assert_eq!(assistant.session().user.unwrap().name, "Grace Hopper");
}

#[tokio::test]
async fn restore_session_without_credential_shows_login() {
    let mock = MockTransport::new();
    let (assistant, mut events) = assistant(&mock);
    mock.push(
        Endpoint::UserInfo,
        Reply::status(401, json!({"status": "error", "message": "Not authenticated"})),
    );

    assert!(!assistant.restore_session().await);
    assert!(assistant.session().is_empty());
    assert_eq!(
        drain(&mut events),
        vec![UiEvent::ShowEmailStep, UiEvent::ShowAuthView]
    );
}

#[tokio::test]
async fn expired_session_on_restore_returns_to_email_step() {
    let mock = MockTransport::new();
    let (assistant, mut events) = assistant(&mock);
    sign_in(&assistant, &mock).await;
    mock.push(
        Endpoint::UserInfo,
        Reply::status(401, json!({"status": "error", "message": "Session expired"})),
    );

    drain(&mut events);
    assert!(!assistant.restore_session().await);
    assert_eq!(assistant.session(), Session::default());
    assert!(drain(&mut events).contains(&UiEvent::UserChanged(None)));
    assert_eq!(assistant.auth_state(), AuthFlowState::AwaitingEmail);

    mock.push(Endpoint::InitiateAuth, Reply::success());
    assistant.submit_email("a@corp.com").await.unwrap();
}

#[tokio::test]
async fn logout_during_code_verification_wins() {
    let mock = MockTransport::new();
    let (assistant, _events) = assistant(&mock);
    mock.push(Endpoint::InitiateAuth, Reply::success());
    assistant.submit_email("a@corp.com").await.unwrap();

    mock.push(
        Endpoint::VerifyCode,
        Reply::success().after(Duration::from_millis(50)),
    )
    .push(Endpoint::UserInfo, user_info("Ada Lovelace", "IT"))
    .push(Endpoint::Logout, Reply::success());

    let (verified, ()) = tokio::join!(assistant.submit_code("123456"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assistant.logout().await;
    });

    assert!(matches!(verified, Err(AssistantError::InvalidState(_))));
    assert!(assistant.session().is_empty());
    assert_eq!(assistant.auth_state(), AuthFlowState::AwaitingEmail);
    assert_eq!(mock.count(Endpoint::UserInfo), 0);
}

#[tokio::test]
async fn malformed_email_at_code_step_is_a_validation_error() {
    let mock = MockTransport::new();
    let (assistant, _events) = assistant(&mock);
    mock.push(Endpoint::InitiateAuth, Reply::success());
    assistant.submit_email("a@corp.com").await.unwrap();

    let err = assert_err!(assistant.submit_email("not-an-email").await);
    assert!(matches!(
        err,
        AssistantError::Validation(ValidationError::InvalidEmail)
    ));
    assert_eq!(mock.count(Endpoint::InitiateAuth), 1);
}
