use super::*;
use crate::net::scripted::{client, network_down, ok, ok_empty, status, unauthorized};
use serde_json::json;

// =============================================================
// Exempt routes
// =============================================================

#[test]
fn login_signup_and_refresh_are_exempt() {
    assert!(is_refresh_exempt("/auth/login"));
    assert!(is_refresh_exempt("/auth/signup"));
    assert!(is_refresh_exempt("/auth/refresh"));
    assert!(!is_refresh_exempt("/auth/user"));
    assert!(!is_refresh_exempt("/portal/projects"));
}

#[test]
fn exemption_ignores_surrounding_slashes() {
    assert!(is_refresh_exempt("auth/login"));
    assert!(is_refresh_exempt("auth/signup/"));
    assert!(!is_refresh_exempt("auth/user"));
}

#[test]
fn attempt_defaults_to_initial() {
    assert_eq!(Attempt::default(), Attempt::Initial);
}

// =============================================================
// Pass-through
// =============================================================

#[tokio::test]
async fn success_is_returned_without_refresh() {
    let api = client(vec![ok(json!({ "username": "alice" }))]);
    let env = api.execute(&ApiRequest::get("/auth/user")).await.unwrap();
    assert_eq!(env.data, Some(json!({ "username": "alice" })));
    assert_eq!(api.transport().paths(), vec!["/auth/user"]);
}

#[tokio::test]
async fn non_401_errors_pass_through_without_refresh() {
    let api = client(vec![status(403, "")]);
    let err = api.execute(&ApiRequest::get("/portal/projects")).await.unwrap_err();
    assert_eq!(err.to_string(), "check credentials");
    assert_eq!(api.transport().paths(), vec!["/portal/projects"]);
}

#[tokio::test]
async fn network_error_is_not_retried() {
    let api = client(vec![network_down()]);
    let err = api.execute(&ApiRequest::get("/auth/user")).await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
    assert_eq!(api.transport().paths().len(), 1);
}

// =============================================================
// Refresh and replay
// =============================================================

#[tokio::test]
async fn single_401_triggers_one_refresh_and_one_replay() {
    let api = client(vec![unauthorized(), ok_empty(), ok(json!([]))]);
    let env = api.execute(&ApiRequest::get("/portal/projects")).await.unwrap();
    assert!(env.success);
    assert_eq!(
        api.transport().paths(),
        vec!["/portal/projects", "/auth/refresh", "/portal/projects"]
    );
    assert_eq!(api.transport().remaining(), 0);
}

#[tokio::test]
async fn replay_preserves_method_and_body() {
    let api = client(vec![unauthorized(), ok_empty(), ok(json!({ "joined": true }))]);
    let request = ApiRequest::post("/portal/projects/CHAT/join").with_body(json!({ "note": "hi" }));
    api.execute(&request).await.unwrap();
    let sent = api.transport().requests();
    assert_eq!(sent[0], request);
    assert_eq!(sent[2], request);
    assert_eq!(sent[1].method, reqwest::Method::POST);
    assert_eq!(sent[1].body, None);
}

#[tokio::test]
async fn second_401_after_replay_does_not_refresh_again() {
    let api = client(vec![unauthorized(), ok_empty(), status(401, "still expired")]);
    let err = api.execute(&ApiRequest::get("/auth/user")).await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 401, message: "still expired".to_owned() });
    let refreshes = api.transport().paths().iter().filter(|p| *p == "/auth/refresh").count();
    assert_eq!(refreshes, 1);
    assert_eq!(api.transport().paths().len(), 3);
}

#[tokio::test]
async fn failed_refresh_returns_refresh_error_not_original() {
    let api = client(vec![
        status(401, "access token expired"),
        status(401, "refresh token is invalid"),
    ]);
    let err = api.execute(&ApiRequest::get("/auth/user")).await.unwrap_err();
    assert_eq!(err.to_string(), "refresh token is invalid");
    assert_eq!(api.transport().paths(), vec!["/auth/user", "/auth/refresh"]);
}

#[tokio::test]
async fn refresh_rejected_inside_200_envelope_counts_as_failure() {
    let envelope_401 = Ok(crate::net::transport::RawResponse::new(
        200,
        Some(json!({ "success": false, "code": 401, "message": "no refresh token" })),
    ));
    let api = client(vec![unauthorized(), envelope_401]);
    let err = api.execute(&ApiRequest::get("/auth/user")).await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 401, message: "no refresh token".to_owned() });
    assert_eq!(api.transport().paths().len(), 2);
}

#[tokio::test]
async fn refresh_network_failure_surfaces_network_error() {
    let api = client(vec![unauthorized(), network_down()]);
    let err = api.execute(&ApiRequest::get("/auth/user")).await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
}

// =============================================================
// Exempt routes never refresh
// =============================================================

#[tokio::test]
async fn login_401_never_triggers_refresh() {
    let api = client(vec![status(401, "wrong password")]);
    let err = api
        .execute(&ApiRequest::post("/auth/login").with_body(json!({ "username": "a", "password": "b" })))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "wrong password");
    assert_eq!(api.transport().paths(), vec!["/auth/login"]);
}

#[tokio::test]
async fn signup_401_never_triggers_refresh() {
    let api = client(vec![unauthorized()]);
    let err = api.execute(&ApiRequest::post("/auth/signup")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(api.transport().paths(), vec!["/auth/signup"]);
}

#[tokio::test]
async fn relative_login_path_401_never_triggers_refresh() {
    let api = client(vec![status(401, "wrong password"), status(401, "no refresh")]);
    let err = api.execute(&ApiRequest::post("auth/login")).await.unwrap_err();
    assert_eq!(err.to_string(), "wrong password");
    assert_eq!(api.transport().paths(), vec!["/auth/login"]);
    assert_eq!(api.transport().remaining(), 1);
}

#[tokio::test]
async fn hand_built_relative_signup_request_is_still_exempt() {
    let request = ApiRequest { method: reqwest::Method::POST, path: "auth/signup".to_owned(), body: None };
    let api = client(vec![unauthorized()]);
    let err = api.execute(&request).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(api.transport().paths(), vec!["auth/signup"]);
}

#[tokio::test]
async fn refresh_route_401_does_not_recurse() {
    let api = client(vec![unauthorized()]);
    let err = api.execute(&ApiRequest::post("/auth/refresh")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(api.transport().paths(), vec!["/auth/refresh"]);
}

// =============================================================
// Typed helpers
// =============================================================

#[tokio::test]
async fn post_json_serializes_body_and_decodes_payload() {
    let api = client(vec![ok(json!({ "url": "http://localhost:8081/chat" }))]);
    let env: Envelope<crate::net::types::ProjectAccess> =
        api.post_json("/portal/projects/CHAT/access", &json!({ "k": 1 })).await.unwrap();
    assert_eq!(env.into_data().unwrap().url, "http://localhost:8081/chat");
    assert_eq!(api.transport().requests()[0].body, Some(json!({ "k": 1 })));
}

#[tokio::test]
async fn get_reports_decode_error_for_wrong_payload_shape() {
    let api = client(vec![ok(json!("not a list"))]);
    let err = api.get::<Vec<crate::net::types::Project>>("/portal/projects").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
