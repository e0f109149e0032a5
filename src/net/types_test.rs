use super::*;
use serde_json::json;

// =============================================================
// Envelope
// =============================================================

#[test]
fn envelope_parses_full_success_body() {
    let env: Envelope<UserProfile> = serde_json::from_value(json!({
        "success": true,
        "code": 200,
        "message": "Success",
        "data": { "username": "alice", "email": "alice@example.com" }
    }))
    .unwrap();
    assert!(env.success);
    assert_eq!(env.code, 200);
    assert_eq!(env.message(), Some("Success"));
    assert_eq!(env.data.unwrap().username.as_deref(), Some("alice"));
}

#[test]
fn envelope_tolerates_null_message_code_and_missing_data() {
    let env: Envelope<Value> =
        serde_json::from_value(json!({ "success": false, "code": null, "message": null })).unwrap();
    assert!(!env.success);
    assert_eq!(env.code, 0);
    assert_eq!(env.message(), None);
    assert!(env.data.is_none());
}

#[test]
fn envelope_accepts_codes_outside_u16() {
    let env: Envelope<Value> =
        serde_json::from_value(json!({ "success": false, "code": -1, "message": "bad input" })).unwrap();
    assert_eq!(env.code, -1);
    assert_eq!(env.message(), Some("bad input"));
}

#[test]
fn envelope_message_ignores_blank_text() {
    let env = Envelope::<Value> { success: false, code: 403, message: "   ".to_owned(), data: None };
    assert_eq!(env.message(), None);
}

#[test]
fn envelope_into_data_errors_when_absent() {
    let env = Envelope::<UserProfile>::empty(200);
    assert_eq!(env.into_data(), Err(ApiError::MissingData));
}

#[test]
fn envelope_decode_types_payload() {
    let env = Envelope { success: true, code: 200, message: String::new(), data: Some(json!({ "url": "http://x/chat" })) };
    let typed = env.decode::<ProjectAccess>().unwrap();
    assert_eq!(typed.into_data().unwrap().url, "http://x/chat");
}

#[test]
fn envelope_decode_reports_shape_mismatch() {
    let env = Envelope { success: true, code: 200, message: String::new(), data: Some(json!([1, 2, 3])) };
    let err = env.decode::<ProjectAccess>().unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================
// UserProfile
// =============================================================

#[test]
fn user_profile_drops_unknown_backend_fields() {
    let profile: UserProfile = serde_json::from_value(json!({
        "userId": 7,
        "username": "alice",
        "password": null,
        "status": "ACTIVE",
        "regDt": "2024-01-01"
    }))
    .unwrap();
    assert_eq!(profile, UserProfile::with_username("alice"));
    let serialized = serde_json::to_value(&profile).unwrap();
    assert_eq!(serialized, json!({ "username": "alice" }));
}

#[test]
fn user_profile_merge_only_overwrites_set_fields() {
    let mut profile = UserProfile {
        username: Some("alice".to_owned()),
        name: Some("Alice".to_owned()),
        ..UserProfile::default()
    };
    profile.merge(UserProfile { email: Some("a@b.com".to_owned()), ..UserProfile::default() });
    assert_eq!(profile.username.as_deref(), Some("alice"));
    assert_eq!(profile.name.as_deref(), Some("Alice"));
    assert_eq!(profile.email.as_deref(), Some("a@b.com"));
    assert_eq!(profile.phone, None);
}

#[test]
fn user_profile_display_name_prefers_name_then_username() {
    let mut profile = UserProfile::with_username("alice");
    assert_eq!(profile.display_name(), "alice");
    profile.name = Some("Alice Kim".to_owned());
    assert_eq!(profile.display_name(), "Alice Kim");
    assert_eq!(UserProfile::default().display_name(), "unknown user");
}

// =============================================================
// Auth payloads
// =============================================================

#[test]
fn login_request_debug_redacts_password() {
    let req = LoginRequest { username: "alice".to_owned(), password: "hunter2".to_owned() };
    let rendered = format!("{req:?}");
    assert!(rendered.contains("alice"));
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn signup_request_omits_unset_optional_fields() {
    let req = SignupRequest {
        username: "alice".to_owned(),
        password: "pw".to_owned(),
        name: None,
        email: Some("a@b.com".to_owned()),
        phone: None,
    };
    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        json!({ "username": "alice", "password": "pw", "email": "a@b.com" })
    );
    assert!(!format!("{req:?}").contains("\"pw\""));
}

#[test]
fn login_data_ignores_access_token() {
    let data: LoginData =
        serde_json::from_value(json!({ "accessToken": "jwt", "user": { "username": "alice" } })).unwrap();
    assert_eq!(data.user, Some(UserProfile::with_username("alice")));
}

#[test]
fn availability_accepts_bool_and_object() {
    let flag: Availability = serde_json::from_value(json!(true)).unwrap();
    let detailed: Availability = serde_json::from_value(json!({ "available": false })).unwrap();
    assert!(flag.is_available());
    assert!(!detailed.is_available());
}

// =============================================================
// Projects
// =============================================================

#[test]
fn project_parses_camel_case_fields() {
    let project: Project = serde_json::from_value(json!({
        "projectCode": "CHAT",
        "projectName": "Chat",
        "description": "Realtime chat",
        "isJoined": true,
        "role": "member",
        "status": "ACTIVE"
    }))
    .unwrap();
    assert_eq!(project.project_code, "CHAT");
    assert!(project.is_joined);
    assert_eq!(project.icon, None);
}

#[test]
fn project_defaults_is_joined_to_false() {
    let project: Project =
        serde_json::from_value(json!({ "projectCode": "SHOP", "projectName": "Shop" })).unwrap();
    assert!(!project.is_joined);
}
