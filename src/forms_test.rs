use super::*;

fn signup_form() -> SignupForm {
    SignupForm {
        username: " bob ".to_owned(),
        password: "s3cret".to_owned(),
        confirm_password: "s3cret".to_owned(),
        name: "Bob".to_owned(),
        email: "  ".to_owned(),
        phone: " 010-1234-5678 ".to_owned(),
    }
}

// =============================================================
// Login
// =============================================================

#[test]
fn validate_login_input_trims_username() {
    let req = validate_login_input("  alice  ", "pw").unwrap();
    assert_eq!(req.username, "alice");
    assert_eq!(req.password, "pw");
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "pw").unwrap_err(), ValidationError::MissingUsername);
    assert_eq!(validate_login_input("alice", "").unwrap_err(), ValidationError::MissingPassword);
}

#[test]
fn validate_login_input_keeps_password_whitespace() {
    assert_eq!(validate_login_input("alice", " pw ").unwrap().password, " pw ");
}

// =============================================================
// Signup
// =============================================================

#[test]
fn validate_signup_input_builds_request_and_drops_blank_fields() {
    let req = validate_signup_input(&signup_form()).unwrap();
    assert_eq!(req.username, "bob");
    assert_eq!(req.name.as_deref(), Some("Bob"));
    assert_eq!(req.email, None);
    assert_eq!(req.phone.as_deref(), Some("010-1234-5678"));
}

#[test]
fn validate_signup_input_rejects_password_mismatch() {
    let form = SignupForm { confirm_password: "different".to_owned(), ..signup_form() };
    let err = validate_signup_input(&form).unwrap_err();
    assert_eq!(err, ValidationError::PasswordMismatch);
    assert_eq!(err.to_string(), "passwords do not match");
}

#[test]
fn validate_signup_input_checks_required_fields_first() {
    let form = SignupForm { username: String::new(), confirm_password: "x".to_owned(), ..signup_form() };
    assert_eq!(validate_signup_input(&form).unwrap_err(), ValidationError::MissingUsername);
}

// =============================================================
// Project code
// =============================================================

#[test]
fn validate_project_code_accepts_codes_and_trims() {
    assert_eq!(validate_project_code(" CHAT ").unwrap(), "CHAT");
    assert_eq!(validate_project_code("my_proj-2").unwrap(), "my_proj-2");
}

#[test]
fn validate_project_code_rejects_path_characters() {
    for bad in ["", "   ", "../admin", "a/b", "a?b=1", "코드"] {
        assert_eq!(validate_project_code(bad).unwrap_err(), ValidationError::InvalidProjectCode, "{bad:?}");
    }
}
