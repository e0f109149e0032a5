//! Local input validation for login, signup, and project actions.
//!
//! These checks run before any request is built, so a validation failure
//! never reaches the transport.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::net::types::{LoginRequest, SignupRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("enter a username")]
    MissingUsername,
    #[error("enter a password")]
    MissingPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("project code must be letters, digits, '-' or '_'")]
    InvalidProjectCode,
}

/// Raw signup form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Trim the username and require both fields. The password is sent as typed.
///
/// # Errors
///
/// Returns [`ValidationError::MissingUsername`] or [`ValidationError::MissingPassword`].
pub fn validate_login_input(username: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::MissingUsername);
    }
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

/// Check the signup form and build the request body; blank optional fields are omitted.
///
/// # Errors
///
/// Returns a [`ValidationError`] for a missing username/password or mismatched confirmation.
pub fn validate_signup_input(form: &SignupForm) -> Result<SignupRequest, ValidationError> {
    let LoginRequest { username, password } = validate_login_input(&form.username, &form.password)?;
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(SignupRequest {
        username,
        password,
        name: optional_field(&form.name),
        email: optional_field(&form.email),
        phone: optional_field(&form.phone),
    })
}

/// Trim a project code and require `[A-Za-z0-9_-]+`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidProjectCode`] otherwise.
pub fn validate_project_code(code: &str) -> Result<String, ValidationError> {
    let code = code.trim();
    let valid = !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ValidationError::InvalidProjectCode);
    }
    Ok(code.to_owned())
}

fn optional_field(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
