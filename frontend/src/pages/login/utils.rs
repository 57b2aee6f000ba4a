use crate::api::{ApiError, LoginRequest};

/// Route opened after a successful sign-in.
pub const AFTER_LOGIN_ROUTE: &str = "/dashboard";

pub fn validate_credentials(username: &str, password: &str) -> Result<LoginRequest, ApiError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })
}

pub fn navigate(target: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_required() {
        assert_eq!(
            validate_credentials("  ", "pw").unwrap_err().to_string(),
            "Username is required"
        );
        assert_eq!(
            validate_credentials("alice", "").unwrap_err().to_string(),
            "Password is required"
        );
    }

    #[test]
    fn username_is_trimmed_but_password_is_not() {
        let request = validate_credentials(" alice ", " secret ").unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, " secret ");
    }
}
