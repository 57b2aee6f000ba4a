use crate::{
    api::{ApiError, RegisterRequest},
    session::validate_registration,
};

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
    pub bio: String,
    pub skills: String,
    pub interests: String,
}

impl RegisterForm {
    pub fn to_request(&self) -> Result<RegisterRequest, ApiError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ApiError::validation("Username is required"));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::validation("A valid email is required"));
        }
        if self.password.is_empty() {
            return Err(ApiError::validation("Password is required"));
        }
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            password_confirm: self.password_confirm.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            bio: self.bio.trim().to_string(),
            skills: split_list(&self.skills),
            interests: split_list(&self.interests),
        };
        validate_registration(&request)?;
        Ok(request)
    }
}
