use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failure taxonomy shared by the session layer and every view.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ApiError {
    /// Rejected locally before any request was issued.
    #[error("{0}")]
    Validation(String),
    /// The server refused the supplied credentials.
    #[error("{0}")]
    Authentication(String),
    /// The refresh protocol failed; the session has been cleared.
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        details: Option<Value>,
    },
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn server(status: u16, msg: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: msg.into(),
            details: None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Authentication(_) => "AUTHENTICATION_FAILED",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Server { .. } => "SERVER_ERROR",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Server { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Errors a user can clear by retrying the same action.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.to_string()
    }
}
