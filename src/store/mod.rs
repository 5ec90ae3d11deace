pub mod auth_store;
pub mod event_store;

#[cfg(test)]
mod backend_tests;

use thiserror::Error;

use crate::api::{ApiError, ApiErrorKind};

pub use auth_store::{AuthResponse, AuthStore, SessionIdentity, VerifyResponse, AUTH_STORAGE_KEY};
pub use event_store::EventStore;

pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Failure handed to views: a message, plus whether the backend refused the
/// session so the user has to sign in again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct StoreError {
    pub error: String,
    pub session_expired: bool,
}

impl StoreError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            session_expired: false,
        }
    }
}

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        Self {
            error: error_message(&err),
            session_expired: err.is_unauthorized(),
        }
    }
}

/// Normalizes an API failure into the message shown to the user and logs it.
pub fn error_message(err: &ApiError) -> String {
    match err.kind() {
        ApiErrorKind::Rejected => tracing::info!("Request rejected: {}", err),
        ApiErrorKind::Transport | ApiErrorKind::Malformed => {
            tracing::warn!("Request failed: {}", err)
        }
    }

    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_passes_through() {
        let message = error_message(&ApiError::Rejected("invalid credentials".to_string()));

        assert_eq!(message, "invalid credentials");
    }

    #[test]
    fn empty_message_falls_back_to_generic_text() {
        let message = error_message(&ApiError::Rejected("  ".to_string()));

        assert_eq!(message, UNKNOWN_ERROR);
    }

    #[test]
    fn transport_errors_keep_their_description() {
        let error = StoreError::from(ApiError::RateLimited);

        assert_eq!(error.error, "Rate limit exceeded");
        assert_eq!(error.to_string(), "Rate limit exceeded");
        assert!(!error.session_expired);
    }

    #[test]
    fn unauthorized_marks_session_expired() {
        let error = StoreError::from(ApiError::Unauthorized("http: named cookie not present".to_string()));

        assert_eq!(error.error, "http: named cookie not present");
        assert!(error.session_expired);
    }
}
