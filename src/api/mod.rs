pub mod auth_api;
pub mod calendar_api;
pub mod envelope;

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::storage::config::ApiConfig;
use crate::storage::session::SessionStorage;

/// Session storage key holding the backend's auth cookie.
pub const AUTH_COOKIE_KEY: &str = "auth-cookie";

pub use auth_api::{AuthApi, AuthData, User, VerifyData};
pub use calendar_api::CalendarApi;
pub use envelope::Envelope;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Rejected(String),
    /// A 401 carrying the backend's reason.
    #[error("{0}")]
    Unauthorized(String),
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The backend understood the request and refused it.
    Rejected,
    Transport,
    Malformed,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Rejected(_) | ApiError::Unauthorized(_) => ApiErrorKind::Rejected,
            ApiError::ParseError(_) => ApiErrorKind::Malformed,
            ApiError::HttpError(_)
            | ApiError::RequestError(_)
            | ApiError::NotFound(_)
            | ApiError::RateLimited
            | ApiError::AuthenticationFailed => ApiErrorKind::Transport,
        }
    }

    /// The backend no longer accepts the session cookie.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::AuthenticationFailed)
    }
}

/// HTTP client for the lifesync backend.
///
/// Login sets an auth cookie, so one client (and its cookie jar) is shared by
/// the auth and calendar calls. With session storage attached the cookie is
/// also saved there and restored on the next start.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
    cookies: Arc<Jar>,
    session: Option<Arc<dyn SessionStorage>>,
}

impl BackendClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let cookies = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(cookies.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            cookies,
            session: None,
        })
    }

    /// Seeds the cookie jar from a previously saved session. Call after the
    /// base URL is final.
    pub fn with_session_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        match storage.get(AUTH_COOKIE_KEY) {
            Ok(Some(saved)) => self.restore_cookies(&saved),
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read saved auth cookie: {}", e),
        }
        self.session = Some(storage);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn cookie_url(&self) -> Option<Url> {
        // Trailing slash so cookies scoped to the API path still match.
        match Url::parse(&format!("{}/", self.base_url)) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Cannot scope cookies to {}: {}", self.base_url, e);
                None
            }
        }
    }

    fn restore_cookies(&self, saved: &str) {
        let Some(url) = self.cookie_url() else { return };
        for pair in saved.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
            self.cookies.add_cookie_str(pair, &url);
        }
        tracing::debug!("Restored saved auth cookie");
    }

    /// Writes the cookies the backend set during sign-in to session storage.
    pub(crate) fn remember_cookies(&self) {
        let Some(storage) = &self.session else { return };
        let Some(url) = self.cookie_url() else { return };
        let Some(header) = self.cookies.cookies(&url) else {
            tracing::debug!("Sign-in response set no cookies");
            return;
        };

        let saved = header
            .to_str()
            .map_err(|e| e.to_string())
            .and_then(|value| storage.set(AUTH_COOKIE_KEY, value).map_err(|e| e.to_string()));
        if let Err(e) = saved {
            tracing::warn!("Failed to save auth cookie: {}", e);
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::info!("{} response status: {}", context, status);

        let body = response.bytes().await?;

        if status.is_success() {
            return Envelope::<T>::from_body(&body)?.into_result();
        }

        if let Ok(Envelope { error: Some(message), .. }) =
            Envelope::<serde_json::Value>::from_body(&body)
        {
            tracing::info!("{} rejected by backend: {}", context, message);
            return Err(if status == StatusCode::UNAUTHORIZED {
                ApiError::Unauthorized(message)
            } else {
                ApiError::Rejected(message)
            });
        }

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                tracing::error!("Authentication failed during {}", context);
                ApiError::AuthenticationFailed
            }
            StatusCode::NOT_FOUND => ApiError::NotFound(context.to_string()),
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!("Rate limit exceeded");
                ApiError::RateLimited
            }
            _ => {
                let body = String::from_utf8_lossy(&body);
                tracing::error!("{} failed. Status: {}, Body: {}", context, status, body);
                ApiError::RequestError(format!("Status {}: {}", status, body))
            }
        })
    }
}
