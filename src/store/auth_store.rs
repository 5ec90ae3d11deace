use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::error_message;
use crate::api::{ApiError, AuthApi, AuthData, User, AUTH_COOKIE_KEY};
use crate::storage::session::SessionStorage;

/// Session storage key holding the signed-in identity.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

const VERIFY_SEND_SUCCESS: &str = "Verify send success";
const VERIFY_SUCCESS: &str = "Verify success";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub email: String,
    pub id: u64,
}

impl SessionIdentity {
    pub fn is_authenticated(&self) -> bool {
        self.id != 0
    }
}

/// Outcome of login and register. A failure always carries `id == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub id: u64,
    pub error: Option<String>,
}

impl AuthResponse {
    fn success(id: u64) -> Self {
        Self { id, error: None }
    }

    fn failure(error: String) -> Self {
        Self {
            id: 0,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyResponse {
    Message(String),
    Error(String),
}

impl VerifyResponse {
    pub fn error(&self) -> Option<&str> {
        match self {
            VerifyResponse::Error(error) => Some(error),
            VerifyResponse::Message(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, VerifyResponse::Message(_))
    }

    fn from_result(result: Result<(), ApiError>, success: &str) -> Self {
        match result {
            Ok(()) => VerifyResponse::Message(success.to_string()),
            Err(err) => VerifyResponse::Error(error_message(&err)),
        }
    }
}

/// Holds who is signed in. Every operation reports failure as a value; none
/// of them return `Err` or panic.
pub struct AuthStore {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn SessionStorage>,
    identity: watch::Sender<SessionIdentity>,
}

impl AuthStore {
    pub fn new(api: Arc<dyn AuthApi>, storage: Arc<dyn SessionStorage>) -> Self {
        let initial = rehydrate(storage.as_ref());
        let (identity, _) = watch::channel(initial);
        Self {
            api,
            storage,
            identity,
        }
    }

    pub fn identity(&self) -> SessionIdentity {
        self.identity.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.borrow().is_authenticated()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionIdentity> {
        self.identity.subscribe()
    }

    pub async fn login(&self, user: &User) -> AuthResponse {
        let result = self.api.login(user).await;
        self.complete_authentication(user, result)
    }

    pub async fn register(&self, user: &User) -> AuthResponse {
        let result = self.api.register(user).await;
        self.complete_authentication(user, result)
    }

    pub async fn send_verification_code(&self) -> VerifyResponse {
        let result = self.api.send_verification_code().await.map(|_| ());
        VerifyResponse::from_result(result, VERIFY_SEND_SUCCESS)
    }

    /// Joins the entered digits in order and submits them as one code.
    pub async fn verify_code<S: AsRef<str>>(&self, code: &[S]) -> VerifyResponse {
        let joined: String = code.iter().map(AsRef::as_ref).collect();
        let result = self.api.verify_code(&joined).await.map(|_| ());
        VerifyResponse::from_result(result, VERIFY_SUCCESS)
    }

    /// Forgets the identity and the saved auth cookie, here and in session
    /// storage.
    pub fn sign_out(&self) {
        for key in [AUTH_STORAGE_KEY, AUTH_COOKIE_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!("Failed to clear {} from session storage: {}", key, e);
            }
        }
        let previous = self.identity.send_replace(SessionIdentity::default());
        if previous.is_authenticated() {
            tracing::info!("Signed out {}", previous.email);
        }
    }

    fn complete_authentication(
        &self,
        user: &User,
        result: Result<AuthData, ApiError>,
    ) -> AuthResponse {
        match result {
            Ok(data) => {
                let identity = SessionIdentity {
                    email: user.email.clone(),
                    id: data.id,
                };
                self.persist(&identity);
                self.identity.send_replace(identity);
                tracing::info!("Signed in as {} (id {})", user.email, data.id);
                AuthResponse::success(data.id)
            }
            Err(err) => AuthResponse::failure(error_message(&err)),
        }
    }

    fn persist(&self, identity: &SessionIdentity) {
        let written = serde_json::to_string(identity)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .set(AUTH_STORAGE_KEY, &json)
                    .map_err(|e| e.to_string())
            });

        if let Err(e) = written {
            tracing::warn!("Failed to persist session identity: {}", e);
        }
    }
}

fn rehydrate(storage: &dyn SessionStorage) -> SessionIdentity {
    let stored = match storage.get(AUTH_STORAGE_KEY) {
        Ok(Some(stored)) => stored,
        Ok(None) => return SessionIdentity::default(),
        Err(e) => {
            tracing::warn!("Failed to read session storage: {}", e);
            return SessionIdentity::default();
        }
    };

    match serde_json::from_str(&stored) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!("Ignoring corrupt session entry: {}", e);
            SessionIdentity::default()
        }
    }
}
