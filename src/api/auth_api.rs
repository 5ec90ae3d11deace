use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ApiError, BackendClient};

/// Credentials submitted to login and register. Never stored.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthData {
    pub id: u64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VerifyData {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    code: &'a str,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, user: &User) -> Result<AuthData, ApiError>;

    async fn register(&self, user: &User) -> Result<AuthData, ApiError>;

    async fn send_verification_code(&self) -> Result<VerifyData, ApiError>;

    async fn verify_code(&self, code: &str) -> Result<VerifyData, ApiError>;
}

#[async_trait]
impl AuthApi for BackendClient {
    async fn login(&self, user: &User) -> Result<AuthData, ApiError> {
        tracing::info!("Logging in as {}", user.email);
        let request = self.client.post(self.url("/login")).json(user);
        let data = self.execute(request, "Login").await?;
        self.remember_cookies();
        Ok(data)
    }

    async fn register(&self, user: &User) -> Result<AuthData, ApiError> {
        tracing::info!("Registering {}", user.email);
        let request = self.client.post(self.url("/register")).json(user);
        let data = self.execute(request, "Register").await?;
        self.remember_cookies();
        Ok(data)
    }

    async fn send_verification_code(&self) -> Result<VerifyData, ApiError> {
        tracing::info!("Requesting verification code");
        let request = self.client.post(self.url("/verify/send"));
        self.execute(request, "Send verification code").await
    }

    async fn verify_code(&self, code: &str) -> Result<VerifyData, ApiError> {
        tracing::info!("Checking verification code");
        let request = self
            .client
            .post(self.url("/verify/check"))
            .json(&VerifyRequest { code });
        self.execute(request, "Verify code").await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::AUTH_COOKIE_KEY;
    use crate::storage::config::Config;
    use crate::storage::session::{MemorySessionStorage, SessionStorage};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&Config::default().api)
            .unwrap()
            .with_base_url(server.uri())
    }

    #[test]
    fn debug_output_hides_password() {
        let user = User::new("ada@example.com", "hunter2");

        let output = format!("{:?}", user);

        assert!(output.contains("ada@example.com"));
        assert!(!output.contains("hunter2"));
    }

    #[tokio::test]
    async fn login_posts_credentials_and_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({"email": "ada@example.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12})))
            .expect(1)
            .mount(&server)
            .await;

        let data = client_for(&server)
            .login(&User::new("ada@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(data.id, 12);
    }

    #[tokio::test]
    async fn login_rejection_surfaces_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "invalid credentials"})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).login(&User::new("a@b.c", "bad")).await;

        assert!(matches!(result, Err(ApiError::Unauthorized(message)) if message == "invalid credentials"));
    }

    #[tokio::test]
    async fn login_saves_auth_cookie_to_session_storage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "token=abc; Path=/; HttpOnly")
                    .set_body_json(json!({"id": 12})),
            )
            .mount(&server)
            .await;
        let storage = Arc::new(MemorySessionStorage::new());
        let client = client_for(&server).with_session_storage(storage.clone());

        client.login(&User::new("ada@example.com", "pw")).await.unwrap();

        assert_eq!(
            storage.get(AUTH_COOKIE_KEY).unwrap(),
            Some("token=abc".to_string())
        );
    }

    #[tokio::test]
    async fn failed_login_saves_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "invalid credentials"})),
            )
            .mount(&server)
            .await;
        let storage = Arc::new(MemorySessionStorage::new());
        let client = client_for(&server).with_session_storage(storage.clone());

        let _ = client.login(&User::new("ada@example.com", "bad")).await;

        assert_eq!(storage.get(AUTH_COOKIE_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn unauthorized_without_body_is_authentication_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client_for(&server).login(&User::new("a@b.c", "pw")).await;

        assert!(matches!(result, Err(ApiError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn register_reads_id_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "user registered successfully",
                "id": 4
            })))
            .mount(&server)
            .await;

        let data = client_for(&server)
            .register(&User::new("new@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(data.id, 4);
        assert_eq!(data.message.as_deref(), Some("user registered successfully"));
    }

    #[tokio::test]
    async fn send_verification_code_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify/send"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let data = client_for(&server).send_verification_code().await.unwrap();

        assert_eq!(data, VerifyData::default());
    }

    #[tokio::test]
    async fn verify_code_sends_code_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify/check"))
            .and(body_json(json!({"code": "1234"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let data = client_for(&server).verify_code("1234").await.unwrap();

        assert_eq!(data.message.as_deref(), Some("ok"));
    }
}
