use std::sync::Arc;

use gatehouse_adapters::{
    Argon2PasswordHasher, DashMapBannedTokenStore, HashMapResetTokenStore, HashMapUserStore,
    JwtConfig, JwtTokenCodec, MockEmailClient, config::test, http::AppState,
};
use gatehouse_application::{AuthConfig, AuthCore};
use gatehouse_auth_service::AuthService;
use reqwest::{Client, Response};
use secrecy::Secret;
use serde_json::{Value, json};

pub const PASSWORD: &str = "Secret123!";

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
}

pub struct TestAppBuilder {
    expose_reset_tokens: bool,
    access_token_ttl_in_seconds: i64,
}

impl TestAppBuilder {
    pub fn production(mut self) -> Self {
        self.expose_reset_tokens = false;
        self
    }

    pub fn access_token_ttl(mut self, seconds: i64) -> Self {
        self.access_token_ttl_in_seconds = seconds;
        self
    }

    pub async fn spawn(self) -> TestApp {
        let core = AuthCore::new(
            Arc::new(HashMapUserStore::new()),
            Arc::new(DashMapBannedTokenStore::new()),
            Arc::new(HashMapResetTokenStore::new()),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(JwtTokenCodec::new(JwtConfig {
                secret: Secret::from("test-secret".to_string()),
                access_token_ttl_in_seconds: self.access_token_ttl_in_seconds,
                refresh_token_ttl_in_seconds: 24 * 60 * 60,
            })),
            Arc::new(MockEmailClient::new()),
            AuthConfig::default(),
        );
        let state = AppState::new(core).exposing_reset_tokens(self.expose_reset_tokens);

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind address");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(AuthService::with_state(state).run_standalone(listener, None));

        TestApp {
            address,
            http_client: Client::new(),
        }
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            expose_reset_tokens: true,
            access_token_ttl_in_seconds: 15 * 60,
        }
    }

    pub async fn spawn() -> Self {
        Self::builder().spawn().await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_register(&self, body: &Value) -> Response {
        self.post_json("/register", body).await
    }

    pub async fn post_login(&self, body: &Value) -> Response {
        self.post_json("/login", body).await
    }

    pub async fn post_refresh(&self, refresh_token: &str) -> Response {
        self.post_json("/refresh", &json!({ "refresh_token": refresh_token }))
            .await
    }

    pub async fn post_forgot_password(&self, email: &str) -> Response {
        self.post_json("/forgot-password", &json!({ "email": email }))
            .await
    }

    pub async fn post_reset_password(&self, token: &str, new_password: &str) -> Response {
        self.post_json(
            "/reset-password",
            &json!({
                "token": token,
                "new_password": new_password,
                "confirm_password": new_password,
            }),
        )
        .await
    }

    pub async fn post_logout(&self, access_token: &str) -> Response {
        self.http_client
            .post(format!("{}/logout", self.address))
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Logs out and revokes the session's refresh token in the same call.
    pub async fn post_logout_with_refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Response {
        self.http_client
            .post(format!("{}/logout", self.address))
            .bearer_auth(access_token)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_authorized(&self, path: &str, access_token: &str) -> Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Registers `email` with [`PASSWORD`] and returns the response body.
    pub async fn register(&self, email: &str) -> Value {
        let response = self.post_register(&register_body(email, PASSWORD)).await;
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.unwrap()
    }
}

pub fn register_body(email: &str, password: &str) -> Value {
    json!({
        "name": "Alice",
        "email": email,
        "password": password,
        "confirm_password": password,
    })
}

pub fn login_body(identifier: &str, password: &str) -> Value {
    json!({
        "identifier": identifier,
        "password": password,
    })
}

pub fn token(body: &Value, field: &str) -> String {
    body[field]
        .as_str()
        .unwrap_or_else(|| panic!("missing {field} in {body}"))
        .to_string()
}
