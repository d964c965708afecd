use std::sync::Arc;

use auth::Argon2Hasher;
use auth::CredentialAuthenticator;
use auth::ManualClock;
use auth::TokenService;
use auth_service::config::JwtConfig;
use auth_service::config::SeedUserConfig;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::UserRepository;
use chrono::Duration;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
    pub tokens: Arc<TokenService>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    ///
    /// Seeds `admin`/`123456` (ADMIN) and `user`/`password` (USER).
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let hasher = Argon2Hasher::new();
        let seeds = [
            seed("admin", "123456", "ADMIN"),
            seed("user", "password", "USER"),
        ];
        let user_repository =
            UserRepository::in_memory(&seeds, &hasher).expect("Failed to seed users");

        let jwt = JwtConfig {
            secret: TEST_SECRET.to_string(),
            ttl_seconds: TOKEN_TTL_SECONDS,
        };
        let clock = Arc::new(ManualClock::starting_now());
        let tokens = Arc::new(TokenService::new(
            jwt.token_settings().expect("Test secret rejected"),
            clock.clone(),
        ));

        let authenticator = Arc::new(
            CredentialAuthenticator::new(Arc::new(user_repository), hasher, Arc::clone(&tokens))
                .expect("Failed to build authenticator"),
        );

        let router = create_router(authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            clock,
            tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Log in and return the raw response
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .json(&json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token, panicking on failure
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in response")
            .to_string()
    }

    /// Move the server clock forward
    pub fn advance_clock(&self, by: Duration) {
        self.clock.advance(by);
    }
}

fn seed(username: &str, password: &str, role: &str) -> SeedUserConfig {
    SeedUserConfig {
        username: username.to_string(),
        password: password.to_string(),
        role: role.to_string(),
    }
}
