//! Credential authentication and access token library
//!
//! Provides the authentication core used by the auth service:
//! - Password hashing (Argon2id) behind a `PasswordHasher` trait
//! - HS256 access tokens carrying subject and role, with expiry
//! - Username/password authentication against a `UserStore`
//!
//! Verification is stateless: a token is valid if its signature checks out
//! under the configured secret and the injected clock is not past its expiry.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{Argon2Hasher, PasswordHasher};
//!
//! let hasher = Argon2Hasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.matches("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{SigningSecret, TokenService, TokenSettings};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let settings = TokenSettings::new(secret, Duration::hours(1)).unwrap();
//! let tokens = TokenService::with_system_clock(settings);
//!
//! let issued = tokens.issue("alice", "USER").unwrap();
//! let principal = tokens.validate(&issued.access_token).unwrap();
//! assert_eq!(principal.subject, "alice");
//! assert_eq!(principal.role, "USER");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{
//!     Argon2Hasher, AuthError, CredentialAuthenticator, InMemoryUserStore, PasswordHasher,
//!     SigningSecret, TokenService, TokenSettings,
//! };
//! use chrono::Duration;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let hasher = Argon2Hasher::new();
//! let store = InMemoryUserStore::new().with_user("admin", hasher.hash("123456").unwrap(), "ADMIN");
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let settings = TokenSettings::new(secret, Duration::hours(1)).unwrap();
//! let tokens = Arc::new(TokenService::with_system_clock(settings));
//!
//! let authenticator =
//!     CredentialAuthenticator::new(Arc::new(store), hasher, Arc::clone(&tokens)).unwrap();
//!
//! let issued = authenticator.authenticate("admin", "123456").await.unwrap();
//! assert_eq!(tokens.validate(&issued.access_token).unwrap().role, "ADMIN");
//!
//! let failed = authenticator.authenticate("ghost", "123456").await;
//! assert_eq!(failed, Err(AuthError::AuthenticationFailed));
//! # });
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod store;

// Re-export commonly used items
pub use authenticator::AuthError;
pub use authenticator::AuthenticationResult;
pub use authenticator::CredentialAuthenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::InvalidToken;
pub use jwt::IssueError;
pub use jwt::IssuedToken;
pub use jwt::Principal;
pub use jwt::SecretError;
pub use jwt::SettingsError;
pub use jwt::SigningSecret;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use jwt::TokenSettings;
pub use password::Argon2Hasher;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use store::InMemoryUserStore;
pub use store::StoreError;
pub use store::StoredUser;
pub use store::UserStore;
