use std::sync::Arc;

use uuid::Uuid;

use crate::jwt::IssueError;
use crate::jwt::IssuedToken;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::store::StoreError;
use crate::store::UserStore;

/// Outcome of a login attempt.
pub type AuthenticationResult = Result<IssuedToken, AuthError>;

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown username or wrong password; deliberately not told apart.
    #[error("Invalid credentials")]
    AuthenticationFailed,

    /// A collaborator (store, hasher, signer) failed. Not a credential problem.
    #[error("Authentication dependency failed: {0}")]
    DependencyFailure(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::DependencyFailure(err.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::DependencyFailure(err.to_string())
    }
}

impl From<IssueError> for AuthError {
    fn from(err: IssueError) -> Self {
        AuthError::DependencyFailure(err.to_string())
    }
}

/// Verifies username/password pairs and issues access tokens.
///
/// Coordinates a user store, a password hasher and the token service.
/// Unknown users go through a password comparison too (against a decoy
/// hash), so both failure paths cost one hash verification.
pub struct CredentialAuthenticator<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    store: Arc<S>,
    hasher: H,
    tokens: Arc<TokenService>,
    decoy_hash: String,
}

impl<S, H> CredentialAuthenticator<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    /// Create a new authenticator with injected dependencies.
    ///
    /// Hashes a random decoy password once, with the same hasher (and so the
    /// same cost parameters) used for real records.
    ///
    /// # Arguments
    /// * `store` - User lookup implementation
    /// * `hasher` - Password hashing primitive
    /// * `tokens` - Token service used on success
    ///
    /// # Errors
    /// * `HashingFailed` - The decoy hash could not be computed
    pub fn new(store: Arc<S>, hasher: H, tokens: Arc<TokenService>) -> Result<Self, PasswordError> {
        let decoy_hash = hasher.hash(&Uuid::new_v4().to_string())?;

        Ok(Self {
            store,
            hasher,
            tokens,
            decoy_hash,
        })
    }

    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `username` - Login name
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// Token for `username` carrying the stored role
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown user or password does not match
    /// * `DependencyFailure` - Store, hasher or signer failed
    pub async fn authenticate(&self, username: &str, password: &str) -> AuthenticationResult {
        let user = self
            .store
            .find_by_username(username)
            .await
            .map_err(dependency_failure)?;

        let Some(user) = user else {
            // Result ignored: an unknown user fails whatever the decoy says
            let _ = self.hasher.matches(password, &self.decoy_hash);
            tracing::debug!(username, reason = "unknown_user", "Authentication failed");
            return Err(AuthError::AuthenticationFailed);
        };

        let is_valid = self
            .hasher
            .matches(password, &user.password_hash)
            .map_err(dependency_failure)?;

        if !is_valid {
            tracing::debug!(username, reason = "password_mismatch", "Authentication failed");
            return Err(AuthError::AuthenticationFailed);
        }

        let token = self
            .tokens
            .issue(&user.username, &user.role)
            .map_err(dependency_failure)?;

        tracing::debug!(username, role = %user.role, "Authentication succeeded");

        Ok(token)
    }
}

fn dependency_failure(err: impl Into<AuthError> + std::fmt::Display) -> AuthError {
    tracing::error!(error = %err, "Authentication dependency failed");
    err.into()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Duration;
    use mockall::mock;
    use tracing_test::traced_test;

    use super::*;
    use crate::jwt::SigningSecret;
    use crate::jwt::TokenSettings;
    use crate::password::Argon2Hasher;
    use crate::store::InMemoryUserStore;
    use crate::store::StoredUser;

    mock! {
        pub TestUserStore {}

        #[async_trait]
        impl UserStore for TestUserStore {
            async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, StoreError>;
        }
    }

    mock! {
        pub TestHasher {}

        impl PasswordHasher for TestHasher {
            fn hash(&self, password: &str) -> Result<String, PasswordError>;
            fn matches(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
        }
    }

    fn token_service() -> Arc<TokenService> {
        let secret = SigningSecret::new("test_secret_key_at_least_32_bytes!").unwrap();
        let settings = TokenSettings::new(secret, Duration::hours(1)).unwrap();
        Arc::new(TokenService::with_system_clock(settings))
    }

    fn hasher_with_decoy() -> MockTestHasher {
        let mut hasher = MockTestHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .returning(|_| Ok("decoy-hash".to_string()));
        hasher
    }

    fn stored_user(username: &str, role: &str) -> StoredUser {
        StoredUser {
            id: 1,
            username: username.to_string(),
            password_hash: "stored-hash".to_string(),
            role: role.to_string(),
        }
    }

    fn admin_authenticator() -> CredentialAuthenticator<InMemoryUserStore, Argon2Hasher> {
        let hasher = Argon2Hasher::new();
        let store = InMemoryUserStore::new()
            .with_user("admin", hasher.hash("123456").unwrap(), "ADMIN")
            .with_user("user", hasher.hash("password").unwrap(), "USER");

        CredentialAuthenticator::new(Arc::new(store), hasher, token_service())
            .expect("Failed to build authenticator")
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let authenticator = admin_authenticator();

        let token = authenticator
            .authenticate("admin", "123456")
            .await
            .expect("Authentication failed");

        let principal = authenticator
            .token_service()
            .verify(&token.access_token)
            .expect("Token validation failed");
        assert_eq!(principal.subject, "admin");
        assert_eq!(principal.role, "ADMIN");
    }

    #[tokio::test]
    async fn test_authenticate_invalid_password() {
        let authenticator = admin_authenticator();

        let result = authenticator.authenticate("admin", "wrong").await;

        assert_eq!(result, Err(AuthError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_the_same() {
        let authenticator = admin_authenticator();

        let wrong_password = authenticator.authenticate("admin", "wrong").await;
        let unknown_user = authenticator.authenticate("ghost", "x").await;

        assert_eq!(wrong_password, unknown_user);
        assert_eq!(
            wrong_password.unwrap_err().to_string(),
            unknown_user.unwrap_err().to_string()
        );
    }

    #[tokio::test]
    async fn test_unknown_user_compares_against_decoy() {
        let mut store = MockTestUserStore::new();
        let mut hasher = hasher_with_decoy();

        store
            .expect_find_by_username()
            .withf(|username| username == "ghost")
            .times(1)
            .returning(|_| Ok(None));
        hasher
            .expect_matches()
            .withf(|password, hash| password == "x" && hash == "decoy-hash")
            .times(1)
            .returning(|_, _| Ok(true));

        let authenticator =
            CredentialAuthenticator::new(Arc::new(store), hasher, token_service()).unwrap();

        let result = authenticator.authenticate("ghost", "x").await;
        assert_eq!(result, Err(AuthError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_wrong_password_compares_once() {
        let mut store = MockTestUserStore::new();
        let mut hasher = hasher_with_decoy();

        store
            .expect_find_by_username()
            .withf(|username| username == "user")
            .times(1)
            .returning(|_| Ok(Some(stored_user("user", "USER"))));
        hasher
            .expect_matches()
            .withf(|password, hash| password == "wrong" && hash == "stored-hash")
            .times(1)
            .returning(|_, _| Ok(false));

        let authenticator =
            CredentialAuthenticator::new(Arc::new(store), hasher, token_service()).unwrap();

        let result = authenticator.authenticate("user", "wrong").await;
        assert_eq!(result, Err(AuthError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_token_carries_stored_role() {
        let mut store = MockTestUserStore::new();
        let mut hasher = hasher_with_decoy();

        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("user", "USER"))));
        hasher
            .expect_matches()
            .times(1)
            .returning(|_, _| Ok(true));

        let tokens = token_service();
        let authenticator =
            CredentialAuthenticator::new(Arc::new(store), hasher, Arc::clone(&tokens)).unwrap();

        let token = authenticator.authenticate("user", "password").await.unwrap();
        let principal = tokens.verify(&token.access_token).unwrap();

        assert_eq!(principal.subject, "user");
        assert_eq!(principal.role, "USER");
        assert_eq!(token.expires_at - token.issued_at, Duration::hours(1));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_store_failure_is_not_a_credential_error() {
        let mut store = MockTestUserStore::new();
        let mut hasher = hasher_with_decoy();

        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));
        hasher.expect_matches().never();

        let authenticator =
            CredentialAuthenticator::new(Arc::new(store), hasher, token_service()).unwrap();

        let result = authenticator.authenticate("admin", "123456").await;
        assert!(matches!(result, Err(AuthError::DependencyFailure(_))));

        logs_assert(|lines: &[&str]| {
            let errors = lines
                .iter()
                .filter(|line| line.contains("ERROR") && line.contains("connection refused"))
                .count();
            match errors {
                1 => Ok(()),
                n => Err(format!("expected one error line, got {}", n)),
            }
        });
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_a_dependency_failure() {
        let mut store = MockTestUserStore::new();
        let mut hasher = hasher_with_decoy();

        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("admin", "ADMIN"))));
        hasher.expect_matches().times(1).returning(|_, _| {
            Err(PasswordError::VerificationFailed(
                "Invalid password hash".to_string(),
            ))
        });

        let authenticator =
            CredentialAuthenticator::new(Arc::new(store), hasher, token_service()).unwrap();

        let result = authenticator.authenticate("admin", "123456").await;
        assert!(matches!(result, Err(AuthError::DependencyFailure(_))));
    }

    #[test]
    fn test_decoy_hash_failure_stops_construction() {
        let store = MockTestUserStore::new();
        let mut hasher = MockTestHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .returning(|_| Err(PasswordError::HashingFailed("out of memory".to_string())));

        let result = CredentialAuthenticator::new(Arc::new(store), hasher, token_service());
        assert!(matches!(result, Err(PasswordError::HashingFailed(_))));
    }
}
