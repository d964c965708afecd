use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// User record as seen by the authenticator.
///
/// Owned by the store; the core only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// Error for user store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("User store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to user records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve user by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Backing storage could not be reached
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, StoreError>;
}

/// Immutable user store held in memory.
///
/// Built once (at startup or in a test) and only read afterwards, so lookups
/// need no locking.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: HashMap<String, StoredUser>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user, assigning the next sequential id.
    ///
    /// A later user with the same username replaces the earlier one and keeps
    /// its id.
    pub fn with_user(
        mut self,
        username: impl ToString,
        password_hash: impl ToString,
        role: impl ToString,
    ) -> Self {
        let username = username.to_string();
        let id = self
            .users
            .get(&username)
            .map_or(self.users.len() as i64 + 1, |existing| existing.id);

        let user = StoredUser {
            id,
            username,
            password_hash: password_hash.to_string(),
            role: role.to_string(),
        };
        self.users.insert(user.username.clone(), user);
        self
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, StoreError> {
        Ok(self.users.get(username).cloned())
    }
}
