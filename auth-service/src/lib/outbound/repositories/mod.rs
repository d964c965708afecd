pub mod user;

use async_trait::async_trait;
use auth::InMemoryUserStore;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::StoreError;
use auth::StoredUser;
use auth::UserStore;
use thiserror::Error;

pub use user::PostgresUserRepository;

use crate::config::SeedUserConfig;

/// Error while creating the configured seed accounts.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to hash seed password: {0}")]
    Password(#[from] PasswordError),

    #[error("Failed to store seed user: {0}")]
    Store(#[from] StoreError),
}

/// User storage selected by configuration.
pub enum UserRepository {
    InMemory(InMemoryUserStore),
    Postgres(PostgresUserRepository),
}

impl UserRepository {
    /// Build an in-memory repository holding the seed accounts.
    ///
    /// # Errors
    /// * `Password` - A seed password could not be hashed
    pub fn in_memory<H: PasswordHasher>(
        seeds: &[SeedUserConfig],
        hasher: &H,
    ) -> Result<Self, SeedError> {
        let mut store = InMemoryUserStore::new();

        for seed in seeds {
            let password_hash = hasher.hash(&seed.password)?;
            store = store.with_user(&seed.username, password_hash, &seed.role);
        }

        Ok(Self::InMemory(store))
    }

    /// Insert seed accounts missing from Postgres; existing rows are untouched.
    ///
    /// # Returns
    /// Number of users inserted
    pub async fn seed_postgres<H: PasswordHasher>(
        repository: &PostgresUserRepository,
        seeds: &[SeedUserConfig],
        hasher: &H,
    ) -> Result<usize, SeedError> {
        let mut inserted = 0;

        for seed in seeds {
            let password_hash = hasher.hash(&seed.password)?;
            if repository
                .insert_if_absent(&seed.username, &password_hash, &seed.role)
                .await?
            {
                tracing::info!(username = %seed.username, role = %seed.role, "Seed user created");
                inserted += 1;
            }
        }

        Ok(inserted)
    }

    pub fn backend(&self) -> &'static str {
        match self {
            UserRepository::InMemory(_) => "memory",
            UserRepository::Postgres(_) => "postgresql",
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, StoreError> {
        match self {
            UserRepository::InMemory(store) => store.find_by_username(username).await,
            UserRepository::Postgres(repository) => repository.find_by_username(username).await,
        }
    }
}
