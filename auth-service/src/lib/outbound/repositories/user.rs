use async_trait::async_trait;
use auth::StoreError;
use auth::StoredUser;
use auth::UserStore;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    role: String,
}

impl From<UserRow> for StoredUser {
    fn from(row: UserRow) -> Self {
        StoredUser {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            role: row.role,
        }
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user unless the username is already taken.
    ///
    /// # Returns
    /// True if a row was inserted
    ///
    /// # Errors
    /// * `Unavailable` - Database operation failed
    pub async fn insert_if_absent(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl UserStore for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(row.map(StoredUser::from))
    }
}
