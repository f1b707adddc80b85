//! User account persistence.

use std::future::Future;

use sqlx::PgPool;
use tracing::{info, warn};

use crate::models::{CreateUser, User};
use crate::{Error, Result};

/// Storage for user accounts.
pub trait UserStore: Send + Sync {
    /// Look up a user by unique username.
    fn find_by_username(&self, username: &str) -> impl Future<Output = Result<Option<User>>> + Send;

    /// Insert a new user. Duplicate usernames or emails fail with [`Error::Conflict`].
    fn create(&self, user: CreateUser) -> impl Future<Output = Result<User>> + Send;
}

/// [`UserStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, display_name, is_host, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: CreateUser) -> Result<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, display_name, is_host)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, display_name, is_host, created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.is_host)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => {
                info!("Created user {} ({})", created.id, created.username);
                Ok(created)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!("Duplicate account for username {}", user.username);
                Err(Error::Conflict("Username or email already registered".to_string()))
            }
            Err(e) => Err(Error::Database(e)),
        }
    }
}
