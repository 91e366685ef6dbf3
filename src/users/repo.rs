use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{NewUser, User, UserProfile};

/// Access to the user table. Registration, login and the user list are
/// the only callers, and these are the only queries they need.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Point lookup by the unique login key.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create(&self, user: NewUser<'_>) -> anyhow::Result<User>;
    /// Every user's public columns; the password hash is never selected.
    async fn list_profiles(&self) -> anyhow::Result<Vec<UserProfile>>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, password_hash, is_admin,
                   roll_no, institute_name, website, affiliation, country, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn create(&self, user: NewUser<'_>) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username, password_hash, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, username, password_hash, is_admin,
                      roll_no, institute_name, website, affiliation, country, created_at
            "#,
        )
        .bind(user.email)
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.is_admin)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        Ok(user)
    }

    async fn list_profiles(&self) -> anyhow::Result<Vec<UserProfile>> {
        let rows = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, username, email, roll_no, institute_name,
                   website, affiliation, country, is_admin
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list users")?;
        Ok(rows)
    }
}
