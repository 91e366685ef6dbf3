use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Challenge;

#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// All challenges, oldest first.
    async fn list(&self) -> anyhow::Result<Vec<Challenge>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Challenge>>;
}

#[derive(Clone)]
pub struct PgChallengeStore {
    db: PgPool,
}

impl PgChallengeStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChallengeStore for PgChallengeStore {
    async fn list(&self) -> anyhow::Result<Vec<Challenge>> {
        let rows = sqlx::query_as::<_, Challenge>(
            r#"
            SELECT id, title, description, category, points, created_at
            FROM challenges
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list challenges")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Challenge>> {
        let row = sqlx::query_as::<_, Challenge>(
            r#"
            SELECT id, title, description, category, points, created_at
            FROM challenges
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get challenge by id")?;
        Ok(row)
    }
}
