//! In-memory stores backing `AppState::fake` in tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::challenges::{repo_types::Challenge, ChallengeStore};
use crate::users::{
    repo_types::{NewUser, User, UserProfile},
    UserStore,
};

#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    /// Full rows, hashes included.
    pub fn rows(&self) -> Vec<User> {
        self.rows.lock().expect("user rows lock").clone()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let rows = self.rows.lock().expect("user rows lock");
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser<'_>) -> anyhow::Result<User> {
        let mut rows = self.rows.lock().expect("user rows lock");
        anyhow::ensure!(
            rows.iter().all(|u| u.email != user.email),
            "duplicate key value violates unique constraint \"users_email_key\""
        );
        let row = User {
            id: Uuid::new_v4(),
            email: user.email.to_owned(),
            username: user.username.to_owned(),
            password_hash: user.password_hash.to_owned(),
            is_admin: user.is_admin,
            roll_no: None,
            institute_name: None,
            website: None,
            affiliation: None,
            country: None,
            created_at: OffsetDateTime::now_utc(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_profiles(&self) -> anyhow::Result<Vec<UserProfile>> {
        let rows = self.rows.lock().expect("user rows lock");
        Ok(rows.iter().cloned().map(UserProfile::from).collect())
    }
}

#[derive(Default)]
pub struct MemoryChallengeStore {
    rows: Vec<Challenge>,
}

impl MemoryChallengeStore {
    pub fn with_challenges(rows: Vec<Challenge>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl ChallengeStore for MemoryChallengeStore {
    async fn list(&self) -> anyhow::Result<Vec<Challenge>> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|c| c.created_at);
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Challenge>> {
        Ok(self.rows.iter().find(|c| c.id == id).cloned())
    }
}
