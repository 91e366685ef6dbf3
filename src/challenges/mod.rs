pub mod handlers;
pub mod repo;
pub mod repo_types;

use aide::axum::ApiRouter;

use crate::state::AppState;

pub use repo::{ChallengeStore, PgChallengeStore};

pub fn router() -> ApiRouter<AppState> {
    handlers::routes()
}
