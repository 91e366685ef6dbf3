use aide::{
    axum::{routing::get_with, ApiRouter},
    transform::TransformOperation,
};
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult, MessageBody},
    state::AppState,
};

use super::repo_types::Challenge;

pub const CHALLENGE_NOT_FOUND: &str = "ERROR: Challenge not found";

pub fn routes() -> ApiRouter<AppState> {
    ApiRouter::new()
        .api_route("/", get_with(list_challenges, list_challenges_docs))
        .api_route("/{id}", get_with(get_challenge, get_challenge_docs))
}

#[instrument(skip(state))]
pub async fn list_challenges(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<Challenge>>> {
    let challenges = state.challenges.list().await?;
    Ok(Json(challenges))
}

#[instrument(skip(state))]
pub async fn get_challenge(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Challenge>> {
    match state.challenges.find_by_id(id).await? {
        Some(challenge) => Ok(Json(challenge)),
        None => {
            warn!(%user_id, %id, "challenge not found");
            Err(ApiError::NotFound(CHALLENGE_NOT_FOUND.into()))
        }
    }
}

fn list_challenges_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List challenges")
        .tag("challenges")
        .response_with::<200, Json<Vec<Challenge>>, _>(|res| res.description("All challenges"))
        .response_with::<401, Json<MessageBody>, _>(|res| {
            res.description("Missing or invalid bearer token")
        })
}

fn get_challenge_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get a challenge")
        .tag("challenges")
        .response_with::<200, Json<Challenge>, _>(|res| res.description("The challenge"))
        .response_with::<401, Json<MessageBody>, _>(|res| {
            res.description("Missing or invalid bearer token")
        })
        .response_with::<404, Json<MessageBody>, _>(|res| res.description("No such challenge"))
}
