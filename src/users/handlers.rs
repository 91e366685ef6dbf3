use aide::{
    axum::{
        routing::{get_with, post_with},
        ApiRouter,
    },
    transform::TransformOperation,
};
use anyhow::anyhow;
use axum::{extract::State, Json};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::password::{hash_password, verify_dummy_password, verify_password},
    error::{ApiError, ApiResult, MessageBody},
    extract::ValidJson,
    state::AppState,
};

use super::{
    dto::{AuthResponse, LoginRequest, RegisterRequest},
    repo_types::{NewUser, UserProfile},
};

pub const USER_EXISTS: &str = "ERROR: User already exists";

pub fn routes() -> ApiRouter<AppState> {
    ApiRouter::new()
        .api_route("/auth/register", post_with(register, register_docs))
        .api_route("/auth/login", post_with(login, login_docs))
        .api_route("/", get_with(list_users, list_users_docs))
}

/// Signs a token for `user_id`, failing when no secret is configured.
fn issue_token(state: &AppState, user_id: Uuid) -> ApiResult<String> {
    let keys = state
        .keys
        .as_ref()
        .ok_or_else(|| anyhow!("AUTH_SECRET is not defined"))?;
    Ok(keys.sign(user_id)?)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    // Existence check; nothing here serializes two racing registrations.
    if state.users.find_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::bad_request(USER_EXISTS));
    }

    let hash = hash_password(&payload.password)?;
    let user = state
        .users
        .create(NewUser {
            email: &payload.email,
            username: &payload.username,
            password_hash: &hash,
            is_admin: payload.is_admin,
        })
        .await?;
    info!(user_id = %user.id, email = %user.email, "user registered");

    let token = issue_token(&state, user.id)?;
    Ok(Json(AuthResponse {
        message: "User registered successfully".into(),
        token,
        user: user.into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let Some(user) = state.users.find_by_email(&payload.email).await? else {
        verify_dummy_password(&payload.password);
        warn!(email = %payload.email, "login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = issue_token(&state, user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse {
        message: "User logged in successfully".into(),
        token,
        user: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserProfile>>> {
    let users = state.users.list_profiles().await?;
    Ok(Json(users))
}

fn register_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Register a user")
        .description("Creates a user and returns a bearer token bound to its id.")
        .tag("users")
        .response_with::<200, Json<AuthResponse>, _>(|res| {
            res.description("User registration success")
        })
        .response_with::<400, Json<MessageBody>, _>(|res| {
            res.description("isAdmin not boolean, malformed body, or email already taken")
        })
        .response_with::<500, Json<MessageBody>, _>(|res| res.description("Internal server error"))
}

fn login_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Log in")
        .tag("users")
        .response_with::<200, Json<AuthResponse>, _>(|res| res.description("User login success"))
        .response_with::<400, Json<MessageBody>, _>(|res| res.description("Malformed body"))
        .response_with::<401, Json<MessageBody>, _>(|res| {
            res.description("Unknown email or wrong password")
        })
        .response_with::<500, Json<MessageBody>, _>(|res| res.description("Internal server error"))
}

fn list_users_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List all users")
        .tag("users")
        .response_with::<200, Json<Vec<UserProfile>>, _>(|res| res.description("Get all users"))
}
