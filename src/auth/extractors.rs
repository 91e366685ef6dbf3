use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Extracts and validates the bearer token, returning the user ID.
pub struct AuthUser(pub Uuid);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Read Authorization header
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("ERROR: Missing Authorization header".into()))?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::Unauthorized("ERROR: Invalid auth scheme".into()))?;

        let keys = state
            .keys
            .as_ref()
            .ok_or_else(|| anyhow!("AUTH_SECRET is not defined"))?;

        let claims = keys.verify(token.trim()).map_err(|e| {
            warn!(error = %e, "invalid bearer token");
            ApiError::Unauthorized("ERROR: Invalid token".into())
        })?;

        Ok(AuthUser(claims.sub))
    }
}

impl aide::OperationInput for AuthUser {}
