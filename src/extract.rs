//! JSON body extraction with validation at the boundary.
//!
//! Bodies are read as untyped JSON first so a request type can reject on a
//! single field before the rest of the shape is checked, then deserialized
//! into the typed request and validated.

use aide::generate::GenContext;
use aide::openapi::{Operation, Response};
use aide::OperationInput;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// A request body that validates itself once extracted.
pub trait RequestBody: DeserializeOwned {
    /// Runs on the raw JSON before deserialization.
    fn precheck(_raw: &Value) -> Result<(), ApiError> {
        Ok(())
    }

    /// Runs on the typed value after deserialization.
    fn validate(self) -> Result<Self, ApiError> {
        Ok(self)
    }
}

/// `Json<T>` whose rejections are 400 `{message}` responses.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: RequestBody + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection, "json body rejected");
                ApiError::bad_request(format!("ERROR: {}", rejection.body_text()))
            })?;

        T::precheck(&raw)?;

        let body = serde_json::from_value::<T>(raw)
            .map_err(|e| ApiError::bad_request(format!("ERROR: Invalid request body: {e}")))?;
        Ok(Self(body.validate()?))
    }
}

impl<T> OperationInput for ValidJson<T>
where
    T: JsonSchema,
{
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut GenContext,
        operation: &mut Operation,
    ) -> Vec<(Option<u16>, Response)> {
        Json::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        name: String,
    }

    impl RequestBody for Probe {
        fn precheck(raw: &Value) -> Result<(), ApiError> {
            match raw.get("flag") {
                Some(Value::Bool(_)) => Ok(()),
                _ => Err(ApiError::bad_request("flag must be boolean")),
            }
        }

        fn validate(self) -> Result<Self, ApiError> {
            if self.name.is_empty() {
                return Err(ApiError::bad_request("name is empty"));
            }
            Ok(self)
        }
    }

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn extract(body: &str) -> Result<Probe, ApiError> {
        ValidJson::<Probe>::from_request(json_request(body), &())
            .await
            .map(|ValidJson(p)| p)
    }

    #[tokio::test]
    async fn accepts_a_valid_body() {
        let probe = extract(r#"{"name":"ok","flag":true}"#).await.unwrap();
        assert_eq!(probe.name, "ok");
    }

    #[tokio::test]
    async fn precheck_runs_before_shape_errors() {
        let err = extract(r#"{"name":42,"flag":"yes"}"#).await.unwrap_err();
        assert_eq!(err.to_string(), "flag must be boolean");
    }

    #[tokio::test]
    async fn shape_errors_are_bad_requests() {
        let err = extract(r#"{"flag":true}"#).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn validate_runs_last() {
        let err = extract(r#"{"name":"","flag":false}"#).await.unwrap_err();
        assert_eq!(err.to_string(), "name is empty");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let err = extract("{not json").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn missing_content_type_is_a_bad_request() {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name":"ok","flag":true}"#))
            .unwrap();
        let err = ValidJson::<Probe>::from_request(req, &()).await.err().unwrap();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
