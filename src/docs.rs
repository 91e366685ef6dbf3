//! OpenAPI document at `/doc` and the Scalar explorer at `/ui`.

use aide::axum::ApiRouter;
use aide::openapi::{Info, OpenApi};
use aide::scalar::Scalar;
use axum::routing::{get, Router};
use axum::{Extension, Json};

pub const OPENAPI_JSON_PATH: &str = "/doc";
pub const EXPLORER_PATH: &str = "/ui";

/// Extension trait for [`ApiRouter`] that serves the generated documentation.
pub trait RouterDocsExt<S> {
    /// Finishes the API description and mounts the documentation routes.
    fn with_docs(self) -> Router<S>;
}

impl<S> RouterDocsExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_docs(self) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info: Info {
                title: "CTFV API".to_owned(),
                description: Some("Users and challenges for the CTFV platform.".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                ..Info::default()
            },
            ..OpenApi::default()
        };

        let router = self
            .route(EXPLORER_PATH, Scalar::new(OPENAPI_JSON_PATH).axum_route())
            .route(OPENAPI_JSON_PATH, get(serve_openapi));

        router.finish_api(&mut api).layer(Extension(api))
    }
}
