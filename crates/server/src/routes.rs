use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::args::{self, Args};
use service::auth::AccountService;
use service::employee::EmployeeDirectory;
use service::ServiceError;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;

pub mod auth;
pub mod employees;

/// Services shared by every handler.
#[derive(Clone)]
pub struct ServerState {
    pub accounts: Arc<AccountService>,
    pub employees: Arc<EmployeeDirectory>,
}

/// JSON request body handed to the core as a bag of named values.
///
/// Field typing is left to the validator; only unparsable bodies are rejected here.
pub struct ArgsBody(pub Args);

#[async_trait]
impl<S> FromRequest<S> for ArgsBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ArgsBody(args::from_json(value))),
            Err(rejection) => Err(ApiError(ServiceError::InvalidInput {
                message: "Request body must be a JSON object".into(),
                details: vec![rejection.body_text()],
            })),
        }
    }
}

/// Query-string extractor whose rejections use the structured error body.
pub struct QueryArgs<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryArgs<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryArgs(value)),
            Err(rejection) => Err(ApiError(ServiceError::InvalidInput {
                message: "Malformed query string".into(),
                details: vec![rejection.body_text()],
            })),
        }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, auth, employees and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/employees", get(employees::list).post(employees::create))
        .route("/employees/search", get(employees::search))
        .route(
            "/employees/:id",
            get(employees::get_by_id).put(employees::update).delete(employees::delete),
        )
        .with_state(state);

    api.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
