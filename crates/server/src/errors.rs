use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use service::ServiceError;

/// Wire form of a failed request.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

/// HTTP wrapper around [`ServiceError`].
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ServiceError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody { code: self.0.code().to_string(), message: self.0.to_string(), details: self.0.details() };
        if status.is_server_error() {
            error!(code = %body.code, message = %body.message, details = ?body.details, "request failed");
        }
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status() {
        assert_eq!(ApiError(ServiceError::invalid("x")).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError(ServiceError::Unauthenticated).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError(ServiceError::not_found("Employee")).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError(ServiceError::internal("boom", None)).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_details_are_omitted() {
        let body = ErrorBody { code: "NOT_FOUND".into(), message: "Employee not found".into(), details: vec![] };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"code": "NOT_FOUND", "message": "Employee not found"}));
    }

    #[test]
    fn startup_errors_name_their_stage() {
        assert_eq!(StartupError::InvalidConfig("port".into()).to_string(), "invalid configuration: port");
        let e: anyhow::Error = StartupError::Runtime("migrations: down".into()).into();
        assert_eq!(e.to_string(), "runtime check failed: migrations: down");
    }
}
