use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use service::auth::domain::Account;

use super::{ArgsBody, ServerState};
use crate::errors::ApiError;

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = crate::openapi::SignupRequest,
    responses(
        (status = 201, description = "Account created", body = crate::openapi::AccountDoc),
        (status = 400, description = "Invalid input or email already exists", body = crate::errors::ErrorBody),
    )
)]
pub async fn signup(
    State(state): State<ServerState>,
    ArgsBody(input): ArgsBody,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let account = state.accounts.signup(&input).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Bearer token issued", body = crate::openapi::TokenDoc),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorBody),
        (status = 401, description = "Invalid credentials", body = crate::errors::ErrorBody),
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    ArgsBody(input): ArgsBody,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.accounts.login(&input).await?;
    Ok(Json(TokenResponse { token }))
}
