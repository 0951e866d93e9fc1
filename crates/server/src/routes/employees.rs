use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use common::types::Message;
use service::employee::domain::Employee;

use super::{ArgsBody, QueryArgs, ServerState};
use crate::errors::ApiError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    pub designation: Option<String>,
    pub department: Option<String>,
}

#[utoipa::path(get, path = "/employees", tag = "employees", responses((status = 200, description = "All employees, newest first", body = [crate::openapi::EmployeeDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.employees.list().await?))
}

#[utoipa::path(
    get,
    path = "/employees/search",
    tag = "employees",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching employees", body = [crate::openapi::EmployeeDoc]),
        (status = 400, description = "No filter supplied", body = crate::errors::ErrorBody),
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    QueryArgs(params): QueryArgs<SearchParams>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let found = state
        .employees
        .search(params.designation.as_deref(), params.department.as_deref())
        .await?;
    Ok(Json(found))
}

#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    params(("id" = String, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Malformed id", body = crate::errors::ErrorBody),
        (status = 404, description = "Not found", body = crate::errors::ErrorBody),
    )
)]
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Employee>, ApiError> {
    Ok(Json(state.employees.get_by_id(&id).await?))
}

#[utoipa::path(
    post,
    path = "/employees",
    tag = "employees",
    request_body = crate::openapi::EmployeeInput,
    responses(
        (status = 201, description = "Employee created", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Invalid input or email already exists", body = crate::errors::ErrorBody),
        (status = 500, description = "Photo upload or storage failure", body = crate::errors::ErrorBody),
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ArgsBody(input): ArgsBody,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let created = state.employees.create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "employees",
    params(("id" = String, Path, description = "Employee id")),
    request_body = crate::openapi::EmployeeInput,
    responses(
        (status = 200, description = "Employee updated", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Invalid input or email already exists", body = crate::errors::ErrorBody),
        (status = 404, description = "Not found", body = crate::errors::ErrorBody),
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ArgsBody(mut input): ArgsBody,
) -> Result<Json<Employee>, ApiError> {
    // the path decides which record changes
    input.insert("eid".to_string(), Value::String(id));
    Ok(Json(state.employees.update(&input).await?))
}

#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "employees",
    params(("id" = String, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Malformed id", body = crate::errors::ErrorBody),
        (status = 404, description = "Not found", body = crate::errors::ErrorBody),
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    let message = state.employees.delete(&id).await?;
    Ok(Json(Message { message }))
}
