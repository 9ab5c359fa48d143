//! Department API handlers
//!
//! Reads need an authenticated caller, writes the `Manager` role.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateDepartmentRequest, DepartmentDto, UpdateDepartmentRequest};
use crate::application::staff::DepartmentService;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::ManagerUser;

#[derive(Clone)]
pub struct DepartmentHandlerState {
    pub department_service: Arc<DepartmentService>,
}

#[utoipa::path(
    post,
    path = "/api/departments",
    tag = "Departments",
    security(("bearer_auth" = [])),
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = ApiResponse<DepartmentDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Manager role required")
    )
)]
pub async fn create_department(
    State(state): State<DepartmentHandlerState>,
    ManagerUser(caller): ManagerUser,
    ValidatedJson(request): ValidatedJson<CreateDepartmentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<DepartmentDto>>)> {
    let department = state
        .department_service
        .create_department(&caller.user, &request.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(DepartmentDto::from(department))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/departments",
    tag = "Departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All departments", body = ApiResponse<Vec<DepartmentDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_departments(
    State(state): State<DepartmentHandlerState>,
) -> ApiResult<Json<ApiResponse<Vec<DepartmentDto>>>> {
    let departments = state.department_service.list_departments().await?;
    Ok(Json(ApiResponse::success(
        departments.into_iter().map(DepartmentDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department details", body = ApiResponse<DepartmentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_department(
    State(state): State<DepartmentHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<DepartmentDto>>> {
    let department = state.department_service.get_department(&id).await?;
    Ok(Json(ApiResponse::success(DepartmentDto::from(department))))
}

#[utoipa::path(
    patch,
    path = "/api/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Department ID")),
    request_body = UpdateDepartmentRequest,
    responses(
        (status = 200, description = "Department updated", body = ApiResponse<DepartmentDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Manager role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_department(
    State(state): State<DepartmentHandlerState>,
    _caller: ManagerUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateDepartmentRequest>,
) -> ApiResult<Json<ApiResponse<DepartmentDto>>> {
    let department = state
        .department_service
        .update_department(&id, request.into())
        .await?;
    Ok(Json(ApiResponse::success(DepartmentDto::from(department))))
}

#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Deleted department", body = ApiResponse<DepartmentDto>),
        (status = 403, description = "Manager role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_department(
    State(state): State<DepartmentHandlerState>,
    _caller: ManagerUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<DepartmentDto>>> {
    let department = state.department_service.delete_department(&id).await?;
    Ok(Json(ApiResponse::success(DepartmentDto::from(department))))
}
