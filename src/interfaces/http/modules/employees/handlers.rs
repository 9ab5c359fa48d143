//! Employee API handlers
//!
//! Reads need an authenticated caller, writes the `Manager` role.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateEmployeeRequest, EmployeeDto, ListEmployeesParams, SortOrderParams,
    UpdateEmployeeRequest,
};
use crate::application::staff::EmployeeService;
use crate::config::PaginationConfig;
use crate::domain::{DomainError, Employee, EmployeeSortField, GetEmployeesDto, SortOrder};
use crate::interfaces::http::common::{ApiResponse, ApiResult, PaginatedResponse, ValidatedJson};
use crate::interfaces::http::middleware::ManagerUser;
use crate::shared::PageRequest;

#[derive(Clone)]
pub struct EmployeeHandlerState {
    pub employee_service: Arc<EmployeeService>,
    pub pagination: PaginationConfig,
}

fn to_dtos(employees: Vec<Employee>) -> Vec<EmployeeDto> {
    employees.into_iter().map(EmployeeDto::from).collect()
}

/// Turn raw query parameters into a listing request.
fn list_query(
    params: ListEmployeesParams,
    pagination: &PaginationConfig,
) -> Result<GetEmployeesDto, DomainError> {
    let sort = match params.sort.as_deref() {
        None | Some("") => EmployeeSortField::default(),
        Some(raw) => EmployeeSortField::from_param(raw).ok_or_else(|| {
            DomainError::Validation(format!(
                "sort must be one of name, location, created_at (got '{}')",
                raw
            ))
        })?,
    };

    let page = match (params.page, params.limit) {
        (None, None) => None,
        (page, limit) => Some(PageRequest::clamped(
            page.unwrap_or(1),
            limit.unwrap_or(pagination.default_limit),
            pagination.max_limit,
        )),
    };

    let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    Ok(GetEmployeesDto {
        name: non_blank(params.name),
        location: non_blank(params.location),
        sort,
        order: SortOrder::from_param(params.order.as_deref()),
        page,
    })
}

#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = ApiResponse<EmployeeDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Manager role required")
    )
)]
pub async fn create_employee(
    State(state): State<EmployeeHandlerState>,
    _caller: ManagerUser,
    ValidatedJson(request): ValidatedJson<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<EmployeeDto>>)> {
    let employee = state
        .employee_service
        .create_employee(request.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(EmployeeDto::from(employee))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(ListEmployeesParams),
    responses(
        (status = 200, description = "Employee page", body = PaginatedResponse<EmployeeDto>),
        (status = 400, description = "Invalid sort field"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_employees(
    State(state): State<EmployeeHandlerState>,
    Query(params): Query<ListEmployeesParams>,
) -> ApiResult<Json<PaginatedResponse<EmployeeDto>>> {
    let query = list_query(params, &state.pagination)?;
    let result = state.employee_service.list_employees(query).await?;
    Ok(Json(PaginatedResponse::from_result(result, EmployeeDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/employees/sorted/location",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(SortOrderParams),
    responses(
        (status = 200, description = "All employees ordered by location", body = ApiResponse<Vec<EmployeeDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_sorted_by_location(
    State(state): State<EmployeeHandlerState>,
    Query(params): Query<SortOrderParams>,
) -> ApiResult<Json<ApiResponse<Vec<EmployeeDto>>>> {
    let order = SortOrder::from_param(params.order.as_deref());
    let employees = state.employee_service.list_sorted_by_location(order).await?;
    Ok(Json(ApiResponse::success(to_dtos(employees))))
}

#[utoipa::path(
    get,
    path = "/api/employees/sorted/name",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(SortOrderParams),
    responses(
        (status = 200, description = "All employees ordered by name", body = ApiResponse<Vec<EmployeeDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_sorted_by_name(
    State(state): State<EmployeeHandlerState>,
    Query(params): Query<SortOrderParams>,
) -> ApiResult<Json<ApiResponse<Vec<EmployeeDto>>>> {
    let order = SortOrder::from_param(params.order.as_deref());
    let employees = state.employee_service.list_sorted_by_name(order).await?;
    Ok(Json(ApiResponse::success(to_dtos(employees))))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee details", body = ApiResponse<EmployeeDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_employee(
    State(state): State<EmployeeHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<EmployeeDto>>> {
    let employee = state.employee_service.get_employee(&id).await?;
    Ok(Json(ApiResponse::success(EmployeeDto::from(employee))))
}

#[utoipa::path(
    patch,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = ApiResponse<EmployeeDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Manager role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_employee(
    State(state): State<EmployeeHandlerState>,
    _caller: ManagerUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateEmployeeRequest>,
) -> ApiResult<Json<ApiResponse<EmployeeDto>>> {
    let employee = state
        .employee_service
        .update_employee(&id, request.into())
        .await?;
    Ok(Json(ApiResponse::success(EmployeeDto::from(employee))))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Deleted employee", body = ApiResponse<EmployeeDto>),
        (status = 403, description = "Manager role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_employee(
    State(state): State<EmployeeHandlerState>,
    _caller: ManagerUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<EmployeeDto>>> {
    let employee = state.employee_service.delete_employee(&id).await?;
    Ok(Json(ApiResponse::success(EmployeeDto::from(employee))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_is_off_without_page_or_limit() {
        let query = list_query(ListEmployeesParams::default(), &PaginationConfig::default()).unwrap();
        assert!(query.page.is_none());
        assert_eq!(query.sort, EmployeeSortField::CreatedAt);
    }

    #[test]
    fn limit_is_clamped_to_the_configured_maximum() {
        let params = ListEmployeesParams {
            page: Some(0),
            limit: Some(500),
            ..Default::default()
        };
        let query = list_query(params, &PaginationConfig::default()).unwrap();
        assert_eq!(query.page, Some(PageRequest { page: 1, limit: 100 }));
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let params = ListEmployeesParams {
            sort: Some("salary".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            list_query(params, &PaginationConfig::default()),
            Err(DomainError::Validation(_))
        ));
    }
}
