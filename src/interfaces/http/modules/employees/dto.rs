//! Employee DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{CreateEmployeeDto, DepartmentRef, Employee, UpdateEmployeeDto};
use crate::interfaces::http::modules::departments::UserSummary;

/// A department as embedded in employee records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentSummary {
    pub id: String,
    pub name: String,
}

impl From<DepartmentRef> for DepartmentSummary {
    fn from(d: DepartmentRef) -> Self {
        Self {
            id: d.id,
            name: d.name,
        }
    }
}

/// Employee API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDto {
    pub id: String,
    pub name: String,
    pub location: String,
    pub department_id: Option<String>,
    pub department: Option<DepartmentSummary>,
    pub user_id: Option<String>,
    pub user: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            location: e.location,
            department_id: e.department_id,
            department: e.department.map(DepartmentSummary::from),
            user_id: e.user_id,
            user: e.user.map(UserSummary::from),
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "location must be 1-100 characters"))]
    pub location: String,
    #[serde(default, alias = "departmentId")]
    pub department_id: Option<String>,
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
}

impl From<CreateEmployeeRequest> for CreateEmployeeDto {
    fn from(r: CreateEmployeeRequest) -> Self {
        Self {
            name: r.name,
            location: r.location,
            department_id: r.department_id,
            user_id: r.user_id,
        }
    }
}

/// Update employee request. Only these fields can change; `null` on a
/// reference detaches it.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "location must be 1-100 characters"))]
    pub location: Option<String>,
    #[serde(default, alias = "departmentId", deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub department_id: Option<Option<String>>,
    #[serde(default, alias = "userId", deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub user_id: Option<Option<String>>,
}

impl From<UpdateEmployeeRequest> for UpdateEmployeeDto {
    fn from(r: UpdateEmployeeRequest) -> Self {
        Self {
            name: r.name,
            location: r.location,
            department_id: r.department_id,
            user_id: r.user_id,
        }
    }
}

/// List employees query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEmployeesParams {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    /// `name`, `location` or `created_at` (default)
    pub sort: Option<String>,
    /// `desc` for descending, anything else ascending
    pub order: Option<String>,
    /// 1-based page; paging is off when neither `page` nor `limit` is given
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Query for the dedicated sorted views
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortOrderParams {
    /// `desc` for descending, anything else ascending
    pub order: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_null_from_absent() {
        let absent: UpdateEmployeeRequest = serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
        assert_eq!(absent.department_id, None);

        let cleared: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"department_id":null}"#).unwrap();
        assert_eq!(cleared.department_id, Some(None));

        let camel: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"departmentId":"d1"}"#).unwrap();
        assert_eq!(camel.department_id, Some(Some("d1".to_string())));
    }

    #[test]
    fn update_rejects_fields_outside_the_allow_list() {
        let parsed = serde_json::from_str::<UpdateEmployeeRequest>(r#"{"id":"x","name":"Ann"}"#);
        assert!(parsed.is_err());
    }
}
