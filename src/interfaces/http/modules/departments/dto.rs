//! Department DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Department, UpdateDepartmentDto, UserRef};

/// A user as embedded in other records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
}

impl From<UserRef> for UserSummary {
    fn from(u: UserRef) -> Self {
        Self {
            id: u.id,
            email: u.email,
        }
    }
}

/// Department API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentDto {
    pub id: String,
    pub name: String,
    pub manager_id: String,
    pub manager: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Department> for DepartmentDto {
    fn from(d: Department) -> Self {
        Self {
            id: d.id,
            name: d.name,
            manager_id: d.manager_id,
            manager: d.manager.map(UserSummary::from),
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Create department request; the caller becomes the manager
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
}

/// Update department request. Only these fields can change.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[serde(alias = "managerId")]
    #[validate(length(min = 1, message = "manager_id must not be empty"))]
    pub manager_id: Option<String>,
}

impl From<UpdateDepartmentRequest> for UpdateDepartmentDto {
    fn from(r: UpdateDepartmentRequest) -> Self {
        Self {
            name: r.name,
            manager_id: r.manager_id,
        }
    }
}
