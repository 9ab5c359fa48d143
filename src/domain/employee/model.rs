use chrono::{DateTime, Utc};

use crate::domain::{DepartmentRef, UserRef};

/// Employee model
#[derive(Clone, Debug)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub location: String,
    pub department_id: Option<String>,
    pub user_id: Option<String>,
    /// Populated department (id + name)
    pub department: Option<DepartmentRef>,
    /// Populated linked user (id + email)
    pub user: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field an employee listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmployeeSortField {
    Name,
    Location,
    #[default]
    CreatedAt,
}

impl EmployeeSortField {
    /// `name` / `location` / `created_at`; anything else is rejected.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "location" => Some(Self::Location),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `"desc"` sorts descending, any other value (or none) ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}
