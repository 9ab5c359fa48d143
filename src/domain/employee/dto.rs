use super::{EmployeeSortField, SortOrder};
use crate::shared::PageRequest;

/// Data for inserting an employee
#[derive(Debug, Clone)]
pub struct CreateEmployeeDto {
    pub name: String,
    pub location: String,
    pub department_id: Option<String>,
    pub user_id: Option<String>,
}

/// Allow-listed employee changes.
///
/// The reference fields are doubly optional: `None` leaves the link alone,
/// `Some(None)` detaches it, `Some(Some(id))` reassigns it.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeDto {
    pub name: Option<String>,
    pub location: Option<String>,
    pub department_id: Option<Option<String>>,
    pub user_id: Option<Option<String>>,
}

impl UpdateEmployeeDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.department_id.is_none()
            && self.user_id.is_none()
    }
}

/// Filters, ordering and optional paging for employee listings
#[derive(Debug, Clone, Default)]
pub struct GetEmployeesDto {
    /// Case-insensitive substring match on the name
    pub name: Option<String>,
    /// Case-insensitive substring match on the location
    pub location: Option<String>,
    pub sort: EmployeeSortField,
    pub order: SortOrder,
    /// `None` returns the whole filtered collection as one page
    pub page: Option<PageRequest>,
}

impl GetEmployeesDto {
    pub fn sorted(sort: EmployeeSortField, order: SortOrder) -> Self {
        Self {
            sort,
            order,
            ..Self::default()
        }
    }
}
