/// Data for inserting a department
#[derive(Debug, Clone)]
pub struct CreateDepartmentDto {
    pub name: String,
    pub manager_id: String,
}

/// Allow-listed department changes; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateDepartmentDto {
    pub name: Option<String>,
    pub manager_id: Option<String>,
}

impl UpdateDepartmentDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.manager_id.is_none()
    }
}
