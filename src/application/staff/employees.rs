//! Employee use cases

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateEmployeeDto, DepartmentRepositoryInterface, DomainError, DomainResult, Employee,
    EmployeeRepositoryInterface, EmployeeSortField, GetEmployeesDto, SortOrder, UpdateEmployeeDto,
    UserRepositoryInterface,
};
use crate::shared::PaginatedResult;

pub const MAX_EMPLOYEE_FIELD_LEN: usize = 100;

pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepositoryInterface>,
    departments: Arc<dyn DepartmentRepositoryInterface>,
    users: Arc<dyn UserRepositoryInterface>,
}

fn required_text(field: &str, raw: &str) -> DomainResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > MAX_EMPLOYEE_FIELD_LEN {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_EMPLOYEE_FIELD_LEN
        )));
    }
    Ok(value.to_string())
}

impl EmployeeService {
    pub fn new(
        repo: Arc<dyn EmployeeRepositoryInterface>,
        departments: Arc<dyn DepartmentRepositoryInterface>,
        users: Arc<dyn UserRepositoryInterface>,
    ) -> Self {
        Self {
            repo,
            departments,
            users,
        }
    }

    async fn check_department(&self, id: Option<&str>) -> DomainResult<()> {
        let Some(id) = id else { return Ok(()) };
        if self.departments.get_department(id).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "Department '{}' does not exist",
                id
            )));
        }
        Ok(())
    }

    async fn check_user(&self, id: Option<&str>) -> DomainResult<()> {
        let Some(id) = id else { return Ok(()) };
        if self.users.get_user_by_id(id).await?.is_none() {
            return Err(DomainError::Validation(format!("User '{}' does not exist", id)));
        }
        Ok(())
    }

    pub async fn create_employee(&self, mut dto: CreateEmployeeDto) -> DomainResult<Employee> {
        dto.name = required_text("name", &dto.name)?;
        dto.location = required_text("location", &dto.location)?;
        self.check_department(dto.department_id.as_deref()).await?;
        self.check_user(dto.user_id.as_deref()).await?;

        let employee = self.repo.create_employee(dto).await?;
        info!(employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    /// Filtered, ordered and optionally paged listing.
    pub async fn list_employees(
        &self,
        dto: GetEmployeesDto,
    ) -> DomainResult<PaginatedResult<Employee>> {
        self.repo.list_employees(dto).await
    }

    pub async fn list_sorted_by_location(&self, order: SortOrder) -> DomainResult<Vec<Employee>> {
        let result = self
            .repo
            .list_employees(GetEmployeesDto::sorted(EmployeeSortField::Location, order))
            .await?;
        Ok(result.items)
    }

    pub async fn list_sorted_by_name(&self, order: SortOrder) -> DomainResult<Vec<Employee>> {
        let result = self
            .repo
            .list_employees(GetEmployeesDto::sorted(EmployeeSortField::Name, order))
            .await?;
        Ok(result.items)
    }

    pub async fn get_employee(&self, id: &str) -> DomainResult<Employee> {
        self.repo
            .get_employee(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", id))
    }

    /// Apply the allow-listed changes. Never creates a record.
    pub async fn update_employee(
        &self,
        id: &str,
        mut dto: UpdateEmployeeDto,
    ) -> DomainResult<Employee> {
        if dto.is_empty() {
            return Err(DomainError::Validation("No updatable fields supplied".into()));
        }
        if let Some(name) = dto.name.take() {
            dto.name = Some(required_text("name", &name)?);
        }
        if let Some(location) = dto.location.take() {
            dto.location = Some(required_text("location", &location)?);
        }
        if let Some(department_id) = &dto.department_id {
            self.check_department(department_id.as_deref()).await?;
        }
        if let Some(user_id) = &dto.user_id {
            self.check_user(user_id.as_deref()).await?;
        }

        let employee = self
            .repo
            .update_employee(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", id))?;

        info!(employee_id = %employee.id, "Employee updated");
        Ok(employee)
    }

    pub async fn delete_employee(&self, id: &str) -> DomainResult<Employee> {
        let employee = self
            .repo
            .delete_employee(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", id))?;

        info!(employee_id = %employee.id, "Employee deleted");
        Ok(employee)
    }
}
