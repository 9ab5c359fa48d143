use async_trait::async_trait;

use super::{CreateEmployeeDto, Employee, GetEmployeesDto, UpdateEmployeeDto};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait EmployeeRepositoryInterface: Send + Sync {
    async fn create_employee(&self, dto: CreateEmployeeDto) -> DomainResult<Employee>;

    /// Employees with department and user populated.
    async fn list_employees(&self, dto: GetEmployeesDto) -> DomainResult<PaginatedResult<Employee>>;
    async fn get_employee(&self, id: &str) -> DomainResult<Option<Employee>>;
    async fn update_employee(
        &self,
        id: &str,
        dto: UpdateEmployeeDto,
    ) -> DomainResult<Option<Employee>>;
    async fn delete_employee(&self, id: &str) -> DomainResult<Option<Employee>>;
}
