use async_trait::async_trait;

use super::{CreateDepartmentDto, Department, UpdateDepartmentDto};
use crate::domain::DomainResult;

#[async_trait]
pub trait DepartmentRepositoryInterface: Send + Sync {
    async fn create_department(&self, dto: CreateDepartmentDto) -> DomainResult<Department>;

    /// All departments with their manager populated, oldest first.
    async fn list_departments(&self) -> DomainResult<Vec<Department>>;
    async fn get_department(&self, id: &str) -> DomainResult<Option<Department>>;
    async fn update_department(
        &self,
        id: &str,
        dto: UpdateDepartmentDto,
    ) -> DomainResult<Option<Department>>;

    /// Remove the department and detach the employees assigned to it.
    /// Returns the removed record.
    async fn delete_department(&self, id: &str) -> DomainResult<Option<Department>>;

    async fn count_managed_by(&self, user_id: &str) -> DomainResult<u64>;
}
