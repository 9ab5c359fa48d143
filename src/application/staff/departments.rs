//! Department use cases

use std::sync::Arc;

use tracing::info;

use crate::application::identity::require_role;
use crate::domain::{
    normalize_department_name, CreateDepartmentDto, Department, DepartmentRepositoryInterface,
    DomainError, DomainResult, UpdateDepartmentDto, User, UserRepositoryInterface, UserRole,
};

pub struct DepartmentService {
    repo: Arc<dyn DepartmentRepositoryInterface>,
    users: Arc<dyn UserRepositoryInterface>,
}

impl DepartmentService {
    pub fn new(
        repo: Arc<dyn DepartmentRepositoryInterface>,
        users: Arc<dyn UserRepositoryInterface>,
    ) -> Self {
        Self { repo, users }
    }

    /// Create a department owned by `manager`.
    pub async fn create_department(&self, manager: &User, name: &str) -> DomainResult<Department> {
        require_role(manager, UserRole::Manager)?;
        let name = normalize_department_name(name).map_err(DomainError::Validation)?;

        let department = self
            .repo
            .create_department(CreateDepartmentDto {
                name,
                manager_id: manager.id.clone(),
            })
            .await?;

        info!(department_id = %department.id, manager_id = %manager.id, "Department created");
        Ok(department)
    }

    pub async fn list_departments(&self) -> DomainResult<Vec<Department>> {
        self.repo.list_departments().await
    }

    pub async fn get_department(&self, id: &str) -> DomainResult<Department> {
        self.repo
            .get_department(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Department", id))
    }

    /// Apply the allow-listed changes. A new manager must exist and hold the
    /// `Manager` role.
    pub async fn update_department(
        &self,
        id: &str,
        mut dto: UpdateDepartmentDto,
    ) -> DomainResult<Department> {
        if dto.is_empty() {
            return Err(DomainError::Validation("No updatable fields supplied".into()));
        }
        if let Some(name) = dto.name.take() {
            dto.name = Some(normalize_department_name(&name).map_err(DomainError::Validation)?);
        }

        if let Some(manager_id) = &dto.manager_id {
            let manager = self.users.get_user_by_id(manager_id).await?.ok_or_else(|| {
                DomainError::Validation(format!("Manager '{}' does not exist", manager_id))
            })?;
            if !manager.is_manager() {
                return Err(DomainError::Validation(format!(
                    "User '{}' is not a Manager",
                    manager_id
                )));
            }
        }

        let department = self
            .repo
            .update_department(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Department", id))?;

        info!(department_id = %department.id, "Department updated");
        Ok(department)
    }

    /// Delete and return the department. Its employees are detached.
    pub async fn delete_department(&self, id: &str) -> DomainResult<Department> {
        let department = self
            .repo
            .delete_department(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Department", id))?;

        info!(department_id = %department.id, "Department deleted");
        Ok(department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestContext;
    use crate::domain::CreateEmployeeDto;

    #[tokio::test]
    async fn created_department_lists_with_manager_email() {
        let ctx = TestContext::new().await;
        let boss = ctx.manager("boss@example.com").await;

        let created = ctx
            .departments
            .create_department(&boss, "  Eng ")
            .await
            .unwrap();
        assert_eq!(created.name, "Eng");

        let listed = ctx.departments.list_departments().await.unwrap();
        let found = listed.iter().find(|d| d.id == created.id).unwrap();
        assert_eq!(found.name, "Eng");
        assert_eq!(
            found.manager.as_ref().map(|m| m.email.as_str()),
            Some("boss@example.com")
        );
    }

    #[tokio::test]
    async fn employees_cannot_own_departments() {
        let ctx = TestContext::new().await;
        let worker = ctx.employee_user("worker@example.com").await;
        let err = ctx
            .departments
            .create_department(&worker, "Eng")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn blank_name_is_a_validation_error() {
        let ctx = TestContext::new().await;
        let boss = ctx.manager("boss@example.com").await;
        let err = ctx
            .departments
            .create_department(&boss, "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_update_is_a_validation_error() {
        let ctx = TestContext::new().await;
        let boss = ctx.manager("boss@example.com").await;
        let department = ctx
            .departments
            .create_department(&boss, "Eng")
            .await
            .unwrap();

        let err = ctx
            .departments
            .update_department(&department.id, UpdateDepartmentDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn reassigning_manager_requires_a_manager() {
        let ctx = TestContext::new().await;
        let boss = ctx.manager("boss@example.com").await;
        let other = ctx.manager("other@example.com").await;
        let worker = ctx.employee_user("worker@example.com").await;
        let department = ctx
            .departments
            .create_department(&boss, "Eng")
            .await
            .unwrap();

        let err = ctx
            .departments
            .update_department(
                &department.id,
                UpdateDepartmentDto {
                    manager_id: Some(worker.id.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let updated = ctx
            .departments
            .update_department(
                &department.id,
                UpdateDepartmentDto {
                    name: Some("Platform".to_string()),
                    manager_id: Some(other.id.clone()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Platform");
        assert_eq!(
            updated.manager.map(|m| m.email),
            Some("other@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn update_of_unknown_department_is_not_found() {
        let ctx = TestContext::new().await;
        let err = ctx
            .departments
            .update_department(
                "missing",
                UpdateDepartmentDto {
                    name: Some("X".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_detaches_employees_and_is_not_repeatable() {
        let ctx = TestContext::new().await;
        let boss = ctx.manager("boss@example.com").await;
        let department = ctx
            .departments
            .create_department(&boss, "Eng")
            .await
            .unwrap();
        let ann = ctx
            .employees
            .create_employee(CreateEmployeeDto {
                name: "Ann".to_string(),
                location: "NY".to_string(),
                department_id: Some(department.id.clone()),
                user_id: None,
            })
            .await
            .unwrap();

        let removed = ctx
            .departments
            .delete_department(&department.id)
            .await
            .unwrap();
        assert_eq!(removed.id, department.id);

        let ann = ctx.employees.get_employee(&ann.id).await.unwrap();
        assert_eq!(ann.department_id, None);
        assert!(ann.department.is_none());

        assert!(matches!(
            ctx.departments.delete_department(&department.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
