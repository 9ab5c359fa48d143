use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{
    CreateDepartmentDto, Department, DepartmentRepositoryInterface, DomainResult,
    UpdateDepartmentDto, UserRef,
};
use crate::infrastructure::database::entities::{department, employee, user};

pub struct DepartmentRepository {
    db: DatabaseConnection,
}

impl DepartmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn department_model_to_domain(model: department::Model, manager: Option<user::Model>) -> Department {
    Department {
        id: model.id,
        name: model.name,
        manager_id: model.manager_id,
        manager: manager.map(|m| UserRef {
            id: m.id,
            email: m.email,
        }),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl DepartmentRepositoryInterface for DepartmentRepository {
    async fn create_department(&self, dto: CreateDepartmentDto) -> DomainResult<Department> {
        let now = Utc::now();

        let new_department = department::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(dto.name),
            manager_id: Set(dto.manager_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_department.insert(&self.db).await?;
        let manager = user::Entity::find_by_id(&model.manager_id)
            .one(&self.db)
            .await?;

        Ok(department_model_to_domain(model, manager))
    }

    async fn list_departments(&self) -> DomainResult<Vec<Department>> {
        let rows = department::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(department::Column::CreatedAt)
            .order_by_asc(department::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(d, m)| department_model_to_domain(d, m))
            .collect())
    }

    async fn get_department(&self, id: &str) -> DomainResult<Option<Department>> {
        let row = department::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(d, m)| department_model_to_domain(d, m)))
    }

    async fn update_department(
        &self,
        id: &str,
        dto: UpdateDepartmentDto,
    ) -> DomainResult<Option<Department>> {
        let Some(existing) = department::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: department::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(manager_id) = dto.manager_id {
            active.manager_id = Set(manager_id);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        let manager = user::Entity::find_by_id(&updated.manager_id)
            .one(&self.db)
            .await?;

        Ok(Some(department_model_to_domain(updated, manager)))
    }

    async fn delete_department(&self, id: &str) -> DomainResult<Option<Department>> {
        let txn = self.db.begin().await?;

        let Some((model, manager)) = department::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            return Ok(None);
        };

        employee::Entity::update_many()
            .col_expr(
                employee::Column::DepartmentId,
                Expr::value(Option::<String>::None),
            )
            .col_expr(employee::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(employee::Column::DepartmentId.eq(id))
            .exec(&txn)
            .await?;

        department::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(Some(department_model_to_domain(model, manager)))
    }

    async fn count_managed_by(&self, user_id: &str) -> DomainResult<u64> {
        let count = department::Entity::find()
            .filter(department::Column::ManagerId.eq(user_id))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateUserDto, UserRepositoryInterface, UserRole};
    use crate::infrastructure::database::init_in_memory_database;
    use crate::infrastructure::database::repositories::UserRepository;

    async fn setup() -> (DatabaseConnection, String) {
        let db = init_in_memory_database().await.unwrap();
        let manager = UserRepository::new(db.clone())
            .create_user(CreateUserDto {
                email: "boss@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Manager,
            })
            .await
            .unwrap();
        (db, manager.id)
    }

    #[tokio::test]
    async fn created_department_embeds_manager_email() {
        let (db, manager_id) = setup().await;
        let repo = DepartmentRepository::new(db);

        let created = repo
            .create_department(CreateDepartmentDto {
                name: "Eng".to_string(),
                manager_id: manager_id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(created.manager.as_ref().map(|m| m.email.as_str()), Some("boss@example.com"));

        let listed = repo.list_departments().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Eng");
        assert_eq!(listed[0].manager.as_ref().map(|m| m.id.clone()), Some(manager_id));
    }

    #[tokio::test]
    async fn update_missing_department_returns_none() {
        let (db, _) = setup().await;
        let repo = DepartmentRepository::new(db);
        let result = repo
            .update_department(
                "missing",
                UpdateDepartmentDto {
                    name: Some("X".to_string()),
                    manager_id: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_returns_record_then_none() {
        let (db, manager_id) = setup().await;
        let repo = DepartmentRepository::new(db);
        let created = repo
            .create_department(CreateDepartmentDto {
                name: "Ops".to_string(),
                manager_id: manager_id.clone(),
            })
            .await
            .unwrap();

        assert_eq!(repo.count_managed_by(&manager_id).await.unwrap(), 1);
        let removed = repo.delete_department(&created.id).await.unwrap();
        assert_eq!(removed.map(|d| d.name), Some("Ops".to_string()));
        assert!(repo.delete_department(&created.id).await.unwrap().is_none());
        assert_eq!(repo.count_managed_by(&manager_id).await.unwrap(), 0);
    }
}
