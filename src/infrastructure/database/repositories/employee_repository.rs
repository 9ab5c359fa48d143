use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::{
    CreateEmployeeDto, DepartmentRef, DomainResult, Employee, EmployeeRepositoryInterface,
    EmployeeSortField, GetEmployeesDto, SortOrder, UpdateEmployeeDto, UserRef,
};
use crate::infrastructure::database::entities::{department, employee, user};
use crate::shared::PaginatedResult;

pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Case folding shared by the stored filter columns and search terms.
/// SQLite's `lower()` only folds ASCII, so folding happens here.
fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// `%needle%` over the folded needle, LIKE wildcards escaped.
fn contains_pattern(needle: &str) -> LikeExpr {
    let escaped = fold(needle)
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}

fn sort_column(field: EmployeeSortField) -> employee::Column {
    match field {
        EmployeeSortField::Name => employee::Column::Name,
        EmployeeSortField::Location => employee::Column::Location,
        EmployeeSortField::CreatedAt => employee::Column::CreatedAt,
    }
}

fn sort_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

/// Resolve department names and user emails for a batch of employee rows.
async fn populate<C: ConnectionTrait>(
    conn: &C,
    models: Vec<employee::Model>,
) -> DomainResult<Vec<Employee>> {
    let department_ids: Vec<String> = models
        .iter()
        .filter_map(|m| m.department_id.clone())
        .collect();
    let user_ids: Vec<String> = models.iter().filter_map(|m| m.user_id.clone()).collect();

    let departments: HashMap<String, String> = if department_ids.is_empty() {
        HashMap::new()
    } else {
        department::Entity::find()
            .filter(department::Column::Id.is_in(department_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect()
    };

    let users: HashMap<String, String> = if user_ids.is_empty() {
        HashMap::new()
    } else {
        user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|u| (u.id, u.email))
            .collect()
    };

    Ok(models
        .into_iter()
        .map(|m| {
            let department = m.department_id.as_ref().and_then(|id| {
                departments.get(id).map(|name| DepartmentRef {
                    id: id.clone(),
                    name: name.clone(),
                })
            });
            let user = m.user_id.as_ref().and_then(|id| {
                users.get(id).map(|email| UserRef {
                    id: id.clone(),
                    email: email.clone(),
                })
            });

            Employee {
                id: m.id,
                name: m.name,
                location: m.location,
                department_id: m.department_id,
                user_id: m.user_id,
                department,
                user,
                created_at: m.created_at,
                updated_at: m.updated_at,
            }
        })
        .collect())
}

async fn populate_one<C: ConnectionTrait>(
    conn: &C,
    model: employee::Model,
) -> DomainResult<Employee> {
    let mut populated = populate(conn, vec![model]).await?;
    // populate() maps one row to exactly one employee
    Ok(populated.remove(0))
}

#[async_trait]
impl EmployeeRepositoryInterface for EmployeeRepository {
    async fn create_employee(&self, dto: CreateEmployeeDto) -> DomainResult<Employee> {
        let now = Utc::now();

        let new_employee = employee::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name_folded: Set(fold(&dto.name)),
            location_folded: Set(fold(&dto.location)),
            name: Set(dto.name),
            location: Set(dto.location),
            department_id: Set(dto.department_id),
            user_id: Set(dto.user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_employee.insert(&self.db).await?;
        populate_one(&self.db, model).await
    }

    async fn list_employees(&self, dto: GetEmployeesDto) -> DomainResult<PaginatedResult<Employee>> {
        let mut query = employee::Entity::find();

        if let Some(name) = dto.name.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(employee::Column::NameFolded.like(contains_pattern(name)));
        }
        if let Some(location) = dto.location.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(
                employee::Column::LocationFolded.like(contains_pattern(location)),
            );
        }

        query = query
            .order_by(sort_column(dto.sort), sort_order(dto.order))
            .order_by_asc(employee::Column::Id);

        let Some(page) = dto.page else {
            let models = query.all(&self.db).await?;
            let items = populate(&self.db, models).await?;
            return Ok(PaginatedResult::single_page(items));
        };

        let total = query.clone().count(&self.db).await?;
        let models = query
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await?;
        let items = populate(&self.db, models).await?;

        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn get_employee(&self, id: &str) -> DomainResult<Option<Employee>> {
        match employee::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(populate_one(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn update_employee(
        &self,
        id: &str,
        dto: UpdateEmployeeDto,
    ) -> DomainResult<Option<Employee>> {
        let Some(existing) = employee::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: employee::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name_folded = Set(fold(&name));
            active.name = Set(name);
        }
        if let Some(location) = dto.location {
            active.location_folded = Set(fold(&location));
            active.location = Set(location);
        }
        if let Some(department_id) = dto.department_id {
            active.department_id = Set(department_id);
        }
        if let Some(user_id) = dto.user_id {
            active.user_id = Set(user_id);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(populate_one(&self.db, updated).await?))
    }

    async fn delete_employee(&self, id: &str) -> DomainResult<Option<Employee>> {
        let Some(existing) = employee::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let removed = populate_one(&self.db, existing).await?;
        let result = employee::Entity::delete_by_id(id).exec(&self.db).await?;

        // A concurrent delete may have won the race
        if result.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CreateDepartmentDto, CreateUserDto, DepartmentRepositoryInterface,
        UserRepositoryInterface, UserRole,
    };
    use crate::infrastructure::database::init_in_memory_database;
    use crate::infrastructure::database::repositories::{DepartmentRepository, UserRepository};
    use crate::shared::PageRequest;

    fn new_employee(name: &str, location: &str) -> CreateEmployeeDto {
        CreateEmployeeDto {
            name: name.to_string(),
            location: location.to_string(),
            department_id: None,
            user_id: None,
        }
    }

    async fn seeded() -> EmployeeRepository {
        let repo = EmployeeRepository::new(init_in_memory_database().await.unwrap());
        for (name, location) in [("Cyd", "NY"), ("ann", "LA"), ("Bob", "SF")] {
            repo.create_employee(new_employee(name, location)).await.unwrap();
        }
        repo
    }

    fn locations(page: &PaginatedResult<Employee>) -> Vec<&str> {
        page.items.iter().map(|e| e.location.as_str()).collect()
    }

    #[tokio::test]
    async fn sorts_by_location_in_both_directions() {
        let repo = seeded().await;

        let desc = repo
            .list_employees(GetEmployeesDto::sorted(EmployeeSortField::Location, SortOrder::Desc))
            .await
            .unwrap();
        assert_eq!(locations(&desc), vec!["SF", "NY", "LA"]);

        let asc = repo
            .list_employees(GetEmployeesDto::sorted(EmployeeSortField::Location, SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(locations(&asc), vec!["LA", "NY", "SF"]);
    }

    #[tokio::test]
    async fn filters_are_case_insensitive_substrings() {
        let repo = seeded().await;

        let page = repo
            .list_employees(GetEmployeesDto {
                name: Some("AN".to_string()),
                ..GetEmployeesDto::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "ann");

        let page = repo
            .list_employees(GetEmployeesDto {
                location: Some("%".to_string()),
                ..GetEmployeesDto::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn filters_fold_accented_letters() {
        let repo = seeded().await;
        let emile = repo
            .create_employee(new_employee("ÉMILE Zola", "Genève"))
            .await
            .unwrap();

        let by_name = repo
            .list_employees(GetEmployeesDto {
                name: Some("émile".to_string()),
                ..GetEmployeesDto::default()
            })
            .await
            .unwrap();
        assert_eq!(by_name.total, 1);
        assert_eq!(by_name.items[0].id, emile.id);

        let by_location = repo
            .list_employees(GetEmployeesDto {
                location: Some("GENÈVE".to_string()),
                ..GetEmployeesDto::default()
            })
            .await
            .unwrap();
        assert_eq!(by_location.total, 1);
    }

    #[tokio::test]
    async fn renaming_refreshes_the_filter_columns() {
        let repo = seeded().await;
        let bob = repo
            .list_employees(GetEmployeesDto {
                name: Some("bob".to_string()),
                ..GetEmployeesDto::default()
            })
            .await
            .unwrap()
            .items
            .remove(0);

        repo.update_employee(
            &bob.id,
            UpdateEmployeeDto {
                name: Some("Øystein".to_string()),
                ..UpdateEmployeeDto::default()
            },
        )
        .await
        .unwrap();

        let old = repo
            .list_employees(GetEmployeesDto {
                name: Some("bob".to_string()),
                ..GetEmployeesDto::default()
            })
            .await
            .unwrap();
        assert_eq!(old.total, 0);

        let renamed = repo
            .list_employees(GetEmployeesDto {
                name: Some("øYSTEIN".to_string()),
                ..GetEmployeesDto::default()
            })
            .await
            .unwrap();
        assert_eq!(renamed.total, 1);
    }

    #[tokio::test]
    async fn pages_are_counted_over_the_filtered_set() {
        let repo = seeded().await;

        let page = repo
            .list_employees(GetEmployeesDto {
                sort: EmployeeSortField::Name,
                page: Some(PageRequest { page: 2, limit: 2 }),
                ..GetEmployeesDto::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        // Binary collation: uppercase sorts before lowercase
        assert_eq!(page.items[0].name, "ann");
    }

    #[tokio::test]
    async fn department_and_user_are_populated() {
        let db = init_in_memory_database().await.unwrap();
        let manager = UserRepository::new(db.clone())
            .create_user(CreateUserDto {
                email: "boss@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Manager,
            })
            .await
            .unwrap();
        let eng = DepartmentRepository::new(db.clone())
            .create_department(CreateDepartmentDto {
                name: "Eng".to_string(),
                manager_id: manager.id.clone(),
            })
            .await
            .unwrap();

        let repo = EmployeeRepository::new(db);
        let ann = repo.create_employee(new_employee("Ann", "NY")).await.unwrap();
        assert!(ann.department.is_none());

        let updated = repo
            .update_employee(
                &ann.id,
                UpdateEmployeeDto {
                    department_id: Some(Some(eng.id.clone())),
                    user_id: Some(Some(manager.id.clone())),
                    ..UpdateEmployeeDto::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.department.map(|d| d.name), Some("Eng".to_string()));
        assert_eq!(updated.user.map(|u| u.email), Some("boss@example.com".to_string()));
        assert_eq!(updated.name, "Ann");
    }

    #[tokio::test]
    async fn deleting_a_department_detaches_its_employees() {
        let db = init_in_memory_database().await.unwrap();
        let manager = UserRepository::new(db.clone())
            .create_user(CreateUserDto {
                email: "boss@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Manager,
            })
            .await
            .unwrap();
        let departments = DepartmentRepository::new(db.clone());
        let eng = departments
            .create_department(CreateDepartmentDto {
                name: "Eng".to_string(),
                manager_id: manager.id,
            })
            .await
            .unwrap();

        let repo = EmployeeRepository::new(db);
        let ann = repo
            .create_employee(CreateEmployeeDto {
                department_id: Some(eng.id.clone()),
                ..new_employee("Ann", "NY")
            })
            .await
            .unwrap();

        departments.delete_department(&eng.id).await.unwrap();

        let reloaded = repo.get_employee(&ann.id).await.unwrap().unwrap();
        assert!(reloaded.department_id.is_none());
        assert!(reloaded.department.is_none());
    }

    #[tokio::test]
    async fn delete_twice_returns_record_then_none() {
        let repo = seeded().await;
        let all = repo.list_employees(GetEmployeesDto::default()).await.unwrap();
        let id = all.items[0].id.clone();

        assert!(repo.delete_employee(&id).await.unwrap().is_some());
        assert!(repo.delete_employee(&id).await.unwrap().is_none());
    }
}
