//! Service wiring over an in-memory database for unit tests

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{DepartmentService, EmployeeService, UserService};
use crate::domain::{User, UserRole};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::init_in_memory_database;
use crate::infrastructure::database::repositories::{
    DepartmentRepository, EmployeeRepository, UserRepository,
};

/// Lowest bcrypt cost, keeps the suites fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub struct TestContext {
    pub db: DatabaseConnection,
    pub jwt: JwtConfig,
    pub users: UserService<UserRepository>,
    pub departments: DepartmentService,
    pub employees: EmployeeService,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
        issuer: "staffdesk-test".to_string(),
    }
}

impl TestContext {
    pub async fn new() -> Self {
        let db = init_in_memory_database()
            .await
            .expect("in-memory database");
        let jwt = test_jwt_config();

        let user_repo = Arc::new(UserRepository::new(db.clone()));
        let department_repo = Arc::new(DepartmentRepository::new(db.clone()));
        let employee_repo = Arc::new(EmployeeRepository::new(db.clone()));

        Self {
            users: UserService::new(
                user_repo.clone(),
                department_repo.clone(),
                jwt.clone(),
                TEST_BCRYPT_COST,
            ),
            departments: DepartmentService::new(department_repo.clone(), user_repo.clone()),
            employees: EmployeeService::new(employee_repo, department_repo, user_repo),
            db,
            jwt,
        }
    }

    pub async fn signup(&self, email: &str, role: UserRole) -> User {
        self.users
            .signup(email, "secret1", role)
            .await
            .expect("signup")
            .user
    }

    pub async fn manager(&self, email: &str) -> User {
        self.signup(email, UserRole::Manager).await
    }

    pub async fn employee_user(&self, email: &str) -> User {
        self.signup(email, UserRole::Employee).await
    }
}
