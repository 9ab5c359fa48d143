//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod department_repository;
pub mod employee_repository;
pub mod user_repository;

pub use department_repository::DepartmentRepository;
pub use employee_repository::EmployeeRepository;
pub use user_repository::UserRepository;
