//! Department aggregate

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateDepartmentDto, UpdateDepartmentDto};
pub use model::{normalize_department_name, Department, DepartmentRef, MAX_DEPARTMENT_NAME_LEN};
pub use repository::DepartmentRepositoryInterface;
