//! Employee aggregate

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateEmployeeDto, GetEmployeesDto, UpdateEmployeeDto};
pub use model::{Employee, EmployeeSortField, SortOrder};
pub use repository::EmployeeRepositoryInterface;
