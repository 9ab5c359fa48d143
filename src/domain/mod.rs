//! Domain layer: aggregates, DTOs and repository interfaces

pub mod department;
pub mod employee;
pub mod user;

pub use department::{
    normalize_department_name, CreateDepartmentDto, Department, DepartmentRef,
    DepartmentRepositoryInterface, UpdateDepartmentDto,
};
pub use employee::{
    CreateEmployeeDto, Employee, EmployeeRepositoryInterface, EmployeeSortField, GetEmployeesDto,
    SortOrder, UpdateEmployeeDto,
};
pub use user::{CreateUserDto, NewSessionToken, User, UserRef, UserRepositoryInterface, UserRole};

pub use crate::shared::{DomainError, DomainResult};
