//! Department and employee resource controllers

pub mod departments;
pub mod employees;

pub use departments::DepartmentService;
pub use employees::EmployeeService;
