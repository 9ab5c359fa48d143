//! Application layer: use cases over the domain repositories

pub mod identity;
pub mod staff;

#[cfg(test)]
pub(crate) mod test_support;

pub use identity::{require_role, AuthResult, UserService};
pub use staff::{DepartmentService, EmployeeService};
