//! Departments module: CRUD with the manager embedded

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
