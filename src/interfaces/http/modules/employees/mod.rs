//! Employees module: CRUD, filtered listing and the sorted views

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
