//! Auth module: signup, login, sessions and the caller's own account

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
