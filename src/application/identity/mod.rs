//! Identity module: signup, login, session tokens and role checks
//!
//! `UserService` owns the credential store use-cases; `policy` holds the
//! role predicate used to gate manager-only operations.

pub mod policy;
pub mod service;

pub use policy::require_role;
pub use service::{AuthResult, UserService};
