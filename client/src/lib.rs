//! # staffdesk-client
//!
//! Typed access to the staffdesk REST API plus the view state a UI renders
//! from it.
//!
//! - [`StaffClient`]: one method per endpoint, bearer token read from a
//!   [`TokenStore`] on every call
//! - [`EmployeeBoard`] / [`DepartmentBoard`]: locally reconciled lists with
//!   filter, sort and paging state
//! - [`ErrorBanner`]: a single failure message that clears itself after
//!   three seconds

pub mod banner;
pub mod boards;
pub mod error;
pub mod http;
pub mod token_store;
pub mod types;

pub use banner::ErrorBanner;
pub use boards::{DepartmentBoard, EmployeeBoard};
pub use error::{ClientError, ClientResult};
pub use http::StaffClient;
pub use token_store::{FileTokenStore, MemoryTokenStore, StoredSession, TokenStore};
pub use types::*;
