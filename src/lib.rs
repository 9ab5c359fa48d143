//! # Staffdesk
//!
//! Department and employee directory served over a REST API with
//! bearer-token sessions.
//!
//! ## Architecture
//!
//! - **domain**: aggregates, DTOs and repository interfaces
//! - **application**: use cases (identity, departments, employees)
//! - **infrastructure**: SeaORM persistence, JWT / bcrypt / token digests
//! - **interfaces**: axum handlers, middleware and router with Swagger UI
//! - **shared**: error taxonomy, pagination, shutdown coordination
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::http::create_api_router;
pub use server::{init_tracing, ServerHandle, ServerOptions};
