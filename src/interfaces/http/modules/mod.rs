pub mod auth;
pub mod departments;
pub mod employees;
pub mod health;
pub mod metrics;
pub mod request_id;
