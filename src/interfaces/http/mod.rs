//! HTTP REST API
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `middleware`: bearer-token gate and role extractors
//! - `modules`: handlers and DTOs per resource
//! - `router`: route table, layers and Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;


pub use router::{create_api_router, ApiDoc, ApiServices};
