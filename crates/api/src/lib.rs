//! HTTP service for items and object-member links
//!
//! This crate provides:
//! - Request handlers for the `items.*` and `object-members.*` routes
//! - The route table and middleware stack
//! - Layered configuration (defaults, TOML file, environment / CLI)
//! - `ApiServiceRunner`, the process lifecycle (serve, drain, close)
//!
//! Can be used as a library or through the `api-server` binary

pub mod config;
pub mod error;
pub mod handlers;
pub mod input;
pub mod routes;
pub mod service;
pub mod shutdown;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigOverrides, FileConfig, ServiceConfig};
pub use error::ApiError;
pub use routes::{app, router};
pub use service::ApiServiceRunner;
pub use shutdown::shutdown_signal;
pub use state::AppState;
