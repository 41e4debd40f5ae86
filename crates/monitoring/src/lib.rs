//! # Logging for the API service
//!
//! Centralized `tracing` setup shared by the service binaries.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // Uses LOG_DESTINATION: "console" for stdout, "file" for daily rotating files
//!     monitoring::init_logging()?;
//!
//!     tracing::info!("service starting");
//!     Ok(())
//! }
//! ```

pub mod logging;

pub use logging::{LogDestination, init_logging};
