//! Minimal HTTP service: a greeting on `/` and a liveness check on `/health`.
//!
//! ```text
//! GET /        -> 200 text/plain        "Hello from the simple API."
//! GET /health  -> 200 application/json  {"status":"ok"}
//! GET /up      -> same as /health
//! anything else -> 404
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: Router and handlers
//! - [`server`]: Listener bind and serve loop
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
