//! Unified error types for the service.

use std::net::SocketAddr;

use thiserror::Error;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind.
        addr: SocketAddr,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// The server loop failed after binding.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
