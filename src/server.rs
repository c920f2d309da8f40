//! HTTP listener and serve loop.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::{Result, ServiceError};

/// Address the service listens on: every interface.
pub const BIND_HOST: Ipv4Addr = Ipv4Addr::UNSPECIFIED;

/// A bound listener, ready to serve.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl Server {
    /// Bind `0.0.0.0:port`. Port 0 asks the OS for a free port.
    pub async fn bind(port: u16) -> Result<Self> {
        let addr = SocketAddr::from((BIND_HOST, port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServiceError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServiceError::Bind { addr, source })?;

        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Address actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve `router` until `shutdown` resolves, then drain open connections.
    pub async fn run<F>(self, router: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(address = %self.local_addr, "HTTP server listening");

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServiceError::Serve)?;

        info!("HTTP server stopped");
        Ok(())
    }
}
