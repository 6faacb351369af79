//! TCP listener implementation with backpressure.
//!
//! # Responsibilities
//! - Bind to the configured host and the resolved port
//! - Accept incoming TCP connections
//! - Enforce max_connections limit via semaphore
//! - Graceful handling of accept errors
//! - Stop accepting when shutdown is signalled

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, Semaphore};

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    /// Failed to accept connection.
    #[error("Failed to accept: {0}")]
    Accept(#[source] std::io::Error),
    /// The connection limiter was closed.
    #[error("Connection limiter closed")]
    LimiterClosed,
}

/// A bounded TCP listener that limits concurrent connections.
///
/// Uses a semaphore to enforce `max_connections`. When the limit is reached,
/// new connections will wait until a slot becomes available.
pub struct Listener {
    /// The underlying TCP listener.
    inner: TcpListener,
    /// Semaphore to limit concurrent connections.
    connection_limit: Arc<Semaphore>,
    /// Configured maximum connections.
    max_connections: usize,
}

impl Listener {
    /// Bind to `bind_host:port` with the configured connection limit.
    pub async fn bind(config: &ListenerConfig, port: u16) -> Result<Self, ListenerError> {
        let address = format!("{}:{}", config.bind_host, port);
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ListenerError::Bind {
                address: address.clone(),
                source,
            })?;

        tracing::info!(
            address = %address,
            max_connections = config.max_connections,
            "Listener bound"
        );

        Ok(Self {
            inner: listener,
            connection_limit: Arc::new(Semaphore::new(config.max_connections)),
            max_connections: config.max_connections,
        })
    }

    /// Accept a new connection, respecting the connection limit.
    ///
    /// This will wait if the connection limit has been reached.
    /// Returns the stream and a permit that must be held for the connection's lifetime.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr, ConnectionPermit), ListenerError> {
        // Acquire permit first (backpressure)
        let permit = self
            .connection_limit
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ListenerError::LimiterClosed)?;

        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        tracing::debug!(
            peer_addr = %addr,
            available_permits = self.connection_limit.available_permits(),
            "Connection accepted"
        );

        Ok((stream, addr, ConnectionPermit { _permit: permit }))
    }

    /// Accept connections until `shutdown` fires.
    ///
    /// Client protocol handling lives outside the bootstrap layer, so
    /// accepted connections are closed once their permit is released.
    pub async fn serve(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), ListenerError> {
        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Listener stopping");
                    return Ok(());
                }
                accepted = self.accept() => handle_accepted(accepted).await?,
            }
        }
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// Get current available connection slots.
    pub fn available_permits(&self) -> usize {
        self.connection_limit.available_permits()
    }

    /// Get configured maximum connections.
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }
}

/// Pause before retrying after a resource-exhaustion accept error.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Dispatch one accept result. Only a closed limiter ends the serve loop;
/// accept errors are logged and the loop keeps going.
async fn handle_accepted(
    accepted: Result<(TcpStream, SocketAddr, ConnectionPermit), ListenerError>,
) -> Result<(), ListenerError> {
    match accepted {
        Ok((stream, addr, permit)) => {
            tokio::spawn(async move {
                let _permit = permit;
                tracing::debug!(peer_addr = %addr, "Closing connection");
                drop(stream);
            });
            Ok(())
        }
        Err(ListenerError::Accept(e)) => {
            tracing::warn!(error = %e, "Accept failed");
            if let Some(delay) = accept_backoff(&e) {
                tokio::time::sleep(delay).await;
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Backoff for an accept error. Errors tied to a single peer connection
/// retry immediately; anything else (EMFILE, ENFILE, ENOBUFS) waits.
fn accept_backoff(err: &io::Error) -> Option<Duration> {
    match err.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::Interrupted => None,
        _ => Some(ACCEPT_BACKOFF),
    }
}

/// A permit representing a connection slot.
///
/// When dropped, the connection slot is released back to the pool.
#[derive(Debug)]
pub struct ConnectionPermit {
    _permit: tokio::sync::OwnedSemaphorePermit,
}
