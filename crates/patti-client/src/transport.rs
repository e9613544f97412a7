//! Transport abstraction for the inbound frame stream.
//!
//! The table view only listens: the server pushes text frames and nothing is
//! sent back. [`NetClient`](crate::net_client::NetClient) reads from any
//! [`Transport`] without caring what carries the frames.

use std::future::Future;

use thiserror::Error;

/// Errors that can occur during transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The stream ended without a close handshake.
    #[error("connection closed")]
    ConnectionClosed,

    /// An I/O or protocol-level error.
    #[error("{0}")]
    Io(String),
}

/// A connection that yields text frames (JSON) from the server.
pub trait Transport: Send + 'static {
    /// Resolve once the server has accepted the connection.
    fn open(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Receive the next text frame.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    fn recv(&mut self) -> impl Future<Output = Result<Option<String>, TransportError>> + Send;
}
