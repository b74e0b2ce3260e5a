//! Byte-stream transports connecting the protocol core to a device.

mod fake;
mod tcp;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use fake::{HexScript, ScriptError, ScriptedTransport};
pub use tcp::TcpTransport;

/// Errors returned by transport send/receive operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No data moved within the configured deadline.
    #[error(
        "device i/o timed out after {deadline}",
        deadline = humantime::format_duration(*timeout)
    )]
    Timeout { timeout: Duration },
    /// The stream ended while an exact-length read was outstanding.
    #[error("connection closed with {received} of {expected} expected bytes received")]
    Closed { expected: usize, received: usize },
    /// The underlying socket operation failed.
    #[error("device i/o failed")]
    Io(#[from] std::io::Error),
}

/// A duplex byte stream to the framestore device.
///
/// The two primitives mirror what the protocol grammar needs: write a whole
/// buffer, or read an exact number of bytes. Implementations own the
/// per-step deadline; the protocol core never retries or reads partial
/// frames itself.
#[async_trait]
pub trait Transport: Send {
    /// Sends every byte of `bytes`, or fails.
    async fn send_all(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Receives exactly `len` bytes, or fails.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] when the stream ends first and
    /// [`TransportError::Timeout`] when the deadline lapses.
    async fn recv_exact(&mut self, len: usize) -> Result<Vec<u8>, TransportError>;

    /// Receives a single byte; used for command acks.
    async fn recv_byte(&mut self) -> Result<u8, TransportError> {
        let byte = self.recv_exact(1).await?;
        Ok(byte[0])
    }
}
