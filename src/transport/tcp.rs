use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;
use tracing::{debug, instrument};

use crate::protocol::DEVICE_PORT;

use super::{Transport, TransportError};

/// TCP transport to a mixer's framestore service.
///
/// Every connect, send, and receive step runs under the same configured
/// deadline. A lapsed deadline aborts the in-flight operation; the caller
/// abandons the whole transfer rather than resuming mid-stream.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    timeout: Duration,
}

impl TcpTransport {
    /// Connects to the framestore service on `host`.
    ///
    /// `host` may carry an explicit `:port`; otherwise the fixed framestore
    /// port 60010 is used.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection cannot be established within
    /// `timeout` or the socket refuses.
    #[instrument(level = "info", fields(%host))]
    pub async fn connect(host: &str, timeout: Duration) -> Result<Self, TransportError> {
        let address = if host.contains(':') {
            host.to_string()
        } else {
            format!("{host}:{DEVICE_PORT}")
        };

        let stream = time::timeout(timeout, TcpStream::connect(&address))
            .await
            .map_err(|_elapsed| TransportError::Timeout { timeout })??;
        debug!(%address, "connected to framestore service");

        Ok(Self { stream, timeout })
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        time::timeout(self.timeout, self.stream.write_all(bytes))
            .await
            .map_err(|_elapsed| TransportError::Timeout {
                timeout: self.timeout,
            })??;
        Ok(())
    }

    async fn recv_exact(&mut self, len: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; len];
        let mut filled = 0;

        // Read in whatever chunks the socket yields so a premature close
        // can report how many bytes actually arrived.
        while filled < len {
            let read = time::timeout(self.timeout, self.stream.read(&mut buf[filled..]))
                .await
                .map_err(|_elapsed| TransportError::Timeout {
                    timeout: self.timeout,
                })??;
            if read == 0 {
                return Err(TransportError::Closed {
                    expected: len,
                    received: filled,
                });
            }
            filled += read;
        }

        Ok(buf)
    }
}
