use std::collections::VecDeque;
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

use super::{Transport, TransportError};

/// Errors returned when parsing fake device scripts.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script is not valid hexadecimal.
    #[error("fake device script must be hexadecimal bytes")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Hex-encoded byte script accepted on the command line.
///
/// ```
/// use hs450::HexScript;
///
/// let script: HexScript = "10000200 01".parse()?;
/// assert_eq!(&[0x10, 0x00, 0x02, 0x00, 0x01], script.bytes());
/// # Ok::<(), hs450::ScriptError>(())
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HexScript(Vec<u8>);

impl HexScript {
    /// Returns the decoded script bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the script and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl FromStr for HexScript {
    type Err = ScriptError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        Ok(Self(hex::decode(compact)?))
    }
}

/// In-memory transport that plays a fixed device script.
///
/// Reads are served from the script in order; writes are recorded verbatim.
/// When the script runs dry mid-read the transport reports a closed
/// connection, which lets tests exercise short-frame behaviour without a
/// socket.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    incoming: VecDeque<u8>,
    outgoing: Vec<u8>,
}

impl ScriptedTransport {
    /// Creates a transport that will serve `script` to the reader.
    #[must_use]
    pub fn new(script: impl Into<Vec<u8>>) -> Self {
        Self {
            incoming: script.into().into(),
            outgoing: Vec::new(),
        }
    }

    /// Returns every byte written to the fake device so far, in order.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.outgoing
    }

    /// Returns how many scripted bytes remain unread.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.incoming.len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.outgoing.extend_from_slice(bytes);
        Ok(())
    }

    async fn recv_exact(&mut self, len: usize) -> Result<Vec<u8>, TransportError> {
        if self.incoming.len() < len {
            let received = self.incoming.len();
            self.incoming.clear();
            return Err(TransportError::Closed {
                expected: len,
                received,
            });
        }
        Ok(self.incoming.drain(..len).collect())
    }
}
