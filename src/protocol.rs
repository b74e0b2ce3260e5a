use std::fmt::{self, Formatter};
use std::str::FromStr;

use strum_macros::Display;
use thiserror::Error;

/// TCP port the framestore service listens on.
pub const DEVICE_PORT: u16 = 60010;

/// Number of framestore slots addressable by the protocol.
pub const SLOT_COUNT: u8 = 4;

/// Wire length of the `(width, height)` frame header.
pub const HEADER_LEN: usize = 4;

/// Ack byte sent by the device after a get command, before the header.
pub const GET_READY_ACK: u8 = 0x10;

/// Ack byte sent by the device both before and after a put payload.
pub const PUT_ACK: u8 = 0xAC;

const GET_COMMAND_BASE: u8 = 0x11;
const PUT_COMMAND_BASE: u8 = 0x14;

/// Errors returned by protocol framing and validation.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ProtocolError {
    /// The requested slot is outside the framestore's `1..=4` range.
    #[error("invalid framestore slot {slot}; supported slots are 1 through {SLOT_COUNT}")]
    InvalidSlot { slot: u8 },
    /// The device answered a protocol phase with an unexpected ack byte.
    #[error("unexpected {phase} ack: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedAck {
        phase: AckPhase,
        expected: u8,
        actual: u8,
    },
    /// A received frame header declared a zero width or height.
    #[error("frame header declares empty dimensions {width}x{height}")]
    EmptyDimensions { width: u16, height: u16 },
    /// The connection ended before the declared payload fully arrived.
    #[error("short frame: expected {expected} payload bytes, received {received}")]
    ShortFrame { expected: usize, received: usize },
}

/// Handshake phases that carry a single ack byte.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display)]
pub enum AckPhase {
    /// Device acknowledges a get command; the header follows.
    #[strum(to_string = "get-ready")]
    GetReady,
    /// Device is ready to receive a put header and payload.
    #[strum(to_string = "put-ready")]
    PutReady,
    /// Device confirms the put payload was stored.
    #[strum(to_string = "put-complete")]
    PutComplete,
}

impl AckPhase {
    /// Returns the ack byte the device must send for this phase.
    #[must_use]
    pub const fn expected_byte(self) -> u8 {
        match self {
            Self::GetReady => GET_READY_ACK,
            Self::PutReady | Self::PutComplete => PUT_ACK,
        }
    }

    /// Validates a received ack byte against this phase.
    ///
    /// # Errors
    ///
    /// Returns an error when the byte differs from the phase's expected ack.
    ///
    /// ```
    /// use hs450::{AckPhase, ProtocolError};
    ///
    /// AckPhase::GetReady.check(0x10)?;
    ///
    /// let err = AckPhase::GetReady.check(0x99).expect_err("0x99 is not an ack");
    /// assert!(matches!(err, ProtocolError::UnexpectedAck { actual: 0x99, .. }));
    /// # Ok::<(), hs450::ProtocolError>(())
    /// ```
    pub fn check(self, actual: u8) -> Result<(), ProtocolError> {
        let expected = self.expected_byte();
        if actual != expected {
            return Err(ProtocolError::UnexpectedAck {
                phase: self,
                expected,
                actual,
            });
        }
        Ok(())
    }
}

/// One of the four framestore slots, validated at construction.
///
/// Validation happens here, before any command byte is derived, so an
/// out-of-range slot is rejected without touching the transport.
#[derive(Debug, Clone, Copy, Eq, PartialEq, derive_more::Display, derive_more::Into)]
#[display("{_0}")]
pub struct Slot(u8);

impl Slot {
    /// Creates a slot from its 1-based index.
    ///
    /// # Errors
    ///
    /// Returns an error when `slot` is outside `1..=4`.
    ///
    /// ```
    /// use hs450::{ProtocolError, Slot};
    ///
    /// let slot = Slot::new(2)?;
    /// assert_eq!(2u8, Into::<u8>::into(slot));
    ///
    /// let err = Slot::new(5).expect_err("the framestore has four slots");
    /// assert!(matches!(err, ProtocolError::InvalidSlot { slot: 5 }));
    /// # Ok::<(), hs450::ProtocolError>(())
    /// ```
    pub const fn new(slot: u8) -> Result<Self, ProtocolError> {
        if slot < 1 || slot > SLOT_COUNT {
            return Err(ProtocolError::InvalidSlot { slot });
        }
        Ok(Self(slot))
    }

    /// Returns the command byte that fetches this slot's frame.
    ///
    /// ```
    /// use hs450::Slot;
    ///
    /// assert_eq!(0x21, Slot::new(1)?.get_command());
    /// assert_eq!(0x51, Slot::new(4)?.get_command());
    /// # Ok::<(), hs450::ProtocolError>(())
    /// ```
    #[must_use]
    pub const fn get_command(self) -> u8 {
        GET_COMMAND_BASE + self.0 * 0x10
    }

    /// Returns the command byte that stores a frame into this slot.
    ///
    /// ```
    /// use hs450::Slot;
    ///
    /// assert_eq!(0x24, Slot::new(1)?.put_command());
    /// assert_eq!(0x54, Slot::new(4)?.put_command());
    /// # Ok::<(), hs450::ProtocolError>(())
    /// ```
    #[must_use]
    pub const fn put_command(self) -> u8 {
        PUT_COMMAND_BASE + self.0 * 0x10
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let slot: u8 = value
            .parse()
            .map_err(|_parse| format!("`{value}` is not a slot number"))?;
        Self::new(slot).map_err(|error| error.to_string())
    }
}

/// Width and height of one frame, both guaranteed non-zero.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FrameDimensions {
    width: u16,
    height: u16,
}

impl FrameDimensions {
    /// Creates frame dimensions when both values are non-zero.
    ///
    /// ```
    /// use hs450::FrameDimensions;
    ///
    /// let dimensions = FrameDimensions::new(1280, 720).expect("720p should be valid");
    /// assert_eq!(1280, dimensions.width());
    /// assert!(FrameDimensions::new(0, 720).is_none());
    /// ```
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        Some(Self { width, height })
    }

    /// Returns frame width in pixels.
    #[must_use]
    pub const fn width(self) -> u16 {
        self.width
    }

    /// Returns frame height in pixels.
    #[must_use]
    pub const fn height(self) -> u16 {
        self.height
    }

    /// Returns the packed 4:2:2 payload length for this frame, `W*H*2`.
    #[must_use]
    pub const fn packed_len(self) -> usize {
        self.width as usize * self.height as usize * 2
    }

    /// Returns the RGB888 payload length for this frame, `W*H*3`.
    #[must_use]
    pub const fn rgb_len(self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// Encodes this frame's big-endian `(W, H)` wire header.
    ///
    /// ```
    /// use hs450::FrameDimensions;
    ///
    /// let dimensions = FrameDimensions::new(2, 1).expect("2x1 should be valid");
    /// assert_eq!([0x00, 0x02, 0x00, 0x01], dimensions.encode_header());
    /// ```
    #[must_use]
    pub fn encode_header(self) -> [u8; HEADER_LEN] {
        let mut header = [0u8; HEADER_LEN];
        header[0..2].copy_from_slice(&self.width.to_be_bytes());
        header[2..4].copy_from_slice(&self.height.to_be_bytes());
        header
    }

    /// Decodes a big-endian `(W, H)` wire header.
    ///
    /// # Errors
    ///
    /// Returns an error when either dimension is zero; a zero dimension
    /// implies an empty payload and is treated as a device protocol fault.
    pub fn decode_header(header: [u8; HEADER_LEN]) -> Result<Self, ProtocolError> {
        let width = u16::from_be_bytes([header[0], header[1]]);
        let height = u16::from_be_bytes([header[2], header[3]]);
        Self::new(width, height).ok_or(ProtocolError::EmptyDimensions { width, height })
    }
}

impl fmt::Display for FrameDimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
