use thiserror::Error;

use crate::protocol::FrameDimensions;

/// Errors returned when validating a packed 4:2:2 frame payload.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum PackedFrameError {
    /// The payload length does not match `width * height * 2`.
    #[error(
        "packed payload length mismatch for {dimensions} frame: expected {expected_len} bytes, got {actual_len}"
    )]
    LengthMismatch {
        dimensions: FrameDimensions,
        expected_len: usize,
        actual_len: usize,
    },
}

/// Validated device-format frame: `width * height * 2` packed 4:2:2 bytes.
///
/// Length consistency with the declared dimensions is a hard invariant of
/// the wire format, checked on receive and again before send.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PackedFrame {
    dimensions: FrameDimensions,
    payload: Vec<u8>,
}

impl PackedFrame {
    /// Returns the dimensions this frame was validated against.
    #[must_use]
    pub fn dimensions(&self) -> FrameDimensions {
        self.dimensions
    }

    /// Returns the validated packed payload bytes.
    ///
    /// ```
    /// use hs450::{FrameDimensions, PackedFrame};
    ///
    /// let dimensions = FrameDimensions::new(2, 1).expect("2x1 should be valid");
    /// let frame = PackedFrame::try_from((dimensions, vec![16, 128, 16, 128]))?;
    /// assert_eq!(&[16, 128, 16, 128], frame.payload());
    /// # Ok::<(), hs450::PackedFrameError>(())
    /// ```
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consumes this frame and returns the payload bytes.
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl TryFrom<(FrameDimensions, Vec<u8>)> for PackedFrame {
    type Error = PackedFrameError;

    fn try_from(value: (FrameDimensions, Vec<u8>)) -> Result<Self, Self::Error> {
        let (dimensions, payload) = value;
        let expected_len = dimensions.packed_len();
        let actual_len = payload.len();

        if actual_len != expected_len {
            return Err(PackedFrameError::LengthMismatch {
                dimensions,
                expected_len,
                actual_len,
            });
        }

        Ok(Self {
            dimensions,
            payload,
        })
    }
}
