use thiserror::Error;

use crate::protocol::FrameDimensions;

/// Errors returned when validating an RGB888 frame payload.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum RgbFrameError {
    /// The payload length does not match `width * height * 3`.
    #[error(
        "rgb payload length mismatch for {dimensions} frame: expected {expected_len} bytes, got {actual_len}"
    )]
    LengthMismatch {
        dimensions: FrameDimensions,
        expected_len: usize,
        actual_len: usize,
    },
}

/// Validated full-colour frame: `width * height * 3` interleaved RGB bytes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RgbFrame {
    dimensions: FrameDimensions,
    payload: Vec<u8>,
}

impl RgbFrame {
    /// Returns the dimensions this frame was validated against.
    ///
    /// ```
    /// use hs450::{FrameDimensions, RgbFrame};
    ///
    /// let dimensions = FrameDimensions::new(2, 1).expect("2x1 should be valid");
    /// let frame = RgbFrame::try_from((dimensions, vec![0x10, 0x20, 0x30, 0x40, 0x50, 0x60]))?;
    /// assert_eq!(dimensions, frame.dimensions());
    /// # Ok::<(), hs450::RgbFrameError>(())
    /// ```
    #[must_use]
    pub fn dimensions(&self) -> FrameDimensions {
        self.dimensions
    }

    /// Returns the validated RGB payload bytes.
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

impl TryFrom<(FrameDimensions, Vec<u8>)> for RgbFrame {
    type Error = RgbFrameError;

    fn try_from(value: (FrameDimensions, Vec<u8>)) -> Result<Self, Self::Error> {
        let (dimensions, payload) = value;
        let expected_len = dimensions.rgb_len();
        let actual_len = payload.len();

        if actual_len != expected_len {
            return Err(RgbFrameError::LengthMismatch {
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

impl TryFrom<(FrameDimensions, &[u8])> for RgbFrame {
    type Error = RgbFrameError;

    fn try_from(value: (FrameDimensions, &[u8])) -> Result<Self, Self::Error> {
        let (dimensions, payload) = value;
        Self::try_from((dimensions, payload.to_vec()))
    }
}
