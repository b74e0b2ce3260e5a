use derive_more::From;
use thiserror::Error;

use crate::codec::PixelCodecError;
use crate::media::{PackedFrameError, RgbFrameError};
use crate::protocol::ProtocolError;
use crate::transport::TransportError;

/// Top-level error for one get or put transfer, wrapping the layer-specific
/// error types.
#[derive(Debug, Error, From)]
pub enum TransferError {
    #[error(transparent)]
    Protocol(ProtocolError),
    #[error(transparent)]
    Transport(TransportError),
    #[error(transparent)]
    Codec(PixelCodecError),
    #[error(transparent)]
    RgbFrame(RgbFrameError),
    #[error(transparent)]
    PackedFrame(PackedFrameError),
}

/// Errors returned when validating runtime CLI options.
#[derive(Debug, Error)]
pub(crate) enum CliConfigError {
    #[error("missing fake device script while fake mode is enabled")]
    MissingFakeDeviceScript,
}

/// Errors returned by telemetry initialisation.
#[derive(Debug, Error)]
pub(crate) enum TelemetryError {
    #[error("failed to install tracing subscriber")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
