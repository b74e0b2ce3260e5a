mod app;
mod cli;
mod codec;
mod color;
mod error;
mod media;
mod protocol;
mod telemetry;
mod terminal;
mod transfer;
mod transport;

pub use app::run;
pub use cli::{Args, Command, GetArgs, LogLevel, OutputFormat, PutArgs};
pub use codec::{PixelCodec, PixelCodecError};
pub use color::ColorMatrix;
pub use error::TransferError;
pub use media::{ImageIo, ImageIoError, PackedFrame, PackedFrameError, RgbFrame, RgbFrameError};
pub use protocol::{
    AckPhase, DEVICE_PORT, FrameDimensions, GET_READY_ACK, HEADER_LEN, PUT_ACK, ProtocolError,
    SLOT_COUNT, Slot,
};
pub use terminal::{SystemTerminalClient, TerminalClient};
pub use transfer::FrameTransfer;
pub use transport::{
    HexScript, ScriptError, ScriptedTransport, TcpTransport, Transport, TransportError,
};
