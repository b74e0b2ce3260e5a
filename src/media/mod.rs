mod image_io;
mod packed_frame;
mod rgb_frame;

pub use image_io::{ImageIo, ImageIoError};
pub use packed_frame::{PackedFrame, PackedFrameError};
pub use rgb_frame::{RgbFrame, RgbFrameError};
