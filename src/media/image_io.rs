use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;

use crate::protocol::FrameDimensions;

use super::{RgbFrame, RgbFrameError};

/// Errors returned when moving frames in and out of image files.
#[derive(Debug, Error)]
pub enum ImageIoError {
    /// The source file could not be read.
    #[error("failed to read image file `{path}`")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The source bytes are not a supported image format.
    #[error("failed to detect image format of `{path}`")]
    UnknownFormat {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The source image failed to decode.
    #[error("failed to decode image `{path}`")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The image is wider or taller than the 16-bit wire header can carry.
    #[error("image is {width}x{height}; the wire header caps each dimension at 65535")]
    Oversized { width: u32, height: u32 },
    /// The image decoded to zero pixels.
    #[error("image `{path}` has no pixels")]
    Empty { path: PathBuf },
    /// The decoded buffer failed frame validation.
    #[error(transparent)]
    Frame(#[from] RgbFrameError),
    /// The destination file could not be written.
    #[error("failed to write image file `{path}`")]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Loads and saves frames as ordinary image files.
///
/// File formats, channel order inside the files, and EXIF handling all live
/// here; the transfer core only ever sees validated [`RgbFrame`] buffers.
pub struct ImageIo;

impl ImageIo {
    /// Loads an image file into an RGB888 frame.
    ///
    /// The image is decoded, rotated/flipped per its EXIF orientation tag if
    /// one is present, and converted to interleaved 8-bit RGB.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or decoded, has a zero
    /// dimension, or exceeds the protocol's 16-bit dimensions.
    pub fn load_rgb_frame(path: &Path) -> Result<RgbFrame, ImageIoError> {
        let source_bytes = std::fs::read(path).map_err(|source| ImageIoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let format =
            image::guess_format(&source_bytes).map_err(|source| ImageIoError::UnknownFormat {
                path: path.to_path_buf(),
                source,
            })?;
        let decoded = image::load_from_memory_with_format(&source_bytes, format).map_err(
            |source| ImageIoError::Decode {
                path: path.to_path_buf(),
                source,
            },
        )?;
        let rgb = apply_exif_orientation(decoded, &source_bytes).to_rgb8();

        let (source_width, source_height) = (rgb.width(), rgb.height());
        let width = u16::try_from(source_width).map_err(|_overflow| ImageIoError::Oversized {
            width: source_width,
            height: source_height,
        })?;
        let height = u16::try_from(source_height).map_err(|_overflow| ImageIoError::Oversized {
            width: source_width,
            height: source_height,
        })?;
        let dimensions = FrameDimensions::new(width, height).ok_or_else(|| ImageIoError::Empty {
            path: path.to_path_buf(),
        })?;

        Ok(RgbFrame::try_from((dimensions, rgb.into_raw()))?)
    }

    /// Saves an RGB888 frame to an image file, with the format chosen from
    /// the path's extension.
    ///
    /// Nothing is written until a complete frame exists in memory, so a
    /// failed transfer never leaves a partial file behind.
    ///
    /// # Errors
    ///
    /// Returns an error when the extension is unsupported or the write fails.
    pub fn save_rgb_frame(frame: &RgbFrame, path: &Path) -> Result<(), ImageIoError> {
        let dimensions = frame.dimensions();
        image::save_buffer(
            path,
            frame.payload(),
            u32::from(dimensions.width()),
            u32::from(dimensions.height()),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|source| ImageIoError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn apply_exif_orientation(image: DynamicImage, source_bytes: &[u8]) -> DynamicImage {
    match exif_orientation(source_bytes) {
        Some(2) => image.fliph(),
        Some(3) => image.rotate180(),
        Some(4) => image.flipv(),
        Some(5) => image.fliph().rotate90(),
        Some(6) => image.rotate90(),
        Some(7) => image.fliph().rotate270(),
        Some(8) => image.rotate270(),
        _ => image,
    }
}

fn exif_orientation(source_bytes: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(source_bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
        .value
        .get_uint(0)
}
