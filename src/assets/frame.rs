use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{FilmError, FilmResult};

/// Loaded frame, ready to paint.
///
/// Holds the encoded bytes exactly as fetched plus the dimensions read from the image header.
/// Pixels are only materialized by [`FrameHandle::decode_rgba8`], so a resident handle costs about
/// as much as the compressed file. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct FrameHandle {
    width: u32,
    height: u32,
    encoded: Arc<[u8]>,
}

impl FrameHandle {
    /// Validate `bytes` as a supported image by reading its header.
    pub fn probe(bytes: Vec<u8>) -> FilmResult<Self> {
        let (width, height) = image::ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .context("guess frame image format")?
            .into_dimensions()
            .context("read frame image header")?;
        if width == 0 || height == 0 {
            return Err(FilmError::load("frame image has zero area"));
        }
        Ok(Self {
            width,
            height,
            encoded: bytes.into(),
        })
    }

    /// Assemble a handle without probing.
    pub fn from_parts(width: u32, height: u32, encoded: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            encoded: encoded.into(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded bytes as fetched.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// Decode to straight-alpha RGBA8.
    pub fn decode_rgba8(&self) -> FilmResult<image::RgbaImage> {
        let img = image::load_from_memory(&self.encoded).context("decode frame image")?;
        Ok(img.to_rgba8())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/frame.rs"]
mod tests;
