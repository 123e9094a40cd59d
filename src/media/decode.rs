use std::path::Path;

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Decoded pixel surface
// ---------------------------------------------------------------------------

/// A decoded image in CPU memory, before it becomes a texture.
#[derive(Clone)]
pub struct DecodedSurface {
    pub width: u32,
    pub height: u32,
    /// Bits per pixel of the source colour type (e.g. 24 for RGB8).
    pub bits_per_pixel: u16,
    /// Tightly packed, unmultiplied RGBA8 pixels.
    pub rgba: Vec<u8>,
}

impl DecodedSurface {
    /// `true` when `rgba` holds exactly `width * height` RGBA pixels.
    pub fn is_complete(&self) -> bool {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(4))
            .is_some_and(|expected| expected == self.rgba.len())
    }
}

// ---------------------------------------------------------------------------
// Decoder seam
// ---------------------------------------------------------------------------

/// Turns a file on disk into a [`DecodedSurface`].
pub trait Decoder {
    fn decode(&self, path: &Path) -> Result<DecodedSurface>;
}

/// Decoder backed by the `image` crate. Format is sniffed from content.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl Decoder for ImageCrateDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedSurface> {
        let img = image::ImageReader::open(path)
            .context("opening image file")?
            .with_guessed_format()
            .context("detecting image format")?
            .decode()
            .context("decoding image")?;

        let bits_per_pixel = img.color().bits_per_pixel();
        let rgba = img.into_rgba8();

        Ok(DecodedSurface {
            width: rgba.width(),
            height: rgba.height(),
            bits_per_pixel,
            rgba: rgba.into_raw(),
        })
    }
}
