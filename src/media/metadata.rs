use std::fmt;
use std::path::Path;
use std::time::SystemTime;

use crate::security::memory::{bounded_copy, SecureBuffer, SecureString};
use crate::security::validate::{sanitize_filename, validate_filepath, validate_image_size};

use super::decode::Decoder;

/// Buffer size for the sanitized filename (including terminator).
pub const MAX_FILENAME_LENGTH: usize = 256;

/// Buffer size for the displayed file path (including terminator).
pub const MAX_DISPLAY_PATH_LENGTH: usize = 512;

/// Extensions longer than this are not looked up.
const MAX_EXTENSION_LENGTH: usize = 10;

// ---------------------------------------------------------------------------
// ImageFormat
// ---------------------------------------------------------------------------

/// Container format, guessed from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
    Unknown,
}

impl ImageFormat {
    /// Classify a filename by its extension, ignoring case.
    pub fn from_filename(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return ImageFormat::Unknown;
        };
        if ext.len() > MAX_EXTENSION_LENGTH {
            return ImageFormat::Unknown;
        }
        match ext.to_ascii_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "bmp" => ImageFormat::Bmp,
            "gif" => ImageFormat::Gif,
            _ => ImageFormat::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Gif => "GIF",
            ImageFormat::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ImageMetadata
// ---------------------------------------------------------------------------

/// Read-only description of an image file, shown in the info panel.
///
/// Text fields are sanitized on construction and wiped when dropped.
#[derive(Debug, Clone)]
pub struct ImageMetadata {
    pub filename: SecureString,
    pub filepath: SecureString,
    pub width: u32,
    pub height: u32,
    pub file_size: u64,
    pub bits_per_pixel: u16,
    pub format: ImageFormat,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

/// Build [`ImageMetadata`] for `path`.
///
/// Returns `None` when the path fails validation or the file is too large.
/// A missing file or a failed decode still yields metadata, with the affected
/// fields left at zero.
pub fn extract_metadata(path: &str, decoder: &impl Decoder) -> Option<ImageMetadata> {
    if let Err(e) = validate_filepath(path) {
        log::warn!("Metadata skipped: {e}");
        return None;
    }

    let filename = sanitized_filename(path)?;
    let filepath = display_path(path);
    let format = ImageFormat::from_filename(&filename);

    let (file_size, created, modified) = match std::fs::metadata(path) {
        Ok(stat) => {
            let size = i64::try_from(stat.len()).unwrap_or(i64::MAX);
            if let Err(e) = validate_image_size(size) {
                log::warn!("Metadata skipped: {e}");
                return None;
            }
            (stat.len(), stat.created().ok(), stat.modified().ok())
        }
        Err(e) => {
            log::debug!("stat failed: {e}");
            (0, None, None)
        }
    };

    let (width, height, bits_per_pixel) = match decoder.decode(Path::new(path)) {
        Ok(surface) => (surface.width, surface.height, surface.bits_per_pixel),
        Err(e) => {
            log::debug!("metadata decode failed: {e:#}");
            (0, 0, 0)
        }
    };

    Some(ImageMetadata {
        filename,
        filepath,
        width,
        height,
        file_size,
        bits_per_pixel,
        format,
        created,
        modified,
    })
}

/// Last path component (either separator style), copied and sanitized.
fn sanitized_filename(path: &str) -> Option<SecureString> {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);

    let mut buf = match SecureBuffer::allocate(MAX_FILENAME_LENGTH) {
        Ok(buf) => buf,
        Err(e) => {
            log::error!("Security error: {e}");
            return None;
        }
    };
    bounded_copy(buf.as_mut_slice(), name.as_bytes());
    if let Err(e) = sanitize_filename(buf.as_mut_slice(), MAX_FILENAME_LENGTH) {
        log::error!("Security error: {e}");
        return None;
    }

    // Sanitized bytes are all ASCII.
    let text = std::str::from_utf8(buf.content()).ok()?;
    Some(SecureString::bounded(text, MAX_FILENAME_LENGTH))
}

/// Path with control characters replaced for display, bounded and wiped on drop.
fn display_path(path: &str) -> SecureString {
    let full = SecureString::from(
        path.chars()
            .map(|c| if c.is_control() { '_' } else { c })
            .collect::<String>(),
    );
    SecureString::bounded(&full, MAX_DISPLAY_PATH_LENGTH)
}
