use std::path::Path;

use crate::security::validate::{validate_filepath, validate_image_size};
use crate::security::{SecurityError, ValidationResult};

use super::decode::Decoder;
use super::texture::{ImageSlot, LoadedImage, TextureUploader};

/// Largest accepted width or height of a decoded image.
pub const MAX_IMAGE_DIMENSION: u32 = 32768;

/// Name the renderer keeps for the texture. Never derived from the path.
pub const TEXTURE_NAME: &str = "image";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Validate, decode and upload the image at `path`, installing it in `slot`.
///
/// Checks run cheapest first: path shape, then file size, then the decode.
/// On failure the slot keeps whatever it held before. The outcome is logged
/// either way.
pub fn load_image<U: TextureUploader>(
    slot: &mut ImageSlot<U::Texture>,
    path: &str,
    decoder: &impl Decoder,
    uploader: &U,
) -> ValidationResult {
    let result = acquire(path, decoder, uploader).map(|image| {
        let (width, height) = (image.width, image.height);
        slot.install(image);
        (width, height)
    });

    match result {
        Ok((width, height)) => {
            log::info!("Loaded image: {path} ({width}x{height})");
            Ok(())
        }
        Err(e) => {
            log::error!("Security error: {e}");
            Err(e)
        }
    }
}

fn acquire<U: TextureUploader>(
    path: &str,
    decoder: &impl Decoder,
    uploader: &U,
) -> ValidationResult<LoadedImage<U::Texture>> {
    validate_filepath(path)?;

    let stat = std::fs::metadata(path).map_err(|e| {
        log::debug!("stat failed: {e}");
        SecurityError::AccessDenied
    })?;
    validate_image_size(i64::try_from(stat.len()).unwrap_or(i64::MAX))?;

    let surface = decoder.decode(Path::new(path)).map_err(|e| {
        log::debug!("decode failed: {e:#}");
        SecurityError::AccessDenied
    })?;

    check_dimensions(surface.width, surface.height)?;

    let texture = uploader.upload(TEXTURE_NAME, &surface).map_err(|e| {
        log::debug!("texture upload failed: {e:#}");
        SecurityError::AllocationFailure
    })?;

    Ok(LoadedImage {
        texture,
        width: surface.width,
        height: surface.height,
    })
}

fn check_dimensions(width: u32, height: u32) -> ValidationResult {
    let in_range = |d: u32| d > 0 && d <= MAX_IMAGE_DIMENSION;
    if in_range(width) && in_range(height) {
        Ok(())
    } else {
        Err(SecurityError::InvalidInput)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs::File;

    use anyhow::Result;
    use eframe::egui;

    use super::*;
    use crate::media::decode::fixtures::{temp_path, write_jpeg, write_png};
    use crate::media::decode::{DecodedSurface, ImageCrateDecoder};
    use crate::media::texture::counting::CountingUploader;
    use crate::security::validate::MAX_FILE_SIZE;

    /// Decoder that reports fixed dimensions for any existing file.
    struct FixedDecoder {
        width: u32,
        height: u32,
        calls: Cell<usize>,
    }

    impl FixedDecoder {
        fn new(width: u32, height: u32) -> Self {
            Self { width, height, calls: Cell::new(0) }
        }
    }

    impl Decoder for FixedDecoder {
        fn decode(&self, _path: &Path) -> Result<DecodedSurface> {
            self.calls.set(self.calls.get() + 1);
            Ok(DecodedSurface {
                width: self.width,
                height: self.height,
                bits_per_pixel: 32,
                rgba: Vec::new(),
            })
        }
    }

    fn existing_file(name: &str) -> String {
        let path = temp_path(name);
        std::fs::write(&path, b"stub").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_png_then_jpeg_replaces_texture() {
        let png = write_png("first.png", 12, 9);
        let jpeg = write_jpeg("second.jpg", 20, 4);
        let uploader = CountingUploader::default();
        let mut slot = ImageSlot::default();

        load_image(&mut slot, png.to_str().unwrap(), &ImageCrateDecoder, &uploader).unwrap();
        let loaded = slot.get().unwrap();
        assert_eq!((loaded.width, loaded.height), (12, 9));
        assert_eq!(uploader.live(), 1);

        load_image(&mut slot, jpeg.to_str().unwrap(), &ImageCrateDecoder, &uploader).unwrap();
        let loaded = slot.get().unwrap();
        assert_eq!((loaded.width, loaded.height), (20, 4));
        assert_eq!(uploader.live(), 1);
        assert_eq!(uploader.uploads.get(), 2);

        std::fs::remove_file(png).ok();
        std::fs::remove_file(jpeg).ok();
    }

    #[test]
    fn test_zero_width_rejected_without_upload() {
        let path = existing_file("zero.png");
        let uploader = CountingUploader::default();
        let mut slot = ImageSlot::default();

        let result = load_image(&mut slot, &path, &FixedDecoder::new(0, 10), &uploader);
        assert_eq!(result, Err(SecurityError::InvalidInput));
        assert!(!slot.is_loaded());
        assert_eq!(uploader.uploads.get(), 0);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_oversized_height_rejected() {
        let path = existing_file("tall.png");
        let uploader = CountingUploader::default();
        let mut slot = ImageSlot::default();

        let result = load_image(&mut slot, &path, &FixedDecoder::new(10, 40000), &uploader);
        assert_eq!(result, Err(SecurityError::InvalidInput));
        assert!(!slot.is_loaded());
        assert_eq!(uploader.live(), 0);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_dimension_boundary_accepted() {
        let path = existing_file("edge.png");
        let uploader = CountingUploader::default();
        let mut slot = ImageSlot::default();

        let decoder = FixedDecoder::new(MAX_IMAGE_DIMENSION, 1);
        assert_eq!(load_image(&mut slot, &path, &decoder, &uploader), Ok(()));
        assert_eq!(slot.get().unwrap().width, MAX_IMAGE_DIMENSION);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_failed_load_keeps_previous_image() {
        let good = existing_file("good.png");
        let uploader = CountingUploader::default();
        let mut slot = ImageSlot::default();
        load_image(&mut slot, &good, &FixedDecoder::new(3, 3), &uploader).unwrap();

        let result = load_image(&mut slot, &good, &FixedDecoder::new(3, 0), &uploader);
        assert_eq!(result, Err(SecurityError::InvalidInput));
        assert_eq!(slot.get().unwrap().width, 3);
        assert_eq!(uploader.live(), 1);
        std::fs::remove_file(good).ok();
    }

    #[test]
    fn test_invalid_path_never_reaches_decoder() {
        let decoder = FixedDecoder::new(1, 1);
        let uploader = CountingUploader::default();
        let mut slot = ImageSlot::default();

        assert_eq!(
            load_image(&mut slot, "../secret.png", &decoder, &uploader),
            Err(SecurityError::AccessDenied)
        );
        assert_eq!(load_image(&mut slot, "", &decoder, &uploader), Err(SecurityError::InvalidInput));
        assert_eq!(decoder.calls.get(), 0);
    }

    #[test]
    fn test_missing_file_is_access_denied() {
        let path = temp_path("missing.png");
        let decoder = FixedDecoder::new(1, 1);
        let mut slot = ImageSlot::default();
        let result = load_image(
            &mut slot,
            path.to_str().unwrap(),
            &decoder,
            &CountingUploader::default(),
        );
        assert_eq!(result, Err(SecurityError::AccessDenied));
        assert_eq!(decoder.calls.get(), 0);
    }

    #[test]
    fn test_undecodable_file_is_access_denied() {
        let path = existing_file("junk.png");
        let mut slot = ImageSlot::default();
        let result = load_image(&mut slot, &path, &ImageCrateDecoder, &CountingUploader::default());
        assert_eq!(result, Err(SecurityError::AccessDenied));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_upload_failure_is_allocation_failure() {
        let path = existing_file("upload.png");
        let uploader = CountingUploader { fail: true, ..Default::default() };
        let mut slot = ImageSlot::default();
        let result = load_image(&mut slot, &path, &FixedDecoder::new(2, 2), &uploader);
        assert_eq!(result, Err(SecurityError::AllocationFailure));
        assert!(!slot.is_loaded());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_texture_name_does_not_carry_path() {
        let path = existing_file("named.png");
        let uploader = CountingUploader::default();
        let mut slot = ImageSlot::default();
        load_image(&mut slot, &path, &FixedDecoder::new(2, 2), &uploader).unwrap();
        assert_eq!(slot.get().unwrap().texture.name, TEXTURE_NAME);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_oversized_file_rejected_before_decode() {
        let path = temp_path("huge.png");
        // Sparse on most filesystems, so no real disk use.
        File::create(&path).unwrap().set_len(MAX_FILE_SIZE as u64 + 1).unwrap();
        let decoder = FixedDecoder::new(1, 1);
        let uploader = CountingUploader::default();
        let mut slot = ImageSlot::default();

        let result = load_image(&mut slot, path.to_str().unwrap(), &decoder, &uploader);
        assert_eq!(result, Err(SecurityError::FileTooLarge));
        assert_eq!(decoder.calls.get(), 0);
        assert!(!slot.is_loaded());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_image_wider_than_renderer_limit_is_refused() {
        let ctx = egui::Context::default();
        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        let png = write_png("wide.png", max_side + 1, 1);
        let mut slot = ImageSlot::default();

        let result = load_image(&mut slot, png.to_str().unwrap(), &ImageCrateDecoder, &ctx);
        assert_eq!(result, Err(SecurityError::AllocationFailure));
        assert!(!slot.is_loaded());
        std::fs::remove_file(png).ok();
    }
}
