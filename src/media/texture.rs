use anyhow::{bail, Result};
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

use super::decode::DecodedSurface;

// ---------------------------------------------------------------------------
// Uploader seam
// ---------------------------------------------------------------------------

/// Turns a decoded surface into something the renderer can draw directly.
///
/// Dropping the returned texture must release it.
pub trait TextureUploader {
    type Texture;

    fn upload(&self, name: &str, surface: &DecodedSurface) -> Result<Self::Texture>;
}

impl TextureUploader for egui::Context {
    type Texture = TextureHandle;

    fn upload(&self, name: &str, surface: &DecodedSurface) -> Result<TextureHandle> {
        if !surface.is_complete() {
            bail!(
                "surface buffer holds {} bytes, expected {}x{} RGBA",
                surface.rgba.len(),
                surface.width,
                surface.height
            );
        }
        let max_side = self.input(|i| i.max_texture_side);
        let size = [surface.width as usize, surface.height as usize];
        if size[0] > max_side || size[1] > max_side {
            bail!(
                "{}x{} exceeds the renderer's maximum texture side of {max_side}",
                surface.width,
                surface.height
            );
        }
        let pixels = ColorImage::from_rgba_unmultiplied(size, &surface.rgba);
        Ok(self.load_texture(name, pixels, TextureOptions::LINEAR))
    }
}

// ---------------------------------------------------------------------------
// LoadedImage / ImageSlot
// ---------------------------------------------------------------------------

/// A texture together with its pixel size.
#[derive(Debug)]
pub struct LoadedImage<T> {
    pub texture: T,
    pub width: u32,
    pub height: u32,
}

/// Owns at most one [`LoadedImage`].
///
/// `install` takes an already-created texture and only then drops the previous
/// one, so the slot never holds zero or two textures mid-swap.
#[derive(Debug)]
pub struct ImageSlot<T> {
    current: Option<LoadedImage<T>>,
}

impl<T> Default for ImageSlot<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T> ImageSlot<T> {
    pub fn get(&self) -> Option<&LoadedImage<T>> {
        self.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn install(&mut self, image: LoadedImage<T>) {
        let previous = self.current.replace(image);
        drop(previous);
    }

    /// Release the held texture, if any.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
pub(crate) mod counting {
    use std::cell::Cell;
    use std::rc::Rc;

    use anyhow::{bail, Result};

    use super::TextureUploader;
    use crate::media::decode::DecodedSurface;

    /// Texture stand-in that tracks how many are alive.
    #[derive(Debug)]
    pub struct CountedTexture {
        pub name: String,
        live: Rc<Cell<usize>>,
    }

    impl Drop for CountedTexture {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    /// Uploader that hands out [`CountedTexture`]s.
    #[derive(Default)]
    pub struct CountingUploader {
        pub live: Rc<Cell<usize>>,
        pub uploads: Cell<usize>,
        pub fail: bool,
    }

    impl CountingUploader {
        pub fn live(&self) -> usize {
            self.live.get()
        }
    }

    impl TextureUploader for CountingUploader {
        type Texture = CountedTexture;

        fn upload(&self, name: &str, _surface: &DecodedSurface) -> Result<CountedTexture> {
            if self.fail {
                bail!("out of texture memory");
            }
            self.uploads.set(self.uploads.get() + 1);
            self.live.set(self.live.get() + 1);
            Ok(CountedTexture {
                name: name.to_owned(),
                live: Rc::clone(&self.live),
            })
        }
    }
}
