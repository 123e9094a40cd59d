use eframe::egui::{self, Sense, TextureHandle};

use crate::media::decode::ImageCrateDecoder;
use crate::media::loader::load_image;
use crate::media::metadata::{extract_metadata, ImageMetadata};
use crate::media::texture::ImageSlot;
use crate::security::memory::SecureString;
use crate::state::{ViewCommand, ViewerState};
use crate::ui::{canvas, input};
use crate::view::compose::{compose_frame, panel_lines, FrameInput};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PhotonApp {
    pub state: ViewerState,
    image: ImageSlot<TextureHandle>,
    metadata: Option<ImageMetadata>,
    /// Path waiting for the first frame, when the renderer's texture limit is known.
    pending: Option<SecureString>,
}

impl PhotonApp {
    /// Build the session. `path` is opened on the first frame.
    pub fn new(ctx: &egui::Context, path: Option<SecureString>, initial_size: [f32; 2]) -> Self {
        let ppp = ctx.pixels_per_point();
        Self {
            state: ViewerState::new(
                (initial_size[0] * ppp).round() as u32,
                (initial_size[1] * ppp).round() as u32,
            ),
            image: ImageSlot::default(),
            metadata: None,
            pending: path,
        }
    }

    /// Load the pending image and its metadata, if any.
    ///
    /// A failed load leaves an empty viewer; it is never fatal.
    fn open_pending(&mut self, ctx: &egui::Context) {
        let Some(path) = self.pending.take() else {
            return;
        };
        if load_image(&mut self.image, &path, &ImageCrateDecoder, ctx).is_err() {
            log::warn!("Failed to load specified image. Starting with empty viewer.");
        }
        self.metadata = extract_metadata(&path, &ImageCrateDecoder);
    }

    fn apply(&mut self, command: ViewCommand) {
        self.state.apply(command);
        if command == ViewCommand::ToggleInfo && self.state.show_info {
            for line in self.info_lines() {
                log::info!("Info: {line}");
            }
        }
    }

    /// Panel text to log. Empty while no image is loaded, matching what is drawn.
    fn info_lines(&self) -> Vec<SecureString> {
        if !self.image.is_loaded() {
            return Vec::new();
        }
        match &self.metadata {
            Some(meta) => panel_lines(meta, self.state.zoom),
            None => vec![SecureString::from("no metadata available".to_owned())],
        }
    }
}

impl eframe::App for PhotonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.open_pending(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), Sense::drag());

                let frame_input = input::read_input(ctx, &response, &self.state);
                for command in frame_input.commands {
                    self.apply(command);
                }
                if frame_input.quit {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }

                let loaded = self.image.get();
                let ops = compose_frame(&FrameInput {
                    state: &self.state,
                    image: loaded.map(|img| (img.width, img.height)),
                    metadata: self.metadata.as_ref(),
                    pixels_per_point: ctx.pixels_per_point(),
                });
                let texture = loaded.map(|img| img.texture.id());
                canvas::paint(ui.painter(), response.rect.min, texture, &ops);
            });
    }
}

impl Drop for PhotonApp {
    fn drop(&mut self) {
        // Texture first, then the wiped metadata strings.
        if self.image.is_loaded() {
            log::debug!("Releasing image texture");
        }
        self.image.clear();
        self.metadata = None;
        self.pending = None;
        log::debug!("Viewer resources released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::decode::fixtures::write_png;

    fn app_for(ctx: &egui::Context, path: &std::path::Path) -> PhotonApp {
        let path = SecureString::from(path.to_string_lossy().into_owned());
        PhotonApp::new(ctx, Some(path), [800.0, 600.0])
    }

    #[test]
    fn test_image_opens_on_first_frame() {
        let ctx = egui::Context::default();
        let png = write_png("app.png", 6, 4);
        let mut app = app_for(&ctx, &png);
        assert!(!app.image.is_loaded());

        app.open_pending(&ctx);
        let loaded = app.image.get().unwrap();
        assert_eq!((loaded.width, loaded.height), (6, 4));
        assert!(app.metadata.is_some());
        assert!(app.pending.is_none());
        assert!(app.info_lines()[0].starts_with("File: "));
        std::fs::remove_file(png).ok();
    }

    #[test]
    fn test_over_limit_image_leaves_empty_viewer() {
        let ctx = egui::Context::default();
        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        let png = write_png("app-wide.png", max_side + 1, 1);
        let mut app = app_for(&ctx, &png);

        app.open_pending(&ctx);
        assert!(!app.image.is_loaded());
        assert_eq!(app.metadata.as_ref().map(|m| m.width), Some(max_side + 1));

        app.apply(ViewCommand::ToggleInfo);
        assert!(app.state.show_info);
        assert!(app.info_lines().is_empty());
        std::fs::remove_file(png).ok();
    }
}
