use std::fmt;

use eframe::egui::{pos2, vec2, Align2, Color32, Pos2, Rect};

use crate::media::metadata::ImageMetadata;
use crate::security::memory::SecureString;
use crate::state::ViewerState;

use super::format::{format_file_size, format_timestamp};
use super::transform::{destination_rect, DestRect, TransformInput};

/// Longest overlay line, in bytes.
pub const MAX_PANEL_LINE: usize = 300;

/// Drop shadow offset in physical pixels.
const SHADOW_OFFSET: i32 = 3;

const BACKGROUND: Color32 = Color32::from_rgb(25, 25, 35);
const SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 50);
const IMAGE_BORDER: Color32 = Color32::from_rgb(80, 80, 100);
const TEXT: Color32 = Color32::from_rgb(200, 200, 220);

const TEXT_SIZE: f32 = 13.0;
const MARGIN: f32 = 15.0;
const LINE_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Draw operations
// ---------------------------------------------------------------------------

/// One primitive of a frame, in logical points.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color32),
    Fill { rect: Rect, color: Color32 },
    /// The loaded texture, stretched into `rect`.
    Image { rect: Rect },
    Outline { rect: Rect, color: Color32 },
    Text {
        pos: Pos2,
        anchor: Align2,
        text: SecureString,
        size: f32,
        color: Color32,
    },
}

/// What a frame is composed from.
pub struct FrameInput<'a> {
    pub state: &'a ViewerState,
    /// Pixel size of the loaded image, if any.
    pub image: Option<(u32, u32)>,
    pub metadata: Option<&'a ImageMetadata>,
    pub pixels_per_point: f32,
}

/// Build the ordered draw list for one frame.
///
/// Order: background, shadow, image, border, compact info bar, metadata panel.
pub fn compose_frame(input: &FrameInput<'_>) -> Vec<DrawOp> {
    let ppp = input.pixels_per_point.max(f32::EPSILON);
    let viewport = vec2(
        input.state.window_width as f32 / ppp,
        input.state.window_height as f32 / ppp,
    );

    let mut ops = vec![DrawOp::Clear(BACKGROUND)];

    let Some((width, height)) = input.image else {
        ops.push(DrawOp::Text {
            pos: (viewport / 2.0).to_pos2(),
            anchor: Align2::CENTER_CENTER,
            text: SecureString::bounded(
                "No image loaded. Pass a file path on the command line.",
                MAX_PANEL_LINE,
            ),
            size: 18.0,
            color: Color32::GRAY,
        });
        return ops;
    };

    if let Some(dest) = destination_rect(&TransformInput::new(input.state, width, height)) {
        ops.push(DrawOp::Fill {
            rect: to_points(dest.offset(SHADOW_OFFSET, SHADOW_OFFSET), ppp),
            color: SHADOW,
        });
        ops.push(DrawOp::Image { rect: to_points(dest, ppp) });
        ops.push(DrawOp::Outline { rect: to_points(dest, ppp), color: IMAGE_BORDER });
    }

    info_bar(&mut ops, viewport.y, width, height, input.state.zoom);

    if input.state.show_info {
        if let Some(meta) = input.metadata {
            metadata_panel(&mut ops, &panel_lines(meta, input.state.zoom));
        }
    }

    ops
}

fn to_points(rect: DestRect, ppp: f32) -> Rect {
    Rect::from_min_size(
        pos2(rect.x as f32 / ppp, rect.y as f32 / ppp),
        vec2(rect.w as f32 / ppp, rect.h as f32 / ppp),
    )
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

/// Compact always-visible stats in the bottom-left corner.
fn info_bar(ops: &mut Vec<DrawOp>, viewport_height: f32, width: u32, height: u32, zoom: f32) {
    let rect = Rect::from_min_size(pos2(MARGIN, viewport_height - MARGIN - 30.0), vec2(240.0, 30.0));
    ops.push(DrawOp::Fill {
        rect,
        color: Color32::from_rgba_unmultiplied(10, 10, 20, 180),
    });
    ops.push(DrawOp::Outline { rect, color: Color32::from_rgb(80, 120, 200) });
    ops.push(DrawOp::Text {
        pos: rect.left_center() + vec2(10.0, 0.0),
        anchor: Align2::LEFT_CENTER,
        text: secure_line(format_args!("Image: {width}x{height} | Zoom: {zoom:.1}x")),
        size: TEXT_SIZE,
        color: TEXT,
    });
}

/// Full metadata panel in the top-left corner.
fn metadata_panel(ops: &mut Vec<DrawOp>, lines: &[SecureString]) {
    let first_line = MARGIN + 55.0;
    let height = first_line - MARGIN + lines.len() as f32 * LINE_HEIGHT + 8.0;
    let panel = Rect::from_min_size(pos2(MARGIN, MARGIN), vec2(380.0, height));

    ops.push(DrawOp::Fill {
        rect: panel,
        color: Color32::from_rgba_unmultiplied(20, 20, 30, 230),
    });
    ops.push(DrawOp::Outline { rect: panel, color: Color32::from_rgb(100, 150, 255) });
    ops.push(DrawOp::Outline {
        rect: panel.shrink(2.0),
        color: Color32::from_rgb(150, 200, 255),
    });

    let title = Rect::from_min_size(pos2(MARGIN + 10.0, MARGIN + 10.0), vec2(360.0, 30.0));
    ops.push(DrawOp::Fill { rect: title, color: Color32::WHITE });
    ops.push(DrawOp::Text {
        pos: title.left_center() + vec2(8.0, 0.0),
        anchor: Align2::LEFT_CENTER,
        text: SecureString::bounded("Image Information", MAX_PANEL_LINE),
        size: 15.0,
        color: Color32::from_rgb(30, 30, 50),
    });

    for (i, line) in lines.iter().enumerate() {
        let y = first_line + i as f32 * LINE_HEIGHT;
        ops.push(DrawOp::Fill {
            rect: Rect::from_min_size(pos2(MARGIN + 10.0, y - 2.0), vec2(350.0, 18.0)),
            color: Color32::from_rgba_unmultiplied(40, 40, 50, 200),
        });
        ops.push(DrawOp::Text {
            pos: pos2(MARGIN + 15.0, y),
            anchor: Align2::LEFT_TOP,
            text: line.clone(),
            size: TEXT_SIZE,
            color: TEXT,
        });
    }
}

/// Text lines of the metadata panel.
pub fn panel_lines(meta: &ImageMetadata, zoom: f32) -> Vec<SecureString> {
    let mut lines = vec![
        secure_line(format_args!("File: {}", meta.filename)),
        secure_line(format_args!("Path: {}", meta.filepath)),
        secure_line(format_args!("Format: {}", meta.format)),
        secure_line(format_args!("Dimensions: {}x{}", meta.width, meta.height)),
        secure_line(format_args!("Size: {}", format_file_size(meta.file_size))),
        secure_line(format_args!("Color Depth: {} bpp", meta.bits_per_pixel)),
    ];
    if let Some(created) = meta.created {
        lines.push(secure_line(format_args!("Created: {}", format_timestamp(created))));
    }
    if let Some(modified) = meta.modified {
        lines.push(secure_line(format_args!("Modified: {}", format_timestamp(modified))));
    }
    lines.push(secure_line(format_args!("Zoom: {zoom:.1}x")));
    lines
}

/// Format into a bounded [`SecureString`], wiping the unbounded temporary.
fn secure_line(args: fmt::Arguments<'_>) -> SecureString {
    let full = SecureString::from(fmt::format(args));
    SecureString::bounded(&full, MAX_PANEL_LINE)
}
