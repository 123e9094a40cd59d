use eframe::egui::{pos2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, TextureId};

use crate::view::compose::DrawOp;

// ---------------------------------------------------------------------------
// Painting composed frames
// ---------------------------------------------------------------------------

/// Replay `ops` on `painter`, relative to `origin` (top-left of the viewport).
pub fn paint(painter: &Painter, origin: Pos2, texture: Option<TextureId>, ops: &[DrawOp]) {
    let place = |rect: &Rect| rect.translate(origin.to_vec2());

    for op in ops {
        match op {
            DrawOp::Clear(color) => {
                painter.rect_filled(painter.clip_rect(), 0.0, *color);
            }
            DrawOp::Fill { rect, color } => {
                painter.rect_filled(place(rect), 0.0, *color);
            }
            DrawOp::Image { rect } => {
                if let Some(id) = texture {
                    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                    painter.image(id, place(rect), uv, Color32::WHITE);
                }
            }
            DrawOp::Outline { rect, color } => {
                let r = place(rect);
                let corners = vec![r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom()];
                painter.add(Shape::closed_line(corners, Stroke::new(1.0, *color)));
            }
            DrawOp::Text { pos, anchor, text, size, color } => {
                painter.text(
                    origin + pos.to_vec2(),
                    *anchor,
                    text.as_str(),
                    FontId::proportional(*size),
                    *color,
                );
            }
        }
    }
}
