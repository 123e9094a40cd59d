use crate::state::ViewerState;

/// Upper bound on either side of the on-screen image under manual zoom.
pub const MAX_DEST_DIMENSION: i64 = 65536;

// ---------------------------------------------------------------------------
// Destination rectangle
// ---------------------------------------------------------------------------

/// Where the image lands in the viewport, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl DestRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }
}

/// Everything the transform depends on, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformInput {
    pub image_width: u32,
    pub image_height: u32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub zoom: f32,
    pub pan_x: i32,
    pub pan_y: i32,
    pub fit_to_window: bool,
}

impl TransformInput {
    pub fn new(state: &ViewerState, image_width: u32, image_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            viewport_width: state.window_width,
            viewport_height: state.window_height,
            zoom: state.zoom,
            pan_x: state.pan_x,
            pan_y: state.pan_y,
            fit_to_window: state.fit_to_window,
        }
    }
}

/// Compute the destination rectangle, or `None` when nothing should be drawn
/// this frame (empty image or viewport, or a degenerate zoom).
pub fn destination_rect(input: &TransformInput) -> Option<DestRect> {
    if input.image_width == 0
        || input.image_height == 0
        || input.viewport_width == 0
        || input.viewport_height == 0
    {
        return None;
    }

    let (vw, vh) = (input.viewport_width as i64, input.viewport_height as i64);

    let (x, y, w, h) = if input.fit_to_window {
        let aspect = input.image_width as f64 / input.image_height as f64;
        let viewport_aspect = vw as f64 / vh as f64;
        if aspect > viewport_aspect {
            let h = (vw as f64 / aspect) as i64;
            (0, (vh - h) / 2, vw, h)
        } else {
            let w = (vh as f64 * aspect) as i64;
            ((vw - w) / 2, 0, w, vh)
        }
    } else {
        // `as` saturates, so NaN and infinities land on the guard below.
        let w = (input.image_width as f64 * input.zoom as f64) as i64;
        let h = (input.image_height as f64 * input.zoom as f64) as i64;
        if w <= 0 || h <= 0 || w > MAX_DEST_DIMENSION || h > MAX_DEST_DIMENSION {
            return None;
        }
        (
            input.pan_x as i64 + (vw - w) / 2,
            input.pan_y as i64 + (vh - h) / 2,
            w,
            h,
        )
    };

    Some(DestRect {
        x: clamp_i32(x),
        y: clamp_i32(y),
        w: clamp_i32(w),
        h: clamp_i32(h),
    })
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
