// ---------------------------------------------------------------------------
// Viewer commands
// ---------------------------------------------------------------------------

/// Keyboard zoom step.
pub const KEY_ZOOM_STEP: f32 = 1.2;

/// Mouse-wheel zoom step (finer than the keyboard).
pub const WHEEL_ZOOM_STEP: f32 = 1.1;

/// Discrete user input the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    /// Multiply the zoom by the given step.
    ZoomIn(f32),
    /// Divide the zoom by the given step.
    ZoomOut(f32),
    Fit,
    ActualSize,
    ToggleInfo,
    Resize { width: u32, height: u32 },
    /// Drag offset in physical pixels.
    Pan { dx: i32, dy: i32 },
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// View parameters for the single session, independent of rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    /// Viewport size in physical pixels.
    pub window_width: u32,
    pub window_height: u32,

    /// Scale factor in manual mode (1.0 = one image pixel per screen pixel).
    pub zoom: f32,

    /// Offset from the centred position, manual mode only.
    pub pan_x: i32,
    pub pan_y: i32,

    /// Scale the image to the viewport instead of using `zoom`.
    pub fit_to_window: bool,

    /// Whether the full metadata panel is shown.
    pub show_info: bool,
}

impl ViewerState {
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
            zoom: 1.0,
            pan_x: 0,
            pan_y: 0,
            fit_to_window: true,
            show_info: false,
        }
    }

    /// Apply one command.
    pub fn apply(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::ZoomIn(step) => {
                self.zoom *= step;
                self.fit_to_window = false;
            }
            ViewCommand::ZoomOut(step) => {
                self.zoom /= step;
                self.fit_to_window = false;
            }
            ViewCommand::Fit => {
                self.fit_to_window = true;
                self.reset_view();
            }
            ViewCommand::ActualSize => {
                self.fit_to_window = false;
                self.reset_view();
            }
            ViewCommand::ToggleInfo => self.show_info = !self.show_info,
            ViewCommand::Resize { width, height } => {
                self.window_width = width;
                self.window_height = height;
            }
            ViewCommand::Pan { dx, dy } => {
                if !self.fit_to_window {
                    self.pan_x = self.pan_x.saturating_add(dx);
                    self.pan_y = self.pan_y.saturating_add(dy);
                }
            }
        }
    }

    fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0;
        self.pan_y = 0;
    }
}
