use eframe::egui::{self, Key, Response};

use crate::state::{ViewCommand, ViewerState, KEY_ZOOM_STEP, WHEEL_ZOOM_STEP};

// ---------------------------------------------------------------------------
// Event → command mapping
// ---------------------------------------------------------------------------

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Quit,
    View(ViewCommand),
}

const BOUND_KEYS: [Key; 7] = [
    Key::Escape,
    Key::Plus,
    Key::Equals,
    Key::Minus,
    Key::F,
    Key::Num1,
    Key::I,
];

pub fn key_action(key: Key) -> Option<KeyAction> {
    let command = match key {
        Key::Escape => return Some(KeyAction::Quit),
        Key::Plus | Key::Equals => ViewCommand::ZoomIn(KEY_ZOOM_STEP),
        Key::Minus => ViewCommand::ZoomOut(KEY_ZOOM_STEP),
        Key::F => ViewCommand::Fit,
        Key::Num1 => ViewCommand::ActualSize,
        Key::I => ViewCommand::ToggleInfo,
        _ => return None,
    };
    Some(KeyAction::View(command))
}

/// One wheel step per frame, direction only.
pub fn wheel_command(delta_y: f32) -> Option<ViewCommand> {
    if delta_y > 0.0 {
        Some(ViewCommand::ZoomIn(WHEEL_ZOOM_STEP))
    } else if delta_y < 0.0 {
        Some(ViewCommand::ZoomOut(WHEEL_ZOOM_STEP))
    } else {
        None
    }
}

/// Input gathered for one frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub commands: Vec<ViewCommand>,
    pub quit: bool,
}

/// Read this frame's events into commands. `response` covers the viewport.
pub fn read_input(ctx: &egui::Context, response: &Response, state: &ViewerState) -> InputFrame {
    let ppp = ctx.pixels_per_point();
    let mut frame = InputFrame::default();

    let size = response.rect.size() * ppp;
    let (width, height) = (size.x.round() as u32, size.y.round() as u32);
    if (width, height) != (state.window_width, state.window_height) {
        frame.commands.push(ViewCommand::Resize { width, height });
    }

    ctx.input(|i| {
        for key in BOUND_KEYS {
            if !i.key_pressed(key) {
                continue;
            }
            match key_action(key) {
                Some(KeyAction::Quit) => frame.quit = true,
                Some(KeyAction::View(command)) => frame.commands.push(command),
                None => {}
            }
        }
        if response.hovered() {
            frame.commands.extend(wheel_command(i.raw_scroll_delta.y));
        }
    });

    let drag = response.drag_delta() * ppp;
    if drag != egui::Vec2::ZERO {
        frame.commands.push(ViewCommand::Pan {
            dx: drag.x.round() as i32,
            dy: drag.y.round() as i32,
        });
    }

    frame
}
