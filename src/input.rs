//! Keyboard and mouse handling for the viewer.
//!
//! Key presses become [`Command`]s; a left-drag and the scroll wheel are
//! accumulated into a [`CameraMotion`] that the shell applies to the orbit
//! camera once per frame.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub const HELP: &str = "\
Keys:
  Esc    quit
  H      print this help
  S      save a screenshot
  F      toggle diffuse/solid shading
  Space  pause/resume
Mouse:
  left-drag  orbit the camera
  wheel      zoom";

/// Action requested from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Screenshot,
    ToggleShading,
    TogglePause,
}

impl Command {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Escape => Some(Command::Quit),
            KeyCode::KeyH => Some(Command::Help),
            KeyCode::KeyS => Some(Command::Screenshot),
            KeyCode::KeyF => Some(Command::ToggleShading),
            KeyCode::Space => Some(Command::TogglePause),
            _ => None,
        }
    }
}

/// Camera input accumulated since the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraMotion {
    /// Drag distance in pixels.
    pub drag: Vec2,
    /// Scroll in lines, positive away from the user.
    pub scroll: f32,
}

impl CameraMotion {
    pub fn is_idle(&self) -> bool {
        self.drag == Vec2::ZERO && self.scroll == 0.0
    }
}

#[derive(Debug, Default)]
pub struct Input {
    dragging: bool,
    cursor: Option<Vec2>,
    motion: CameraMotion,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a window event. Returns the command for a fresh key press.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<Command> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return None;
                }
                match event.physical_key {
                    PhysicalKey::Code(key) => Command::from_key(key),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    self.set_dragging(*state == ElementState::Pressed);
                }
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scrolled(match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                });
                None
            }
            _ => None,
        }
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn cursor_moved(&mut self, position: Vec2) {
        if let Some(last) = self.cursor {
            if self.dragging {
                self.motion.drag += position - last;
            }
        }
        self.cursor = Some(position);
    }

    pub fn scrolled(&mut self, lines: f32) {
        self.motion.scroll += lines;
    }

    /// Take the motion accumulated since the previous call.
    pub fn take_motion(&mut self) -> CameraMotion {
        std::mem::take(&mut self.motion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_commands() {
        assert_eq!(Command::from_key(KeyCode::Escape), Some(Command::Quit));
        assert_eq!(Command::from_key(KeyCode::KeyS), Some(Command::Screenshot));
        assert_eq!(Command::from_key(KeyCode::KeyF), Some(Command::ToggleShading));
        assert_eq!(Command::from_key(KeyCode::Space), Some(Command::TogglePause));
        assert_eq!(Command::from_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_drag_only_while_held() {
        let mut input = Input::new();
        input.cursor_moved(Vec2::new(10.0, 10.0));
        input.cursor_moved(Vec2::new(20.0, 10.0));
        assert!(input.take_motion().is_idle());

        input.set_dragging(true);
        input.cursor_moved(Vec2::new(25.0, 4.0));
        input.cursor_moved(Vec2::new(30.0, 0.0));
        input.set_dragging(false);
        input.cursor_moved(Vec2::new(100.0, 100.0));

        let motion = input.take_motion();
        assert_eq!(motion.drag, Vec2::new(10.0, -10.0));
        assert!(input.take_motion().is_idle());
    }

    #[test]
    fn test_scroll_accumulates() {
        let mut input = Input::new();
        input.scrolled(1.0);
        input.scrolled(0.5);
        assert_eq!(input.take_motion().scroll, 1.5);
    }
}
