//! Keyboard and mouse handling for the viewer.
//!
//! [`Input`] tracks raw window events, both instantaneous (key just
//! pressed) and continuous (key held, mouse drag). [`apply_bindings`] turns
//! the keys pressed this frame into [`Params`] edits and viewer [`Action`]s:
//!
//! | Key | Effect |
//! |-----|--------|
//! | `E` | toggle the evaporator |
//! | `H` | toggle the heater |
//! | `1` / `2` / `3` | toggle defrost / face / foot |
//! | `←` / `→` | blend door -/+ 0.05 |
//! | `↓` / `↑` | air speed -/+ 0.01 |
//! | `Space` | pause |
//! | `R` | respawn all particles |
//! | `Esc` | quit |

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::params::{Params, AIR_SPEED_MAX};

/// Blend door change per arrow key press.
pub const BLEND_STEP: f32 = 0.05;
/// Air speed change per arrow key press.
pub const AIR_SPEED_STEP: f32 = 0.01;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Left,
        }
    }
}

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    E,
    H,
    R,
    Key1,
    Key2,
    Key3,
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyE => KeyCode::E,
            WinitKeyCode::KeyH => KeyCode::H,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::Digit1 | WinitKeyCode::Numpad1 => KeyCode::Key1,
            WinitKeyCode::Digit2 | WinitKeyCode::Numpad2 => KeyCode::Key2,
            WinitKeyCode::Digit3 | WinitKeyCode::Numpad3 => KeyCode::Key3,
            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::ArrowLeft => KeyCode::Left,
            WinitKeyCode::ArrowRight => KeyCode::Right,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Viewer-level effects of a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePause,
    Respawn,
    Quit,
}

/// Input state tracking for keyboard and mouse.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,

    mouse_held: HashSet<MouseButton>,

    mouse_position: Option<Vec2>,
    mouse_delta: Vec2,
    scroll_delta: f32,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Cursor movement accumulated this frame, in pixels.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Scroll wheel delta this frame; positive is up/forward.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Clear per-frame state. Call once per frame after consuming input.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    /// Record a key transition.
    pub fn press_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // Key repeat does not count as a new press.
                if self.keys_held.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    self.press_key(KeyCode::from(keycode), event.state);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let btn = MouseButton::from(*button);
                match state {
                    ElementState::Pressed => {
                        self.mouse_held.insert(btn);
                    }
                    ElementState::Released => {
                        self.mouse_held.remove(&btn);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
            }

            WindowEvent::Focused(false) => {
                self.keys_held.clear();
                self.mouse_held.clear();
            }

            _ => {}
        }
    }

    fn move_cursor(&mut self, position: Vec2) {
        if let Some(last) = self.mouse_position {
            self.mouse_delta += position - last;
        }
        self.mouse_position = Some(position);
    }
}

/// Apply this frame's key presses to `params`, returning the viewer
/// actions that were triggered.
pub fn apply_bindings(input: &Input, params: &mut Params) -> Vec<Action> {
    let mut actions = Vec::new();

    if input.key_pressed(KeyCode::E) {
        params.evaporator_on = !params.evaporator_on;
    }
    if input.key_pressed(KeyCode::H) {
        params.heater_on = !params.heater_on;
    }
    if input.key_pressed(KeyCode::Key1) {
        params.mode_defrost = !params.mode_defrost;
    }
    if input.key_pressed(KeyCode::Key2) {
        params.mode_face = !params.mode_face;
    }
    if input.key_pressed(KeyCode::Key3) {
        params.mode_foot = !params.mode_foot;
    }
    if input.key_pressed(KeyCode::Left) {
        params.blend_door = (params.blend_door - BLEND_STEP).max(0.0);
    }
    if input.key_pressed(KeyCode::Right) {
        params.blend_door = (params.blend_door + BLEND_STEP).min(1.0);
    }
    if input.key_pressed(KeyCode::Down) {
        params.air_speed = (params.air_speed - AIR_SPEED_STEP).max(0.0);
    }
    if input.key_pressed(KeyCode::Up) {
        params.air_speed = (params.air_speed + AIR_SPEED_STEP).min(AIR_SPEED_MAX.max(params.air_speed));
    }

    if input.key_pressed(KeyCode::Space) {
        actions.push(Action::TogglePause);
    }
    if input.key_pressed(KeyCode::R) {
        actions.push(Action::Respawn);
    }
    if input.key_pressed(KeyCode::Escape) {
        actions.push(Action::Quit);
    }

    actions
}
