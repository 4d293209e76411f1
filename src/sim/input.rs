//! Keyboard and touch input
//!
//! Events arrive between ticks and only ever change the shared velocity.
//! The tick reads it; nothing here touches position or score.

use glam::Vec2;

use crate::config::GameConfig;

/// A steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value (arrows or WASD)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "a" => Some(Key::Left),
            "ArrowRight" | "d" => Some(Key::Right),
            "ArrowUp" | "w" => Some(Key::Up),
            "ArrowDown" | "s" => Some(Key::Down),
            _ => None,
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Key::Left | Key::Right)
    }
}

/// A raw input event (touch coordinates in screen pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    TouchEnd,
}

/// Turns input events into the craft's current velocity
#[derive(Debug, Clone)]
pub struct InputController {
    velocity: Vec2,
    /// Horizontal pixel where the current touch began
    touch_origin: Option<f32>,
    keyboard_step: f32,
    touch_sensitivity: f32,
    touch_enabled: bool,
}

impl InputController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            velocity: Vec2::ZERO,
            touch_origin: None,
            keyboard_step: config.keyboard_step,
            touch_sensitivity: config.touch_sensitivity,
            touch_enabled: config.enable_touch,
        }
    }

    /// Current velocity (world units per tick)
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn touch_enabled(&self) -> bool {
        self.touch_enabled
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::TouchStart { x } => self.touch_start(x),
            InputEvent::TouchMove { x } => self.touch_move(x),
            InputEvent::TouchEnd => self.touch_end(),
        }
    }

    /// Holding a key gives a constant velocity on its axis.
    /// Vertical speed is half the horizontal step.
    pub fn key_down(&mut self, key: Key) {
        let step = self.keyboard_step;
        match key {
            Key::Left => self.velocity.x = -step,
            Key::Right => self.velocity.x = step,
            Key::Up => self.velocity.y = step / 2.0,
            Key::Down => self.velocity.y = -step / 2.0,
        }
    }

    /// Releasing a key stops its whole axis
    pub fn key_up(&mut self, key: Key) {
        if key.is_horizontal() {
            self.velocity.x = 0.0;
        } else {
            self.velocity.y = 0.0;
        }
    }

    pub fn touch_start(&mut self, x: f32) {
        if !self.touch_enabled || !x.is_finite() {
            return;
        }
        self.touch_origin = Some(x);
    }

    /// Analog steering: horizontal velocity follows the drag distance from
    /// where the touch began
    pub fn touch_move(&mut self, x: f32) {
        if !x.is_finite() {
            return;
        }
        let Some(origin) = self.touch_origin else {
            log::debug!("touchmove without touchstart ignored");
            return;
        };
        self.velocity.x = (x - origin) * self.touch_sensitivity;
    }

    pub fn touch_end(&mut self) {
        if self.touch_origin.take().is_some() {
            self.velocity.x = 0.0;
        }
    }
}
