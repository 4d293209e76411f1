//! Launch Sim - steer a craft through a falling field of asteroids and coins
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (input, player, entity pools, collisions, session)
//! - `render`: Read-only frame snapshots and the render sink boundary
//! - `platform`: Frame-to-tick pacing
//! - `config`: Tunable options, validation and storage

pub mod config;
pub mod error;
pub mod platform;
pub mod render;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;

/// Default tuning constants (all motion is expressed per tick)
pub mod consts {
    /// Pool sizes
    pub const HAZARD_COUNT: usize = 6;
    pub const COLLECTIBLE_COUNT: usize = 4;

    /// Distance below which the craft touches an entity (strict)
    pub const HIT_RADIUS: f32 = 0.5;

    /// Play field clamp box for the craft
    pub const X_LIMIT: f32 = 5.0;
    pub const Y_MAX: f32 = 0.0;
    pub const Y_MIN: f32 = -2.0;

    /// Entities falling below this are recycled into their spawn band
    pub const DESPAWN_Y: f32 = -6.0;

    /// Spawn bands (y) above the visible field
    pub const HAZARD_SPAWN_Y: (f32, f32) = (5.0, 10.0);
    pub const COLLECTIBLE_SPAWN_Y: (f32, f32) = (5.0, 8.0);

    /// Motion per tick
    pub const FALL_SPEED: f32 = 0.05;
    pub const HAZARD_SPIN: f32 = 0.01;
    pub const COLLECTIBLE_SPIN: f32 = 0.05;

    /// Input
    pub const KEYBOARD_STEP: f32 = 0.1;
    pub const TOUCH_SENSITIVITY: f32 = 0.0005;

    /// Starfield backdrop
    pub const STAR_COUNT: usize = 300;
    pub const STAR_DRIFT: f32 = 0.02;
    pub const STAR_TOP: f32 = 6.0;
    pub const STAR_BOTTOM: f32 = -6.0;
    pub const STAR_DEPTH: f32 = 5.0;

    /// Fixed-step pacing guards
    pub const MAX_SUBSTEPS: u32 = 8;
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Wrap an angle to [-π, π)
///
/// Spin accumulators grow every tick; wrapping keeps them precise.
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
