//! The player's craft
//!
//! `PlayerController` is the only writer of the craft's position. Everyone
//! else gets a copy through [`PlayerController::position`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Clamp box the craft may occupy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub x_limit: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl PlayField {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            x_limit: config.x_limit,
            y_min: config.y_min,
            y_max: config.y_max,
        }
    }

    #[inline]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(-self.x_limit, self.x_limit),
            pos.y.clamp(self.y_min, self.y_max),
        )
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= -self.x_limit && pos.x <= self.x_limit && pos.y >= self.y_min && pos.y <= self.y_max
    }

    /// Spawn point: horizontally centred on the bottom edge
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(0.0, self.y_min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec2,
    /// Velocity applied on the last tick
    pub velocity: Vec2,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    state: PlayerState,
    field: PlayField,
    /// Epoch of the last placement (None until the first one)
    placed_epoch: Option<u64>,
}

impl PlayerController {
    pub fn new(config: &GameConfig) -> Self {
        let field = PlayField::from_config(config);
        Self {
            state: PlayerState {
                position: field.spawn_point(),
                velocity: Vec2::ZERO,
            },
            field,
            placed_epoch: None,
        }
    }

    /// Published position, `None` before the first placement
    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.placed_epoch.map(|_| self.state.position)
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    pub fn placed_epoch(&self) -> Option<u64> {
        self.placed_epoch
    }

    /// Move back to the spawn point for `epoch`
    pub fn place(&mut self, epoch: u64) {
        self.state = PlayerState {
            position: self.field.spawn_point(),
            velocity: Vec2::ZERO,
        };
        self.placed_epoch = Some(epoch);
    }

    /// Place if this controller has not seen `epoch` yet.
    /// Returns true when a placement happened.
    pub fn sync_epoch(&mut self, epoch: u64) -> bool {
        if self.placed_epoch == Some(epoch) {
            return false;
        }
        self.place(epoch);
        true
    }

    /// One tick of motion: integrate, then clamp before publishing
    pub fn integrate(&mut self, velocity: Vec2) {
        if self.placed_epoch.is_none() {
            return;
        }
        self.state.velocity = velocity;
        self.state.position = self.field.clamp(self.state.position + velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed() -> PlayerController {
        let mut player = PlayerController::new(&GameConfig::default());
        player.place(1);
        player
    }

    #[test]
    fn test_unplaced_publishes_nothing() {
        let mut player = PlayerController::new(&GameConfig::default());
        assert_eq!(player.position(), None);
        player.integrate(Vec2::new(1.0, 1.0));
        assert_eq!(player.position(), None);
    }

    #[test]
    fn test_spawn_point() {
        let player = placed();
        assert_eq!(player.position(), Some(Vec2::new(0.0, -2.0)));
    }

    #[test]
    fn test_integrates_constant_velocity() {
        let mut player = placed();
        for _ in 0..10 {
            player.integrate(Vec2::new(0.1, 0.0));
        }
        let pos = player.position().expect("placed");
        assert!((pos.x - 1.0).abs() < 1e-5);
        assert_eq!(pos.y, -2.0);
    }

    #[test]
    fn test_clamps_after_integration() {
        let mut player = placed();
        for _ in 0..60 {
            player.integrate(Vec2::new(0.1, 0.05));
        }
        let pos = player.position().expect("placed");
        assert_eq!(pos, Vec2::new(5.0, 0.0));

        for _ in 0..200 {
            player.integrate(Vec2::new(-0.1, -0.05));
        }
        assert_eq!(player.position(), Some(Vec2::new(-5.0, -2.0)));
    }

    #[test]
    fn test_overshoot_clamped_same_tick() {
        let mut player = placed();
        for _ in 0..48 {
            player.integrate(Vec2::new(0.1, 0.0));
        }
        // 4.8 + 0.4 = 5.2 lands on the limit immediately
        player.integrate(Vec2::new(0.4, 0.0));
        assert_eq!(player.position().map(|p| p.x), Some(5.0));
    }

    #[test]
    fn test_sync_epoch_places_once() {
        let mut player = placed();
        player.integrate(Vec2::new(0.1, 0.05));
        assert!(!player.sync_epoch(1));
        assert_ne!(player.position(), Some(Vec2::new(0.0, -2.0)));

        assert!(player.sync_epoch(2));
        assert_eq!(player.position(), Some(Vec2::new(0.0, -2.0)));
        assert_eq!(player.state().velocity, Vec2::ZERO);
        assert_eq!(player.placed_epoch(), Some(2));
    }
}
