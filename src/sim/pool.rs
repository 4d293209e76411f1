//! Fixed-size entity pools
//!
//! Hazards (asteroids) and collectibles (coins) live in slots that are
//! allocated once and never added or removed. A slot's index is its identity;
//! only its position and spin change. Leaving the bottom of the field and
//! being picked up both go through the same recycle step.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::{COLLECTIBLE_SPIN, HAZARD_SPIN};
use crate::wrap_angle;

/// Which pool a slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Hazard,
    Collectible,
}

/// Rectangle new positions are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBand {
    pub x: (f32, f32),
    pub y: (f32, f32),
}

impl SpawnBand {
    pub fn sample(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.random_range(self.x.0..self.x.1),
            rng.random_range(self.y.0..self.y.1),
        )
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.x.0 && pos.x <= self.x.1 && pos.y >= self.y.0 && pos.y <= self.y.1
    }
}

/// An asteroid slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub slot: usize,
    pub pos: Vec2,
    /// Tumble around two axes (visual only)
    pub rotation: Vec2,
}

/// A coin slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub slot: usize,
    pub pos: Vec2,
    /// Spin around the vertical axis (visual only)
    pub rotation: f32,
}

#[derive(Debug, Clone)]
pub struct EntityPool {
    hazards: Box<[Hazard]>,
    collectibles: Box<[Collectible]>,
    hazard_band: SpawnBand,
    collectible_band: SpawnBand,
    fall_speed: f32,
    despawn_y: f32,
    rng: Pcg32,
    /// Epoch of the last placement pass (None until the first one)
    placed_epoch: Option<u64>,
}

impl EntityPool {
    /// Allocate both pools. Slots start parked in their spawn band's lower
    /// corner until the first placement pass.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let hazard_band = SpawnBand {
            x: (-config.x_limit, config.x_limit),
            y: config.hazard_spawn_y,
        };
        let collectible_band = SpawnBand {
            x: (-config.x_limit, config.x_limit),
            y: config.collectible_spawn_y,
        };

        let hazards = (0..config.hazard_count)
            .map(|slot| Hazard {
                slot,
                pos: Vec2::new(hazard_band.x.0, hazard_band.y.1),
                rotation: Vec2::ZERO,
            })
            .collect();
        let collectibles = (0..config.collectible_count)
            .map(|slot| Collectible {
                slot,
                pos: Vec2::new(collectible_band.x.0, collectible_band.y.1),
                rotation: 0.0,
            })
            .collect();

        Self {
            hazards,
            collectibles,
            hazard_band,
            collectible_band,
            fall_speed: config.fall_speed,
            despawn_y: config.despawn_y,
            rng: Pcg32::seed_from_u64(seed),
            placed_epoch: None,
        }
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn band(&self, kind: EntityKind) -> &SpawnBand {
        match kind {
            EntityKind::Hazard => &self.hazard_band,
            EntityKind::Collectible => &self.collectible_band,
        }
    }

    pub fn placed_epoch(&self) -> Option<u64> {
        self.placed_epoch
    }

    /// Give every slot in both pools a fresh spawn position
    pub fn place(&mut self, epoch: u64) {
        for slot in 0..self.hazards.len() {
            self.recycle(EntityKind::Hazard, slot);
        }
        for slot in 0..self.collectibles.len() {
            self.recycle(EntityKind::Collectible, slot);
        }
        self.placed_epoch = Some(epoch);
    }

    /// Place if this pool has not seen `epoch` yet.
    /// Returns true when a placement happened.
    pub fn sync_epoch(&mut self, epoch: u64) -> bool {
        if self.placed_epoch == Some(epoch) {
            return false;
        }
        self.place(epoch);
        true
    }

    /// Move a slot back into its spawn band. Out-of-range slots are ignored.
    pub fn recycle(&mut self, kind: EntityKind, slot: usize) {
        match kind {
            EntityKind::Hazard => {
                if let Some(hazard) = self.hazards.get_mut(slot) {
                    hazard.pos = self.hazard_band.sample(&mut self.rng);
                }
            }
            EntityKind::Collectible => {
                if let Some(coin) = self.collectibles.get_mut(slot) {
                    coin.pos = self.collectible_band.sample(&mut self.rng);
                }
            }
        }
    }

    /// One tick of falling and spinning
    pub fn advance(&mut self) {
        for hazard in self.hazards.iter_mut() {
            hazard.pos.y -= self.fall_speed;
            hazard.rotation = Vec2::new(
                wrap_angle(hazard.rotation.x + HAZARD_SPIN),
                wrap_angle(hazard.rotation.y + HAZARD_SPIN),
            );
        }
        for coin in self.collectibles.iter_mut() {
            coin.pos.y -= self.fall_speed;
            coin.rotation = wrap_angle(coin.rotation + COLLECTIBLE_SPIN);
        }
    }

    /// Recycle every slot that fell below the field. Returns how many moved.
    pub fn recycle_expired(&mut self) -> usize {
        let mut expired = 0;
        for slot in 0..self.hazards.len() {
            if self.hazards[slot].pos.y < self.despawn_y {
                self.recycle(EntityKind::Hazard, slot);
                expired += 1;
            }
        }
        for slot in 0..self.collectibles.len() {
            if self.collectibles[slot].pos.y < self.despawn_y {
                self.recycle(EntityKind::Collectible, slot);
                expired += 1;
            }
        }
        expired
    }

    /// Test hook: put a slot at an exact position
    #[cfg(test)]
    pub(crate) fn set_position(&mut self, kind: EntityKind, slot: usize, pos: Vec2) {
        match kind {
            EntityKind::Hazard => self.hazards[slot].pos = pos,
            EntityKind::Collectible => self.collectibles[slot].pos = pos,
        }
    }
}
