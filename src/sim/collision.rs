//! Craft-versus-entity collision detection
//!
//! Every live slot is tested against the craft once per tick. Detection only
//! reads positions and reports what it found; the session and the pool act on
//! the report.

use glam::Vec2;

use super::pool::EntityPool;

/// What one collision pass found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// First hazard slot within the hit radius
    pub hazard_hit: Option<usize>,
    /// Every collectible slot within the hit radius, in slot order
    pub collected: Vec<usize>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.hazard_hit.is_none() && self.collected.is_empty()
    }
}

/// True when `a` and `b` are strictly closer than `radius`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

#[derive(Debug, Clone, Copy)]
pub struct CollisionSystem {
    pub hit_radius: f32,
}

impl CollisionSystem {
    pub fn new(hit_radius: f32) -> Self {
        Self { hit_radius }
    }

    /// Test the craft against both pools.
    ///
    /// A craft that has not been placed yet cannot collide with anything.
    pub fn detect(&self, player: Option<Vec2>, pool: &EntityPool) -> CollisionReport {
        let Some(player) = player else {
            return CollisionReport::default();
        };

        // Game over is idempotent, so the first hazard is enough
        let hazard_hit = pool
            .hazards()
            .iter()
            .find(|h| within_radius(h.pos, player, self.hit_radius))
            .map(|h| h.slot);

        let collected = pool
            .collectibles()
            .iter()
            .filter(|c| within_radius(c.pos, player, self.hit_radius))
            .map(|c| c.slot)
            .collect();

        CollisionReport {
            hazard_hit,
            collected,
        }
    }
}
