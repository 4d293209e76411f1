//! Drifting starfield backdrop
//!
//! Decorative only: stars never collide and keep drifting in every phase.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{STAR_BOTTOM, STAR_DEPTH, STAR_TOP};

#[derive(Debug, Clone)]
pub struct Starfield {
    /// x across the field, y vertical, z depth (<= 0, away from camera)
    stars: Vec<Vec3>,
    drift: f32,
    x_limit: f32,
    rng: Pcg32,
}

impl Starfield {
    pub fn new(count: usize, drift: f32, x_limit: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-x_limit..x_limit),
                    rng.random_range(STAR_BOTTOM..STAR_TOP),
                    -rng.random_range(0.0..STAR_DEPTH),
                )
            })
            .collect();
        Self {
            stars,
            drift,
            x_limit,
            rng,
        }
    }

    pub fn stars(&self) -> &[Vec3] {
        &self.stars
    }

    /// Drift down one tick; stars below the field wrap to the top
    pub fn advance(&mut self) {
        for star in self.stars.iter_mut() {
            star.y -= self.drift;
            if star.y < STAR_BOTTOM {
                star.y = STAR_TOP;
                star.x = self.rng.random_range(-self.x_limit..self.x_limit);
            }
        }
    }
}
