//! Per-tick simulation step
//!
//! `Simulation` owns every component and runs them in a fixed order once per
//! tick. Motion constants are per tick; see `platform::clock` for how ticks
//! are paced against display frames.

use super::collision::{CollisionReport, CollisionSystem};
use super::input::InputController;
use super::player::PlayerController;
use super::pool::{EntityKind, EntityPool};
use super::session::{Phase, SessionState, Transition};
use super::starfield::Starfield;
use crate::config::GameConfig;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// False when the phase froze motion for this tick
    pub advanced: bool,
    /// The craft hit a hazard this tick (phase is now GameOver)
    pub hit: bool,
    /// Collectible slots picked up this tick
    pub collected: Vec<usize>,
    /// Slots recycled after falling off the bottom
    pub expired: usize,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    session: SessionState,
    player: PlayerController,
    pool: EntityPool,
    collision: CollisionSystem,
    starfield: Starfield,
    time_ticks: u64,
}

impl Simulation {
    /// Build a session in Idle. Placement is seeded from `config.seed`
    /// (0 when absent).
    pub fn new(config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or(0);
        Self {
            session: SessionState::new(),
            player: PlayerController::new(config),
            pool: EntityPool::new(config, seed),
            collision: CollisionSystem::new(config.hit_radius),
            starfield: Starfield::new(
                config.star_count,
                config.star_drift,
                config.x_limit,
                seed.wrapping_add(1),
            ),
            time_ticks: 0,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Idle -> Running, placing the craft and every slot right away
    pub fn start(&mut self) -> Transition {
        let transition = self.session.start();
        if transition.applied() {
            self.sync_epoch();
        }
        transition
    }

    /// Fresh epoch from any phase, placing the craft and every slot right away
    pub fn restart(&mut self) -> Transition {
        let transition = self.session.restart();
        if transition.applied() {
            self.sync_epoch();
        }
        transition
    }

    /// Advance one tick, reading (never writing) the input
    pub fn tick(&mut self, input: &InputController) -> TickReport {
        self.time_ticks += 1;
        self.starfield.advance();

        if !self.session.is_running() {
            return TickReport::default();
        }

        // Placement for a new epoch always precedes its first motion
        self.sync_epoch();

        self.player.integrate(input.velocity());
        self.pool.advance();

        let CollisionReport {
            hazard_hit,
            collected,
        } = self.collision.detect(self.player.position(), &self.pool);

        let mut report = TickReport {
            advanced: true,
            ..TickReport::default()
        };

        for slot in collected {
            if self.session.on_collect(slot).applied() {
                self.pool.recycle(EntityKind::Collectible, slot);
                report.collected.push(slot);
            }
        }
        if hazard_hit.is_some() {
            report.hit = self.session.on_hit().applied();
        }

        report.expired = self.pool.recycle_expired();
        report
    }

    fn sync_epoch(&mut self) {
        let epoch = self.session.epoch();
        if self.player.sync_epoch(epoch) | self.pool.sync_epoch(epoch) {
            log::debug!("Placement pass for epoch {}", epoch);
        }
    }

    /// Test hook: put a pool slot at an exact position
    #[cfg(test)]
    pub(crate) fn place_entity(&mut self, kind: EntityKind, slot: usize, pos: glam::Vec2) {
        self.pool.set_position(kind, slot, pos);
    }
}
