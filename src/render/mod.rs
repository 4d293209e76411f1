//! Render sink boundary
//!
//! The simulation hands renderers an owned [`Frame`] after each tick. Sinks
//! only read it; nothing flows back into the simulation.

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::sim::{Phase, Simulation};

/// Anything that can draw a frame (canvas, WebGPU, a test recorder)
pub trait RenderSink {
    fn draw(&mut self, frame: &Frame);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HazardSprite {
    pub slot: usize,
    pub pos: Vec2,
    pub rotation: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollectibleSprite {
    pub slot: usize,
    pub pos: Vec2,
    pub rotation: f32,
}

/// Read-only snapshot of everything visible
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    /// None before the first start
    pub player: Option<Vec2>,
    pub hazards: Vec<HazardSprite>,
    pub collectibles: Vec<CollectibleSprite>,
    pub stars: Vec<Vec3>,
    pub score: u32,
    pub phase: Phase,
}

impl Frame {
    pub fn capture(sim: &Simulation) -> Self {
        Self {
            tick: sim.time_ticks(),
            player: sim.player().position(),
            hazards: sim
                .pool()
                .hazards()
                .iter()
                .map(|h| HazardSprite {
                    slot: h.slot,
                    pos: h.pos,
                    rotation: h.rotation,
                })
                .collect(),
            collectibles: sim
                .pool()
                .collectibles()
                .iter()
                .map(|c| CollectibleSprite {
                    slot: c.slot,
                    pos: c.pos,
                    rotation: c.rotation,
                })
                .collect(),
            stars: sim.starfield().stars().to_vec(),
            score: sim.score(),
            phase: sim.phase(),
        }
    }

    pub fn hud(&self) -> Hud {
        Hud::new(self.score, self.phase)
    }
}

/// Scoreboard and game-over overlay text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score_text: String,
    pub show_game_over: bool,
    pub game_over_title: &'static str,
    pub game_over_score: String,
}

impl Hud {
    pub fn new(score: u32, phase: Phase) -> Self {
        Self {
            score_text: format!("Score: {}", score),
            show_game_over: phase == Phase::GameOver,
            game_over_title: "Game Over",
            game_over_score: format!("Your Score: {}", score),
        }
    }
}

/// Narrow viewports zoom out so the whole field fits
pub const NARROW_VIEWPORT_PX: f64 = 768.0;

/// Orthographic camera zoom (pixels per world unit) for a viewport width
pub fn camera_zoom(viewport_width: f64) -> f64 {
    if viewport_width < NARROW_VIEWPORT_PX {
        60.0
    } else {
        100.0
    }
}

/// World units to canvas pixels; the origin sits at the canvas centre, y up
#[inline]
pub fn world_to_screen(pos: Vec2, zoom: f64, canvas: (f64, f64)) -> (f64, f64) {
    (
        canvas.0 / 2.0 + pos.x as f64 * zoom,
        canvas.1 / 2.0 - pos.y as f64 * zoom,
    )
}
