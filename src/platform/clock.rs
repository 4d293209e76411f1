//! Display-frame to simulation-tick pacing
//!
//! Motion constants are per tick. `PerFrame` runs one tick per animation
//! frame, so speed follows the display rate. `Fixed` runs ticks from a
//! wall-clock accumulator so speed is the same at 60 Hz and 144 Hz.

use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickPacing {
    /// Exactly one tick per display frame
    PerFrame,
    /// Ticks of `1 / hz` seconds
    Fixed { hz: f32 },
}

impl TickPacing {
    pub fn from_config(config: &GameConfig) -> Self {
        match config.fixed_tick_hz {
            Some(hz) => TickPacing::Fixed { hz },
            None => TickPacing::PerFrame,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    pacing: TickPacing,
    accumulator: f32,
    /// Timestamp (ms) of the previous frame
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new(pacing: TickPacing) -> Self {
        Self {
            pacing,
            accumulator: 0.0,
            last_time: None,
        }
    }

    pub fn pacing(&self) -> TickPacing {
        self.pacing
    }

    /// Number of ticks to run for a frame stamped `time_ms`
    /// (`requestAnimationFrame` time)
    pub fn ticks_for_frame(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time_ms);

        match self.pacing {
            TickPacing::PerFrame => 1,
            TickPacing::Fixed { hz } => {
                let step = 1.0 / hz;
                // A backgrounded tab can hand us seconds at once
                self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

                let mut substeps = 0;
                while self.accumulator >= step && substeps < MAX_SUBSTEPS {
                    self.accumulator -= step;
                    substeps += 1;
                }
                if substeps == MAX_SUBSTEPS {
                    self.accumulator = self.accumulator.min(step);
                }
                substeps
            }
        }
    }

    /// Forget timing history (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}
