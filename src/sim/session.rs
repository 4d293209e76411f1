//! Session state machine
//!
//! ```text
//! Idle --start--> Running --hit--> GameOver
//!                  ^   |              |
//!                  +---+--restart-----+
//! ```
//!
//! Calls that do not apply to the current phase are ignored, never errors:
//! the tick loop must keep running whatever the UI sends.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Craft hit a hazard; the last frame stays on screen
    GameOver,
}

/// Whether a session call changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    pub fn applied(self) -> bool {
        self == Transition::Applied
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    phase: Phase,
    score: u32,
    /// Bumped on every start/restart; the placement signal for the
    /// player and the pools
    epoch: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Idle -> Running
    pub fn start(&mut self) -> Transition {
        if self.phase != Phase::Idle {
            log::debug!("start() ignored in {:?}", self.phase);
            return Transition::Ignored;
        }
        self.begin_epoch();
        log::info!("Session started (epoch {})", self.epoch);
        Transition::Applied
    }

    /// Running -> GameOver
    pub fn on_hit(&mut self) -> Transition {
        if self.phase != Phase::Running {
            log::debug!("on_hit() ignored in {:?}", self.phase);
            return Transition::Ignored;
        }
        self.phase = Phase::GameOver;
        log::info!("Game over with score {}", self.score);
        Transition::Applied
    }

    /// One point per collected slot. The caller recycles `slot` when this
    /// returns [`Transition::Applied`].
    pub fn on_collect(&mut self, slot: usize) -> Transition {
        if self.phase != Phase::Running {
            log::debug!("on_collect({}) ignored in {:?}", slot, self.phase);
            return Transition::Ignored;
        }
        self.score = self.score.saturating_add(1);
        Transition::Applied
    }

    /// Any phase -> Running with a fresh epoch.
    ///
    /// From Running this is a stop-then-restart.
    pub fn restart(&mut self) -> Transition {
        if self.phase == Phase::Running {
            log::info!("Restart while running (score {} discarded)", self.score);
        }
        self.begin_epoch();
        log::info!("Session restarted (epoch {})", self.epoch);
        Transition::Applied
    }

    fn begin_epoch(&mut self) {
        self.phase = Phase::Running;
        self.score = 0;
        self.epoch += 1;
    }
}
