//! Game configuration
//!
//! Persisted as JSON in LocalStorage on the web. Scores are never stored.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable options for one game view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Pools ===
    pub hazard_count: usize,
    pub collectible_count: usize,

    // === Collision ===
    /// Hit radius shared by every entity kind
    pub hit_radius: f32,

    // === Play field ===
    /// Craft x is clamped to [-x_limit, x_limit]
    pub x_limit: f32,
    pub y_min: f32,
    pub y_max: f32,
    /// Entities below this y are recycled
    pub despawn_y: f32,
    /// Spawn band (y) for hazards; x always spans the play field
    pub hazard_spawn_y: (f32, f32),
    /// Spawn band (y) for collectibles
    pub collectible_spawn_y: (f32, f32),

    // === Motion (per tick) ===
    pub fall_speed: f32,
    pub keyboard_step: f32,
    /// Horizontal velocity per pixel of touch drag
    pub touch_sensitivity: f32,

    // === Input ===
    /// Accept touch gestures in addition to the keyboard
    pub enable_touch: bool,

    // === Backdrop ===
    pub star_count: usize,
    pub star_drift: f32,

    // === Pacing ===
    /// Seed for entity placement; the shell seeds from the clock when absent
    pub seed: Option<u64>,
    /// Run ticks on a fixed clock instead of once per display frame
    pub fixed_tick_hz: Option<f32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hazard_count: HAZARD_COUNT,
            collectible_count: COLLECTIBLE_COUNT,

            hit_radius: HIT_RADIUS,

            x_limit: X_LIMIT,
            y_min: Y_MIN,
            y_max: Y_MAX,
            despawn_y: DESPAWN_Y,
            hazard_spawn_y: HAZARD_SPAWN_Y,
            collectible_spawn_y: COLLECTIBLE_SPAWN_Y,

            fall_speed: FALL_SPEED,
            keyboard_step: KEYBOARD_STEP,
            touch_sensitivity: TOUCH_SENSITIVITY,

            enable_touch: true,

            star_count: STAR_COUNT,
            star_drift: STAR_DRIFT,

            seed: None,
            fixed_tick_hz: None,
        }
    }
}

impl GameConfig {
    /// Keyboard-only variant (desktop page)
    pub fn desktop() -> Self {
        Self {
            enable_touch: false,
            ..Self::default()
        }
    }

    /// Same config with an explicit placement seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse and validate a JSON config (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check every option against the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hazard_count == 0 {
            return Err(ConfigError::ZeroCount {
                name: "hazard_count",
            });
        }
        if self.collectible_count == 0 {
            return Err(ConfigError::ZeroCount {
                name: "collectible_count",
            });
        }

        let finites = [
            ("hit_radius", self.hit_radius),
            ("x_limit", self.x_limit),
            ("y_min", self.y_min),
            ("y_max", self.y_max),
            ("despawn_y", self.despawn_y),
            ("hazard_spawn_y", self.hazard_spawn_y.0),
            ("hazard_spawn_y", self.hazard_spawn_y.1),
            ("collectible_spawn_y", self.collectible_spawn_y.0),
            ("collectible_spawn_y", self.collectible_spawn_y.1),
            ("fall_speed", self.fall_speed),
            ("keyboard_step", self.keyboard_step),
            ("touch_sensitivity", self.touch_sensitivity),
            ("star_drift", self.star_drift),
        ];
        for (name, value) in finites {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
        }

        let positives = [
            ("hit_radius", self.hit_radius),
            ("x_limit", self.x_limit),
            ("fall_speed", self.fall_speed),
            ("keyboard_step", self.keyboard_step),
            ("touch_sensitivity", self.touch_sensitivity),
        ];
        for (name, value) in positives {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if let Some(hz) = self.fixed_tick_hz {
            if hz.is_nan() || hz <= 0.0 {
                return Err(ConfigError::NonPositive {
                    name: "fixed_tick_hz",
                    value: hz,
                });
            }
            if !hz.is_finite() {
                return Err(ConfigError::NonFinite {
                    name: "fixed_tick_hz",
                });
            }
        }

        check_span("x_limit", -self.x_limit, self.x_limit)?;
        check_range("play field y", self.y_min, self.y_max)?;
        check_range("despawn_y", self.despawn_y, self.y_min)?;

        for (name, (min, max)) in [
            ("hazard_spawn_y", self.hazard_spawn_y),
            ("collectible_spawn_y", self.collectible_spawn_y),
        ] {
            check_range(name, min, max)?;
            check_span(name, min, max)?;
            // A recycled collectible must land out of reach of the craft
            if min < self.y_max + self.hit_radius {
                return Err(ConfigError::SpawnOverlapsField { name });
            }
        }

        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "launch_sim_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Config saved");
                }
                Err(e) => log::warn!("Config not saved: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min < max {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange { name, min, max })
    }
}

/// Sampling divides the width by just under one, so leave it headroom
fn check_span(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if ((max - min) * 2.0).is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name })
    }
}
