//! Configuration errors
//!
//! The simulation itself never fails; only loading or validating a
//! [`GameConfig`](crate::GameConfig) can.

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{name} must be at least 1")]
    ZeroCount { name: &'static str },

    #[error("{name} must be a finite number that fits the play field")]
    NonFinite { name: &'static str },

    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} range is empty: min {min} must be below max {max}")]
    EmptyRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must start at least one hit radius above the play field")]
    SpawnOverlapsField { name: &'static str },
}
