//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (how many simulation ticks a display frame gets)

pub mod clock;

pub use clock::{FrameClock, TickPacing};
