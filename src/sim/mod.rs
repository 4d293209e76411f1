//! Launch simulation module
//!
//! All gameplay logic lives here, single-threaded and driven one tick at a
//! time:
//! - Input only changes a velocity; the tick reads it
//! - Only `PlayerController` writes the craft position; others get copies
//! - Only `EntityPool` moves slots; collisions are reported, not applied
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod player;
pub mod pool;
pub mod session;
pub mod starfield;
pub mod tick;

#[cfg(test)]
mod proptest_sim;

pub use collision::{CollisionReport, CollisionSystem, within_radius};
pub use input::{InputController, InputEvent, Key};
pub use player::{PlayField, PlayerController, PlayerState};
pub use pool::{Collectible, EntityKind, EntityPool, Hazard, SpawnBand};
pub use session::{Phase, SessionState, Transition};
pub use starfield::Starfield;
pub use tick::{Simulation, TickReport};
