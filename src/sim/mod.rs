//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (entity list order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{circles_overlap, first_bullet_hit, ship_hit};
pub use state::{Asteroid, Bullet, GameEvent, GamePhase, GameState, Playfield, Ship, Tier};
pub use tick::{TickInput, tick};
