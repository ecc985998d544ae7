//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame ticks (requestAnimationFrame on web, manual stepping elsewhere)
//! - Input events (held-key snapshots)

pub mod input;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Action, InputState, KeyBindings};
pub use time::{FrameClock, ManualTicks, TickSource};
