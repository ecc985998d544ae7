//! Rendering module
//!
//! `frame` turns a game state into a flat list of draw commands without
//! touching any graphics API; `canvas` replays them on a 2D canvas context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
pub mod frame;

pub use colors::{Color, Colors};
pub use frame::{DrawCommand, render};
