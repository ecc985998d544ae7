//! Asteroid Field - A falling-asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, game state)
//! - `renderer`: Pure draw-command generation plus the canvas backend
//! - `platform`: Tick sources and input snapshots
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Palette, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frame delta used by headless runners (60 Hz)
    pub const HEADLESS_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Hard ceiling on a single frame delta (seconds); tuning may only lower it
    pub const MAX_FRAME_DT: f32 = 0.040;

    /// Collision radius per size tier (radius = 12*tier + 4*tier)
    pub const RADIUS_PER_TIER: f32 = 16.0;
    /// Points awarded per size tier of a destroyed asteroid
    pub const POINTS_PER_TIER: u64 = 10;

    /// Spawn band above the top edge (y in [-SPAWN_BAND_MAX, -SPAWN_BAND_MIN])
    pub const SPAWN_BAND_MIN: f32 = 20.0;
    pub const SPAWN_BAND_MAX: f32 = 220.0;
    /// Horizontal inset for fresh asteroids
    pub const SPAWN_INSET: f32 = 20.0;

    /// Base fall speed and its random spread (pixels/s)
    pub const FALL_SPEED_BASE: f32 = 30.0;
    pub const FALL_SPEED_SPREAD: f32 = 80.0;
    /// Extra fall speed per tier below large (smaller rocks fall faster)
    pub const FALL_SPEED_PER_TIER: f32 = 30.0;
    /// Horizontal drift spread (vx in [-DRIFT/2, DRIFT/2])
    pub const DRIFT_SPREAD: f32 = 80.0;

    /// Split fragment speed and spread (pixels/s)
    pub const SPLIT_SPEED_BASE: f32 = 80.0;
    pub const SPLIT_SPEED_SPREAD: f32 = 80.0;
    /// Extra horizontal jitter on fragments
    pub const SPLIT_JITTER: f32 = 30.0;
    /// Fraction of the parent's fall speed inherited by fragments
    pub const SPLIT_INHERIT: f32 = 0.2;

    /// Half-length of the bullet marker
    pub const BULLET_MARKER_HALF: f32 = 6.0;

    /// Minimum canvas backing-store size in device pixels
    pub const MIN_CANVAS_WIDTH: u32 = 300;
    pub const MIN_CANVAS_HEIGHT: u32 = 200;
}
