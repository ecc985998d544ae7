//! Data-driven game balance
//!
//! Every gameplay number that a designer might want to tweak lives here.
//! Documents are JSON; missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of a session
    pub start_lives: u32,
    /// Large asteroids spawned when a session starts
    pub initial_asteroids: u32,
    /// Live asteroid floor; below it a large asteroid is force-spawned
    pub min_asteroids: u32,
    /// Per-frame chance of spawning an extra large asteroid
    pub spawn_chance: f32,

    /// Ship collision radius (pixels)
    pub ship_radius: f32,
    /// Ship horizontal speed (pixels/s)
    pub ship_speed: f32,
    /// Distance of the ship's reset position above the bottom edge
    pub ship_reset_offset: f32,
    /// Shrinks the ship/asteroid combined radius to make hits forgiving
    pub ship_hit_forgiveness: f32,

    /// Bullet collision radius (pixels)
    pub bullet_radius: f32,
    /// Bullet upward speed (pixels/s)
    pub bullet_speed: f32,
    /// Bullets above `-bullet_despawn_margin` are removed
    pub bullet_despawn_margin: f32,
    /// Minimum time between accepted shots (seconds)
    pub fire_cooldown: f32,

    /// Asteroids re-enter from the opposite side past this margin
    pub wrap_margin: f32,
    /// Asteroids below `height + bottom_margin` escape and cost a life
    pub bottom_margin: f32,
    /// Offset of split fragments from the parent's center
    pub split_offset: f32,

    /// Largest frame delta the simulation accepts (seconds, at most 40 ms)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_lives: 3,
            initial_asteroids: 6,
            min_asteroids: 4,
            spawn_chance: 0.015,

            ship_radius: 14.0,
            ship_speed: 280.0,
            ship_reset_offset: 60.0,
            ship_hit_forgiveness: 6.0,

            bullet_radius: 3.0,
            bullet_speed: 520.0,
            bullet_despawn_margin: 20.0,
            fire_cooldown: 0.18,

            wrap_margin: 100.0,
            bottom_margin: 50.0,
            split_offset: 6.0,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Clamp values that would break the simulation's invariants
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        self.start_lives = self.start_lives.max(1);
        self.spawn_chance = finite_or(self.spawn_chance, defaults.spawn_chance).clamp(0.0, 1.0);

        self.ship_radius = positive_or(self.ship_radius, defaults.ship_radius);
        self.ship_speed = finite_or(self.ship_speed, defaults.ship_speed).max(0.0);
        self.ship_reset_offset = finite_or(self.ship_reset_offset, defaults.ship_reset_offset);
        self.ship_hit_forgiveness =
            finite_or(self.ship_hit_forgiveness, defaults.ship_hit_forgiveness).max(0.0);

        self.bullet_radius = positive_or(self.bullet_radius, defaults.bullet_radius);
        self.bullet_speed = positive_or(self.bullet_speed, defaults.bullet_speed);
        self.bullet_despawn_margin =
            finite_or(self.bullet_despawn_margin, defaults.bullet_despawn_margin).max(0.0);
        self.fire_cooldown = finite_or(self.fire_cooldown, defaults.fire_cooldown).max(0.0);

        self.wrap_margin = finite_or(self.wrap_margin, defaults.wrap_margin).max(0.0);
        self.bottom_margin = finite_or(self.bottom_margin, defaults.bottom_margin).max(0.0);
        self.split_offset = finite_or(self.split_offset, defaults.split_offset);

        self.max_frame_dt =
            positive_or(self.max_frame_dt, defaults.max_frame_dt).min(MAX_FRAME_DT);
        self
    }

    /// Frame delta cap in milliseconds (for wall-clock tick sources)
    pub fn max_frame_ms(&self) -> f64 {
        f64::from(self.max_frame_dt) * 1000.0
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
