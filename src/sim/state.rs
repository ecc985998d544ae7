//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]; hosts only read
//! the session readouts and request restarts.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{POINTS_PER_TIER, RADIUS_PER_TIER};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; only a restart leaves this phase
    GameOver,
}

/// Visible playfield size in device-independent pixels.
///
/// Re-read from the surface every frame; never cached across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Small, Tier::Medium, Tier::Large];

    /// Numeric tier (1 = small, 3 = large)
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Collision radius, derived only from the tier
    #[inline]
    pub fn radius(self) -> f32 {
        RADIUS_PER_TIER * f32::from(self.value())
    }

    /// Score awarded for destroying an asteroid of this tier
    #[inline]
    pub fn points(self) -> u64 {
        POINTS_PER_TIER * u64::from(self.value())
    }

    /// Tier of the fragments produced by a split (none for small rocks)
    pub fn smaller(self) -> Option<Self> {
        match self {
            Tier::Large => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Small),
            Tier::Small => None,
        }
    }
}

/// The player's ship. Moves horizontally only.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
}

impl Ship {
    pub fn new(tuning: &Tuning, field: Playfield) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            radius: tuning.ship_radius,
            speed: tuning.ship_speed,
        };
        ship.reset(field, tuning.ship_reset_offset);
        ship
    }

    /// Move back to the reset coordinates: centered, just above the bottom edge
    pub fn reset(&mut self, field: Playfield, reset_offset: f32) {
        self.pos = Vec2::new(field.width / 2.0, field.height - reset_offset);
    }

    /// Fit to the current surface: the whole hull inside the width, and the
    /// ship riding `reset_offset` above the bottom edge
    pub fn clamp_to(&mut self, field: Playfield, reset_offset: f32) {
        self.pos.y = field.height - reset_offset;
        let min = self.radius;
        let max = field.width - self.radius;
        self.pos.x = if max < min {
            field.width / 2.0
        } else {
            self.pos.x.clamp(min, max)
        };
    }
}

/// A falling rock
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub tier: Tier,
}

impl Asteroid {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.tier.radius()
    }
}

/// A shot travelling straight up
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Vertical velocity (negative = up)
    pub vel_y: f32,
}

/// Things that happened during the last tick, for hosts to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Fired,
    AsteroidDestroyed { tier: Tier, points: u64 },
    AsteroidEscaped,
    ShipHit,
    LifeLost { remaining: u32 },
    GameOver { score: u64 },
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Gameplay balance in effect for this session
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Score (only grows, only from shooting asteroids)
    pub score: u64,
    /// Remaining lives
    pub lives: u32,
    /// Player ship
    pub ship: Ship,
    /// Live asteroids, in evaluation order
    pub asteroids: Vec<Asteroid>,
    /// Live bullets
    pub bullets: Vec<Bullet>,
    /// Seconds until the next shot is accepted
    pub fire_cooldown: f32,
    /// Frames simulated since the last (re)start
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Start a new session: full lives, ship centered, a fresh asteroid batch
    pub fn new(seed: u64, tuning: Tuning, field: Playfield) -> Self {
        let mut state = Self {
            seed,
            ship: Ship::new(&tuning, field),
            lives: tuning.start_lives,
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            fire_cooldown: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        state.fill_asteroids(state.tuning.initial_asteroids, field);
        log::info!(
            "Session started (seed {}, {} asteroids, {} lives)",
            seed,
            state.asteroids.len(),
            state.lives
        );
        state
    }

    /// Reset the session in place and resume play.
    ///
    /// The RNG stream carries on, so the new batch differs from the last one.
    pub fn restart(&mut self, field: Playfield) {
        self.asteroids.clear();
        self.bullets.clear();
        self.events.clear();
        self.score = 0;
        self.lives = self.tuning.start_lives;
        self.fire_cooldown = 0.0;
        self.time_ticks = 0;
        self.ship = Ship::new(&self.tuning, field);
        self.phase = GamePhase::Playing;
        self.fill_asteroids(self.tuning.initial_asteroids, field);
        log::info!("Session restarted");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take one life. Ends the session at zero, otherwise re-centers the ship.
    ///
    /// Asteroids and bullets are left in place.
    pub(crate) fn lose_life(&mut self, field: Playfield) {
        if self.is_game_over() {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost {
            remaining: self.lives,
        });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over with score {}", self.score);
        } else {
            self.ship.reset(field, self.tuning.ship_reset_offset);
            log::debug!("Life lost, {} remaining", self.lives);
        }
    }
}
