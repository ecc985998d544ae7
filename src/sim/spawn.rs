//! Asteroid factory and spawning policy

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, GameState, Playfield, Tier};
use crate::consts::*;

impl GameState {
    /// Spawn a fresh asteroid somewhere in the band above the top edge
    pub fn spawn_asteroid(&mut self, tier: Tier, field: Playfield) {
        let id = self.next_entity_id();
        let x = random_spawn_x(&mut self.rng, field.width);
        let y = -SPAWN_BAND_MIN - self.rng.random::<f32>() * (SPAWN_BAND_MAX - SPAWN_BAND_MIN);
        let vel = fall_velocity(&mut self.rng, tier);
        self.asteroids.push(Asteroid {
            id,
            pos: Vec2::new(x, y),
            vel,
            tier,
        });
    }

    /// Spawn `count` large asteroids
    pub fn fill_asteroids(&mut self, count: u32, field: Playfield) {
        for _ in 0..count {
            self.spawn_asteroid(Tier::Large, field);
        }
    }

    /// Fragments produced by destroying `parent`: two of the next smaller
    /// tier, or none for a small rock.
    ///
    /// Fragments diverge through mirrored angles around 45 degrees, each
    /// randomized within a quarter turn, and always keep falling.
    pub fn split_asteroid(&mut self, parent: &Asteroid) -> Vec<Asteroid> {
        let Some(tier) = parent.tier.smaller() else {
            return Vec::new();
        };

        let offset = self.tuning.split_offset;
        let parent_fall = parent.vel.y.abs();
        let mut fragments = Vec::with_capacity(2);

        for side in [-1.0f32, 1.0] {
            let angle = FRAC_PI_4 + self.rng.random::<f32>() * FRAC_PI_2 * side;
            let speed = SPLIT_SPEED_BASE + self.rng.random::<f32>() * SPLIT_SPEED_SPREAD;
            let jitter = (self.rng.random::<f32>() - 0.5) * SPLIT_JITTER;
            let vel = Vec2::new(
                angle.cos() * speed + jitter,
                (angle.sin() * speed + parent_fall * SPLIT_INHERIT).abs(),
            );

            let id = self.next_entity_id();
            fragments.push(Asteroid {
                id,
                pos: parent.pos + Vec2::new(offset * side, offset),
                vel,
                tier,
            });
        }

        log::debug!(
            "Asteroid {} split into {} {:?} fragments",
            parent.id,
            fragments.len(),
            tier
        );
        fragments
    }

    /// Occasional random spawn, plus a forced spawn when the field runs thin
    pub fn apply_spawn_policy(&mut self, field: Playfield) {
        if self.rng.random::<f32>() < self.tuning.spawn_chance {
            self.spawn_asteroid(Tier::Large, field);
        }
        if self.asteroids.len() < self.tuning.min_asteroids as usize {
            self.spawn_asteroid(Tier::Large, field);
        }
    }
}

fn random_spawn_x(rng: &mut impl Rng, width: f32) -> f32 {
    let span = (width - 2.0 * SPAWN_INSET).max(0.0);
    SPAWN_INSET + rng.random::<f32>() * span
}

/// Smaller rocks fall faster
fn fall_velocity(rng: &mut impl Rng, tier: Tier) -> Vec2 {
    let below_large = f32::from(Tier::Large.value() - tier.value());
    let vy = FALL_SPEED_BASE
        + rng.random::<f32>() * FALL_SPEED_SPREAD
        + below_large * FALL_SPEED_PER_TIER;
    let vx = (rng.random::<f32>() - 0.5) * DRIFT_SPREAD;
    Vec2::new(vx, vy)
}
