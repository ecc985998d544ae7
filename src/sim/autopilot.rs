//! Demo autopilot
//!
//! Produces inputs that keep the ship under the most threatening rock and
//! fire whenever something is lined up. Used by the headless runner and the
//! web demo toggle; the simulation itself never calls it.

use super::state::{Asteroid, GameState};
use super::tick::TickInput;

/// Horizontal slack before the autopilot bothers to steer (pixels)
const STEER_DEADZONE: f32 = 4.0;

/// Pick this frame's input for the current state
pub fn autopilot(state: &GameState) -> TickInput {
    let ship = &state.ship;
    let Some(target) = most_threatening(state) else {
        return TickInput::default();
    };

    let offset = target.pos.x - ship.pos.x;
    let lined_up = offset.abs() < target.radius();

    TickInput {
        move_left: offset < -STEER_DEADZONE,
        move_right: offset > STEER_DEADZONE,
        fire: lined_up,
    }
}

/// The on-screen asteroid closest to the ship's line (lowest on screen)
fn most_threatening(state: &GameState) -> Option<&Asteroid> {
    state
        .asteroids
        .iter()
        .filter(|a| a.pos.y + a.radius() > 0.0 && a.pos.y < state.ship.pos.y)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
