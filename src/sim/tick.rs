//! Per-frame simulation update
//!
//! One call advances the session by one rendered frame. Rendering never
//! happens here.

use super::collision::{first_bullet_hit, ship_hit};
use super::state::{Bullet, GameEvent, GamePhase, GameState, Playfield};
use crate::consts::MAX_FRAME_DT;

/// Held-input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

/// Advance the game state by one frame of `dt` seconds.
///
/// `dt` is clamped to `tuning.max_frame_dt`, which never exceeds 40 ms;
/// `field` is the surface size read for this frame. Does nothing but clear
/// events once the game is over.
pub fn tick(state: &mut GameState, input: &TickInput, field: Playfield, dt: f32) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        return;
    }

    let cap = state.tuning.max_frame_dt.min(MAX_FRAME_DT).max(0.0);
    let dt = if dt.is_finite() {
        dt.min(cap).max(0.0)
    } else {
        0.0
    };
    state.time_ticks += 1;

    move_ship(state, input, field, dt);
    fire(state, input, dt);
    advance_bullets(state, dt);

    advance_asteroids(state, field, dt);
    if state.phase == GamePhase::GameOver {
        return;
    }

    resolve_bullet_hits(state);
    resolve_ship_hits(state, field);
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.apply_spawn_policy(field);
}

fn move_ship(state: &mut GameState, input: &TickInput, field: Playfield, dt: f32) {
    let ship = &mut state.ship;
    if input.move_left {
        ship.pos.x -= ship.speed * dt;
    }
    if input.move_right {
        ship.pos.x += ship.speed * dt;
    }
    ship.clamp_to(field, state.tuning.ship_reset_offset);
}

/// Rate-limited: requests during the cooldown are dropped, not queued.
///
/// The cooldown runs on simulation time (the clamped `dt`), not wall-clock
/// time, so after a stalled frame it counts down at most 40 ms per frame.
fn fire(state: &mut GameState, input: &TickInput, dt: f32) {
    state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);
    if !input.fire || state.fire_cooldown > 0.0 {
        return;
    }

    let id = state.next_entity_id();
    state.bullets.push(Bullet {
        id,
        pos: state.ship.pos,
        vel_y: -state.tuning.bullet_speed,
    });
    state.fire_cooldown = state.tuning.fire_cooldown;
    state.events.push(GameEvent::Fired);
}

fn advance_bullets(state: &mut GameState, dt: f32) {
    let top = -state.tuning.bullet_despawn_margin;
    for bullet in &mut state.bullets {
        bullet.pos.y += bullet.vel_y * dt;
    }
    state.bullets.retain(|b| b.pos.y >= top);
}

fn advance_asteroids(state: &mut GameState, field: Playfield, dt: f32) {
    let margin = state.tuning.wrap_margin;
    let bottom = field.height + state.tuning.bottom_margin;

    for asteroid in &mut state.asteroids {
        asteroid.pos += asteroid.vel * dt;
        if asteroid.pos.x < -margin {
            asteroid.pos.x = field.width + margin;
        } else if asteroid.pos.x > field.width + margin {
            asteroid.pos.x = -margin;
        }
    }

    let before = state.asteroids.len();
    state.asteroids.retain(|a| a.pos.y <= bottom);
    let escaped = before - state.asteroids.len();

    for _ in 0..escaped {
        state.events.push(GameEvent::AsteroidEscaped);
        state.lose_life(field);
        if state.is_game_over() {
            break;
        }
    }
}

/// Each bullet resolves at most one hit; fragments join after the pass
fn resolve_bullet_hits(state: &mut GameState) {
    let bullet_radius = state.tuning.bullet_radius;
    let bullets = std::mem::take(&mut state.bullets);
    let mut survivors = Vec::with_capacity(bullets.len());
    let mut fragments = Vec::new();

    for bullet in bullets {
        let Some(index) = first_bullet_hit(&bullet, bullet_radius, &state.asteroids) else {
            survivors.push(bullet);
            continue;
        };

        let asteroid = state.asteroids.remove(index);
        let points = asteroid.tier.points();
        state.score += points;
        state.events.push(GameEvent::AsteroidDestroyed {
            tier: asteroid.tier,
            points,
        });
        fragments.extend(state.split_asteroid(&asteroid));
    }

    state.bullets = survivors;
    state.asteroids.extend(fragments);
}

fn resolve_ship_hits(state: &mut GameState, field: Playfield) {
    let forgiveness = state.tuning.ship_hit_forgiveness;
    let mut index = 0;
    while index < state.asteroids.len() {
        if ship_hit(&state.ship, &state.asteroids[index], forgiveness) {
            state.asteroids.remove(index);
            state.events.push(GameEvent::ShipHit);
            state.lose_life(field);
            if state.phase == GamePhase::GameOver {
                return;
            }
        } else {
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, Tier};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const FIELD: Playfield = Playfield::new(800.0, 600.0);
    const DT: f32 = 1.0 / 60.0;

    /// A session with no random spawns and an empty field
    fn quiet_state() -> GameState {
        let tuning = Tuning {
            spawn_chance: 0.0,
            min_asteroids: 0,
            ..Tuning::default()
        };
        let mut state = GameState::new(42, tuning, FIELD);
        state.asteroids.clear();
        state
    }

    fn push_asteroid(state: &mut GameState, pos: Vec2, vel: Vec2, tier: Tier) {
        let id = state.next_entity_id();
        state.asteroids.push(Asteroid { id, pos, vel, tier });
    }

    #[test]
    fn test_ship_moves_and_clamps() {
        let mut state = quiet_state();
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &left, FIELD, 0.04);
        assert!((state.ship.pos.x - (400.0 - 280.0 * 0.04)).abs() < 1e-3);

        for _ in 0..200 {
            tick(&mut state, &left, FIELD, 0.04);
        }
        assert_eq!(state.ship.pos.x, 14.0);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = quiet_state();
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &right, FIELD, 5.0);
        assert!((state.ship.pos.x - (400.0 + 280.0 * 0.04)).abs() < 1e-3);

        // A hand-built tuning cannot lift the ceiling either
        state.tuning.max_frame_dt = 2.0;
        let x = state.ship.pos.x;
        tick(&mut state, &right, FIELD, 1.0);
        assert!((state.ship.pos.x - (x + 280.0 * 0.04)).abs() < 1e-3);

        let x = state.ship.pos.x;
        tick(&mut state, &right, FIELD, f32::NAN);
        tick(&mut state, &right, FIELD, -1.0);
        assert_eq!(state.ship.pos.x, x);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut state = quiet_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        tick(&mut state, &fire, FIELD, DT);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.events, vec![GameEvent::Fired]);

        // Still cooling down: dropped
        tick(&mut state, &fire, FIELD, DT);
        assert_eq!(state.bullets.len(), 1);

        // 0.18s cooldown elapses
        for _ in 0..12 {
            tick(&mut state, &TickInput::default(), FIELD, DT);
        }
        tick(&mut state, &fire, FIELD, DT);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_bullets_leave_through_top() {
        let mut state = quiet_state();
        state.bullets.push(Bullet {
            id: 900,
            pos: Vec2::new(100.0, -15.0),
            vel_y: -520.0,
        });
        tick(&mut state, &TickInput::default(), FIELD, 0.02);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_horizontal_wrap() {
        let mut state = quiet_state();
        push_asteroid(&mut state, Vec2::new(-99.0, 100.0), Vec2::new(-100.0, 0.0), Tier::Large);
        push_asteroid(&mut state, Vec2::new(899.0, 100.0), Vec2::new(100.0, 0.0), Tier::Large);
        tick(&mut state, &TickInput::default(), FIELD, 0.02);
        assert_eq!(state.asteroids[0].pos.x, 900.0);
        assert_eq!(state.asteroids[1].pos.x, -100.0);
    }

    #[test]
    fn test_bullet_splits_large_asteroid() {
        let mut state = quiet_state();
        push_asteroid(&mut state, Vec2::new(400.0, 100.0), Vec2::new(0.0, 50.0), Tier::Large);
        state.bullets.push(Bullet {
            id: 900,
            pos: Vec2::new(400.0, 100.0),
            vel_y: -520.0,
        });

        tick(&mut state, &TickInput::default(), FIELD, DT);

        assert_eq!(state.score, 30);
        assert!(state.bullets.is_empty());
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| a.tier == Tier::Medium));

        let parent_pos = Vec2::new(400.0, 100.0 + 50.0 * DT);
        let left = parent_pos + Vec2::new(-6.0, 6.0);
        let right = parent_pos + Vec2::new(6.0, 6.0);
        assert!(state.asteroids[0].pos.distance(left) < 1e-3);
        assert!(state.asteroids[1].pos.distance(right) < 1e-3);
        assert!(state.asteroids[0].pos.distance(Vec2::new(394.0, 106.0)) < 2.0);
        assert!(state.asteroids[1].pos.distance(Vec2::new(406.0, 106.0)) < 2.0);
        assert!(state.events.contains(&GameEvent::AsteroidDestroyed {
            tier: Tier::Large,
            points: 30
        }));
    }

    #[test]
    fn test_small_asteroid_does_not_split() {
        let mut state = quiet_state();
        push_asteroid(&mut state, Vec2::new(200.0, 200.0), Vec2::ZERO, Tier::Small);
        state.bullets.push(Bullet {
            id: 900,
            pos: Vec2::new(205.0, 200.0),
            vel_y: -520.0,
        });
        tick(&mut state, &TickInput::default(), FIELD, 0.0);
        assert_eq!(state.score, 10);
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_one_hit_per_bullet_first_in_list_order() {
        let mut state = quiet_state();
        push_asteroid(&mut state, Vec2::new(300.0, 200.0), Vec2::ZERO, Tier::Small);
        push_asteroid(&mut state, Vec2::new(302.0, 200.0), Vec2::ZERO, Tier::Small);
        let second_id = state.asteroids[1].id;
        state.bullets.push(Bullet {
            id: 900,
            pos: Vec2::new(301.0, 200.0),
            vel_y: -520.0,
        });
        tick(&mut state, &TickInput::default(), FIELD, 0.0);
        assert_eq!(state.score, 10);
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].id, second_id);
    }

    #[test]
    fn test_escape_costs_a_life() {
        let mut state = quiet_state();
        state.ship.pos.x = 100.0;
        push_asteroid(&mut state, Vec2::new(400.0, 651.0), Vec2::new(0.0, 50.0), Tier::Large);

        tick(&mut state, &TickInput::default(), FIELD, DT);

        assert!(state.asteroids.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 540.0));
        assert!(state.events.contains(&GameEvent::AsteroidEscaped));
        assert!(state.events.contains(&GameEvent::LifeLost { remaining: 2 }));
    }

    #[test]
    fn test_ship_collision_costs_a_life() {
        let mut state = quiet_state();
        let ship_pos = state.ship.pos;
        push_asteroid(&mut state, ship_pos + Vec2::new(20.0, 0.0), Vec2::ZERO, Tier::Small);
        push_asteroid(&mut state, Vec2::new(100.0, 100.0), Vec2::ZERO, Tier::Small);

        tick(&mut state, &TickInput::default(), FIELD, 0.0);

        assert_eq!(state.lives, 2);
        assert_eq!(state.asteroids.len(), 1);
        assert!(state.events.contains(&GameEvent::ShipHit));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_game_over_freezes_updates() {
        let mut state = quiet_state();
        state.lives = 1;
        push_asteroid(&mut state, Vec2::new(400.0, 700.0), Vec2::ZERO, Tier::Large);
        push_asteroid(&mut state, Vec2::new(100.0, 100.0), Vec2::new(0.0, 100.0), Tier::Large);

        tick(&mut state, &TickInput::default(), FIELD, DT);
        assert!(state.is_game_over());
        assert_eq!(state.lives, 0);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));

        let frozen = state.asteroids.clone();
        let fire = TickInput {
            fire: true,
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &fire, FIELD, DT);
        assert_eq!(state.asteroids, frozen);
        assert!(state.bullets.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_several_escapes_in_one_frame_stop_at_zero() {
        let mut state = quiet_state();
        state.lives = 2;
        for x in [100.0, 200.0, 300.0] {
            push_asteroid(&mut state, Vec2::new(x, 700.0), Vec2::ZERO, Tier::Small);
        }
        tick(&mut state, &TickInput::default(), FIELD, DT);
        assert_eq!(state.lives, 0);
        assert!(state.is_game_over());

        // Nothing is reported after the session ends
        assert_eq!(
            state.events,
            vec![
                GameEvent::AsteroidEscaped,
                GameEvent::LifeLost { remaining: 1 },
                GameEvent::AsteroidEscaped,
                GameEvent::LifeLost { remaining: 0 },
                GameEvent::GameOver { score: 0 },
            ]
        );
    }

    #[test]
    fn test_ship_follows_vertical_resize() {
        let mut state = quiet_state();
        let taller = Playfield::new(800.0, 900.0);
        tick(&mut state, &TickInput::default(), taller, DT);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 840.0));

        let shorter = Playfield::new(800.0, 300.0);
        tick(&mut state, &TickInput::default(), shorter, DT);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 240.0));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = quiet_state();
        state.lives = 1;
        push_asteroid(&mut state, Vec2::new(400.0, 700.0), Vec2::ZERO, Tier::Large);
        tick(&mut state, &TickInput::default(), FIELD, DT);
        assert!(state.is_game_over());

        state.restart(FIELD);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());
        assert_eq!(state.asteroids.len(), 6);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 540.0));
    }

    #[test]
    fn test_field_is_kept_populated() {
        let mut state = GameState::new(5, Tuning::default(), FIELD);
        state.asteroids.clear();
        tick(&mut state, &TickInput::default(), FIELD, DT);
        assert!(!state.asteroids.is_empty());
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                move_left: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                ..Default::default()
            },
        ];

        let mut state1 = GameState::new(99999, Tuning::default(), FIELD);
        let mut state2 = GameState::new(99999, Tuning::default(), FIELD);
        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input, FIELD, DT);
            tick(&mut state2, input, FIELD, DT);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.asteroids, state2.asteroids);
        assert_eq!(state1.ship, state2.ship);
    }

    fn any_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(move_left, move_right, fire)| {
            TickInput {
                move_left,
                move_right,
                fire,
            }
        })
    }

    proptest! {
        #[test]
        fn prop_session_invariants(
            seed in any::<u64>(),
            frames in prop::collection::vec((any_input(), 0.0f32..0.1), 1..300),
            width in 40.0f32..1600.0,
        ) {
            let field = Playfield::new(width, 600.0);
            let mut state = GameState::new(seed, Tuning::default(), field);

            for (input, dt) in &frames {
                let score_before = state.score;
                let lives_before = state.lives;
                let was_over = state.is_game_over();

                tick(&mut state, input, field, *dt);

                // Score only grows, and only by tier points of destroyed rocks
                let awarded: u64 = state.events.iter().map(|e| match e {
                    GameEvent::AsteroidDestroyed { points, .. } => *points,
                    _ => 0,
                }).sum();
                prop_assert_eq!(state.score, score_before + awarded);

                // Each life lost matches an escape or a ship hit
                let lost = state
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
                    .count() as u32;
                prop_assert_eq!(state.lives, lives_before - lost);
                prop_assert_eq!(state.is_game_over(), state.lives == 0);
                if was_over {
                    prop_assert!(state.is_game_over());
                }

                prop_assert!(state.ship.pos.x >= state.ship.radius);
                prop_assert!(state.ship.pos.x <= field.width - state.ship.radius);
            }
        }
    }
}
