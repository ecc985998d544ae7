//! Frame composition
//!
//! [`render`] reads the game state and produces draw commands in painter's
//! order. It has no side effects and plays no part in timing.

use glam::Vec2;

use super::colors::{Color, Colors};
use crate::consts::BULLET_MARKER_HALF;
use crate::settings::Settings;
use crate::sim::{GameState, Playfield};

/// A single 2D drawing operation in playfield pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface
    Clear { size: Vec2 },
    /// Full-surface vertical gradient
    VerticalGradient { size: Vec2, top: Color, bottom: Color },
    FillRect { origin: Vec2, size: Vec2, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
        round_cap: bool,
    },
    /// Filled triangle with a hairline outline
    Triangle {
        points: [Vec2; 3],
        fill: Color,
        outline: Color,
    },
    /// Text horizontally centered on `pos.x`, baseline at `pos.y`
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        color: Color,
    },
}

/// Compose the frame for the current state
pub fn render(state: &GameState, field: Playfield, settings: &Settings) -> Vec<DrawCommand> {
    let colors = Colors::for_palette(settings.palette);
    let size = Vec2::new(field.width, field.height);
    let mut commands = Vec::with_capacity(4 + state.asteroids.len() * 2 + state.bullets.len());

    commands.push(DrawCommand::Clear { size });
    commands.push(DrawCommand::VerticalGradient {
        size,
        top: colors.background_top,
        bottom: colors.background_bottom,
    });

    for asteroid in &state.asteroids {
        let r = asteroid.radius();
        commands.push(DrawCommand::FillCircle {
            center: asteroid.pos,
            radius: r,
            color: colors.asteroid,
        });
        if settings.crater_detail {
            commands.push(DrawCommand::Line {
                from: asteroid.pos + Vec2::new(-0.4 * r, -0.2 * r),
                to: asteroid.pos + Vec2::new(0.3 * r, 0.4 * r),
                width: 1.0,
                color: colors.crater,
                round_cap: false,
            });
        }
    }

    for bullet in &state.bullets {
        commands.push(DrawCommand::Line {
            from: bullet.pos + Vec2::new(0.0, BULLET_MARKER_HALF),
            to: bullet.pos - Vec2::new(0.0, BULLET_MARKER_HALF),
            width: 2.0,
            color: colors.bullet,
            round_cap: true,
        });
    }

    commands.push(ship_triangle(state, colors));

    if state.is_game_over() {
        push_game_over(&mut commands, state.score, size, colors);
    }

    commands
}

/// Nose up, centered on the ship position
fn ship_triangle(state: &GameState, colors: &Colors) -> DrawCommand {
    let Vec2 { x, y } = state.ship.pos;
    let r = state.ship.radius;
    DrawCommand::Triangle {
        points: [
            Vec2::new(x, y - r),
            Vec2::new(x + r, y + r),
            Vec2::new(x - r, y + r),
        ],
        fill: colors.ship,
        outline: colors.ship_outline,
    }
}

fn push_game_over(commands: &mut Vec<DrawCommand>, score: u64, size: Vec2, colors: &Colors) {
    let center = size / 2.0;
    commands.push(DrawCommand::FillRect {
        origin: Vec2::ZERO,
        size,
        color: colors.overlay,
    });
    commands.push(DrawCommand::Text {
        text: format!("Game Over — Score: {}", score),
        pos: Vec2::new(center.x, center.y - 10.0),
        size_px: 28.0,
        color: colors.text,
    });
    commands.push(DrawCommand::Text {
        text: "Press Restart to play again".to_string(),
        pos: Vec2::new(center.x, center.y + 18.0),
        size_px: 16.0,
        color: colors.text,
    });
}
