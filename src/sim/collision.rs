//! Collision detection
//!
//! Everything is a circle. Tests are exhaustive pairwise: entity counts stay in
//! the dozens, so there is no spatial index.

use glam::Vec2;

use super::state::{Asteroid, Bullet, Ship};

/// Strict circle overlap: `distance(centers) < sum of radii`
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Index of the first asteroid (in list order) the bullet overlaps
pub fn first_bullet_hit(
    bullet: &Bullet,
    bullet_radius: f32,
    asteroids: &[Asteroid],
) -> Option<usize> {
    asteroids
        .iter()
        .position(|a| circles_overlap(bullet.pos, bullet_radius, a.pos, a.radius()))
}

/// Ship hit test with a forgiveness margin taken off the combined radius
#[inline]
pub fn ship_hit(ship: &Ship, asteroid: &Asteroid, forgiveness: f32) -> bool {
    ship.pos.distance(asteroid.pos) < ship.radius + asteroid.radius() - forgiveness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Tier;

    fn asteroid(id: u32, x: f32, y: f32, tier: Tier) -> Asteroid {
        Asteroid {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            tier,
        }
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        // Exactly touching is not an overlap
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(30.0, 40.0), 5.0));
    }

    #[test]
    fn test_first_bullet_hit_uses_list_order() {
        let bullet = Bullet {
            id: 1,
            pos: Vec2::new(100.0, 100.0),
            vel_y: -520.0,
        };
        let asteroids = vec![
            asteroid(1, 400.0, 400.0, Tier::Large),
            asteroid(2, 110.0, 100.0, Tier::Small),
            asteroid(3, 100.0, 110.0, Tier::Large),
        ];
        assert_eq!(first_bullet_hit(&bullet, 3.0, &asteroids), Some(1));
        assert_eq!(first_bullet_hit(&bullet, 3.0, &asteroids[2..]), Some(0));
        assert_eq!(first_bullet_hit(&bullet, 3.0, &asteroids[..1]), None);
    }

    #[test]
    fn test_ship_hit_forgiveness() {
        let ship = Ship {
            pos: Vec2::new(0.0, 0.0),
            radius: 14.0,
            speed: 280.0,
        };
        // Combined radius 30, effective 24
        assert!(ship_hit(&ship, &asteroid(1, 23.0, 0.0, Tier::Small), 6.0));
        assert!(!ship_hit(&ship, &asteroid(1, 26.0, 0.0, Tier::Small), 6.0));
        assert!(ship_hit(&ship, &asteroid(1, 26.0, 0.0, Tier::Small), 0.0));
    }
}
