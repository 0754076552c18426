//! Swept projectile-enemy hit test.
//!
//! Both bodies move in a straight line during a tick. Their motions are
//! parametrised by the same fraction of the tick, so the test measures the
//! true closest approach instead of comparing end positions. A fast projectile
//! cannot tunnel through an enemy at any playback speed.

use rampart_core::components::{Enemy, Projectile};
use rampart_core::types::Position;

/// Smallest distance between two points that move linearly from `a0` to `a1`
/// and from `b0` to `b1` over the same interval.
pub fn closest_approach(a0: Position, a1: Position, b0: Position, b1: Position) -> f64 {
    let start = a0 - b0;
    let drift = (a1 - a0) - (b1 - b0);
    let drift_sq = drift.length_squared();
    let u = if drift_sq > 0.0 {
        (-start.dot(drift) / drift_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (start + drift * u).length()
}

/// Whether `projectile` struck `enemy` during the last tick.
pub fn swept_hit(projectile: &Projectile, enemy: &Enemy, hit_radius: f64) -> bool {
    closest_approach(
        projectile.prev_position,
        projectile.position,
        enemy.prev_position,
        enemy.position,
    ) < hit_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::components::EnemyId;
    use rampart_core::constants::HIT_RADIUS;
    use rampart_core::enums::EnemyArchetype;

    fn enemy(from: Position, to: Position) -> Enemy {
        Enemy {
            id: EnemyId(1),
            archetype: EnemyArchetype::Fast,
            position: to,
            prev_position: from,
            path_index: 0,
            speed: 140.0,
            hp: 5,
            alive: true,
            reward: 15,
            wave: 1,
        }
    }

    fn projectile(from: Position, to: Position) -> Projectile {
        Projectile {
            position: to,
            prev_position: from,
            target: to,
            speed: 200.0,
            damage: 2,
            alive: true,
            spent: false,
        }
    }

    #[test]
    fn test_static_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(closest_approach(a, a, b, b), 5.0);
    }

    #[test]
    fn test_crossing_paths_hit_between_ticks() {
        // Projectile sweeps right through the enemy's lane; neither end
        // position is within the radius.
        let shot = projectile(Position::new(-40.0, 0.0), Position::new(40.0, 0.0));
        let target = enemy(Position::new(0.0, -20.0), Position::new(0.0, 20.0));
        assert!(shot.position.distance(target.position) > HIT_RADIUS);
        assert!(swept_hit(&shot, &target, HIT_RADIUS));
    }

    #[test]
    fn test_same_lane_different_times_miss() {
        // Both pass the origin, but half a tick apart.
        let shot = projectile(Position::new(-40.0, 0.0), Position::new(40.0, 0.0));
        let target = enemy(Position::new(0.0, -60.0), Position::new(0.0, -20.0));
        assert!(!swept_hit(&shot, &target, HIT_RADIUS));
    }

    #[test]
    fn test_radius_is_exclusive() {
        let shot = projectile(Position::new(0.0, 0.0), Position::new(0.0, 0.0));
        let target = enemy(Position::new(12.0, 0.0), Position::new(12.0, 0.0));
        assert!(!swept_hit(&shot, &target, 12.0));
        assert!(swept_hit(&shot, &target, 12.000_001));
    }
}
