//! Straight-line stepping for enemies and projectiles.
//!
//! Both entity kinds move toward a point at constant speed and snap onto it
//! when one step would reach or overshoot it. Enemies then retarget the next
//! waypoint; projectiles expire.

use serde::{Deserialize, Serialize};

use rampart_core::components::{Enemy, Projectile};
use rampart_core::types::Position;

use crate::path::Path;

/// Result of advancing one enemy by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyStep {
    /// The enemy was already dead. Nothing changed.
    Inert,
    /// The enemy moved along its path.
    Moved,
    /// The enemy ran out of waypoints and is now dead. Reported once.
    ReachedEnd,
}

/// Result of advancing one projectile by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileStep {
    /// The projectile was already expired. Nothing changed.
    Inert,
    /// The projectile moved toward its aim point.
    Moved,
    /// The projectile reached its aim point and expired.
    HitTarget,
}

/// Move `from` toward `to` by at most `max_distance`.
///
/// Returns the new position and whether `to` was reached. A step that would
/// reach or pass the target lands exactly on it.
pub fn step_toward(from: Position, to: Position, max_distance: f64) -> (Position, bool) {
    let offset = to - from;
    let distance = offset.length();
    if distance == 0.0 {
        return (to, true);
    }
    if max_distance >= distance {
        return (to, true);
    }
    (from + offset * (max_distance / distance), false)
}

/// Advance an enemy along the path by `dt` seconds.
pub fn advance_enemy(enemy: &Enemy, path: &Path, dt: f64) -> (Enemy, EnemyStep) {
    let mut next = enemy.clone();
    if !enemy.alive {
        return (next, EnemyStep::Inert);
    }
    next.prev_position = enemy.position;

    let Some(target) = path.waypoint(enemy.path_index + 1) else {
        next.alive = false;
        return (next, EnemyStep::ReachedEnd);
    };

    let (position, arrived) = step_toward(enemy.position, target, enemy.speed * dt);
    next.position = position;
    if arrived {
        next.path_index += 1;
    }
    (next, EnemyStep::Moved)
}

/// Advance a projectile toward its fixed aim point by `dt` seconds.
pub fn advance_projectile(projectile: &Projectile, dt: f64) -> (Projectile, ProjectileStep) {
    let mut next = projectile.clone();
    if !projectile.alive {
        return (next, ProjectileStep::Inert);
    }
    next.prev_position = projectile.position;

    let (position, arrived) = step_toward(
        projectile.position,
        projectile.target,
        projectile.speed * dt,
    );
    next.position = position;
    if arrived {
        next.alive = false;
        return (next, ProjectileStep::HitTarget);
    }
    (next, ProjectileStep::Moved)
}
