//! Tower target selection and fire decisions.
//!
//! A tower is either idle or cooling down. Each tick it scans live enemies,
//! picks the nearest one in range and fires when its cooldown, measured in
//! simulation seconds, has elapsed.

use serde::{Deserialize, Serialize};

use rampart_core::components::{Enemy, EnemyId, Tower, TowerId};
use rampart_core::types::Position;

use crate::intercept::intercept_point;
use crate::path::Path;

/// Everything needed to spawn a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    pub tower: TowerId,
    pub target: EnemyId,
    pub origin: Position,
    /// Fixed point the projectile flies to.
    pub aim: Position,
    pub speed: f64,
    pub damage: i32,
}

/// Outcome of one tower update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FireDecision {
    Idle,
    Fired(ProjectileSpec),
}

/// Nearest live enemy within range (inclusive).
///
/// `enemies` must be ordered by ascending id; equal distances resolve to the
/// earlier entry.
pub fn select_target<'a>(tower: &Tower, enemies: &'a [Enemy]) -> Option<&'a Enemy> {
    let mut best: Option<(&Enemy, f64)> = None;
    for enemy in enemies.iter().filter(|enemy| enemy.alive) {
        let distance = tower.position.distance(enemy.position);
        if distance > tower.range {
            continue;
        }
        if best.map_or(true, |(_, closest)| distance < closest) {
            best = Some((enemy, distance));
        }
    }
    best.map(|(enemy, _)| enemy)
}

/// Whether the cooldown has elapsed at simulation time `now`.
pub fn ready_to_fire(tower: &Tower, now: f64) -> bool {
    now - tower.last_fire_secs > 1.0 / tower.fire_rate
}

/// Run one tower for one tick at simulation time `now`.
///
/// Predictive towers aim at the intercept point. The solver runs at 1x
/// because a fixed step covers the same simulation time at every playback
/// speed.
pub fn tower_tick(
    tower: &Tower,
    live_enemies: &[Enemy],
    path: &Path,
    now: f64,
    projectile_speed: f64,
) -> (Tower, FireDecision) {
    let mut next = tower.clone();
    let Some(target) = select_target(tower, live_enemies) else {
        return (next, FireDecision::Idle);
    };
    if !ready_to_fire(tower, now) {
        return (next, FireDecision::Idle);
    }

    let aim = if tower.predictive {
        intercept_point(tower.position, target, path, projectile_speed, 1.0)
    } else {
        target.position
    };
    next.last_fire_secs = now;

    let spec = ProjectileSpec {
        tower: tower.id,
        target: target.id,
        origin: tower.position,
        aim,
        speed: projectile_speed,
        damage: tower.damage,
    };
    (next, FireDecision::Fired(spec))
}
