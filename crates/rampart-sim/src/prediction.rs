//! Path-following motion prediction.
//!
//! Walks an enemy forward along the remaining waypoints without touching the
//! enemy itself. Used by the intercept solver to sample future positions.

use rampart_core::components::Enemy;
use rampart_core::types::Position;

use crate::path::Path;

/// Where `enemy` will be after `horizon` seconds at `speed_multiplier` times
/// its own speed.
///
/// Turns at waypoints are followed exactly. Prediction stops at the last
/// waypoint. Dead enemies, enemies with nowhere left to go and non-positive
/// effective speeds or horizons yield the current position.
pub fn predict_position(enemy: &Enemy, path: &Path, horizon: f64, speed_multiplier: f64) -> Position {
    let speed = enemy.speed * speed_multiplier;
    if !enemy.alive || !(speed > 0.0) || !(horizon > 0.0) {
        return enemy.position;
    }

    let mut position = enemy.position;
    let mut index = enemy.path_index;
    let mut remaining = horizon;

    while remaining > 0.0 {
        let Some(next) = path.waypoint(index + 1) else {
            break;
        };
        let distance = position.distance(next);
        let time_to_next = distance / speed;
        if time_to_next <= remaining {
            position = next;
            remaining -= time_to_next;
            index += 1;
        } else {
            position += (next - position) * (speed * remaining / distance);
            break;
        }
    }

    position
}
