//! Intercept point calculation for predictive towers.
//!
//! Samples candidate flight times over a fixed horizon, predicts where the
//! enemy will be at each, and keeps the sample whose projectile travel time
//! agrees best with it. When no sample agrees closely enough the solver falls
//! back to a straight-line lead along the current segment.

use serde::{Deserialize, Serialize};

use rampart_core::components::Enemy;
use rampart_core::constants::*;
use rampart_core::types::{Position, Velocity};

use crate::path::Path;
use crate::prediction::predict_position;

/// How an intercept point was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterceptMethod {
    /// Target is not moving; aim at its current position.
    Stationary,
    /// Best sample over the prediction horizon.
    Sampled,
    /// Straight-line lead along the current velocity.
    LinearLead,
}

/// Full solver output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterceptSolution {
    pub point: Position,
    /// Predicted flight time in seconds.
    pub time: f64,
    /// Mismatch between projectile travel time and `time` (seconds).
    pub error: f64,
    pub method: InterceptMethod,
}

impl InterceptSolution {
    fn stationary(point: Position) -> Self {
        Self {
            point,
            time: 0.0,
            error: 0.0,
            method: InterceptMethod::Stationary,
        }
    }
}

/// Instantaneous velocity of an enemy: toward its next waypoint at its speed.
/// Zero when dead or out of waypoints.
pub fn enemy_velocity(enemy: &Enemy, path: &Path) -> Velocity {
    if !enemy.alive {
        return Velocity::ZERO;
    }
    match path.waypoint(enemy.path_index + 1) {
        Some(next) => (next - enemy.position).normalize_or_zero() * enemy.speed,
        None => Velocity::ZERO,
    }
}

/// Solve for the point where a projectile fired from `shooter` meets `enemy`.
pub fn solve_intercept(
    shooter: Position,
    enemy: &Enemy,
    path: &Path,
    projectile_speed: f64,
    speed_multiplier: f64,
) -> InterceptSolution {
    let velocity = enemy_velocity(enemy, path);
    let effective_speed = projectile_speed * speed_multiplier;
    if velocity == Velocity::ZERO || !(effective_speed > 0.0) {
        return InterceptSolution::stationary(enemy.position);
    }

    let mut best = InterceptSolution {
        point: enemy.position,
        time: 0.0,
        error: f64::INFINITY,
        method: InterceptMethod::Sampled,
    };
    for k in 0..INTERCEPT_SAMPLE_COUNT {
        let time = k as f64 * INTERCEPT_SAMPLE_STEP_SECS;
        let point = predict_position(enemy, path, time, speed_multiplier);
        let travel = shooter.distance(point) / effective_speed;
        let error = (travel - time).abs();
        if error < best.error {
            best = InterceptSolution {
                point,
                time,
                error,
                method: InterceptMethod::Sampled,
            };
        }
    }

    if best.error <= INTERCEPT_ERROR_TOLERANCE_SECS && best.point.is_finite() {
        return best;
    }

    let travel = shooter.distance(enemy.position) / effective_speed;
    let point = enemy.position + velocity * speed_multiplier * travel;
    if !point.is_finite() {
        return InterceptSolution::stationary(enemy.position);
    }
    InterceptSolution {
        point,
        time: travel,
        error: (shooter.distance(point) / effective_speed - travel).abs(),
        method: InterceptMethod::LinearLead,
    }
}

/// Aim point for a projectile fired from `shooter` at `enemy`. Always finite.
pub fn intercept_point(
    shooter: Position,
    enemy: &Enemy,
    path: &Path,
    projectile_speed: f64,
    speed_multiplier: f64,
) -> Position {
    solve_intercept(shooter, enemy, path, projectile_speed, speed_multiplier).point
}
