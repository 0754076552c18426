//! Simulation engine for RAMPART.
//!
//! Pure algorithms (path following, prediction, intercept solving, targeting,
//! wave scheduling, collision) live at the crate root. The engine owns the
//! hecs ECS world, runs systems at a fixed tick rate, and produces
//! GameStateSnapshots for the presentation layer.

pub mod clock;
pub mod collision;
pub mod economy;
pub mod engine;
pub mod intercept;
pub mod kinematics;
pub mod path;
pub mod prediction;
pub mod scheduler;
pub mod systems;
pub mod targeting;
pub mod world_setup;

pub use rampart_core as core;
pub use engine::SimulationEngine;
pub use intercept::{intercept_point, solve_intercept};
pub use kinematics::{advance_enemy, advance_projectile};
pub use prediction::predict_position;
pub use scheduler::scheduler_tick;
pub use targeting::tower_tick;

#[cfg(test)]
mod tests;
