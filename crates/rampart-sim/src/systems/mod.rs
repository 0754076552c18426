//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. Entity state lives in components; wave progress and
//! the economy live on the engine and are passed in.

pub mod cleanup;
pub mod collision;
pub mod fire_control;
pub mod movement;
pub mod snapshot;
pub mod wave_spawner;
