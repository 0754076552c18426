//! RAMPART headless runner.
//!
//! This crate wires the simulation engine to a frame-paced game loop thread
//! and a scripted player for unattended runs.

pub mod autoplay;
pub mod game_loop;
pub mod state;

pub use rampart_core as core;
