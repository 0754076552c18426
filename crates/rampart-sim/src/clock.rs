//! Fixed-timestep frame clock.
//!
//! Converts real frame deltas into a whole number of fixed simulation steps.
//! The speed multiplier changes how many steps run per drained timestep, never
//! the step size, so every playback speed walks the same sequence of states.

use rampart_core::constants::{FIXED_DT, MAX_FRAME_DELTA};
use rampart_core::enums::SpeedMultiplier;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    /// Real seconds not yet converted into steps.
    pub accumulator: f64,
    pub multiplier: SpeedMultiplier,
    pub paused: bool,
}

impl FrameClock {
    /// Feed one frame's real delta. Returns the number of fixed steps to run.
    pub fn advance(&mut self, real_dt: f64) -> u32 {
        if self.paused {
            return 0;
        }
        let clamped = if real_dt.is_finite() {
            real_dt.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        };
        self.accumulator += clamped;

        let mut drained = 0;
        while self.accumulator >= FIXED_DT {
            self.accumulator -= FIXED_DT;
            drained += 1;
        }
        drained * self.multiplier.steps()
    }
}
