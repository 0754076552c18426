//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{CELL_SIZE, FIXED_DT};

/// 2D position in world space (pixels, y grows downward).
pub type Position = DVec2;

/// 2D velocity in world units per second.
pub type Velocity = DVec2;

/// Location of a single grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub gx: u32,
    pub gy: u32,
}

impl GridCell {
    pub const fn new(gx: u32, gy: u32) -> Self {
        Self { gx, gy }
    }
}

/// Simulation time tracking.
///
/// Only executed fixed steps move this clock. Cooldowns and spawn timers must
/// read it instead of any wall-clock source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of fixed steps executed so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per fixed step.
    pub fn dt(&self) -> f64 {
        FIXED_DT
    }

    /// Advance by one fixed step.
    ///
    /// Elapsed time is derived from the tick count so that it does not drift
    /// from repeated float addition.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * FIXED_DT;
    }
}

/// World-space center of a grid cell.
pub fn grid_to_world(cell: GridCell) -> Position {
    DVec2::new(
        cell.gx as f64 * CELL_SIZE + CELL_SIZE / 2.0,
        cell.gy as f64 * CELL_SIZE + CELL_SIZE / 2.0,
    )
}

/// Grid cell containing a world-space point.
///
/// Returns `None` for points left of or above the grid origin.
pub fn world_to_grid(position: Position) -> Option<GridCell> {
    let gx = (position.x / CELL_SIZE).floor();
    let gy = (position.y / CELL_SIZE).floor();
    if !gx.is_finite() || !gy.is_finite() || gx < 0.0 || gy < 0.0 {
        return None;
    }
    if gx > u32::MAX as f64 || gy > u32::MAX as f64 {
        return None;
    }
    Some(GridCell::new(gx as u32, gy as u32))
}
