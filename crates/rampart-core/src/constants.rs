//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per fixed simulation step.
pub const FIXED_DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest real frame delta accepted by the frame clock (seconds).
/// Longer stalls are truncated so the accumulator cannot spiral.
pub const MAX_FRAME_DELTA: f64 = 0.25;

// --- Grid ---

/// Side length of a grid cell in world units.
pub const CELL_SIZE: f64 = 32.0;

/// Default grid width in cells.
pub const DEFAULT_GRID_COLUMNS: u32 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_ROWS: u32 = 15;

// --- Intercept solver ---

/// Longest intercept time the sampled search considers (seconds).
pub const INTERCEPT_HORIZON_SECS: f64 = 3.0;

/// Spacing between sampled intercept times (seconds).
pub const INTERCEPT_SAMPLE_STEP_SECS: f64 = 0.05;

/// Number of sampled intercept times, including both ends of the horizon.
pub const INTERCEPT_SAMPLE_COUNT: usize = 61;

/// Residual error above which the sampled solution is rejected (seconds).
pub const INTERCEPT_ERROR_TOLERANCE_SECS: f64 = 0.3;

// --- Projectiles ---

/// Default projectile speed (world units per second).
pub const PROJECTILE_SPEED: f64 = 200.0;

/// Default collision radius between a projectile and an enemy.
pub const HIT_RADIUS: f64 = 12.0;

// --- Economy ---

/// Gold available when a game starts.
pub const STARTING_GOLD: u32 = 250;

/// Base health when a game starts.
pub const STARTING_HEALTH: u32 = 20;

/// Health lost for every enemy that reaches the end of the path.
pub const LEAK_DAMAGE: u32 = 1;
