//! Simulation constants and tuning defaults.

use std::f64::consts::PI;

/// Nominal scheduler tick rate (Hz) used by the harness.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Movement ---

/// Normal movement speed (world units per second).
pub const DEFAULT_MOVE_SPEED: f64 = 10.0;

/// Movement speed while a dash is active.
pub const DEFAULT_DASH_SPEED: f64 = 20.0;

/// Length of a dash in seconds (20 frames at 60 Hz).
pub const DEFAULT_DASH_DURATION: f64 = 20.0 / 60.0;

/// Minimum time between dash starts in seconds (30 frames at 60 Hz).
pub const DEFAULT_DASH_COOLDOWN: f64 = 30.0 / 60.0;

/// Turn rate in PhysicsDriven mode (radians per second, 60°/s).
pub const DEFAULT_ROTATION_SPEED: f64 = PI / 3.0;

// --- Spawning ---

/// Half-width of the spawn box around the anchor, per axis.
pub const DEFAULT_SPAWN_RANGE: f64 = 10.0;

/// Spawn cap when unlimited spawning is off.
pub const DEFAULT_MAX_SPAWN: u32 = 20;

/// Baseline seconds between spawns at or below the difficulty threshold.
pub const DEFAULT_BASE_SPAWN_DELAY: f64 = 2.5;

/// Floor on the effective delay so it stays strictly positive.
pub const DEFAULT_MIN_SPAWN_DELAY: f64 = 0.05;

/// Score at which the effective delay starts shrinking below the baseline.
pub const DEFAULT_DIFFICULTY_THRESHOLD: f64 = 100.0;

/// Distance of each compass anchor from the world origin.
pub const DEFAULT_ANCHOR_RADIUS: f64 = 15.0;

// --- Physics ---

/// Mass of a rigid body when none is configured.
pub const DEFAULT_BODY_MASS: f64 = 1.0;

/// Linear damping (per second) of a default rigid body.
pub const DEFAULT_LINEAR_DAMPING: f64 = 0.0;
