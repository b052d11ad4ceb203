//! Fundamental geometric and simulation types.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Opaque, serializable reference to an actor owned by the world.
///
/// The simulation crate maps these to ECS entities; nothing in the
/// controllers looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorHandle(pub u64);

/// Position and orientation of an actor.
///
/// Heading is in radians, 0 = facing +Y ("up"), counter-clockwise positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec2,
    pub heading: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed, time-scaled simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Pose {
    pub fn new(position: DVec2, heading: f64) -> Self {
        Self { position, heading }
    }

    /// Unit vector the actor is facing.
    pub fn forward(&self) -> DVec2 {
        DVec2::new(-self.heading.sin(), self.heading.cos())
    }

    /// Heading that faces `point` from the current position, if the point
    /// is not on top of the actor.
    pub fn heading_towards(&self, point: DVec2) -> Option<f64> {
        heading_from_direction(point - self.position)
    }
}

/// Heading (radians, 0 = +Y) of a direction vector. `None` for a zero vector.
pub fn heading_from_direction(direction: DVec2) -> Option<f64> {
    if direction.length_squared() <= f64::EPSILON {
        return None;
    }
    Some((-direction.x).atan2(direction.y))
}

/// Wrap a heading into (-π, π], the range `heading_from_direction` returns.
pub fn wrap_heading(heading: f64) -> f64 {
    PI - (PI - heading).rem_euclid(TAU)
}

impl SimTime {
    /// Advance by one tick of `scaled_dt` seconds.
    pub fn advance(&mut self, scaled_dt: f64) {
        self.tick += 1;
        self.elapsed_secs += scaled_dt;
    }
}
