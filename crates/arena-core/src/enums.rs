//! Enumeration types used throughout the simulation.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Which input axes a movement controller honors, and how motion is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    /// Left/right only; vertical input is discarded.
    HorizontalOnly,
    /// Up/down only; horizontal input is discarded.
    VerticalOnly,
    /// Both axes move the actor directly.
    #[default]
    FreeRoam,
    /// Vertical input thrusts along the heading, horizontal input turns.
    /// Integration is left to the physics collaborator.
    PhysicsDriven,
}

/// Where the look direction comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimMode {
    /// Snap the heading toward an external pointer/target each tick.
    #[default]
    TrackPointer,
    /// Keep the current heading; aiming never rotates the actor.
    FaceHeading,
}

/// Dash ability state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashState {
    #[default]
    Idle,
    Active,
}

/// One of the four fixed spawn anchors around the world origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassAnchor {
    North,
    East,
    West,
    South,
}

impl CompassAnchor {
    pub const ALL: [CompassAnchor; 4] = [
        CompassAnchor::North,
        CompassAnchor::East,
        CompassAnchor::West,
        CompassAnchor::South,
    ];

    /// Map a draw in `0..4` to an anchor. Anything else is `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Offset of this anchor from the world origin at the given radius.
    pub fn offset(self, radius: f64) -> DVec2 {
        match self {
            CompassAnchor::North => DVec2::new(0.0, radius),
            CompassAnchor::East => DVec2::new(radius, 0.0),
            CompassAnchor::West => DVec2::new(-radius, 0.0),
            CompassAnchor::South => DVec2::new(0.0, -radius),
        }
    }
}

/// Engine lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    #[default]
    Uninitialized,
    Running,
    Shutdown,
}
