//! ECS components for actors in the arena.
//!
//! Components are plain data structs. Game logic lives in the controllers
//! and systems, not here. `Pose` from `types` doubles as the transform
//! component.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BODY_MASS, DEFAULT_LINEAR_DAMPING};
use crate::types::ActorHandle;

/// Marks the player-controlled actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks the actor that holds fired projectiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileContainer;

/// A hostile actor created by the spawner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Name of the template it was instantiated from.
    pub template: String,
}

/// The actor an enemy chases.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FollowTarget {
    pub target: Option<ActorHandle>,
}

/// A weapon sub-component of an enemy. Lives on its own entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    /// Enemy that carries this weapon.
    pub owner: ActorHandle,
    /// Where fired projectiles are parented.
    pub projectile_container: Option<ActorHandle>,
}

/// Kinematic body integrated by the physics system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RigidBody {
    pub velocity: DVec2,
    /// Radians per second, counter-clockwise positive.
    pub angular_velocity: f64,
    pub mass: f64,
    /// Fraction of velocity shed per second.
    pub linear_damping: f64,
    /// Force accumulated this tick; cleared after integration.
    pub pending_force: DVec2,
    /// When set, the physics system leaves the heading alone.
    pub freeze_rotation: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            velocity: DVec2::ZERO,
            angular_velocity: 0.0,
            mass: DEFAULT_BODY_MASS,
            linear_damping: DEFAULT_LINEAR_DAMPING,
            pending_force: DVec2::ZERO,
            freeze_rotation: false,
        }
    }
}
