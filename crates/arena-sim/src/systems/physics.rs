//! Rigid body integration.
//!
//! Applies accumulated forces to velocity, damps it, then moves the pose:
//! `v += F / m * dt`, `v *= 1 - damping * dt`, `p += v * dt`. Heading only
//! integrates angular velocity while rotation is not frozen.

use glam::DVec2;
use hecs::World;

use arena_core::components::RigidBody;
use arena_core::types::Pose;
use arena_control::PhysicsBody;

/// Mutable view of a `RigidBody` handed to the movement controller.
pub struct RigidBodyMut<'a>(pub &'a mut RigidBody);

impl PhysicsBody for RigidBodyMut<'_> {
    fn add_force(&mut self, force: DVec2) {
        self.0.pending_force += force;
    }

    fn set_rotation_frozen(&mut self, frozen: bool) {
        self.0.freeze_rotation = frozen;
        if frozen {
            self.0.angular_velocity = 0.0;
        }
    }
}

/// Integrate every entity with Pose + RigidBody over `dt` seconds.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pose, body)) in world.query_mut::<(&mut Pose, &mut RigidBody)>() {
        integrate(pose, body, dt);
    }
}

fn integrate(pose: &mut Pose, body: &mut RigidBody, dt: f64) {
    if body.mass > 0.0 {
        body.velocity += body.pending_force / body.mass * dt;
    }
    body.velocity *= (1.0 - body.linear_damping * dt).max(0.0);
    pose.position += body.velocity * dt;
    if !body.freeze_rotation {
        pose.heading += body.angular_velocity * dt;
    }
    body.pending_force = DVec2::ZERO;
}
