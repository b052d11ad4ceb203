//! Player and spawner controllers for the arena.
//!
//! Both controllers are plain state machines driven once per tick by an
//! external scheduler. Neither depends on an ECS: the world is reached
//! only through the [`movement::PhysicsBody`] and [`spawner::ActorFactory`]
//! traits, and time and randomness are passed in explicitly.

pub mod movement;
pub mod spawner;

pub use arena_core as core;
pub use movement::{MovementController, MovementInput, MovementOutcome, PhysicsBody};
pub use spawner::{ActorFactory, SpawnController, SpawnEvent};
