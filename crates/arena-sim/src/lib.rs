//! Simulation engine for the arena.
//!
//! Owns the hecs ECS world, drives the movement and spawn controllers once
//! per tick, and produces `ArenaSnapshot`s for the host.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use engine::{ArenaEngine, SimConfig, TickInput};

#[cfg(test)]
mod tests;
