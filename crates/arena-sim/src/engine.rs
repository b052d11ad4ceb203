//! Host-facing arena engine.
//!
//! `ArenaEngine` owns the hecs ECS world, a seeded RNG and both
//! controllers, runs them in a fixed order each tick, and produces
//! `ArenaSnapshot`s. Completely headless, so identical seeds and inputs
//! replay identically.

use glam::DVec2;
use hecs::{Entity, World};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arena_control::{MovementController, MovementInput, PhysicsBody, SpawnController};
use arena_core::components::RigidBody;
use arena_core::config::ArenaConfig;
use arena_core::enums::EnginePhase;
use arena_core::error::ConfigError;
use arena_core::events::SimEvent;
use arena_core::state::ArenaSnapshot;
use arena_core::types::{Pose, SimTime};

use crate::systems;
use crate::systems::physics::RigidBodyMut;
use crate::world_setup::{self, handle_of, WorldFactory};

/// Configuration for starting a new session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub arena: ArenaConfig,
    /// Where the player starts.
    pub player_start: Pose,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: ArenaConfig::default(),
            player_start: Pose::default(),
        }
    }
}

/// Everything the host supplies for one tick.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Unscaled seconds since the previous tick.
    pub dt: f64,
    /// 1.0 = normal speed, ≤ 0 = paused.
    pub time_scale: f64,
    pub move_input: DVec2,
    pub dash_triggered: bool,
    pub look_target: Option<DVec2>,
    /// Current difficulty score (non-negative).
    pub score: f64,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            dt: arena_core::constants::DT,
            time_scale: 1.0,
            move_input: DVec2::ZERO,
            dash_triggered: false,
            look_target: None,
            score: 0.0,
        }
    }
}

pub struct ArenaEngine {
    world: World,
    time: SimTime,
    phase: EnginePhase,
    rng: ChaCha8Rng,
    player_start: Pose,
    movement: MovementController,
    spawner: SpawnController<Entity>,
    player: Option<Entity>,
    projectile_container: Option<Entity>,
    events: Vec<SimEvent>,
}

impl ArenaEngine {
    /// Validate the config and build an engine. Call
    /// [`initialize`](Self::initialize) before ticking.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.arena.validate()?;
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            phase: EnginePhase::Uninitialized,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player_start: config.player_start,
            movement: MovementController::new(config.arena.movement, config.player_start),
            spawner: SpawnController::new(config.arena.spawner),
            player: None,
            projectile_container: None,
            events: Vec::new(),
        })
    }

    /// Populate the world and start both controllers.
    pub fn initialize(&mut self) {
        if self.phase == EnginePhase::Running {
            return;
        }
        self.world.clear();
        self.time = SimTime::default();

        let player = world_setup::spawn_player(&mut self.world, self.player_start);
        let container = world_setup::spawn_projectile_container(&mut self.world);
        self.player = Some(player);
        self.projectile_container = Some(container);

        self.movement.set_pose(self.player_start);
        self.movement.initialize();
        self.spawner.set_target(Some(player));
        self.spawner.set_projectile_container(Some(container));
        self.spawner.initialize();

        self.phase = EnginePhase::Running;
        info!("arena initialized, player {:?}", handle_of(player));
    }

    /// Stop both controllers and tear the world down.
    pub fn shutdown(&mut self) {
        self.movement.shutdown();
        self.spawner.shutdown();
        self.world.clear();
        self.player = None;
        self.projectile_container = None;
        self.events.clear();
        self.phase = EnginePhase::Shutdown;
        info!("arena shut down after {} ticks", self.time.tick);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Outside the Running phase this only reports the current state. A
    /// paused tick (zero scaled step) runs no systems; only the tick
    /// counter moves.
    pub fn tick(&mut self, input: TickInput) -> ArenaSnapshot {
        if self.phase == EnginePhase::Running {
            let time_scale = input.time_scale.max(0.0);
            let scaled_dt = input.dt.max(0.0) * time_scale;

            if scaled_dt > 0.0 {
                self.run_systems(&input, scaled_dt, time_scale);
            }
            self.time.advance(scaled_dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.player,
            self.movement.dash_state(),
            self.spawner.view(),
            events,
        )
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn projectile_container(&self) -> Option<Entity> {
        self.projectile_container
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn spawner(&self) -> &SpawnController<Entity> {
        &self.spawner
    }

    /// Run all systems in order.
    fn run_systems(&mut self, input: &TickInput, scaled_dt: f64, time_scale: f64) {
        // 1. Player movement (may queue a force on the player's body)
        self.run_movement(input, scaled_dt, time_scale);
        // 2. Physics integration
        systems::physics::run(&mut self.world, scaled_dt);
        // 3. Enemy spawning
        self.run_spawner(input.score);
    }

    fn run_movement(&mut self, input: &TickInput, scaled_dt: f64, time_scale: f64) {
        let Some(player) = self.player else {
            return;
        };
        if let Ok(pose) = self.world.get::<&Pose>(player) {
            self.movement.set_pose(*pose);
        }

        let movement_input = MovementInput {
            dt: scaled_dt,
            time_scale,
            elapsed_secs: self.time.elapsed_secs,
            move_input: input.move_input,
            dash_triggered: input.dash_triggered,
            look_target: input.look_target,
        };

        let outcome = {
            let mut body = self.world.get::<&mut RigidBody>(player).ok();
            let mut physics = body.as_deref_mut().map(RigidBodyMut);
            let physics = physics.as_mut().map(|b| b as &mut dyn PhysicsBody);
            self.movement.tick(&movement_input, physics)
        };

        if let Ok(mut pose) = self.world.get::<&mut Pose>(player) {
            *pose = outcome.pose;
        }
        if outcome.dash_ended {
            self.events.push(SimEvent::DashEnded {
                at_secs: self.time.elapsed_secs,
            });
        }
        if outcome.dash_started {
            self.events.push(SimEvent::DashStarted {
                at_secs: self.time.elapsed_secs,
            });
        }
    }

    fn run_spawner(&mut self, score: f64) {
        let mut factory = WorldFactory::new(&mut self.world);
        let Some(spawn) =
            self.spawner
                .tick(self.time.elapsed_secs, score, &mut factory, &mut self.rng)
        else {
            return;
        };

        self.events.push(SimEvent::EnemySpawned {
            actor: handle_of(spawn.actor),
            position: spawn.position,
            spawned_count: spawn.spawned_count,
        });
        if let Some(anchor) = spawn.relocated_to {
            self.events.push(SimEvent::AnchorRelocated { anchor });
        }
    }
}
