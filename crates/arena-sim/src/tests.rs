//! Tests for the arena engine, world factory and physics integration.

use glam::DVec2;
use hecs::World;

use arena_control::ActorFactory;
use arena_core::components::*;
use arena_core::config::{ArenaConfig, EnemyTemplate};
use arena_core::enums::*;
use arena_core::events::SimEvent;
use arena_core::types::Pose;

use crate::engine::{ArenaEngine, SimConfig, TickInput};
use crate::systems::physics::{self, RigidBodyMut};
use crate::world_setup::{entity_of, handle_of, spawn_player, WorldFactory};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn engine_with(arena: ArenaConfig) -> ArenaEngine {
    let mut engine = ArenaEngine::new(SimConfig {
        arena,
        ..Default::default()
    })
    .expect("config should be valid");
    engine.initialize();
    engine
}

fn count_weapons(world: &World) -> usize {
    world.query::<&Weapon>().iter().count()
}

// ---- Lifecycle ----

#[test]
fn test_initialize_spawns_player_and_container() {
    let engine = engine_with(ArenaConfig::default());
    assert_eq!(engine.phase(), EnginePhase::Running);

    let player = engine.player().unwrap();
    assert!(engine.world().get::<&Player>(player).is_ok());
    assert!(engine.world().get::<&RigidBody>(player).is_ok());
    let container = engine.projectile_container().unwrap();
    assert!(engine.world().get::<&ProjectileContainer>(container).is_ok());
    assert!(engine.movement().is_initialized());
    assert!(engine.spawner().is_initialized());
}

#[test]
fn test_tick_before_initialize_is_noop() {
    let mut engine = ArenaEngine::new(SimConfig::default()).unwrap();
    let snap = engine.tick(TickInput::default());
    assert_eq!(snap.phase, EnginePhase::Uninitialized);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.enemies.is_empty());
    assert!(snap.events.is_empty());
}

#[test]
fn test_new_rejects_invalid_config() {
    let mut arena = ArenaConfig::default();
    arena.spawner.base_spawn_delay = -1.0;
    let result = ArenaEngine::new(SimConfig {
        arena,
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_shutdown_clears_world_and_reinitializes() {
    let mut engine = engine_with(ArenaConfig::default());
    for _ in 0..300 {
        engine.tick(TickInput::default());
    }
    assert!(engine.spawner().spawned_count() > 0);

    engine.shutdown();
    assert_eq!(engine.phase(), EnginePhase::Shutdown);
    assert_eq!(engine.world().len(), 0);
    let snap = engine.tick(TickInput::default());
    assert!(snap.enemies.is_empty());

    engine.initialize();
    assert_eq!(engine.phase(), EnginePhase::Running);
    assert_eq!(engine.time().tick, 0);
    assert!(engine.player().is_some());
}

// ---- Spawning through the world factory ----

#[test]
fn test_first_tick_spawns_fully_wired_enemy() {
    let mut engine = engine_with(ArenaConfig::default());
    let snap = engine.tick(TickInput::default());

    assert_eq!(snap.enemies.len(), 1);
    let enemy = &snap.enemies[0];
    let player = handle_of(engine.player().unwrap());
    assert_eq!(enemy.follow_target, Some(player));
    assert_eq!(enemy.weapons, 1);

    let container = handle_of(engine.projectile_container().unwrap());
    for (_entity, weapon) in engine.world().query::<&Weapon>().iter() {
        assert_eq!(weapon.projectile_container, Some(container));
    }

    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::EnemySpawned { spawned_count: 1, .. })));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::AnchorRelocated { .. })));
    assert!(snap.spawner.anchor.is_some());
}

#[test]
fn test_engine_respects_max_spawn() {
    let mut arena = ArenaConfig::default();
    arena.spawner.max_spawn = 3;
    arena.spawner.spawn_unlimited = false;
    let mut engine = engine_with(arena);

    let mut snap = engine.tick(TickInput::default());
    for _ in 0..2000 {
        snap = engine.tick(TickInput::default());
    }
    assert_eq!(snap.enemies.len(), 3);
    assert_eq!(snap.spawner.spawned_count, 3);
}

#[test]
fn test_engine_without_template_spawns_nothing() {
    let mut arena = ArenaConfig::default();
    arena.spawner.enemy_template = None;
    let mut engine = engine_with(arena);
    for _ in 0..600 {
        engine.tick(TickInput::default());
    }
    assert_eq!(engine.spawner().spawned_count(), 0);
    assert_eq!(count_weapons(engine.world()), 0);
}

#[test]
fn test_high_score_spawns_faster() {
    let run = |score: f64| {
        let mut engine = engine_with(ArenaConfig::default());
        for _ in 0..600 {
            engine.tick(TickInput {
                score,
                ..Default::default()
            });
        }
        engine.spawner().spawned_count()
    };
    let calm = run(0.0);
    let frantic = run(1000.0);
    assert!(frantic > calm * 5, "calm {calm}, frantic {frantic}");
}

#[test]
fn test_world_factory_wires_every_weapon() {
    let mut world = World::new();
    let player = spawn_player(&mut world, Pose::default());
    let container = world.spawn((ProjectileContainer,));
    let template = EnemyTemplate {
        name: "gunship".into(),
        heading: 1.0,
        weapon_count: 3,
    };

    let mut factory = WorldFactory::new(&mut world);
    let enemy = factory
        .instantiate(&template, DVec2::new(4.0, -2.0))
        .unwrap();
    factory.set_follow_target(enemy, Some(player));
    factory.set_projectile_container(enemy, Some(container));

    let pose = *world.get::<&Pose>(enemy).unwrap();
    assert_eq!(pose.position, DVec2::new(4.0, -2.0));
    assert!(approx_eq(pose.heading, 1.0));
    assert_eq!(world.get::<&Enemy>(enemy).unwrap().template, "gunship");
    assert_eq!(
        world.get::<&FollowTarget>(enemy).unwrap().target,
        Some(handle_of(player))
    );
    assert_eq!(count_weapons(&world), 3);
    for (_entity, weapon) in world.query::<&Weapon>().iter() {
        assert_eq!(weapon.owner, handle_of(enemy));
        assert_eq!(weapon.projectile_container, Some(handle_of(container)));
    }
}

#[test]
fn test_handle_round_trip() {
    let mut world = World::new();
    let entity = world.spawn((Player,));
    assert_eq!(entity_of(handle_of(entity)), Some(entity));
}

// ---- Player movement through the engine ----

#[test]
fn test_horizontal_only_moves_player_along_x() {
    let mut arena = ArenaConfig::default();
    arena.movement.mode = MovementMode::HorizontalOnly;
    arena.movement.move_speed = 5.0;
    arena.spawner.enemy_template = None;
    let mut engine = engine_with(arena);

    let snap = engine.tick(TickInput {
        dt: 1.0,
        move_input: DVec2::new(0.7, 0.9),
        ..Default::default()
    });
    assert!(approx_eq(snap.player.pose.position.x, 3.5));
    assert!(approx_eq(snap.player.pose.position.y, 0.0));
}

#[test]
fn test_player_aims_at_look_target() {
    let mut engine = engine_with(ArenaConfig::default());
    let snap = engine.tick(TickInput {
        look_target: Some(DVec2::new(-3.0, 0.0)),
        ..Default::default()
    });
    let forward = snap.player.pose.forward();
    assert!(approx_eq(forward.x, -1.0));
    assert!(forward.y.abs() < 1e-9);
}

#[test]
fn test_dash_events_are_emitted() {
    let mut arena = ArenaConfig::default();
    arena.movement.dash_duration = 0.1;
    arena.movement.dash_cooldown = 0.5;
    let mut engine = engine_with(arena);

    let snap = engine.tick(TickInput {
        dash_triggered: true,
        ..Default::default()
    });
    assert_eq!(snap.player.dash_state, DashState::Active);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::DashStarted { .. })));

    let mut ended = false;
    for _ in 0..30 {
        let snap = engine.tick(TickInput::default());
        ended |= snap
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::DashEnded { .. }));
    }
    assert!(ended);
    assert_eq!(engine.movement().dash_state(), DashState::Idle);
}

#[test]
fn test_physics_driven_player_accelerates_forward() {
    let mut arena = ArenaConfig::default();
    arena.movement.mode = MovementMode::PhysicsDriven;
    arena.movement.aim_mode = AimMode::FaceHeading;
    arena.spawner.enemy_template = None;
    let mut engine = engine_with(arena);

    let mut snap = engine.tick(TickInput::default());
    for _ in 0..10 {
        snap = engine.tick(TickInput {
            dt: 0.1,
            move_input: DVec2::new(0.0, 1.0),
            ..Default::default()
        });
    }
    // 10 N on 1 kg for 1 s.
    assert!(approx_eq(snap.player.velocity.y, 10.0));
    assert!(snap.player.velocity.x.abs() < 1e-9);
    assert!(snap.player.pose.position.y > 0.0);

    let player = engine.player().unwrap();
    assert!(engine.world().get::<&RigidBody>(player).unwrap().freeze_rotation);
}

#[test]
fn test_paused_ticks_freeze_player_and_spawner() {
    let mut arena = ArenaConfig::default();
    arena.spawner.base_spawn_delay = 1.0;
    let mut engine = engine_with(arena);
    let step = TickInput {
        dt: 0.25,
        ..Default::default()
    };

    // Spawns at t=0; the next gate check that can open is t=1.25.
    let mut before = engine.tick(step);
    for _ in 0..4 {
        before = engine.tick(step);
    }
    assert!(approx_eq(before.time.elapsed_secs, 1.25));
    assert_eq!(before.spawner.spawned_count, 1);

    let paused = engine.tick(TickInput {
        time_scale: 0.0,
        move_input: DVec2::new(1.0, 1.0),
        look_target: Some(DVec2::new(0.0, -10.0)),
        dash_triggered: true,
        ..step
    });
    assert_eq!(paused.player.pose, before.player.pose);
    assert_eq!(paused.player.dash_state, DashState::Idle);
    assert!(paused.events.is_empty());
    assert!(approx_eq(paused.time.elapsed_secs, 1.25));
    assert_eq!(paused.spawner.spawned_count, 1);
    assert_eq!(paused.enemies.len(), 1);
    assert_eq!(paused.time.tick, before.time.tick + 1);

    let resumed = engine.tick(step);
    assert_eq!(resumed.spawner.spawned_count, 2);
}

// ---- Physics ----

#[test]
fn test_physics_integrates_force_then_clears_it() {
    let mut world = World::new();
    let entity = world.spawn((
        Pose::default(),
        RigidBody {
            mass: 2.0,
            ..Default::default()
        },
    ));
    {
        let mut body = world.get::<&mut RigidBody>(entity).unwrap();
        arena_control::PhysicsBody::add_force(&mut RigidBodyMut(&mut body), DVec2::new(4.0, 0.0));
    }
    physics::run(&mut world, 0.5);

    let body = *world.get::<&RigidBody>(entity).unwrap();
    assert!(approx_eq(body.velocity.x, 1.0));
    assert_eq!(body.pending_force, DVec2::ZERO);
    let pose = *world.get::<&Pose>(entity).unwrap();
    assert!(approx_eq(pose.position.x, 0.5));
}

#[test]
fn test_physics_respects_frozen_rotation() {
    let mut world = World::new();
    let spinning = world.spawn((
        Pose::default(),
        RigidBody {
            angular_velocity: 1.0,
            ..Default::default()
        },
    ));
    let frozen = world.spawn((
        Pose::default(),
        RigidBody {
            angular_velocity: 1.0,
            freeze_rotation: true,
            ..Default::default()
        },
    ));
    physics::run(&mut world, 1.0);

    assert!(approx_eq(world.get::<&Pose>(spinning).unwrap().heading, 1.0));
    assert!(approx_eq(world.get::<&Pose>(frozen).unwrap().heading, 0.0));
}

#[test]
fn test_physics_damping_slows_body() {
    let mut world = World::new();
    let entity = world.spawn((
        Pose::default(),
        RigidBody {
            velocity: DVec2::new(10.0, 0.0),
            linear_damping: 0.5,
            ..Default::default()
        },
    ));
    physics::run(&mut world, 1.0);
    let body = *world.get::<&RigidBody>(entity).unwrap();
    assert!(approx_eq(body.velocity.x, 5.0));
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut engine = engine_with(ArenaConfig::default());
    let snap = engine.tick(TickInput::default());
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("EnemySpawned"));
    assert!(json.len() < 10_000);
}
