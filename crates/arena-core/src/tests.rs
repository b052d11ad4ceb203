//! Tests for core types, anchors and configuration loading.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;

use crate::config::{ArenaConfig, SpawnerConfig};
use crate::enums::*;
use crate::error::ConfigError;
use crate::events::SimEvent;
use crate::types::{heading_from_direction, wrap_heading, ActorHandle, Pose, SimTime};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// ---- Pose / heading ----

#[test]
fn test_heading_zero_faces_up() {
    let pose = Pose::new(DVec2::ZERO, 0.0);
    let forward = pose.forward();
    assert!(approx_eq(forward.x, 0.0));
    assert!(approx_eq(forward.y, 1.0));
}

#[test]
fn test_heading_from_direction_cardinals() {
    assert!(approx_eq(heading_from_direction(DVec2::Y).unwrap(), 0.0));
    assert!(approx_eq(heading_from_direction(-DVec2::X).unwrap(), FRAC_PI_2));
    assert!(approx_eq(heading_from_direction(DVec2::X).unwrap(), -FRAC_PI_2));
    assert!(approx_eq(heading_from_direction(-DVec2::Y).unwrap().abs(), PI));
}

#[test]
fn test_heading_from_zero_direction_is_none() {
    assert!(heading_from_direction(DVec2::ZERO).is_none());
}

#[test]
fn test_wrap_heading_stays_in_half_open_range() {
    assert!(approx_eq(wrap_heading(0.0), 0.0));
    assert!(approx_eq(wrap_heading(PI), PI));
    assert!(approx_eq(wrap_heading(-PI), PI));
    assert!(approx_eq(wrap_heading(-FRAC_PI_2), -FRAC_PI_2));
    assert!(approx_eq(wrap_heading(3.0 * FRAC_PI_2), -FRAC_PI_2));
    assert!(approx_eq(wrap_heading(-5.0 * TAU + 1.0), 1.0));
    for i in -50..50 {
        let h = wrap_heading(i as f64 * 0.9);
        assert!(h > -PI && h <= PI, "{h}");
    }
}

#[test]
fn test_forward_matches_heading_towards() {
    let pose = Pose::new(DVec2::new(3.0, -2.0), 1.0);
    let target = DVec2::new(-4.0, 7.0);
    let heading = pose.heading_towards(target).unwrap();
    let facing = Pose::new(pose.position, heading).forward();
    let expected = (target - pose.position).normalize();
    assert!(approx_eq(facing.x, expected.x));
    assert!(approx_eq(facing.y, expected.y));
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    time.advance(0.5);
    time.advance(0.25);
    assert_eq!(time.tick, 2);
    assert!(approx_eq(time.elapsed_secs, 0.75));
}

// ---- Compass anchors ----

#[test]
fn test_compass_anchor_index_bounds() {
    for (i, anchor) in CompassAnchor::ALL.iter().enumerate() {
        assert_eq!(CompassAnchor::from_index(i), Some(*anchor));
    }
    assert_eq!(CompassAnchor::from_index(4), None);
}

#[test]
fn test_compass_anchor_offsets_lie_on_radius() {
    for anchor in CompassAnchor::ALL {
        let offset = anchor.offset(15.0);
        assert!(approx_eq(offset.length(), 15.0), "{anchor:?} off radius");
    }
    assert_eq!(CompassAnchor::North.offset(15.0), DVec2::new(0.0, 15.0));
    assert_eq!(CompassAnchor::West.offset(15.0), DVec2::new(-15.0, 0.0));
}

// ---- Configuration ----

#[test]
fn test_default_config_is_valid() {
    ArenaConfig::default().validate().unwrap();
}

#[test]
fn test_partial_json_fills_defaults() {
    let json = r#"{
        "movement": { "mode": "HorizontalOnly", "move_speed": 5.0 },
        "spawner": { "max_spawn": 3, "spawn_unlimited": false }
    }"#;
    let config = ArenaConfig::from_json_str(json).unwrap();
    assert_eq!(config.movement.mode, MovementMode::HorizontalOnly);
    assert_eq!(config.movement.aim_mode, AimMode::TrackPointer);
    assert!(approx_eq(config.movement.move_speed, 5.0));
    assert_eq!(config.spawner.max_spawn, 3);
    assert!(!config.spawner.spawn_unlimited);
    assert!(approx_eq(
        config.spawner.base_spawn_delay,
        SpawnerConfig::default().base_spawn_delay
    ));
}

#[test]
fn test_null_template_parses_as_unset() {
    let json = r#"{ "spawner": { "enemy_template": null } }"#;
    let config = ArenaConfig::from_json_slice(json.as_bytes()).unwrap();
    assert!(config.spawner.enemy_template.is_none());
}

#[test]
fn test_malformed_json_is_rejected() {
    let err = ArenaConfig::from_json_str("{ movement: }").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_negative_spawn_range_is_rejected() {
    let json = r#"{ "spawner": { "spawn_range_x": -1.0 } }"#;
    let err = ArenaConfig::from_json_str(json).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Negative {
            field: "spawn_range_x",
            ..
        }
    ));
}

#[test]
fn test_zero_threshold_is_rejected() {
    let mut config = ArenaConfig::default();
    config.spawner.difficulty_threshold = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotPositive {
            field: "difficulty_threshold",
            ..
        })
    ));
}

#[test]
fn test_min_delay_above_base_is_rejected() {
    let mut config = ArenaConfig::default();
    config.spawner.min_spawn_delay = 3.0;
    config.spawner.base_spawn_delay = 2.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MinDelayExceedsBase { .. })
    ));
}

#[test]
fn test_non_finite_speed_is_rejected() {
    let mut config = ArenaConfig::default();
    config.movement.dash_speed = f64::NAN;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("dash_speed"));
}

// ---- Events ----

#[test]
fn test_sim_event_is_tagged() {
    let event = SimEvent::EnemySpawned {
        actor: ActorHandle(7),
        position: DVec2::new(1.0, 2.0),
        spawned_count: 1,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "EnemySpawned");
    assert_eq!(json["spawned_count"], 1);
}
