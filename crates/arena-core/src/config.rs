//! Tunable configuration for the controllers, loadable from JSON.
//!
//! Every struct uses `#[serde(default)]`, so a config file only needs the
//! fields it changes. Call [`ArenaConfig::validate`] (the `from_json_*`
//! constructors do it for you) before handing a config to a controller.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{AimMode, MovementMode};
use crate::error::ConfigError;

/// Top-level configuration for one arena session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub movement: MovementConfig,
    pub spawner: SpawnerConfig,
}

/// Player movement tuning. Times are in elapsed-time seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub mode: MovementMode,
    pub aim_mode: AimMode,
    pub move_speed: f64,
    pub dash_speed: f64,
    pub dash_duration: f64,
    pub dash_cooldown: f64,
    /// Radians per second at full horizontal input (PhysicsDriven only).
    pub rotation_speed: f64,
    /// Scale input longer than 1 down to unit length. Off by default so
    /// analog input passes through raw.
    pub clamp_input: bool,
    pub bindings: InputBindings,
}

/// Names of the physical controls bound to each logical action.
///
/// The controller never reads devices; it only checks at initialization
/// that something is bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBindings {
    pub move_action: Vec<String>,
    pub dash_action: Vec<String>,
    pub look_action: Vec<String>,
}

/// Enemy spawner tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub spawn_range_x: f64,
    pub spawn_range_y: f64,
    pub max_spawn: u32,
    /// Ignore `max_spawn` when set.
    pub spawn_unlimited: bool,
    pub base_spawn_delay: f64,
    /// Used only when the scaled delay collapses to zero.
    pub min_spawn_delay: f64,
    pub difficulty_threshold: f64,
    pub anchor_radius: f64,
    /// Spawner position before its first relocation.
    pub origin: DVec2,
    /// What to spawn. Spawning is skipped while unset.
    pub enemy_template: Option<EnemyTemplate>,
}

/// Blueprint for one enemy actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTemplate {
    pub name: String,
    /// Initial heading of a fresh instance.
    pub heading: f64,
    /// Number of weapon sub-components created with each instance.
    pub weapon_count: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            mode: MovementMode::default(),
            aim_mode: AimMode::default(),
            move_speed: DEFAULT_MOVE_SPEED,
            dash_speed: DEFAULT_DASH_SPEED,
            dash_duration: DEFAULT_DASH_DURATION,
            dash_cooldown: DEFAULT_DASH_COOLDOWN,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            clamp_input: false,
            bindings: InputBindings::default(),
        }
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            move_action: vec!["<Keyboard>/wasd".into(), "<Gamepad>/leftStick".into()],
            dash_action: vec!["<Keyboard>/space".into(), "<Gamepad>/buttonSouth".into()],
            look_action: vec!["<Mouse>/position".into()],
        }
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            spawn_range_x: DEFAULT_SPAWN_RANGE,
            spawn_range_y: DEFAULT_SPAWN_RANGE,
            max_spawn: DEFAULT_MAX_SPAWN,
            spawn_unlimited: true,
            base_spawn_delay: DEFAULT_BASE_SPAWN_DELAY,
            min_spawn_delay: DEFAULT_MIN_SPAWN_DELAY,
            difficulty_threshold: DEFAULT_DIFFICULTY_THRESHOLD,
            anchor_radius: DEFAULT_ANCHOR_RADIUS,
            origin: DVec2::ZERO,
            enemy_template: Some(EnemyTemplate::default()),
        }
    }
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self {
            name: "enemy".into(),
            heading: 0.0,
            weapon_count: 1,
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config from raw bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;
        self.spawner.validate()
    }
}

impl MovementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("move_speed", self.move_speed)?;
        non_negative("dash_speed", self.dash_speed)?;
        non_negative("dash_duration", self.dash_duration)?;
        non_negative("dash_cooldown", self.dash_cooldown)?;
        finite("rotation_speed", self.rotation_speed)
    }
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("spawn_range_x", self.spawn_range_x)?;
        non_negative("spawn_range_y", self.spawn_range_y)?;
        positive("base_spawn_delay", self.base_spawn_delay)?;
        positive("min_spawn_delay", self.min_spawn_delay)?;
        positive("difficulty_threshold", self.difficulty_threshold)?;
        non_negative("anchor_radius", self.anchor_radius)?;
        finite("origin.x", self.origin.x)?;
        finite("origin.y", self.origin.y)?;
        if self.min_spawn_delay > self.base_spawn_delay {
            return Err(ConfigError::MinDelayExceedsBase {
                min: self.min_spawn_delay,
                base: self.base_spawn_delay,
            });
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}
