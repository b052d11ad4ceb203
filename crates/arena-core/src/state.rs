//! Arena state snapshot produced after every tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{ActorHandle, Pose, SimTime};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: EnginePhase,
    pub player: PlayerView,
    pub spawner: SpawnerView,
    pub enemies: Vec<EnemyView>,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pose: Pose,
    pub dash_state: DashState,
    pub velocity: DVec2,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnerView {
    pub spawned_count: u32,
    /// `None` until the first successful spawn.
    pub last_spawn_time: Option<f64>,
    /// `None` while the spawner still sits at its origin.
    pub anchor: Option<CompassAnchor>,
    pub anchor_position: DVec2,
    /// Delay computed from the most recent score.
    pub effective_delay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub actor: ActorHandle,
    pub template: String,
    pub pose: Pose,
    pub follow_target: Option<ActorHandle>,
    pub weapons: usize,
}
