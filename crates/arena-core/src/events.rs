//! Events emitted by the simulation during a tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::CompassAnchor;
use crate::types::ActorHandle;

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The player started a dash.
    DashStarted { at_secs: f64 },
    /// The active dash ran out.
    DashEnded { at_secs: f64 },
    /// A fully wired enemy entered the arena.
    EnemySpawned {
        actor: ActorHandle,
        position: DVec2,
        spawned_count: u32,
    },
    /// The spawner moved to a new compass anchor.
    AnchorRelocated { anchor: CompassAnchor },
}
