//! Snapshot builder: reads the world and controller state into an
//! `ArenaSnapshot`.

use std::collections::HashMap;

use hecs::{Entity, World};

use arena_core::components::{Enemy, FollowTarget, RigidBody, Weapon};
use arena_core::enums::{DashState, EnginePhase};
use arena_core::events::SimEvent;
use arena_core::state::{ArenaSnapshot, EnemyView, PlayerView, SpawnerView};
use arena_core::types::{ActorHandle, Pose, SimTime};

use crate::world_setup::handle_of;

/// Build the snapshot for the tick that just ran.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: EnginePhase,
    player: Option<Entity>,
    dash_state: DashState,
    spawner: SpawnerView,
    events: Vec<SimEvent>,
) -> ArenaSnapshot {
    ArenaSnapshot {
        time: *time,
        phase,
        player: build_player_view(world, player, dash_state),
        spawner,
        enemies: build_enemy_views(world),
        events,
    }
}

fn build_player_view(world: &World, player: Option<Entity>, dash_state: DashState) -> PlayerView {
    let mut view = PlayerView {
        dash_state,
        ..Default::default()
    };
    let Some(player) = player else {
        return view;
    };
    if let Ok(pose) = world.get::<&Pose>(player) {
        view.pose = *pose;
    }
    if let Ok(body) = world.get::<&RigidBody>(player) {
        view.velocity = body.velocity;
    }
    view
}

fn build_enemy_views(world: &World) -> Vec<EnemyView> {
    let mut weapons: HashMap<ActorHandle, usize> = HashMap::new();
    for (_entity, weapon) in world.query::<&Weapon>().iter() {
        *weapons.entry(weapon.owner).or_default() += 1;
    }

    let mut views: Vec<EnemyView> = world
        .query::<(&Enemy, &Pose, &FollowTarget)>()
        .iter()
        .map(|(entity, (enemy, pose, follow))| {
            let actor = handle_of(entity);
            EnemyView {
                actor,
                template: enemy.template.clone(),
                pose: *pose,
                follow_target: follow.target,
                weapons: weapons.get(&actor).copied().unwrap_or(0),
            }
        })
        .collect();
    views.sort_by_key(|v| v.actor.0);
    views
}
