//! Entity spawn factories for setting up the arena world.
//!
//! Creates the player, the projectile container, and enemies with their
//! weapon sub-components. `WorldFactory` is the hecs-backed
//! [`ActorFactory`] the spawn controller talks to.

use glam::DVec2;
use hecs::{Entity, World};

use arena_control::ActorFactory;
use arena_core::components::*;
use arena_core::config::EnemyTemplate;
use arena_core::types::{ActorHandle, Pose};

/// Stable handle for an entity, suitable for components and snapshots.
pub fn handle_of(entity: Entity) -> ActorHandle {
    ActorHandle(entity.to_bits().get())
}

/// Resolve a handle back to an entity. `None` for a malformed handle.
pub fn entity_of(handle: ActorHandle) -> Option<Entity> {
    Entity::from_bits(handle.0)
}

/// Spawn the player actor with a rigid body at `pose`.
pub fn spawn_player(world: &mut World, pose: Pose) -> Entity {
    world.spawn((Player, pose, RigidBody::default()))
}

/// Spawn the actor fired projectiles are parented under.
pub fn spawn_projectile_container(world: &mut World) -> Entity {
    world.spawn((ProjectileContainer, Pose::default()))
}

/// Spawn one enemy and its weapons, unwired.
pub fn spawn_enemy(world: &mut World, template: &EnemyTemplate, position: DVec2) -> Entity {
    let enemy = world.spawn((
        Enemy {
            template: template.name.clone(),
        },
        Pose::new(position, template.heading),
        FollowTarget::default(),
    ));
    let owner = handle_of(enemy);
    for _ in 0..template.weapon_count {
        world.spawn((Weapon {
            owner,
            projectile_container: None,
        },));
    }
    enemy
}

/// [`ActorFactory`] over a hecs world.
pub struct WorldFactory<'w> {
    world: &'w mut World,
}

impl<'w> WorldFactory<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }
}

impl ActorFactory for WorldFactory<'_> {
    type Handle = Entity;

    fn instantiate(&mut self, template: &EnemyTemplate, position: DVec2) -> Option<Entity> {
        Some(spawn_enemy(self.world, template, position))
    }

    fn set_follow_target(&mut self, enemy: Entity, target: Option<Entity>) {
        if let Ok(mut follow) = self.world.get::<&mut FollowTarget>(enemy) {
            follow.target = target.map(handle_of);
        }
    }

    fn set_projectile_container(&mut self, enemy: Entity, container: Option<Entity>) {
        let owner = handle_of(enemy);
        let container = container.map(handle_of);
        for (_entity, weapon) in self.world.query_mut::<&mut Weapon>() {
            if weapon.owner == owner {
                weapon.projectile_container = container;
            }
        }
    }
}
