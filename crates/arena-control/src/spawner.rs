//! Enemy spawn controller.
//!
//! Spawns one enemy at a time around a moving anchor. The gap between
//! spawns shrinks as the external score rises past the difficulty
//! threshold, and after every successful spawn the anchor jumps to one of
//! four compass points around the world origin.

use glam::DVec2;
use log::{debug, info, warn};
use rand::Rng;

use arena_core::config::{EnemyTemplate, SpawnerConfig};
use arena_core::enums::CompassAnchor;
use arena_core::state::SpawnerView;

/// World-side collaborator that creates and wires enemy actors.
pub trait ActorFactory {
    type Handle: Copy;

    /// Create an enemy (and its weapon sub-components) at `position`.
    /// `None` means instantiation failed and nothing was created.
    fn instantiate(&mut self, template: &EnemyTemplate, position: DVec2) -> Option<Self::Handle>;

    /// Point the enemy's chase behavior at `target`.
    fn set_follow_target(&mut self, enemy: Self::Handle, target: Option<Self::Handle>);

    /// Point every weapon on the enemy at `container`.
    fn set_projectile_container(&mut self, enemy: Self::Handle, container: Option<Self::Handle>);
}

/// A completed, fully wired spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnEvent<H> {
    pub actor: H,
    pub position: DVec2,
    pub spawned_count: u32,
    /// Anchor the spawner moved to afterwards.
    pub relocated_to: Option<CompassAnchor>,
}

/// Difficulty-adjusted delay between spawns.
///
/// `base / (score / threshold)`, never above `base`. A zero, negative or
/// NaN score, or a NaN or infinite result, falls back to `base`. `min` only
/// replaces a result that collapses to zero (an infinite or overflowing
/// score), so the delay always stays in (0, base].
pub fn effective_delay(base: f64, min: f64, threshold: f64, score: f64) -> f64 {
    if score.is_nan() || score <= 0.0 {
        return base;
    }
    let delay = base / (score / threshold);
    if !delay.is_finite() || delay > base {
        return base;
    }
    if delay <= 0.0 {
        return min;
    }
    delay
}

/// Half-extent of the spawn box along one axis. Negative extents are
/// mirrored and non-finite ones collapse to zero.
fn half_extent(range: f64) -> f64 {
    if range.is_finite() {
        range.abs()
    } else {
        0.0
    }
}

/// Spawns enemies through an [`ActorFactory`], one per open gate.
pub struct SpawnController<H> {
    config: SpawnerConfig,
    target: Option<H>,
    projectile_container: Option<H>,
    spawned_count: u32,
    last_spawn_time: f64,
    anchor: Option<CompassAnchor>,
    anchor_position: DVec2,
    effective_delay: f64,
    initialized: bool,
    warned_missing_template: bool,
}

impl<H: Copy> SpawnController<H> {
    /// Build an uninitialized spawner sitting at `config.origin`.
    pub fn new(config: SpawnerConfig) -> Self {
        let anchor_position = config.origin;
        let effective_delay = config.base_spawn_delay;
        Self {
            config,
            target: None,
            projectile_container: None,
            spawned_count: 0,
            last_spawn_time: f64::NEG_INFINITY,
            anchor: None,
            anchor_position,
            effective_delay,
            initialized: false,
            warned_missing_template: false,
        }
    }

    /// Set the actor new enemies will follow.
    pub fn set_target(&mut self, target: Option<H>) {
        self.target = target;
    }

    /// Set the container new enemies' weapons parent projectiles under.
    pub fn set_projectile_container(&mut self, container: Option<H>) {
        self.projectile_container = container;
    }

    /// Start accepting ticks. A missing template is logged here.
    pub fn initialize(&mut self) {
        if self.config.enemy_template.is_none() {
            self.warn_missing_template();
        }
        self.initialized = true;
        info!(
            "spawner initialized at ({:.1}, {:.1}), base delay {:.2}s",
            self.anchor_position.x, self.anchor_position.y, self.config.base_spawn_delay
        );
    }

    /// Stop accepting ticks. Counters are kept.
    pub fn shutdown(&mut self) {
        self.initialized = false;
    }

    /// Whether ticks are currently accepted.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Tuning this spawner was built with.
    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Enemies spawned so far.
    pub fn spawned_count(&self) -> u32 {
        self.spawned_count
    }

    /// Time of the most recent spawn, `None` before the first.
    pub fn last_spawn_time(&self) -> Option<f64> {
        self.last_spawn_time.is_finite().then_some(self.last_spawn_time)
    }

    /// Current compass anchor, `None` before the first relocation.
    pub fn anchor(&self) -> Option<CompassAnchor> {
        self.anchor
    }

    /// World position of the spawn box center.
    pub fn anchor_position(&self) -> DVec2 {
        self.anchor_position
    }

    /// Delay computed on the most recent tick.
    pub fn effective_delay(&self) -> f64 {
        self.effective_delay
    }

    /// Serializable state for the snapshot.
    pub fn view(&self) -> SpawnerView {
        SpawnerView {
            spawned_count: self.spawned_count,
            last_spawn_time: self.last_spawn_time(),
            anchor: self.anchor,
            anchor_position: self.anchor_position,
            effective_delay: self.effective_delay,
        }
    }

    /// Advance one tick; spawns at most one enemy.
    pub fn tick<F, R>(
        &mut self,
        elapsed_secs: f64,
        score: f64,
        factory: &mut F,
        rng: &mut R,
    ) -> Option<SpawnEvent<H>>
    where
        F: ActorFactory<Handle = H>,
        R: Rng,
    {
        if !self.initialized {
            return None;
        }

        self.effective_delay = effective_delay(
            self.config.base_spawn_delay,
            self.config.min_spawn_delay,
            self.config.difficulty_threshold,
            score,
        );
        if !self.gate_open(elapsed_secs) {
            return None;
        }

        let position = self.spawn_location(rng);
        let actor = self.spawn_enemy(position, elapsed_secs, factory)?;
        let relocated_to = self.relocate(rng);

        Some(SpawnEvent {
            actor,
            position,
            spawned_count: self.spawned_count,
            relocated_to,
        })
    }

    fn gate_open(&self, elapsed_secs: f64) -> bool {
        let timer_elapsed = elapsed_secs > self.last_spawn_time + self.effective_delay;
        let below_cap = self.config.spawn_unlimited || self.spawned_count < self.config.max_spawn;
        timer_elapsed && below_cap
    }

    /// Uniform point in the box of half-size (range_x, range_y) around the anchor.
    fn spawn_location<R: Rng>(&self, rng: &mut R) -> DVec2 {
        let extent = DVec2::new(
            half_extent(self.config.spawn_range_x),
            half_extent(self.config.spawn_range_y),
        );
        let unit = DVec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        self.anchor_position + unit * extent
    }

    /// Instantiate and wire one enemy. Counters only move once wiring is done.
    fn spawn_enemy<F>(&mut self, position: DVec2, elapsed_secs: f64, factory: &mut F) -> Option<H>
    where
        F: ActorFactory<Handle = H>,
    {
        let Some(template) = self.config.enemy_template.as_ref() else {
            self.warn_missing_template();
            return None;
        };
        let Some(actor) = factory.instantiate(template, position) else {
            warn!("factory failed to instantiate enemy '{}'", template.name);
            return None;
        };

        factory.set_follow_target(actor, self.target);
        factory.set_projectile_container(actor, self.projectile_container);

        self.spawned_count = self.spawned_count.saturating_add(1);
        self.last_spawn_time = elapsed_secs;
        debug!(
            "spawned enemy #{} at ({:.2}, {:.2}) t={elapsed_secs:.3}s",
            self.spawned_count, position.x, position.y
        );
        Some(actor)
    }

    /// Jump to a uniformly drawn compass anchor.
    fn relocate<R: Rng>(&mut self, rng: &mut R) -> Option<CompassAnchor> {
        let draw = rng.gen_range(0..CompassAnchor::ALL.len());
        match CompassAnchor::from_index(draw) {
            Some(anchor) => {
                self.anchor = Some(anchor);
                self.anchor_position = anchor.offset(self.config.anchor_radius);
                Some(anchor)
            }
            None => {
                warn!("anchor draw {draw} is out of range; anchor left unchanged");
                None
            }
        }
    }

    fn warn_missing_template(&mut self) {
        if !self.warned_missing_template {
            warn!("spawner has no enemy template; spawning is disabled");
            self.warned_missing_template = true;
        }
    }
}
