//! Player movement controller.
//!
//! Owns one actor's pose and its dash state machine. Each tick it locks the
//! input axes for the configured [`MovementMode`], advances the dash timer,
//! moves the actor (or, in PhysicsDriven mode, hands a force to the physics
//! collaborator) and finally aims.

use glam::DVec2;
use log::{debug, info, warn};

use arena_core::config::MovementConfig;
use arena_core::enums::{AimMode, DashState, MovementMode};
use arena_core::types::{wrap_heading, Pose};

/// Force/rotation interface of the physics collaborator.
///
/// Only used in [`MovementMode::PhysicsDriven`]; the implementor owns
/// integration and collision.
pub trait PhysicsBody {
    /// Queue a world-space force for the next integration step.
    fn add_force(&mut self, force: DVec2);
    /// Stop (or resume) the body's own rotational integration.
    fn set_rotation_frozen(&mut self, frozen: bool);
}

/// Logical input for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementInput {
    /// Time-scaled seconds since the previous tick.
    pub dt: f64,
    /// External time scale. Aiming is skipped when this is ≤ 0.
    pub time_scale: f64,
    /// Monotonic, time-scaled seconds since the session started.
    pub elapsed_secs: f64,
    pub move_input: DVec2,
    pub dash_triggered: bool,
    /// World-space point to look at. Ignored in [`AimMode::FaceHeading`].
    pub look_target: Option<DVec2>,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementOutcome {
    pub pose: Pose,
    pub dash_state: DashState,
    pub dash_started: bool,
    pub dash_ended: bool,
    /// Force handed to the physics body this tick, if any.
    pub force: Option<DVec2>,
}

/// An input action with nothing bound to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingWarning {
    MoveUnbound,
    LookUnbound,
    DashUnbound,
}

impl BindingWarning {
    /// Log line for this warning.
    pub fn message(self) -> &'static str {
        match self {
            BindingWarning::MoveUnbound => {
                "the move action has no binding; the controller will not move"
            }
            BindingWarning::LookUnbound => {
                "the look action has no binding; the controller will not aim"
            }
            BindingWarning::DashUnbound => "the dash ability is not bound",
        }
    }
}

/// Moves one actor from logical input. See the module docs for the tick order.
pub struct MovementController {
    config: MovementConfig,
    pose: Pose,
    dash_state: DashState,
    last_dash_start: f64,
    initialized: bool,
    warned_missing_body: bool,
}

impl MovementController {
    /// Build an uninitialized controller at `pose`.
    pub fn new(config: MovementConfig, pose: Pose) -> Self {
        Self {
            config,
            pose,
            dash_state: DashState::Idle,
            last_dash_start: f64::NEG_INFINITY,
            initialized: false,
            warned_missing_body: false,
        }
    }

    /// Check input bindings and start accepting ticks.
    ///
    /// Missing bindings are reported (and logged) but never fatal.
    pub fn initialize(&mut self) -> Vec<BindingWarning> {
        let bindings = &self.config.bindings;
        let mut warnings = Vec::new();
        if bindings.move_action.is_empty() {
            warnings.push(BindingWarning::MoveUnbound);
        }
        if self.config.aim_mode == AimMode::TrackPointer && bindings.look_action.is_empty() {
            warnings.push(BindingWarning::LookUnbound);
        }
        if bindings.dash_action.is_empty() {
            warnings.push(BindingWarning::DashUnbound);
        }
        for warning in &warnings {
            warn!("{}", warning.message());
        }

        self.initialized = true;
        info!(
            "movement controller initialized ({:?}, {:?})",
            self.config.mode, self.config.aim_mode
        );
        warnings
    }

    /// Stop accepting ticks and forget any dash in progress.
    pub fn shutdown(&mut self) {
        self.initialized = false;
        self.dash_state = DashState::Idle;
        self.last_dash_start = f64::NEG_INFINITY;
    }

    /// Whether ticks are currently accepted.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Tuning this controller was built with.
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Pose after the most recent tick.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Overwrite the pose, e.g. with the physics body's integrated position.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Whether a dash is in progress.
    pub fn dash_state(&self) -> DashState {
        self.dash_state
    }

    /// Advance one tick.
    ///
    /// `physics` is only consulted in PhysicsDriven mode. Ticks before
    /// [`initialize`](Self::initialize) leave everything unchanged.
    pub fn tick(
        &mut self,
        input: &MovementInput,
        mut physics: Option<&mut dyn PhysicsBody>,
    ) -> MovementOutcome {
        let mut outcome = MovementOutcome {
            pose: self.pose,
            dash_state: self.dash_state,
            dash_started: false,
            dash_ended: false,
            force: None,
        };
        if !self.initialized {
            return outcome;
        }

        let move_input = self.shape_input(input.move_input);
        let (started, ended) = self.advance_dash(input.elapsed_secs, input.dash_triggered);
        outcome.dash_started = started;
        outcome.dash_ended = ended;

        match self.config.mode {
            MovementMode::HorizontalOnly | MovementMode::VerticalOnly | MovementMode::FreeRoam => {
                let direction = lock_axes(self.config.mode, move_input);
                let speed = match self.dash_state {
                    DashState::Active => self.config.dash_speed,
                    DashState::Idle => self.config.move_speed,
                };
                self.pose.position += direction * speed * input.dt;
            }
            MovementMode::PhysicsDriven => {
                let force = self.pose.forward() * move_input.y * self.config.move_speed;
                self.pose.heading = wrap_heading(
                    self.pose.heading - self.config.rotation_speed * move_input.x * input.dt,
                );
                match physics.as_deref_mut() {
                    Some(body) => {
                        body.add_force(force);
                        outcome.force = Some(force);
                    }
                    None => self.warn_missing_body(),
                }
            }
        }

        if input.time_scale > 0.0 {
            self.aim(input.look_target, physics);
        }

        outcome.pose = self.pose;
        outcome.dash_state = self.dash_state;
        outcome
    }

    fn shape_input(&self, raw: DVec2) -> DVec2 {
        if !raw.is_finite() {
            return DVec2::ZERO;
        }
        if self.config.clamp_input {
            raw.clamp_length_max(1.0)
        } else {
            raw
        }
    }

    /// Expire a finished dash, then start a new one if triggered and off
    /// cooldown. Returns `(started, ended)`.
    fn advance_dash(&mut self, elapsed: f64, triggered: bool) -> (bool, bool) {
        let mut ended = false;
        if self.dash_state == DashState::Active
            && elapsed > self.last_dash_start + self.config.dash_duration
        {
            self.dash_state = DashState::Idle;
            ended = true;
            debug!("dash ended at {elapsed:.3}s");
        }

        let started = triggered && elapsed > self.last_dash_start + self.config.dash_cooldown;
        if started {
            self.last_dash_start = elapsed;
            self.dash_state = DashState::Active;
            debug!("dash started at {elapsed:.3}s");
        }
        (started, ended)
    }

    fn aim(&mut self, look_target: Option<DVec2>, physics: Option<&mut dyn PhysicsBody>) {
        match self.config.aim_mode {
            AimMode::TrackPointer => {
                if let Some(heading) = look_target.and_then(|t| self.pose.heading_towards(t)) {
                    self.pose.heading = heading;
                }
            }
            AimMode::FaceHeading => {
                if self.config.mode == MovementMode::PhysicsDriven {
                    if let Some(body) = physics {
                        body.set_rotation_frozen(true);
                    }
                }
            }
        }
    }

    fn warn_missing_body(&mut self) {
        if !self.warned_missing_body {
            warn!("PhysicsDriven movement has no physics body; thrust is dropped");
            self.warned_missing_body = true;
        }
    }
}

/// Zero the input axes the mode does not honor.
pub fn lock_axes(mode: MovementMode, input: DVec2) -> DVec2 {
    match mode {
        MovementMode::HorizontalOnly => DVec2::new(input.x, 0.0),
        MovementMode::VerticalOnly => DVec2::new(0.0, input.y),
        MovementMode::FreeRoam | MovementMode::PhysicsDriven => input,
    }
}
