//=========================================================================
// Platformer Controller
//=========================================================================
//
// Per-tick movement and collision resolution of a platformer character.
//
// Architecture:
//   Scene::step()
//     └─ PlatformerController::step_pre_events(owner, scene, keys)
//          ├─ input latch (simulated controls | default keyboard bindings)
//          ├─ PlatformQuery (broad phase over the scene's registry)
//          └─ floor / ladder / jump state for the next tick
//
// Tick sequence:
//   scene change → horizontal speed → broad phase → floor validity
//   → size tracking → X move (floor drag, wall push-out) → ladder
//   → fall / jump → slope following → Y move → floor re-acquisition
//   → latch reset → movement flag
//
// Coordinates grow downward: negative dy is upward.
//
//=========================================================================

//=== Module Declarations =================================================

mod collision;
mod controls;
mod settings;

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::SettingError;
use crate::core::input::StateTracker;
use crate::core::scene::{Scene, SceneId};
use crate::core::world::{ObjectHandle, SceneObject};
use collision::PlatformQuery;
use settings::{check_non_negative, check_slope_angle, slope_climbing_factor};

//=== Public API ==========================================================

pub use controls::{
    ControlInput, PlatformerInput, DEFAULT_DOWN_KEYS, DEFAULT_JUMP_KEYS, DEFAULT_LEFT_KEYS,
    DEFAULT_RIGHT_KEYS, DEFAULT_UP_KEYS,
};
pub use settings::PlatformerSettings;

/// Vertical speed on a ladder, in pixels per second.
pub const LADDER_SPEED: f64 = 150.0;

//=== FloorContact ========================================================

/// Platform the character stands on and where it was last tick.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FloorContact {
    handle: ObjectHandle,
    last_x: f64,
    last_y: f64,
}

//=== PlatformerController ================================================

/// Character controller resolving movement against scene platforms.
///
/// Being on a floor and holding a floor reference are the same state:
/// [`is_on_floor`](Self::is_on_floor) is true exactly when
/// [`floor_platform`](Self::floor_platform) is `Some`.
#[derive(Debug, Clone)]
pub struct PlatformerController {
    //--- Tunables ---------------------------------------------------------
    gravity: f64,
    max_falling_speed: f64,
    acceleration: f64,
    deceleration: f64,
    max_speed: f64,
    jump_speed: f64,
    slope_max_angle: f64,
    slope_climbing_factor: f64,
    ignore_default_controls: bool,
    track_size: bool,

    //--- Motion State -----------------------------------------------------
    current_speed: f64,
    current_fall_speed: f64,
    current_jump_speed: f64,
    floor: Option<FloorContact>,
    is_on_ladder: bool,
    jumping: bool,
    can_jump: bool,
    has_really_moved: bool,
    old_height: f64,
    parent_scene: Option<SceneId>,

    //--- Input Latch ------------------------------------------------------
    input: PlatformerInput,
}

impl PlatformerController {
    //--- Construction -----------------------------------------------------

    /// Creates a controller with the default tunables.
    pub fn new() -> Self {
        let defaults = PlatformerSettings::default();
        Self::with_valid_settings(&defaults)
    }

    /// Creates a controller from persisted settings, validating them first.
    pub fn from_settings(settings: &PlatformerSettings) -> Result<Self, SettingError> {
        settings.validate()?;
        Ok(Self::with_valid_settings(settings))
    }

    fn with_valid_settings(settings: &PlatformerSettings) -> Self {
        Self {
            gravity: settings.gravity,
            max_falling_speed: settings.max_falling_speed,
            acceleration: settings.acceleration,
            deceleration: settings.deceleration,
            max_speed: settings.max_speed,
            jump_speed: settings.jump_speed,
            slope_max_angle: settings.slope_max_angle,
            slope_climbing_factor: slope_climbing_factor(settings.slope_max_angle),
            ignore_default_controls: settings.ignore_default_controls,
            track_size: true,
            current_speed: 0.0,
            current_fall_speed: 0.0,
            current_jump_speed: 0.0,
            floor: None,
            is_on_ladder: false,
            jumping: false,
            can_jump: false,
            has_really_moved: false,
            old_height: 0.0,
            parent_scene: None,
            input: PlatformerInput::default(),
        }
    }

    /// Current tunables in their persisted form.
    pub fn settings(&self) -> PlatformerSettings {
        PlatformerSettings {
            gravity: self.gravity,
            max_falling_speed: self.max_falling_speed,
            acceleration: self.acceleration,
            deceleration: self.deceleration,
            max_speed: self.max_speed,
            jump_speed: self.jump_speed,
            ignore_default_controls: self.ignore_default_controls,
            slope_max_angle: self.slope_max_angle,
        }
    }

    /// Remembers the owner's height so later size changes can be tracked.
    pub fn on_owner_changed<O: SceneObject>(&mut self, owner: &O) {
        self.old_height = owner.height();
    }

    //--- Per-Tick Resolution ----------------------------------------------

    /// Resolves one tick of movement for the character `owner`.
    ///
    /// The controller must not be stored in the owner's entity while this
    /// runs; [`Scene::step`] takes it out for the duration of the call.
    pub fn step_pre_events<O: SceneObject>(
        &mut self,
        owner: ObjectHandle,
        scene: &mut Scene<O>,
        keys: &StateTracker,
    ) {
        let scene_id = scene.id();
        if self.parent_scene != Some(scene_id) {
            if self.parent_scene.is_some() {
                debug!("Platformer {:?} moved to scene {:?}", owner, scene_id);
            }
            self.parent_scene = Some(scene_id);
            self.floor = None;
        }

        let dt = scene.elapsed_seconds();
        let first_tick = scene.is_first_tick();

        if !self.ignore_default_controls {
            self.input.merge(PlatformerInput::from_keys(keys));
        }

        //--- Horizontal speed ---------------------------------------------
        let mut requested_dx = 0.0;
        let mut requested_dy = 0.0;

        if self.input.left {
            self.current_speed -= self.acceleration * dt;
        }
        if self.input.right {
            self.current_speed += self.acceleration * dt;
        }

        // Both or neither held: decelerate, never past zero.
        if self.input.left == self.input.right {
            let was_positive = self.current_speed > 0.0;
            let direction = if was_positive { 1.0 } else { -1.0 };
            self.current_speed -= self.deceleration * dt * direction;

            if was_positive && self.current_speed < 0.0 {
                self.current_speed = 0.0;
            }
            if !was_positive && self.current_speed > 0.0 {
                self.current_speed = 0.0;
            }
        }

        if self.current_speed > self.max_speed {
            self.current_speed = self.max_speed;
        }
        if self.current_speed < -self.max_speed {
            self.current_speed = -self.max_speed;
        }
        requested_dx += self.current_speed * dt;

        //--- Broad phase --------------------------------------------------
        let max_movement = requested_dx.max(self.max_falling_speed);
        let Some(mut query) = PlatformQuery::new(scene, owner, max_movement) else {
            warn!("Platformer owner {:?} not found in scene {:?}", owner, scene_id);
            self.input.reset();
            return;
        };
        let overlapped_jumpthrus = query.overlapped_jumpthrus();

        if let Some(floor) = self.floor {
            if !query.is_candidate(floor.handle) {
                debug!("Platformer {:?} lost floor {:?}", owner, floor.handle);
                self.floor = None;
            }
        }

        //--- Size tracking ------------------------------------------------
        let height = query.height();
        if self.track_size && self.floor.is_some() && self.old_height != height && !first_tick {
            query.set_y(query.y() + self.old_height - height);
        }
        self.old_height = height;

        //--- X axis -------------------------------------------------------
        if let Some(floor) = self.floor {
            if let Some((floor_x, floor_y)) = query.platform_position(floor.handle) {
                requested_dx += floor_x - floor.last_x;
                requested_dy += floor_y - floor.last_y;
            }
        }

        let old_x = query.x();
        if requested_dx != 0.0 {
            query.set_x(old_x + requested_dx);
            let floor_handle = self.floor_platform();

            // Jump-thrus never block horizontally.
            while query.is_colliding(floor_handle, true) {
                let x = query.x();
                if (requested_dx > 0.0 && x <= old_x) || (requested_dx < 0.0 && x >= old_x) {
                    query.set_x(old_x);
                    break;
                }

                // Step over floor tiles that are slightly misaligned.
                if self.floor.is_some() {
                    query.set_y(query.y() - 1.0);
                    if !query.is_colliding(floor_handle, true) {
                        break;
                    }
                    query.set_y(query.y() + 1.0);
                }

                query.set_x(x.floor() + if requested_dx > 0.0 { -1.0 } else { 1.0 });
                self.current_speed = 0.0;
            }
        }

        //--- Ladder -------------------------------------------------------
        if self.input.ladder && query.is_overlapping_ladder() {
            if !self.is_on_ladder {
                debug!("Platformer {:?} grabbed a ladder", owner);
            }
            self.can_jump = true;
            self.floor = None;
            self.current_jump_speed = 0.0;
            self.current_fall_speed = 0.0;
            self.jumping = false;
            self.is_on_ladder = true;
        }

        if self.is_on_ladder {
            if self.input.up {
                requested_dy -= LADDER_SPEED * dt;
            }
            if self.input.down {
                requested_dy += LADDER_SPEED * dt;
            }

            if !query.is_overlapping_ladder() {
                debug!("Platformer {:?} left the ladder", owner);
                self.is_on_ladder = false;
            }
        }

        //--- Fall ---------------------------------------------------------
        if self.floor.is_none() && !self.is_on_ladder {
            self.current_fall_speed += self.gravity * dt;
            if self.current_fall_speed > self.max_falling_speed {
                self.current_fall_speed = self.max_falling_speed;
            }

            requested_dy += self.current_fall_speed * dt;
            requested_dy = requested_dy.min(self.max_falling_speed * dt);
        }

        //--- Jump ---------------------------------------------------------
        if self.can_jump && self.input.jump {
            debug!("Platformer {:?} jumped", owner);
            self.jumping = true;
            self.can_jump = false;
            self.is_on_ladder = false;
            self.current_jump_speed = self.jump_speed;
            self.current_fall_speed = 0.0;
        }

        if self.jumping {
            requested_dy -= self.current_jump_speed * dt;
            self.current_jump_speed -= self.gravity * dt;
            if self.current_jump_speed < 0.0 {
                self.current_jump_speed = 0.0;
                self.jumping = false;
            }
        }

        //--- Slope following ----------------------------------------------
        if let Some(floor) = self.floor {
            let budget = (requested_dx * self.slope_climbing_factor).abs();

            if query.collides_with(floor.handle) {
                // Floor rises under the character: climb it.
                let old_y = query.y();
                let mut step = 0.0;
                let mut still_in_floor = false;
                loop {
                    if step >= budget.floor() {
                        query.set_y(query.y() - (budget - step));
                        still_in_floor = query.collides_with(floor.handle);
                        break;
                    }

                    query.set_y(query.y() - 1.0);
                    step += 1.0;
                    if !query.collides_with(floor.handle) {
                        break;
                    }
                }

                // Too steep: cancel the whole move.
                if still_in_floor {
                    query.set_y(old_y);
                    query.set_x(old_x);
                }
            } else {
                // Flat or descending floor: follow it down within budget.
                let old_y = query.y();
                query.set_y(old_y + 1.0);
                let mut step = 0.0;
                let mut no_more_on_floor = false;
                while !query.is_colliding_except(&[]) {
                    if step > budget {
                        no_more_on_floor = true;
                        break;
                    }

                    query.set_y(query.y() + 1.0);
                    step += 1.0;
                }

                if no_more_on_floor {
                    query.set_y(old_y);
                } else {
                    query.set_y(query.y() - 1.0);
                }
            }
        }

        //--- Y axis -------------------------------------------------------
        if requested_dy != 0.0 {
            let old_y = query.y();
            query.set_y(old_y + requested_dy);

            // Jump-thrus obstruct only downward movement, and only those
            // not already overlapped at the start of the tick.
            while (requested_dy < 0.0 && query.is_colliding(None, true))
                || (requested_dy > 0.0 && query.is_colliding_except(&overlapped_jumpthrus))
            {
                self.jumping = false;
                self.current_jump_speed = 0.0;

                let y = query.y();
                if (requested_dy > 0.0 && y <= old_y) || (requested_dy < 0.0 && y >= old_y) {
                    query.set_y(old_y);
                    break;
                }

                query.set_y(y.floor() + if requested_dy > 0.0 { -1.0 } else { 1.0 });
            }
        }

        //--- Floor re-acquisition -----------------------------------------
        let overlapped_jumpthrus = query.overlapped_jumpthrus();
        if !self.is_on_ladder {
            let old_y = query.y();
            query.set_y(old_y + 1.0);

            match self.floor {
                Some(floor) if query.collides_with(floor.handle) => {
                    if let Some((floor_x, floor_y)) = query.platform_position(floor.handle) {
                        self.floor = Some(FloorContact {
                            handle: floor.handle,
                            last_x: floor_x,
                            last_y: floor_y,
                        });
                    }
                }
                _ => {
                    let landed = query.first_colliding_except(&overlapped_jumpthrus).and_then(|handle| {
                        query.platform_position(handle).map(|(last_x, last_y)| FloorContact {
                            handle,
                            last_x,
                            last_y,
                        })
                    });

                    match landed {
                        Some(contact) => {
                            if self.floor.is_none() {
                                debug!("Platformer {:?} landed on {:?}", owner, contact.handle);
                            }
                            self.floor = Some(contact);
                            self.can_jump = true;
                            self.jumping = false;
                            self.current_jump_speed = 0.0;
                            self.current_fall_speed = 0.0;
                        }
                        None => {
                            if self.floor.is_some() {
                                debug!("Platformer {:?} left the floor", owner);
                            }
                            self.can_jump = false;
                            self.floor = None;
                        }
                    }
                }
            }

            query.set_y(old_y);
        }

        //--- Latch reset and movement flag --------------------------------
        self.input.reset();
        self.has_really_moved = (query.x() - old_x).abs() >= 1.0;
    }

    //--- State Queries ----------------------------------------------------

    pub fn is_on_floor(&self) -> bool {
        self.floor.is_some()
    }

    pub fn is_on_ladder(&self) -> bool {
        self.is_on_ladder
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Airborne, and either not jumping or already falling faster than rising.
    pub fn is_falling(&self) -> bool {
        !self.is_on_floor()
            && !self.is_on_ladder
            && (!self.jumping || self.current_jump_speed < self.current_fall_speed)
    }

    /// Moved at least a pixel horizontally last tick, or has vertical speed.
    pub fn is_moving(&self) -> bool {
        (self.has_really_moved && self.current_speed != 0.0)
            || self.current_jump_speed != 0.0
            || self.current_fall_speed != 0.0
    }

    pub fn floor_platform(&self) -> Option<ObjectHandle> {
        self.floor.map(|floor| floor.handle)
    }

    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    pub fn current_speed(&self) -> f64 {
        self.current_speed
    }

    pub fn current_fall_speed(&self) -> f64 {
        self.current_fall_speed
    }

    pub fn current_jump_speed(&self) -> f64 {
        self.current_jump_speed
    }

    /// Latched input waiting for the next tick.
    pub fn input(&self) -> &PlatformerInput {
        &self.input
    }

    //--- Simulated Controls -----------------------------------------------

    pub fn simulate(&mut self, control: ControlInput) {
        self.input.set(control);
    }

    /// Latches a control by name for the next tick. Unknown names are ignored.
    pub fn simulate_control(&mut self, name: &str) {
        match ControlInput::from_name(name) {
            Some(control) => self.input.set(control),
            None => debug!("Ignoring unknown control {:?}", name),
        }
    }

    pub fn simulate_left_key(&mut self) {
        self.input.left = true;
    }

    pub fn simulate_right_key(&mut self) {
        self.input.right = true;
    }

    pub fn simulate_up_key(&mut self) {
        self.input.up = true;
    }

    pub fn simulate_down_key(&mut self) {
        self.input.down = true;
    }

    pub fn simulate_ladder_key(&mut self) {
        self.input.ladder = true;
    }

    pub fn simulate_jump_key(&mut self) {
        self.input.jump = true;
    }

    /// Allows one more jump, even mid-air.
    pub fn set_can_jump(&mut self) {
        self.can_jump = true;
    }

    /// Stops (or resumes) reading the default keyboard bindings.
    pub fn ignore_default_controls(&mut self, ignore: bool) {
        self.ignore_default_controls = ignore;
    }

    pub fn default_controls_ignored(&self) -> bool {
        self.ignore_default_controls
    }

    /// Keeps the feet anchored when the owner's height changes on a floor.
    pub fn set_track_size(&mut self, track_size: bool) {
        self.track_size = track_size;
    }

    pub fn tracks_size(&self) -> bool {
        self.track_size
    }

    //--- Tunables ---------------------------------------------------------

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn max_falling_speed(&self) -> f64 {
        self.max_falling_speed
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn deceleration(&self) -> f64 {
        self.deceleration
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn jump_speed(&self) -> f64 {
        self.jump_speed
    }

    pub fn slope_max_angle(&self) -> f64 {
        self.slope_max_angle
    }

    pub fn slope_climbing_factor(&self) -> f64 {
        self.slope_climbing_factor
    }

    pub fn set_gravity(&mut self, gravity: f64) -> Result<(), SettingError> {
        check_non_negative("gravity", gravity)?;
        self.gravity = gravity;
        Ok(())
    }

    pub fn set_max_falling_speed(&mut self, max_falling_speed: f64) -> Result<(), SettingError> {
        check_non_negative("maxFallingSpeed", max_falling_speed)?;
        self.max_falling_speed = max_falling_speed;
        Ok(())
    }

    pub fn set_acceleration(&mut self, acceleration: f64) -> Result<(), SettingError> {
        check_non_negative("acceleration", acceleration)?;
        self.acceleration = acceleration;
        Ok(())
    }

    pub fn set_deceleration(&mut self, deceleration: f64) -> Result<(), SettingError> {
        check_non_negative("deceleration", deceleration)?;
        self.deceleration = deceleration;
        Ok(())
    }

    pub fn set_max_speed(&mut self, max_speed: f64) -> Result<(), SettingError> {
        check_non_negative("maxSpeed", max_speed)?;
        self.max_speed = max_speed;
        Ok(())
    }

    pub fn set_jump_speed(&mut self, jump_speed: f64) -> Result<(), SettingError> {
        check_non_negative("jumpSpeed", jump_speed)?;
        self.jump_speed = jump_speed;
        Ok(())
    }

    /// Sets the steepest climbable slope, in degrees within `[0, 90)`.
    pub fn set_slope_max_angle(&mut self, angle: f64) -> Result<(), SettingError> {
        check_slope_angle(angle)?;
        self.slope_max_angle = angle;
        self.slope_climbing_factor = slope_climbing_factor(angle);
        Ok(())
    }

    /// Updates a tunable from its persisted name and string value.
    ///
    /// `ignoreDefaultControls` takes `true`/`false`/`1`/`0`; every other
    /// property is numeric and validated like its setter.
    pub fn update_property(&mut self, name: &str, value: &str) -> Result<(), SettingError> {
        if name == "ignoreDefaultControls" {
            let ignore = match value.trim() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => return Err(invalid_value(name, value)),
            };
            self.ignore_default_controls = ignore;
            return Ok(());
        }

        let setter: fn(&mut Self, f64) -> Result<(), SettingError> = match name {
            "gravity" => Self::set_gravity,
            "maxFallingSpeed" => Self::set_max_falling_speed,
            "acceleration" => Self::set_acceleration,
            "deceleration" => Self::set_deceleration,
            "maxSpeed" => Self::set_max_speed,
            "jumpSpeed" => Self::set_jump_speed,
            "slopeMaxAngle" => Self::set_slope_max_angle,
            _ => return Err(SettingError::UnknownProperty(name.to_string())),
        };

        let number: f64 = value.trim().parse().map_err(|_| invalid_value(name, value))?;
        setter(self, number)
    }
}

impl Default for PlatformerController {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid_value(name: &str, value: &str) -> SettingError {
    SettingError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
