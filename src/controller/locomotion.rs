/// Kinematic first-person locomotion: look, crouch, gravity and jumping
use glam::{Vec2, Vec3};

use crate::controller::input::InputFrame;
use crate::model::{CameraRig, PhysicsBody};

/// Height snap threshold for the crouch transition.
const HEIGHT_EPSILON: f32 = 0.01;
/// Small downward bias that keeps the capsule glued to the ground while
/// resting, instead of accumulating fall velocity.
const GROUND_STICK_VELOCITY: f32 = -2.0;

/// Public tunables of the locomotion model.
#[derive(Debug, Clone, Copy)]
pub struct LocomotionSettings {
    pub speed: f32,
    pub sprint_multiplier: f32,
    pub crouch_multiplier: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub standing_height: f32,
    pub crouch_height: f32,
    /// Blend rate of the height interpolation, per second.
    pub crouch_transition_speed: f32,
    /// Radians of rotation per unit of look delta.
    pub look_sensitivity: f32,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            speed: 5.0,
            sprint_multiplier: 1.5,
            crouch_multiplier: 0.5,
            jump_force: 5.0,
            gravity: -9.81,
            standing_height: 1.8,
            crouch_height: 0.6,
            crouch_transition_speed: 10.0,
            look_sensitivity: 0.002,
        }
    }
}

/// What one tick did to the body, for logging and tests.
#[derive(Debug, Clone, Copy)]
pub struct TickReport {
    pub horizontal: Vec3,
    pub vertical: Vec3,
    pub speed: f32,
    pub grounded: bool,
}

/// Per-tick driver of the character: consumes one `InputFrame`, updates
/// orientation and vertical state, and issues the displacement moves.
pub struct LocomotionController {
    pub settings: LocomotionSettings,
    vertical_velocity: f32,
    is_crouching: bool,
    is_sprinting: bool,
    current_height: f32,
    target_height: f32,
}

impl LocomotionController {
    pub fn new(settings: LocomotionSettings) -> Self {
        Self {
            settings,
            vertical_velocity: 0.0,
            is_crouching: false,
            is_sprinting: false,
            current_height: settings.standing_height,
            target_height: settings.standing_height,
        }
    }

    pub fn is_crouching(&self) -> bool {
        self.is_crouching
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn current_height(&self) -> f32 {
        self.current_height
    }

    /// Advance one tick. Must run after the aggregator's `poll()`; the
    /// grounded flag read here reflects the previous tick's moves.
    pub fn advance(
        &mut self,
        frame: &InputFrame,
        dt: f32,
        body: &mut impl PhysicsBody,
        camera: &mut CameraRig,
    ) -> TickReport {
        self.is_sprinting = frame.sprint_active;
        self.apply_look(frame.look_delta, camera);
        self.update_crouch(frame.crouch_toggled, dt, body, camera);
        self.move_body(frame, dt, body, camera)
    }

    /// Yaw rotates the body about the up axis unbounded; pitch lives on the
    /// camera and never leaves ±90°.
    fn apply_look(&self, look: Vec2, camera: &mut CameraRig) {
        let sens = self.settings.look_sensitivity;
        camera.yaw += look.x * sens;
        let pi_half = std::f32::consts::PI / 2.0;
        camera.pitch = (camera.pitch - look.y * sens).clamp(-pi_half, pi_half);
    }

    /// Crouch state machine plus the every-tick height interpolation.
    ///
    /// Standing up requires overhead clearance for the full standing height;
    /// an obstructed attempt is rejected and retried on the next toggle.
    fn update_crouch(
        &mut self,
        toggled: bool,
        dt: f32,
        body: &mut impl PhysicsBody,
        camera: &mut CameraRig,
    ) {
        if toggled {
            if self.is_crouching {
                if body.clearance_blocked(self.settings.standing_height) {
                    tracing::debug!("stand-up blocked by overhead obstruction");
                } else {
                    self.is_crouching = false;
                    self.target_height = self.settings.standing_height;
                }
            } else {
                self.is_crouching = true;
                self.target_height = self.settings.crouch_height;
            }
        }

        // Height follows the target every tick, transition in progress or not
        let t = (self.settings.crouch_transition_speed * dt).clamp(0.0, 1.0);
        self.current_height += (self.target_height - self.current_height) * t;
        if (self.current_height - self.target_height).abs() < HEIGHT_EPSILON {
            self.current_height = self.target_height;
        }

        body.set_height(self.current_height);
        body.set_center_y(self.current_height / 2.0);
        camera.crouch_drop = (self.settings.standing_height - self.current_height) / 2.0;
    }

    /// Horizontal and vertical kinematics, issued as two separate moves so
    /// the grounded flag refreshes between them.
    fn move_body(
        &mut self,
        frame: &InputFrame,
        dt: f32,
        body: &mut impl PhysicsBody,
        camera: &CameraRig,
    ) -> TickReport {
        // Diagonal input is deliberately not renormalized; (1,1) moves √2
        // faster, matching the original feel.
        let direction =
            camera.flat_right() * frame.move_axes.x + camera.flat_forward() * frame.move_axes.y;

        if body.grounded() && self.vertical_velocity < 0.0 {
            self.vertical_velocity = GROUND_STICK_VELOCITY;
        }
        if frame.jump_pressed && body.grounded() {
            self.vertical_velocity = self.settings.jump_force;
        }
        self.vertical_velocity += self.settings.gravity * dt;

        let mut speed = self.settings.speed;
        if self.is_sprinting && !self.is_crouching {
            speed *= self.settings.sprint_multiplier;
        } else if self.is_crouching {
            speed *= self.settings.crouch_multiplier;
        }

        let horizontal = direction * speed * dt;
        body.move_by(horizontal);

        let vertical = Vec3::new(0.0, self.vertical_velocity * dt, 0.0);
        let grounded = body.move_by(vertical);

        TickReport { horizontal, vertical, speed, grounded }
    }
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(LocomotionSettings::default())
    }
}
