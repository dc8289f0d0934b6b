/// Virtual touch joysticks and on-screen action buttons
use glam::Vec2;

/// Lifecycle phase of a touch within the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Cancelled,
}

/// One platform touch as observed this tick.
#[derive(Debug, Clone, Copy)]
pub struct TouchPoint {
    pub id: u64,
    pub phase: TouchPhase,
    pub position: Vec2,
}

/// A floating joystick anchored where its owning touch first landed.
///
/// Inside `radius` the output scales linearly with the offset; beyond it the
/// offset is normalized, so |vector| never exceeds 1.
pub struct VirtualJoystick {
    pub radius: f32,
    anchor: Vec2,
    touch_id: Option<u64>,
    vector: Vec2,
}

impl VirtualJoystick {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            anchor: Vec2::ZERO,
            touch_id: None,
            vector: Vec2::ZERO,
        }
    }

    pub fn is_active(&self) -> bool {
        self.touch_id.is_some()
    }

    pub fn vector(&self) -> Vec2 {
        self.vector
    }

    pub fn owning_touch(&self) -> Option<u64> {
        self.touch_id
    }

    fn claim(&mut self, touch: &TouchPoint) {
        if self.touch_id.is_none() {
            self.touch_id = Some(touch.id);
            self.anchor = touch.position;
        }
    }

    fn track(&mut self, touch: &TouchPoint) {
        if self.touch_id != Some(touch.id) {
            return;
        }
        let offset = touch.position - self.anchor;
        self.vector = if offset.length() > self.radius {
            offset.normalize()
        } else {
            offset / self.radius
        };
    }

    fn reset(&mut self) {
        self.touch_id = None;
        self.vector = Vec2::ZERO;
        self.anchor = Vec2::ZERO;
    }

    fn handle(&mut self, touch: &TouchPoint) {
        match touch.phase {
            TouchPhase::Began => self.claim(touch),
            TouchPhase::Moved | TouchPhase::Stationary => self.track(touch),
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.touch_id == Some(touch.id) {
                    self.reset();
                }
            }
        }
    }

    /// Release the stick if its owning touch is no longer in the active set.
    fn release_if_lost(&mut self, touches: &[TouchPoint]) {
        if let Some(id) = self.touch_id {
            if !touches.iter().any(|t| t.id == id) {
                self.reset();
            }
        }
    }
}

/// Settings for the touch layer.
#[derive(Debug, Clone, Copy)]
pub struct TouchSettings {
    pub joystick_radius: f32,
    /// Movement read from the right stick is amplified by this factor.
    pub secondary_speed_multiplier: f32,
}

impl Default for TouchSettings {
    fn default() -> Self {
        Self {
            joystick_radius: 50.0,
            secondary_speed_multiplier: 2.0,
        }
    }
}

/// The full mobile control surface: a movement stick on the left half of the
/// screen, a secondary stick on the right half, and jump/crouch/sprint
/// buttons driven by the host UI.
pub struct TouchControls {
    pub screen_width: f32,
    pub settings: TouchSettings,
    left: VirtualJoystick,
    right: VirtualJoystick,
    jump_latch: bool,
    crouching: bool,
    sprinting: bool,
}

impl TouchControls {
    pub fn new(screen_width: f32, settings: TouchSettings) -> Self {
        Self {
            screen_width,
            settings,
            left: VirtualJoystick::new(settings.joystick_radius),
            right: VirtualJoystick::new(settings.joystick_radius),
            jump_latch: false,
            crouching: false,
            sprinting: false,
        }
    }

    /// Route one touch to the stick owning its screen half.
    ///
    /// A touch beginning on one half is ignored while the other half's stick
    /// is already active: one stick at a time, enforced at touch-begin only.
    pub fn handle_touch(&mut self, touch: &TouchPoint) {
        let midline = self.screen_width / 2.0;
        if touch.position.x < midline {
            if self.right.is_active() && touch.phase == TouchPhase::Began {
                return;
            }
            self.left.handle(touch);
        } else {
            if self.left.is_active() && touch.phase == TouchPhase::Began {
                return;
            }
            self.right.handle(touch);
        }
    }

    /// Release any stick whose owning touch is absent from the active set.
    /// Catches touches that vanish without an Ended event.
    pub fn release_lost(&mut self, touches: &[TouchPoint]) {
        self.left.release_if_lost(touches);
        self.right.release_if_lost(touches);
    }

    /// Feed the tick's active touch set through both sticks.
    pub fn process(&mut self, touches: &[TouchPoint]) {
        for touch in touches {
            self.handle_touch(touch);
        }
        self.release_lost(touches);
    }

    /// Movement vector for this tick. While the right stick is held it takes
    /// over movement at an amplified magnitude, capped at the multiplier.
    pub fn movement_input(&self) -> Vec2 {
        if self.right.is_active() {
            let amplified = self.right.vector() * self.settings.secondary_speed_multiplier;
            return amplified.clamp_length_max(self.settings.secondary_speed_multiplier);
        }
        self.left.vector()
    }

    /// Look vector for this tick. The right stick only feeds look while it is
    /// not claimed for movement, so in practice this reads zero while held.
    pub fn look_input(&self) -> Vec2 {
        if self.right.is_active() {
            return Vec2::ZERO;
        }
        self.right.vector()
    }

    pub fn left_stick(&self) -> &VirtualJoystick {
        &self.left
    }

    pub fn right_stick(&self) -> &VirtualJoystick {
        &self.right
    }

    /// Host UI jump button: latched for exactly one poll.
    pub fn press_jump(&mut self) {
        self.jump_latch = true;
    }

    /// Consume the jump latch; true at most once per button press.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_latch)
    }

    pub fn toggle_crouch(&mut self) {
        self.crouching = !self.crouching;
    }

    pub fn toggle_sprint(&mut self) {
        self.sprinting = !self.sprinting;
    }

    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> TouchPoint {
        TouchPoint { id, phase, position: Vec2::new(x, y) }
    }

    fn controls() -> TouchControls {
        TouchControls::new(800.0, TouchSettings::default())
    }

    #[test]
    fn test_left_half_claims_movement_stick() {
        let mut c = controls();
        c.process(&[touch(1, TouchPhase::Began, 100.0, 300.0)]);
        assert!(c.left_stick().is_active());
        assert!(!c.right_stick().is_active());

        // 25px offset inside the 50px radius maps linearly to 0.5
        c.process(&[touch(1, TouchPhase::Moved, 125.0, 300.0)]);
        assert!((c.movement_input().x - 0.5).abs() < 1e-6);
        assert_eq!(c.movement_input().y, 0.0);
    }

    #[test]
    fn test_offset_beyond_radius_is_normalized() {
        let mut c = controls();
        c.process(&[touch(1, TouchPhase::Began, 100.0, 300.0)]);
        c.process(&[touch(1, TouchPhase::Moved, 200.0, 300.0)]);
        assert!((c.movement_input().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_drag_across_midline_freezes_owning_stick() {
        // Routing is by current position, so a touch that drifts into the
        // other half stops updating its stick: the stick stays active and
        // holds its last vector until the touch lifts
        let mut c = controls();
        c.process(&[touch(1, TouchPhase::Began, 100.0, 300.0)]);
        c.process(&[touch(1, TouchPhase::Moved, 125.0, 300.0)]);
        assert!((c.movement_input().x - 0.5).abs() < 1e-6);

        c.process(&[touch(1, TouchPhase::Moved, 600.0, 300.0)]);
        assert!(c.left_stick().is_active());
        assert!(!c.right_stick().is_active(), "a non-Began touch never claims the other stick");
        assert!((c.movement_input().x - 0.5).abs() < 1e-6, "vector frozen at the last left-half track");

        // An Ended routed to the wrong half misses the stick; the lost-touch
        // sweep picks it up the tick the touch leaves the active set
        c.process(&[touch(1, TouchPhase::Ended, 600.0, 300.0)]);
        assert!(c.left_stick().is_active());
        c.process(&[]);
        assert!(!c.left_stick().is_active());
    }

    #[test]
    fn test_stick_resets_when_owning_touch_disappears() {
        let mut c = controls();
        c.process(&[touch(1, TouchPhase::Began, 100.0, 300.0)]);
        c.process(&[touch(1, TouchPhase::Moved, 140.0, 300.0)]);
        assert!(c.movement_input().length() > 0.0);

        // Touch vanishes without an Ended event; the stick must still reset
        // on the very next tick.
        c.process(&[]);
        assert!(!c.left_stick().is_active());
        assert_eq!(c.movement_input(), Vec2::ZERO);
    }

    #[test]
    fn test_second_stick_ignored_while_first_active() {
        let mut c = controls();
        c.process(&[touch(1, TouchPhase::Began, 100.0, 300.0)]);
        // A new touch on the right half must not claim the right stick
        c.process(&[
            touch(1, TouchPhase::Moved, 120.0, 300.0),
            touch(2, TouchPhase::Began, 700.0, 300.0),
        ]);
        assert!(!c.right_stick().is_active());

        // Once the left touch lifts, the right half can claim again
        c.process(&[touch(2, TouchPhase::Moved, 700.0, 300.0)]);
        c.process(&[touch(3, TouchPhase::Began, 700.0, 300.0)]);
        assert!(c.right_stick().is_active());
    }

    #[test]
    fn test_right_stick_amplifies_movement_and_mutes_look() {
        let mut c = controls();
        c.process(&[touch(1, TouchPhase::Began, 600.0, 300.0)]);
        c.process(&[touch(1, TouchPhase::Moved, 625.0, 300.0)]);
        // 0.5 deflection doubled by the secondary multiplier
        assert!((c.movement_input().x - 1.0).abs() < 1e-6);
        assert_eq!(c.look_input(), Vec2::ZERO);
    }

    #[test]
    fn test_jump_latch_fires_once() {
        let mut c = controls();
        c.press_jump();
        assert!(c.take_jump());
        assert!(!c.take_jump());
    }

    #[test]
    fn test_ended_phase_resets_stick() {
        let mut c = controls();
        c.process(&[touch(1, TouchPhase::Began, 100.0, 300.0)]);
        c.process(&[touch(1, TouchPhase::Moved, 140.0, 300.0)]);
        c.process(&[touch(1, TouchPhase::Ended, 140.0, 300.0)]);
        assert!(!c.left_stick().is_active());
        assert_eq!(c.movement_input(), Vec2::ZERO);
    }
}
