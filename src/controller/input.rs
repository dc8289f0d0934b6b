/// Platform-agnostic input aggregation
use std::collections::HashSet;

use glam::Vec2;

use crate::controller::touch::{TouchControls, TouchPhase, TouchPoint};

/// Platform-independent input events, fed in by the host loop as they arrive.
#[derive(Debug, Clone)]
pub enum InputEvent {
    // Keyboard events
    KeyDown(String),
    KeyUp(String),

    // Mouse events
    MouseMove { dx: f32, dy: f32 },

    // Touch events
    Touch(TouchPoint),

    // Window events
    FocusLost,
}

/// Which device family produced a frame. Exactly one source is authoritative
/// per tick; the two are never blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    KeyMouse,
    Touch,
}

/// One tick's worth of normalized input. Transient, rebuilt every poll.
#[derive(Debug, Clone, Copy)]
pub struct InputFrame {
    /// Movement axes. Keyboard frames carry ±1 per component, never clamped
    /// by vector magnitude (diagonal is deliberately faster); a substituted
    /// secondary-stick frame can reach the stick's speed multiplier.
    pub move_axes: Vec2,
    /// Raw look delta for this tick, unbounded.
    pub look_delta: Vec2,
    /// Edge-triggered: true for exactly one tick per physical press.
    pub jump_pressed: bool,
    /// Level-triggered: held key or toggle button.
    pub sprint_active: bool,
    /// Edge-triggered.
    pub crouch_toggled: bool,
    pub source: InputSource,
}

/// Key mapping configuration
#[derive(Clone)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub jump: String,
    pub sprint: String,
    pub crouch: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            backward: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            jump: " ".to_string(),
            sprint: "Shift".to_string(),
            crouch: "c".to_string(),
        }
    }
}

/// Tracked state of one live platform touch.
struct ActiveTouch {
    id: u64,
    position: Vec2,
    /// Phase observed this tick; reverts to Stationary once consumed.
    phase: TouchPhase,
}

/// Collects raw device events between ticks and produces one `InputFrame`
/// per `poll()` call.
pub struct InputAggregator {
    bindings: KeyBindings,
    pressed_keys: HashSet<String>,
    look_delta: Vec2,
    jump_edge: bool,
    crouch_edge: bool,
    touches: Vec<ActiveTouch>,
    touch: Option<TouchControls>,
    last_touch_crouch: bool,
}

impl InputAggregator {
    pub fn new(bindings: KeyBindings, touch: Option<TouchControls>) -> Self {
        Self {
            bindings,
            pressed_keys: HashSet::new(),
            look_delta: Vec2::ZERO,
            jump_edge: false,
            crouch_edge: false,
            touches: Vec::new(),
            touch,
            last_touch_crouch: false,
        }
    }

    pub fn has_touch_layer(&self) -> bool {
        self.touch.is_some()
    }

    /// Access the touch layer, e.g. for wiring host UI buttons.
    pub fn touch_controls_mut(&mut self) -> Option<&mut TouchControls> {
        self.touch.as_mut()
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                // Fresh presses only; held-key repeats must not re-fire edges
                if self.pressed_keys.insert(key.clone()) {
                    if *key == self.bindings.jump {
                        self.jump_edge = true;
                    }
                    if *key == self.bindings.crouch {
                        self.crouch_edge = true;
                    }
                }
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::MouseMove { dx, dy } => {
                self.look_delta.x += dx;
                self.look_delta.y += dy;
            }
            InputEvent::Touch(touch) => {
                if let Some(existing) = self.touches.iter_mut().find(|t| t.id == touch.id) {
                    existing.position = touch.position;
                    existing.phase = touch.phase;
                } else {
                    self.touches.push(ActiveTouch {
                        id: touch.id,
                        position: touch.position,
                        phase: touch.phase,
                    });
                }
                // Forward immediately: events coalesce between polls, and
                // replaying only the latest phase at poll time would erase a
                // Began (and with it the stick claim) whenever the touch
                // also moved or ended within the same tick.
                if let Some(controls) = self.touch.as_mut() {
                    controls.handle_touch(touch);
                }
            }
            InputEvent::FocusLost => {
                self.clear_keys();
                self.look_delta = Vec2::ZERO;
            }
        }
    }

    fn movement_axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.is_key_pressed(&self.bindings.forward) || self.is_key_pressed("ArrowUp") {
            axes.y += 1.0;
        }
        if self.is_key_pressed(&self.bindings.backward) || self.is_key_pressed("ArrowDown") {
            axes.y -= 1.0;
        }
        if self.is_key_pressed(&self.bindings.right) || self.is_key_pressed("ArrowRight") {
            axes.x += 1.0;
        }
        if self.is_key_pressed(&self.bindings.left) || self.is_key_pressed("ArrowLeft") {
            axes.x -= 1.0;
        }
        axes
    }

    /// Produce this tick's input frame. Called exactly once per tick.
    ///
    /// Keyboard/mouse wins unless both movement axes rest at exactly zero
    /// while a touch layer is present, in which case the whole frame is
    /// substituted from touch. The zero check is a policy quirk carried over
    /// deliberately: resting keys are indistinguishable from "no keyboard".
    pub fn poll(&mut self) -> InputFrame {
        // Advance the touch layer first so its release sweep runs even on
        // keyboard ticks.
        let touch_frame = self.poll_touch();

        let axes = self.movement_axes();
        let look = std::mem::replace(&mut self.look_delta, Vec2::ZERO);
        let jump = std::mem::take(&mut self.jump_edge);
        let crouch = std::mem::take(&mut self.crouch_edge);

        if axes == Vec2::ZERO {
            if let Some(frame) = touch_frame {
                return frame;
            }
        }

        InputFrame {
            move_axes: axes,
            look_delta: look,
            jump_pressed: jump,
            sprint_active: self.is_key_pressed(&self.bindings.sprint),
            crouch_toggled: crouch,
            source: InputSource::KeyMouse,
        }
    }

    /// Build this tick's touch frame, or None if no touch layer is
    /// configured. Stick tracking already happened at event time; this runs
    /// the release sweep and consumes the latches so that edge signals stay
    /// one-tick wide.
    fn poll_touch(&mut self) -> Option<InputFrame> {
        let controls = self.touch.as_mut()?;

        // Ended touches leave the active set the tick that saw them, so the
        // sweep below also releases sticks whose touch vanished eventlessly.
        self.touches
            .retain(|t| !matches!(t.phase, TouchPhase::Ended | TouchPhase::Cancelled));
        let snapshot: Vec<TouchPoint> = self
            .touches
            .iter()
            .map(|t| TouchPoint { id: t.id, phase: TouchPhase::Stationary, position: t.position })
            .collect();
        controls.release_lost(&snapshot);

        let crouching = controls.is_crouching();
        let crouch_toggled = crouching != self.last_touch_crouch;
        self.last_touch_crouch = crouching;

        Some(InputFrame {
            move_axes: controls.movement_input(),
            look_delta: controls.look_input(),
            jump_pressed: controls.take_jump(),
            sprint_active: controls.is_sprinting(),
            crouch_toggled,
            source: InputSource::Touch,
        })
    }
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::new(KeyBindings::default(), None)
    }
}
