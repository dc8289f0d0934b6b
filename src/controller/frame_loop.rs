/// Per-tick orchestration: input aggregation, locomotion, menu state
use anyhow::{bail, Result};
use tracing::trace;

use crate::app::AppContext;
use crate::controller::input::{InputAggregator, InputEvent, KeyBindings};
use crate::controller::locomotion::{LocomotionController, LocomotionSettings, TickReport};
use crate::model::{CameraRig, PlayerBody, Scene};
use crate::ui::EscapeMenu;

/// Owns the whole simulation side of a play session and advances it once per
/// rendered frame. Ordering per tick: poll → advance → physics moves.
pub struct FrameLoopContext {
    pub input: InputAggregator,
    pub locomotion: LocomotionController,
    pub camera: CameraRig,
    pub body: PlayerBody,
    pub menu: EscapeMenu,
}

impl FrameLoopContext {
    /// Wire up a session. Missing or inconsistent configuration is fatal
    /// here; steady-state ticks never fail.
    pub fn new(ctx: &AppContext, scene: Scene, settings: LocomotionSettings) -> Result<Self> {
        if settings.standing_height <= 0.0 || settings.crouch_height <= 0.0 {
            bail!("capsule heights must be positive");
        }
        if settings.crouch_height >= settings.standing_height {
            bail!(
                "crouch height {} must be below standing height {}",
                settings.crouch_height,
                settings.standing_height
            );
        }

        let body = PlayerBody::new(scene, settings.standing_height);
        Ok(Self {
            input: InputAggregator::new(KeyBindings::default(), ctx.build_touch_layer()),
            locomotion: LocomotionController::new(settings),
            camera: CameraRig::new(),
            body,
            menu: EscapeMenu::new(),
        })
    }

    /// Route a host event. Escape drives the pause menu; everything else
    /// lands in the aggregator.
    pub fn handle_event(&mut self, event: InputEvent) {
        if let InputEvent::KeyDown(key) = &event {
            if key == "Escape" {
                self.menu.handle_escape();
                return;
            }
        }
        self.input.process_event(&event);
    }

    /// Advance one tick. While the escape menu is open the delta is scaled
    /// to zero, freezing motion without skipping input edges.
    pub fn update(&mut self, dt: f32) -> TickReport {
        let dt = dt * self.menu.time_scale();
        let frame = self.input.poll();
        let report = self.locomotion.advance(&frame, dt, &mut self.body, &mut self.camera);
        trace!(
            source = ?frame.source,
            pos = ?self.body.capsule.position,
            grounded = report.grounded,
            speed = report.speed,
            "tick"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Platform, ScreenInfo};
    use glam::Vec3;

    fn ctx(platform: Platform) -> AppContext {
        AppContext::init(platform, ScreenInfo { width: 800.0, height: 600.0 }).unwrap()
    }

    fn session(platform: Platform) -> FrameLoopContext {
        FrameLoopContext::new(&ctx(platform), Scene::new(), LocomotionSettings::default()).unwrap()
    }

    #[test]
    fn test_bad_heights_are_fatal_at_setup() {
        let settings = LocomotionSettings {
            crouch_height: 2.0,
            standing_height: 1.8,
            ..Default::default()
        };
        assert!(FrameLoopContext::new(&ctx(Platform::Desktop), Scene::new(), settings).is_err());
    }

    #[test]
    fn test_keyboard_tick_moves_body() {
        let mut s = session(Platform::Desktop);
        s.handle_event(InputEvent::KeyDown("w".into()));
        let before = s.body.capsule.position;
        s.update(0.1);
        let after = s.body.capsule.position;
        assert!((after - before).length() > 0.0);
    }

    #[test]
    fn test_escape_pauses_motion_but_keeps_edges() {
        let mut s = session(Platform::Desktop);
        s.handle_event(InputEvent::KeyDown("Escape".into()));
        assert!(s.menu.is_paused());

        s.handle_event(InputEvent::KeyDown("w".into()));
        s.update(0.1);
        assert_eq!(s.body.capsule.position, Vec3::ZERO, "paused ticks must not move the body");

        s.handle_event(InputEvent::KeyDown("Escape".into()));
        assert!(!s.menu.is_paused());
        s.update(0.1);
        assert!(s.body.capsule.position.length() > 0.0);
    }

    #[test]
    fn test_mobile_session_gets_touch_layer() {
        let s = session(Platform::Mobile);
        assert!(s.input.has_touch_layer());
        let d = session(Platform::Desktop);
        assert!(!d.input.has_touch_layer());
    }
}
