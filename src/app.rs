use anyhow::{bail, Result};
use tracing::info;

use crate::controller::touch::{TouchControls, TouchSettings};

/// Input platform selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Keyboard and mouse, no touch layer.
    Desktop,
    /// Touch screen; a virtual joystick layer is created.
    Mobile,
}

#[derive(Debug, Clone, Copy)]
pub struct ScreenInfo {
    pub width: f32,
    pub height: f32,
}

/// Application-wide context, constructed once at process start and passed
/// explicitly to the components that need it.
pub struct AppContext {
    platform: Platform,
    screen: ScreenInfo,
    /// Configuration-time joystick tunables, consumed by
    /// `build_touch_layer`; changes after a session is wired have no effect
    /// on it.
    pub touch_settings: TouchSettings,
    touch_visible: bool,
}

impl AppContext {
    pub fn init(platform: Platform, screen: ScreenInfo) -> Result<Self> {
        if screen.width <= 0.0 || screen.height <= 0.0 {
            bail!(
                "invalid screen dimensions {}x{}: cannot place the joystick midline",
                screen.width,
                screen.height
            );
        }
        info!(?platform, width = screen.width, height = screen.height, "app context initialized");
        Ok(Self {
            platform,
            screen,
            touch_settings: TouchSettings::default(),
            touch_visible: platform == Platform::Mobile,
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn screen(&self) -> ScreenInfo {
        self.screen
    }

    pub fn is_mobile(&self) -> bool {
        self.platform == Platform::Mobile
    }

    /// Build the touch layer for this platform, or None on desktop.
    pub fn build_touch_layer(&self) -> Option<TouchControls> {
        if self.is_mobile() {
            Some(TouchControls::new(self.screen.width, self.touch_settings))
        } else {
            None
        }
    }

    /// Show or hide the on-screen controls (host UI visibility only; the
    /// input layer keeps existing).
    pub fn set_touch_controls_visible(&mut self, visible: bool) {
        self.touch_visible = visible;
        info!(visible, "touch controls visibility changed");
    }

    pub fn touch_controls_visible(&self) -> bool {
        self.touch_visible
    }

    /// Explicit teardown counterpart to `init`.
    pub fn teardown(self) {
        info!("app context shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_has_no_touch_layer() {
        let ctx = AppContext::init(
            Platform::Desktop,
            ScreenInfo { width: 1280.0, height: 720.0 },
        )
        .unwrap();
        assert!(ctx.build_touch_layer().is_none());
        assert!(!ctx.touch_controls_visible());
    }

    #[test]
    fn test_mobile_builds_touch_layer() {
        let ctx = AppContext::init(
            Platform::Mobile,
            ScreenInfo { width: 800.0, height: 600.0 },
        )
        .unwrap();
        let layer = ctx.build_touch_layer().expect("mobile platform carries a touch layer");
        assert_eq!(layer.screen_width, 800.0);
        assert!(ctx.touch_controls_visible());
    }

    #[test]
    fn test_touch_settings_flow_into_layer() {
        let mut ctx = AppContext::init(
            Platform::Mobile,
            ScreenInfo { width: 800.0, height: 600.0 },
        )
        .unwrap();
        ctx.touch_settings.joystick_radius = 80.0;
        let layer = ctx.build_touch_layer().unwrap();
        assert_eq!(layer.settings.joystick_radius, 80.0);
    }

    #[test]
    fn test_zero_screen_is_a_setup_error() {
        assert!(AppContext::init(
            Platform::Mobile,
            ScreenInfo { width: 0.0, height: 600.0 },
        )
        .is_err());
    }
}
