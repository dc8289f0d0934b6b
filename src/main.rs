use winit::{
    event::{DeviceEvent, ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::Window,
};
use glam::Vec2;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

// Import from the library crate
use strider::{
    logging,
    app::{AppContext, Platform, ScreenInfo},
    controller::{FrameLoopContext, InputEvent, LocomotionSettings, TouchPhase, TouchPoint},
    model::{Aabb, Scene},
};

struct App {
    window: Arc<Window>,
    frame: FrameLoopContext,

    // Input handling
    mouse_locked: bool,

    // Frame timing
    last_frame_time: Instant,
    status_timer: f32,
}

/// Translate a winit logical key into the platform-agnostic key string the
/// aggregator's bindings use.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_lowercase()),
        Key::Named(NamedKey::Space) => Some(" ".to_string()),
        Key::Named(NamedKey::Shift) => Some("Shift".to_string()),
        Key::Named(NamedKey::Control) => Some("Control".to_string()),
        Key::Named(NamedKey::Escape) => Some("Escape".to_string()),
        Key::Named(NamedKey::ArrowUp) => Some("ArrowUp".to_string()),
        Key::Named(NamedKey::ArrowDown) => Some("ArrowDown".to_string()),
        Key::Named(NamedKey::ArrowLeft) => Some("ArrowLeft".to_string()),
        Key::Named(NamedKey::ArrowRight) => Some("ArrowRight".to_string()),
        _ => None,
    }
}

impl App {
    fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // STRIDER_TOUCH=1 forces the mobile input layer for touch testing
        let platform = if std::env::var("STRIDER_TOUCH").is_ok() {
            Platform::Mobile
        } else {
            Platform::Desktop
        };

        let ctx = AppContext::init(
            platform,
            ScreenInfo { width: size.width as f32, height: size.height as f32 },
        )?;

        // A couple of crates to bump into and a low overhang to crouch under
        let scene = Scene::with_obstacles(vec![
            Aabb::new(glam::Vec3::new(3.0, 0.0, -1.0), glam::Vec3::new(5.0, 1.0, 1.0)),
            Aabb::new(glam::Vec3::new(-5.0, 1.0, -2.0), glam::Vec3::new(-3.0, 1.2, 2.0)),
        ]);
        let frame = FrameLoopContext::new(&ctx, scene, LocomotionSettings::default())?;

        Ok(Self {
            window,
            frame,
            mouse_locked: false,
            last_frame_time: Instant::now(),
            status_timer: 0.0,
        })
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: KeyEvent { state, logical_key, repeat, .. }, .. } => {
                if *repeat {
                    return true;
                }
                if let Some(key) = key_name(logical_key) {
                    match state {
                        ElementState::Pressed => {
                            // Unlock mouse on Escape
                            if key == "Escape" {
                                self.mouse_locked = false;
                                let _ = self.window.set_cursor_visible(true);
                                let _ = self.window.set_cursor_grab(winit::window::CursorGrabMode::None);
                            }
                            self.frame.handle_event(InputEvent::KeyDown(key));
                        }
                        ElementState::Released => {
                            self.frame.handle_event(InputEvent::KeyUp(key));
                        }
                    }
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *state == ElementState::Pressed && *button == MouseButton::Left {
                    self.mouse_locked = true;
                    let _ = self.window.set_cursor_visible(false);
                    let _ = self.window.set_cursor_grab(winit::window::CursorGrabMode::Locked);
                }
                true
            }
            WindowEvent::Touch(touch) => {
                let phase = match touch.phase {
                    winit::event::TouchPhase::Started => TouchPhase::Began,
                    winit::event::TouchPhase::Moved => TouchPhase::Moved,
                    winit::event::TouchPhase::Ended => TouchPhase::Ended,
                    winit::event::TouchPhase::Cancelled => TouchPhase::Cancelled,
                };
                // winit's y grows downward; flip so an up-swipe is +y
                let height = self.window.inner_size().height as f32;
                let position = Vec2::new(
                    touch.location.x as f32,
                    height - touch.location.y as f32,
                );
                self.frame.handle_event(InputEvent::Touch(TouchPoint {
                    id: touch.id,
                    phase,
                    position,
                }));
                true
            }
            WindowEvent::Focused(false) => {
                self.frame.handle_event(InputEvent::FocusLost);
                true
            }
            _ => false,
        }
    }

    fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        if self.mouse_locked {
            self.frame.handle_event(InputEvent::MouseMove {
                dx: dx as f32,
                dy: dy as f32,
            });
        }
    }

    fn update(&mut self, dt: f32) {
        let report = self.frame.update(dt);

        self.status_timer += dt;
        if self.status_timer >= 1.0 {
            self.status_timer = 0.0;
            let pos = self.frame.body.capsule.position;
            info!(
                "pos ({:.2}, {:.2}, {:.2}) yaw {:.2} pitch {:.2} grounded {} crouching {} paused {}",
                pos.x,
                pos.y,
                pos.z,
                self.frame.camera.yaw,
                self.frame.camera.pitch,
                report.grounded,
                self.frame.locomotion.is_crouching(),
                self.frame.menu.is_paused(),
            );
        }
    }
}

#[allow(deprecated)]
fn main() -> anyhow::Result<()> {
    logging::init();

    let event_loop = EventLoop::new().unwrap();
    let window_attributes = Window::default_attributes()
        .with_title("strider")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = event_loop.create_window(window_attributes).unwrap();
    let window = Arc::new(window);

    let mut app = App::new(window.clone())?;

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::RedrawRequested => {
                            let now = Instant::now();
                            let dt = (now - app.last_frame_time).as_secs_f32().clamp(0.0, 0.1);
                            app.last_frame_time = now;

                            app.update(dt);
                        }
                        _ => {}
                    }
                }
            }
            Event::DeviceEvent { event: DeviceEvent::MouseMotion { delta }, .. } => {
                app.handle_mouse_motion(delta.0, delta.1);
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        }
    }).unwrap();

    Ok(())
}
