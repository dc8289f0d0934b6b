// Re-export all public modules so they can be used from main.rs
pub mod app;
pub mod logging;
pub mod ui;

// MVC Architecture
pub mod model;
pub mod controller;

pub use app::{AppContext, Platform, ScreenInfo};
pub use controller::{
    FrameLoopContext, InputAggregator, InputEvent, InputFrame, InputSource, KeyBindings,
    LocomotionController, LocomotionSettings, PlanarMover, TickReport, TouchControls, TouchPhase,
    TouchPoint, TouchSettings, VirtualJoystick,
};
pub use model::{Aabb, CameraRig, Capsule, PhysicsBody, PlayerBody, Scene};
pub use ui::{DisplayControl, EscapeMenu, MainMenu, SceneLoader};
