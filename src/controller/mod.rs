// CONTROLLER: Input, game logic, and update loop
pub mod input;
pub mod touch;
pub mod locomotion;
pub mod planar;
pub mod frame_loop;

pub use input::{InputAggregator, InputEvent, InputFrame, InputSource, KeyBindings};
pub use touch::{TouchControls, TouchPhase, TouchPoint, TouchSettings, VirtualJoystick};
pub use locomotion::{LocomotionController, LocomotionSettings, TickReport};
pub use planar::PlanarMover;
pub use frame_loop::FrameLoopContext;
