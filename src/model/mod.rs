// MODEL: Game state and data
pub mod camera;
pub mod scene;

pub use camera::CameraRig;
pub use scene::{Aabb, Capsule, PhysicsBody, PlayerBody, Scene};
