use glam::{Quat, Vec3};

/// First-person camera rig: yaw/pitch orientation plus a local eye offset
/// that drops while the body is crouched.
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
    pub up: Vec3,
    /// Eye position relative to the body's feet when standing.
    pub base_eye: Vec3,
    /// Vertical compensation applied while the collision capsule is shorter
    /// than its standing height (half the height delta).
    pub crouch_drop: f32,
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            up: Vec3::Y,
            base_eye: Vec3::new(0.0, 1.6, 0.0),
            crouch_drop: 0.0,
        }
    }

    /// Full view direction including pitch.
    pub fn forward(&self) -> Vec3 {
        let cy = self.yaw;
        let cp = self.pitch.clamp(-1.5533, 1.5533); // Slightly less than π/2 to avoid gimbal lock
        Vec3::new(cy.cos() * cp.cos(), cp.sin(), cy.sin() * cp.cos()).normalize()
    }

    /// Horizontal facing direction (body forward), yaw only.
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Horizontal right vector of the body.
    pub fn flat_right(&self) -> Vec3 {
        self.flat_forward().cross(self.up).normalize()
    }

    /// Camera rotation relative to the body: pitch only, the body itself
    /// carries the yaw.
    pub fn local_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch)
    }

    /// Eye position relative to the body's feet, crouch compensation applied.
    pub fn local_position(&self) -> Vec3 {
        self.base_eye - Vec3::new(0.0, self.crouch_drop, 0.0)
    }

    /// World-space eye position for a body standing at `body_pos` (feet).
    pub fn eye_position(&self, body_pos: Vec3) -> Vec3 {
        body_pos + self.local_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_vectors_are_horizontal() {
        let mut rig = CameraRig::new();
        rig.yaw = 1.2;
        rig.pitch = 0.8;
        assert_eq!(rig.flat_forward().y, 0.0);
        assert_eq!(rig.flat_right().y, 0.0);
        assert!((rig.flat_forward().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_crouch_drop_lowers_eye() {
        let mut rig = CameraRig::new();
        let standing = rig.local_position();
        rig.crouch_drop = 0.6;
        assert!((standing.y - rig.local_position().y - 0.6).abs() < 1e-6);
    }
}
