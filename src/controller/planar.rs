use glam::Vec2;

/// Trivial 2-D kinematic mover: position follows the input axes directly,
/// no gravity or collision.
pub struct PlanarMover {
    pub speed: f32,
}

impl PlanarMover {
    pub fn new() -> Self {
        Self { speed: 50.0 }
    }

    pub fn update(&self, position: &mut Vec2, axes: Vec2, dt: f32) {
        *position += axes * self.speed * dt;
    }
}

impl Default for PlanarMover {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_along_axes() {
        let mover = PlanarMover::new();
        let mut pos = Vec2::ZERO;
        mover.update(&mut pos, Vec2::new(1.0, -0.5), 0.1);
        assert_eq!(pos, Vec2::new(5.0, -2.5));
    }
}
