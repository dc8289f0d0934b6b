use glam::Vec3;

/// Engine-facing seam for the character's collision capsule. The locomotion
/// controller only ever talks to the physics layer through this trait.
pub trait PhysicsBody {
    /// Apply a displacement and resolve collisions. Returns whether the body
    /// rests on a supporting surface after the move.
    fn move_by(&mut self, delta: Vec3) -> bool;
    /// Grounded flag as of the last resolved move.
    fn grounded(&self) -> bool;
    /// Feet position of the capsule.
    fn position(&self) -> Vec3;
    fn set_height(&mut self, height: f32);
    fn set_center_y(&mut self, center_y: f32);
    /// True if an upward cast of `length` from the feet hits an obstruction.
    fn clearance_blocked(&self, length: f32) -> bool;
}

/// Axis-aligned box obstacle.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    fn contains_xz(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.z >= self.min.z && p.z <= self.max.z
    }
}

/// Minimal collision world: a flat ground plane plus box obstacles. Stands in
/// for the host engine's physics layer in the demo binary and in tests.
pub struct Scene {
    pub ground_y: f32,
    pub obstacles: Vec<Aabb>,
}

impl Scene {
    pub fn new() -> Self {
        Self { ground_y: 0.0, obstacles: Vec::new() }
    }

    pub fn with_obstacles(obstacles: Vec<Aabb>) -> Self {
        Self { ground_y: 0.0, obstacles }
    }

    /// Supporting surface for a move from `start` ending at `end`: the ground
    /// plane, or a box top the feet crossed on the way down. Resolving
    /// against the segment rather than the end position keeps a fast fall
    /// from tunneling through a top in one step.
    fn floor_height(&self, start: Vec3, end: Vec3) -> f32 {
        let mut floor = self.ground_y;
        for b in &self.obstacles {
            if b.contains_xz(end)
                && start.y >= b.max.y - 0.05
                && end.y <= b.max.y
                && b.max.y > floor
            {
                floor = b.max.y;
            }
        }
        floor
    }

    /// True if the vertical segment [y, y + length] above `p` intersects an
    /// obstacle.
    fn blocked_above(&self, p: Vec3, length: f32) -> bool {
        self.obstacles.iter().any(|b| {
            b.contains_xz(p) && b.min.y < p.y + length && b.max.y > p.y
        })
    }
}

/// Capsule state mirrored from the host engine: feet position, collision
/// height/center, and the grounded flag of the last move.
#[derive(Debug, Clone, Copy)]
pub struct Capsule {
    pub position: Vec3,
    pub height: f32,
    pub center_y: f32,
    pub grounded: bool,
}

/// A capsule resolved against a `Scene`. Demo/test implementation of
/// `PhysicsBody`.
pub struct PlayerBody {
    pub scene: Scene,
    pub capsule: Capsule,
}

impl PlayerBody {
    pub fn new(scene: Scene, height: f32) -> Self {
        let ground_y = scene.ground_y;
        Self {
            scene,
            capsule: Capsule {
                position: Vec3::new(0.0, ground_y, 0.0),
                height,
                center_y: height / 2.0,
                grounded: true,
            },
        }
    }
}

impl PhysicsBody for PlayerBody {
    fn move_by(&mut self, delta: Vec3) -> bool {
        let start = self.capsule.position;
        self.capsule.position += delta;
        let floor = self.scene.floor_height(start, self.capsule.position);
        if self.capsule.position.y <= floor {
            self.capsule.position.y = floor;
            self.capsule.grounded = true;
        } else {
            self.capsule.grounded = false;
        }
        self.capsule.grounded
    }

    fn grounded(&self) -> bool {
        self.capsule.grounded
    }

    fn position(&self) -> Vec3 {
        self.capsule.position
    }

    fn set_height(&mut self, height: f32) {
        self.capsule.height = height;
    }

    fn set_center_y(&mut self, center_y: f32) {
        self.capsule.center_y = center_y;
    }

    fn clearance_blocked(&self, length: f32) -> bool {
        self.scene.blocked_above(self.capsule.position, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_to_ground_and_reports_grounded() {
        let mut body = PlayerBody::new(Scene::new(), 1.8);
        body.capsule.position = Vec3::new(0.0, 3.0, 0.0);
        body.capsule.grounded = false;

        assert!(!body.move_by(Vec3::new(0.0, -1.0, 0.0)), "still airborne at y=2");
        assert!(body.move_by(Vec3::new(0.0, -5.0, 0.0)), "clamped to ground");
        assert_eq!(body.position().y, 0.0);
    }

    fn crate_scene() -> Scene {
        Scene::with_obstacles(vec![Aabb::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.5, 1.0),
        )])
    }

    #[test]
    fn test_stands_on_obstacle_top() {
        let mut body = PlayerBody::new(crate_scene(), 1.8);
        body.capsule.position = Vec3::new(0.0, 2.0, 0.0);
        assert!(body.move_by(Vec3::new(0.0, -3.0, 0.0)));
        assert_eq!(body.position().y, 0.5);
    }

    #[test]
    fn test_fast_fall_lands_on_top_not_inside() {
        // A single large step crossing the top must land on it, not pass
        // through to the ground plane inside the box
        let mut body = PlayerBody::new(crate_scene(), 1.8);
        body.capsule.position = Vec3::new(0.0, 30.0, 0.0);
        assert!(body.move_by(Vec3::new(0.0, -50.0, 0.0)));
        assert_eq!(body.position().y, 0.5);
    }

    #[test]
    fn test_walking_on_top_stays_grounded() {
        let mut body = PlayerBody::new(crate_scene(), 1.8);
        body.capsule.position = Vec3::new(0.0, 0.5, 0.0);
        body.capsule.grounded = true;
        assert!(body.move_by(Vec3::new(0.3, 0.0, 0.0)));
        assert_eq!(body.position().y, 0.5);
    }

    #[test]
    fn test_stepping_off_top_goes_airborne() {
        let mut body = PlayerBody::new(crate_scene(), 1.8);
        body.capsule.position = Vec3::new(0.9, 0.5, 0.0);
        body.capsule.grounded = true;
        assert!(!body.move_by(Vec3::new(0.5, 0.0, 0.0)), "off the edge, nothing supports at 0.5");
        assert!(body.move_by(Vec3::new(0.0, -1.0, 0.0)), "falls to the ground plane beside the box");
        assert_eq!(body.position().y, 0.0);
    }

    #[test]
    fn test_body_under_top_is_not_lifted() {
        let mut body = PlayerBody::new(crate_scene(), 1.8);
        // Crouched under the box footprint at ground level
        body.capsule.position = Vec3::new(0.0, 0.0, 0.0);
        body.capsule.grounded = true;
        assert!(body.move_by(Vec3::new(0.2, 0.0, 0.0)));
        assert_eq!(body.position().y, 0.0, "a top above the feet is not a supporting floor");
    }

    #[test]
    fn test_clearance_blocked_by_low_ceiling() {
        let scene = Scene::with_obstacles(vec![Aabb::new(
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.2, 1.0),
        )]);
        let body = PlayerBody::new(scene, 0.6);
        assert!(body.clearance_blocked(1.8), "ceiling at 1.0 blocks a 1.8 cast");
        assert!(!body.clearance_blocked(0.9), "short cast passes under it");
    }
}
