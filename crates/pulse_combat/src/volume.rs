//! Hit volumes for overlap tests
//!
//! Targets are tested as points against axis-aligned boxes (enemy melee)
//! and circles (player melee).

use pulse_core::math::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box, centered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitBox {
    pub center: Vec2,
    /// Full width x full height
    pub size: Vec2,
}

impl HitBox {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Box placed ahead of `origin` by `offset`, mirrored on x by `facing`
    /// (`facing` is ±1)
    pub fn forward(origin: Vec2, offset: Vec2, size: Vec2, facing: f32) -> Self {
        let center = Vec2::new(
            origin.x + facing.signum() * offset.x,
            origin.y + offset.y,
        );
        Self { center, size }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size * 0.5;
        (point.x - self.center.x).abs() <= half.x && (point.y - self.center.y).abs() <= half.y
    }
}

/// Circle volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitCircle {
    pub center: Vec2,
    pub radius: f32,
}

impl HitCircle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance(point) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_contains_boundary() {
        let b = HitBox::new(Vec2::ZERO, Vec2::new(2.0, 4.0));
        assert!(b.contains(Vec2::new(1.0, 2.0)));
        assert!(!b.contains(Vec2::new(1.01, 0.0)));
    }

    #[test]
    fn test_forward_box_mirrors_with_facing() {
        let right = HitBox::forward(Vec2::ZERO, Vec2::new(0.7, 0.2), Vec2::new(1.2, 1.4), 1.0);
        let left = HitBox::forward(Vec2::ZERO, Vec2::new(0.7, 0.2), Vec2::new(1.2, 1.4), -1.0);
        assert_eq!(right.center, Vec2::new(0.7, 0.2));
        assert_eq!(left.center, Vec2::new(-0.7, 0.2));
    }

    #[test]
    fn test_circle_contains() {
        let c = HitCircle::new(Vec2::new(1.0, 1.0), 0.9);
        assert!(c.contains(Vec2::new(1.5, 1.0)));
        assert!(!c.contains(Vec2::new(2.0, 1.0)));
    }
}
