//! Terrain queries for patrol edge/wall detection
//!
//! Enemies probe a point ahead of their feet for ground and cast a short
//! ray forward for walls. The probe geometry lives in the enemy config;
//! this module only answers "is there ground here" and "is a wall ahead".

use pulse_core::math::Vec2;

/// Environment queries the patrol logic runs each tick
pub trait TerrainProbe {
    /// Whether solid ground exists within `radius` of `point`
    fn has_ground(&self, point: Vec2, radius: f32) -> bool;
    /// Whether a wall lies within `distance` of `origin` in the `facing`
    /// direction (`facing` is ±1)
    fn wall_ahead(&self, origin: Vec2, facing: f32, distance: f32) -> bool;
}

/// A flat floor strip with optional vertical walls
///
/// Ground exists for any x in `[min_x, max_x]` (expanded by the probe
/// radius); walls are infinite vertical planes at fixed x positions.
/// Enough terrain for patrol tests and the demo scene.
#[derive(Debug, Clone)]
pub struct StripTerrain {
    min_x: f32,
    max_x: f32,
    walls: Vec<f32>,
}

impl StripTerrain {
    pub fn new(min_x: f32, max_x: f32) -> Self {
        Self {
            min_x,
            max_x,
            walls: Vec::new(),
        }
    }

    /// Ground everywhere, no walls
    pub fn unbounded() -> Self {
        Self::new(f32::NEG_INFINITY, f32::INFINITY)
    }

    pub fn with_wall(mut self, x: f32) -> Self {
        self.walls.push(x);
        self
    }
}

impl TerrainProbe for StripTerrain {
    fn has_ground(&self, point: Vec2, radius: f32) -> bool {
        point.x >= self.min_x - radius && point.x <= self.max_x + radius
    }

    fn wall_ahead(&self, origin: Vec2, facing: f32, distance: f32) -> bool {
        let sign = facing.signum();
        self.walls.iter().any(|&wall| {
            let delta = (wall - origin.x) * sign;
            delta >= 0.0 && delta <= distance
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_edges() {
        let t = StripTerrain::new(-2.0, 2.0);
        assert!(t.has_ground(Vec2::new(0.0, 0.0), 0.08));
        assert!(t.has_ground(Vec2::new(2.05, 0.0), 0.08));
        assert!(!t.has_ground(Vec2::new(2.2, 0.0), 0.08));
    }

    #[test]
    fn test_wall_is_directional() {
        let t = StripTerrain::unbounded().with_wall(1.0);
        assert!(t.wall_ahead(Vec2::new(0.9, 0.0), 1.0, 0.14));
        assert!(!t.wall_ahead(Vec2::new(0.9, 0.0), -1.0, 0.14));
        assert!(!t.wall_ahead(Vec2::new(0.5, 0.0), 1.0, 0.14));
    }
}
