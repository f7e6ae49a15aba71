//! Position types for spawns, zone points and safe spots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer world position
///
/// Wire positions arrive either as `i16` (spawn records) or `f32`
/// (zone records). Both collapse to whole units here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Truncate floating point coordinates toward zero
    pub fn truncated(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
            z: z as i32,
        }
    }

    /// Round floating point coordinates to the nearest integer
    pub fn rounded(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
            z: z.round() as i32,
        }
    }

    /// The spatial key used to correlate recurring spawns at this spot
    pub fn key(self) -> SpatialKey {
        SpatialKey {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    /// Planar distance to another point
    pub fn distance_to(self, other: Point3) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Composite key identifying a location where spawns recur
///
/// Unrelated mobs that pass through the same whole-unit location
/// share a key. That collision is tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpatialKey {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl SpatialKey {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn point(self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

impl fmt::Display for SpatialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncation_toward_zero() {
        let p = Point3::truncated(100.9, -200.9, 5.2);
        assert_eq!(p, Point3::new(100, -200, 5));
    }

    #[test]
    fn test_rounding() {
        let p = Point3::rounded(10.5, -3.4, 0.49);
        assert_eq!(p, Point3::new(11, -3, 0));
    }

    #[test]
    fn test_key_display() {
        let key = Point3::new(100, 200, 5).key();
        assert_eq!(key.to_string(), "100:200:5");
        assert_eq!(key.point(), Point3::new(100, 200, 5));
    }

    #[test]
    fn test_distance_calculation() {
        let a = Point3::new(0, 0, 0);
        let b = Point3::new(3, 4, 100);
        assert!((a.distance_to(b) - 5.0).abs() < 0.001);
    }
}
