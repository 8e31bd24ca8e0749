use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// 2D world position / offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Squared Euclidean distance; cheaper than `distance` and orders the same
    pub fn distance_squared(self, other: Vec2) -> f32 {
        (self - other).length_squared()
    }

    pub fn scale(self, factor: f32) -> Self {
        Vec2::new(self.x * factor, self.y * factor)
    }

    /// Linear interpolation, `t` clamped to 0.0..=1.0
    pub fn lerp(self, to: Vec2, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        self + (to - self).scale(t)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_squared() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(b.distance_squared(a), 25.0);
    }

    #[test]
    fn test_lerp_clamps() {
        let a = Vec2::ZERO;
        let b = Vec2::new(0.0, 2.0);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(0.0, 1.0));
        assert_eq!(a.lerp(b, 3.0), b);
    }
}
