//! 3D Vector
//!
//! Minimal `f32` vector for positions, directions and camera vectors.
//! Y is up; the ground plane is X/Z.

use std::fmt;
use std::ops::{Add, Sub, Neg, Mul};
use serde::{Serialize, Deserialize};

/// 3D vector with `f32` components.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component (ground plane, left/right)
    pub x: f32,
    /// Y component (vertical)
    pub y: f32,
    /// Z component (ground plane, depth)
    pub z: f32,
}

impl Vec3 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// World up (+Y)
    pub const UP: Self = Self { x: 0.0, y: 1.0, z: 0.0 };

    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0, z: 0.0 };

    /// Unit vector pointing away from the default view (-Z)
    pub const FORWARD: Self = Self { x: 0.0, y: 0.0, z: -1.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector on the ground plane (y = 0).
    #[inline]
    pub const fn ground(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Unit vector on the ground plane for a yaw angle.
    ///
    /// Yaw 0 points along +Z, yaw π/2 along +X.
    #[inline]
    pub fn from_yaw(yaw: f32) -> Self {
        let (sin, cos) = yaw.sin_cos();
        Self::ground(sin, cos)
    }

    /// Yaw angle of the ground-plane projection (inverse of `from_yaw`).
    #[inline]
    pub fn yaw(self) -> f32 {
        self.x.atan2(self.z)
    }

    /// Scale by a scalar.
    #[inline]
    pub fn scale(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }

    /// Squared length (avoids sqrt).
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Length (magnitude).
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Normalize to unit length.
    /// Returns ZERO if length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Component bit patterns, for hashing.
    #[inline]
    pub fn to_bits(self) -> [u32; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl fmt::Debug for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec3({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_vec3_ops() {
        let a = Vec3::new(3.0, 4.0, 5.0);
        let b = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(a + b, Vec3::new(4.0, 6.0, 8.0));
        assert_eq!(a - b, Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(-b, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b * 2.0, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_vec3_distance() {
        let a = Vec3::ZERO;
        let b = Vec3::new(3.0, 0.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.length_squared(), 25.0);
    }

    #[test]
    fn test_vec3_normalize() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_yaw_round_trip() {
        let east = Vec3::from_yaw(FRAC_PI_2);
        assert!((east.x - 1.0).abs() < 1e-6);
        assert!(east.z.abs() < 1e-6);
        assert!((east.yaw() - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(Vec3::from_yaw(0.0), Vec3::ground(0.0, 1.0));
    }
}
