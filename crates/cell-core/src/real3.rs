//! 3-D position/displacement vector.
//!
//! `Real3` uses `f64` throughout: cell volumes are cubic in diameter, and a
//! long run of small growth increments accumulates visible drift at `f32`
//! precision.  Memory is not the bottleneck here (one vector per cell, not
//! per grid voxel).

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 3-component real vector — position, displacement, or gradient.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Real3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Real3 {
    pub const ZERO: Real3 = Real3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `v`.
    #[inline]
    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Neighbor queries compare against squared radii, so the square root is
    /// never taken on the hot path.
    #[inline]
    pub fn squared_distance(self, other: Real3) -> f64 {
        let d = other - self;
        d.x * d.x + d.y * d.y + d.z * d.z
    }

    #[inline]
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Component-wise clamp to `[lo, hi]`.  Returns the clamped vector and
    /// `true` if any component was moved.
    pub fn clamp_to(self, lo: f64, hi: f64) -> (Real3, bool) {
        let c = Real3 {
            x: self.x.clamp(lo, hi),
            y: self.y.clamp(lo, hi),
            z: self.z.clamp(lo, hi),
        };
        (c, c != self)
    }

    /// Conversion for spatial-index storage.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Real3 {
    #[inline]
    fn from(a: [f64; 3]) -> Self {
        Self { x: a[0], y: a[1], z: a[2] }
    }
}

impl Add for Real3 {
    type Output = Real3;
    #[inline]
    fn add(self, rhs: Real3) -> Real3 {
        Real3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Real3 {
    #[inline]
    fn add_assign(&mut self, rhs: Real3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Real3 {
    type Output = Real3;
    #[inline]
    fn sub(self, rhs: Real3) -> Real3 {
        Real3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Real3 {
    type Output = Real3;
    #[inline]
    fn mul(self, rhs: f64) -> Real3 {
        Real3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Real3 {
    type Output = Real3;
    #[inline]
    fn neg(self) -> Real3 {
        Real3::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Real3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
