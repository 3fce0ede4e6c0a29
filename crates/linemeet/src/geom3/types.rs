//! Core 3D value types: `Vec3` and `Line3`.
//!
//! - `Vec3`: immutable `Copy` triple with `std::ops` arithmetic.
//! - `Line3`: start + unit direction; direction normalized on construction.

use nalgebra::Vector3;

use super::GeomError;

/// 3D vector `(x, y, z)`.
///
/// Value type: every operation returns a new instance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    #[inline]
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }
    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Component by axis index: 0→x, 1→y, 2→z.
    #[inline]
    pub fn get(&self, index: usize) -> Result<f64, GeomError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(GeomError::InvalidIndex(index)),
        }
    }

    /// Components as an array in axis order.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean norm (non-negative).
    #[inline]
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector with the same direction.
    ///
    /// Fails with `ZeroLength` when the length is zero (or not finite).
    pub fn normalized(&self) -> Result<Self, GeomError> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return Err(GeomError::ZeroLength);
        }
        Ok(*self / len)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product `self × other`; anticommutative and orthogonal to both.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

/// Free-function form of [`Vec3::cross`].
#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(&b)
}

/// Free-function form of [`Vec3::dot`].
#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a.dot(&b)
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl std::ops::Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Self::Output {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}
impl std::ops::Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, sc: f64) -> Self::Output {
        Vec3::new(self.x * sc, self.y * sc, self.z * sc)
    }
}
impl std::ops::Mul<Vec3> for f64 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Self::Output {
        v * self
    }
}
impl std::ops::Div<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, sc: f64) -> Self::Output {
        Vec3::new(self.x / sc, self.y / sc, self.z / sc)
    }
}

impl From<Vector3<f64>> for Vec3 {
    #[inline]
    fn from(v: Vector3<f64>) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}
impl From<Vec3> for Vector3<f64> {
    #[inline]
    fn from(v: Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}
impl From<[f64; 3]> for Vec3 {
    #[inline]
    fn from(a: [f64; 3]) -> Self {
        Vec3::new(a[0], a[1], a[2])
    }
}

/// Line in 3D: `P(t) = start + t · direction`.
///
/// Invariants:
/// - `direction` has unit length (normalized in `new`).
/// - Immutable after construction; fields are private.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line3 {
    start: Vec3,
    direction: Vec3,
}

impl Line3 {
    /// Fails with `ZeroLength` for a zero direction.
    pub fn new(start: Vec3, direction: Vec3) -> Result<Self, GeomError> {
        Ok(Self {
            start,
            direction: direction.normalized()?,
        })
    }
    #[inline]
    pub fn start(&self) -> Vec3 {
        self.start
    }
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }
    #[inline]
    pub fn point_at(&self, t: f64) -> Vec3 {
        self.start + self.direction * t
    }
    /// Same direction, start shifted by `movement`.
    #[inline]
    pub fn displaced(&self, movement: Vec3) -> Self {
        Self {
            start: self.start + movement,
            direction: self.direction,
        }
    }
    /// Shortest distance between two lines (infinite extent).
    ///
    /// Falls back to point-to-line distance when the directions are parallel.
    pub fn distance_to(&self, other: &Line3) -> f64 {
        let w = other.start - self.start;
        let n = self.direction.cross(&other.direction);
        let n_len = n.length();
        if n_len <= 1e-12 {
            return w.cross(&self.direction).length();
        }
        (w.dot(&n) / n_len).abs()
    }
}
