// quaternion.rs -- Quaternions (x, y, z, w) with w the scalar part.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::identity()
    }
}

impl Quaternion {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Quaternion { x, y, z, w }
    }

    pub const fn zero() -> Self {
        Quaternion::new(0.0, 0.0, 0.0, 0.0)
    }

    pub const fn identity() -> Self {
        Quaternion::new(0.0, 0.0, 0.0, 1.0)
    }

    pub const fn i() -> Self {
        Quaternion::new(1.0, 0.0, 0.0, 0.0)
    }

    pub const fn j() -> Self {
        Quaternion::new(0.0, 1.0, 0.0, 0.0)
    }

    pub const fn k() -> Self {
        Quaternion::new(0.0, 0.0, 1.0, 0.0)
    }

    pub fn conjugate(&self) -> Self {
        Quaternion::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scale to unit norm. The zero quaternion is left unchanged.
    pub fn normalize(&mut self) {
        let n = self.norm();
        if n > 0.0 {
            *self = *self / n;
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Multiplicative inverse; zero for the zero quaternion.
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.dot(self)
    }

    /// Rotate `p` by this (normalized) quaternion: q * (p, 0) * q^-1.
    pub fn rotate(&self, p: &Point3) -> Point3 {
        let q = self.normalized();
        let v = Quaternion::new(p.x, p.y, p.z, 0.0);
        let r = q * v * q.conjugate();
        Point3::new(r.x, r.y, r.z)
    }

    /// q and -q represent the same rotation.
    pub fn same_rotation(&self, other: &Quaternion, tolerance: f64) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        (a.dot(&b).abs() - 1.0).abs() < tolerance
    }
}

/// Hamilton product.
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, b: Quaternion) -> Quaternion {
        let a = self;
        Quaternion {
            x: a.x * b.w + a.y * b.z - a.z * b.y + a.w * b.x,
            y: -a.x * b.z + a.y * b.w + a.z * b.x + a.w * b.y,
            z: a.x * b.y - a.y * b.x + a.z * b.w + a.w * b.z,
            w: -a.x * b.x - a.y * b.y - a.z * b.z + a.w * b.w,
        }
    }
}

impl Mul<f64> for Quaternion {
    type Output = Quaternion;
    fn mul(self, s: f64) -> Quaternion {
        Quaternion::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

/// Division by zero yields the zero quaternion.
impl Div<f64> for Quaternion {
    type Output = Quaternion;
    fn div(self, s: f64) -> Quaternion {
        if s == 0.0 {
            return Quaternion::zero();
        }
        Quaternion::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

impl Add for Quaternion {
    type Output = Quaternion;
    fn add(self, o: Quaternion) -> Quaternion {
        Quaternion::new(self.x + o.x, self.y + o.y, self.z + o.z, self.w + o.w)
    }
}

impl Sub for Quaternion {
    type Output = Quaternion;
    fn sub(self, o: Quaternion) -> Quaternion {
        Quaternion::new(self.x - o.x, self.y - o.y, self.z - o.z, self.w - o.w)
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;
    fn neg(self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[w:{}, x:{}, y:{}, z:{}]", self.w, self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn close(a: &Quaternion, b: &Quaternion) {
        assert!(
            (a.x - b.x).abs() < 1e-12
                && (a.y - b.y).abs() < 1e-12
                && (a.z - b.z).abs() < 1e-12
                && (a.w - b.w).abs() < 1e-12,
            "{a} != {b}"
        );
    }

    #[test]
    fn test_basis_products() {
        let (i, j, k) = (Quaternion::i(), Quaternion::j(), Quaternion::k());
        close(&(i * j), &k);
        close(&(j * k), &i);
        close(&(k * i), &j);
        close(&(i * i), &-Quaternion::identity());
        close(&(i * j * k), &-Quaternion::identity());
    }

    #[test]
    fn test_product() {
        let a = Quaternion::new(2.0, 3.0, 4.0, 1.0);
        let b = Quaternion::new(6.0, 7.0, 8.0, 5.0);
        // (1 + 2i + 3j + 4k)(5 + 6i + 7j + 8k) = -60 + 12i + 30j + 24k
        close(&(a * b), &Quaternion::new(12.0, 30.0, 24.0, -60.0));
    }

    #[test]
    fn test_norm_conjugate_inverse() {
        let q = Quaternion::new(1.0, 2.0, 2.0, 4.0);
        assert!((q.norm() - 5.0).abs() < 1e-12);
        close(&q.conjugate(), &Quaternion::new(-1.0, -2.0, -2.0, 4.0));
        close(&(q * q.inverse()), &Quaternion::identity());
        assert!((q.normalized().norm() - 1.0).abs() < 1e-12);
        close(&Quaternion::zero().inverse(), &Quaternion::zero());
    }

    #[test]
    fn test_divide_by_zero() {
        close(&(Quaternion::new(1.0, 1.0, 1.0, 1.0) / 0.0), &Quaternion::zero());
    }

    #[test]
    fn test_rotate_point() {
        // 90 degrees about z.
        let q = Quaternion::new(0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2);
        let p = q.rotate(&Point3::new(1.0, 0.0, 0.0));
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.to_string(), "[w:4, x:1, y:2, z:3]");
    }

    #[test]
    fn test_same_rotation_sign() {
        let q = Quaternion::new(0.1, 0.2, 0.3, 0.9);
        assert!(q.same_rotation(&-q, 1e-12));
        assert!(!q.same_rotation(&Quaternion::identity(), 1e-6));
    }
}
