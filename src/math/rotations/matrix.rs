// matrix.rs -- 3x3 rotation matrices.

use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point3;
use crate::math::linalg::{mat3_det, mat3_mul, mat3_transpose, mat3_vec3};

/// Row-major 3x3 rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationMatrix(pub [[f64; 3]; 3]);

impl Default for RotationMatrix {
    fn default() -> Self {
        RotationMatrix::identity()
    }
}

impl RotationMatrix {
    pub const fn identity() -> Self {
        RotationMatrix([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Elementary rotation of `angle` radians about axis 0 (x), 1 (y) or 2 (z).
    pub fn about_axis(axis: usize, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = [[0.0; 3]; 3];
        let (j, k) = ((axis + 1) % 3, (axis + 2) % 3);
        m[axis][axis] = 1.0;
        m[j][j] = c;
        m[k][k] = c;
        m[j][k] = -s;
        m[k][j] = s;
        RotationMatrix(m)
    }

    pub fn at(&self, r: usize, c: usize) -> f64 {
        self.0[r][c]
    }

    pub fn transpose(&self) -> Self {
        RotationMatrix(mat3_transpose(&self.0))
    }

    pub fn determinant(&self) -> f64 {
        mat3_det(&self.0)
    }

    pub fn rotate(&self, p: &Point3) -> Point3 {
        Point3::from_array(mat3_vec3(&self.0, &p.to_array()))
    }

    /// Orthonormal with determinant +1, within `tolerance`.
    pub fn is_rotation(&self, tolerance: f64) -> bool {
        let rtr = mat3_mul(&mat3_transpose(&self.0), &self.0);
        for (i, row) in rtr.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                if (v - expected).abs() > tolerance {
                    return false;
                }
            }
        }
        (self.determinant() - 1.0).abs() < tolerance
    }

    pub fn approx_eq(&self, other: &RotationMatrix, tolerance: f64) -> bool {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .all(|(a, b)| (a - b).abs() < tolerance)
    }
}

impl Mul for RotationMatrix {
    type Output = RotationMatrix;
    fn mul(self, rhs: RotationMatrix) -> RotationMatrix {
        RotationMatrix(mat3_mul(&self.0, &rhs.0))
    }
}

impl From<[[f64; 3]; 3]> for RotationMatrix {
    fn from(m: [[f64; 3]; 3]) -> Self {
        RotationMatrix(m)
    }
}
