// helmert3d.rs -- Seven-parameter 3-D similarity transform.
//
//   p' = scale * R(omega, phi, kappa) * p + t
//
// R uses the xyz Euler sequence. Estimation is Horn's closed form: the
// rotation is the eigenvector of the largest eigenvalue of the 4x4
// symmetric matrix N built from the cross-covariance of the centered sets.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_point_sets, rmse_from_residuals, Transform3D, TransformKind, TransformOrder};
use crate::error::{Error, Result};
use crate::geometry::point::{centroid3, Point3};
use crate::math::linalg::{symmetric_eigen, Matrix};
use crate::math::rotations::{EulerAngles, EulerAxes, Quaternion, RotationConverter, RotationMatrix};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Helmert3D {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub scale: f64,
    pub omega: f64,
    pub phi: f64,
    pub kappa: f64,
}

impl Default for Helmert3D {
    fn default() -> Self {
        Helmert3D::new(0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0)
    }
}

impl Helmert3D {
    pub fn new(tx: f64, ty: f64, tz: f64, scale: f64, omega: f64, phi: f64, kappa: f64) -> Self {
        Helmert3D { tx, ty, tz, scale, omega, phi, kappa }
    }

    pub fn from_rotation(tx: f64, ty: f64, tz: f64, scale: f64, rotation: &RotationMatrix) -> Self {
        let e = RotationConverter::matrix_to_euler(rotation, EulerAxes::Xyz);
        Helmert3D::new(tx, ty, tz, scale, e.x, e.y, e.z)
    }

    pub fn rotation_matrix(&self) -> RotationMatrix {
        RotationConverter::euler_to_matrix(&EulerAngles::new(self.omega, self.phi, self.kappa, EulerAxes::Xyz))
    }

    pub fn translation(&self) -> Point3 {
        Point3::new(self.tx, self.ty, self.tz)
    }
}

impl Transform3D for Helmert3D {
    fn kind(&self) -> TransformKind {
        TransformKind::Helmert3D
    }

    fn min_points(&self) -> usize {
        3
    }

    fn compute3d(&mut self, src: &[Point3], dst: &[Point3]) -> Result<f64> {
        check_point_sets(src.len(), dst.len(), self.min_points())?;
        let (Some(cs), Some(cd)) = (centroid3(src), centroid3(dst)) else {
            return Err(Error::NotEnoughPoints { required: 3, found: 0 });
        };

        // Cross-covariance S[i][j] = sum a_i * b_j over centered pairs.
        let mut s = [[0.0; 3]; 3];
        let mut src_ss = 0.0;
        for (p, q) in src.iter().zip(dst) {
            let a = (*p - cs).to_array();
            let b = (*q - cd).to_array();
            for i in 0..3 {
                for j in 0..3 {
                    s[i][j] += a[i] * b[j];
                }
            }
            src_ss += a.iter().map(|v| v * v).sum::<f64>();
        }
        if src_ss < 1e-24 {
            return Err(Error::Singular("helmert 3d: coincident source points".into()));
        }

        let [[sxx, sxy, sxz], [syx, syy, syz], [szx, szy, szz]] = s;
        let n = Matrix::from_rows(&[
            &[sxx + syy + szz, syz - szy, szx - sxz, sxy - syx],
            &[syz - szy, sxx - syy - szz, sxy + syx, szx + sxz],
            &[szx - sxz, sxy + syx, -sxx + syy - szz, syz + szy],
            &[sxy - syx, szx + sxz, syz + szy, -sxx - syy + szz],
        ])
        .ok_or_else(|| Error::invalid("helmert 3d: malformed N matrix"))?;
        let eigen = symmetric_eigen(&n).ok_or_else(|| Error::Singular("helmert 3d: eigen decomposition failed".into()))?;
        let v = eigen.vector(0);
        let q = Quaternion::new(v[1], v[2], v[3], v[0]);
        let r = RotationConverter::quaternion_to_matrix(&q);

        // Least-squares scale of dst on the rotated source.
        let num: f64 = src.iter().zip(dst).map(|(p, d)| r.rotate(&(*p - cs)).dot(&(*d - cd))).sum();
        let scale = num / src_ss;
        let t = cd - r.rotate(&cs) * scale;

        *self = Helmert3D::from_rotation(t.x, t.y, t.z, scale, &r);

        let mut sum = 0.0;
        for (p, d) in src.iter().zip(dst) {
            let res = self.transform3d(p, TransformOrder::Direct)? - *d;
            sum += res.dot(&res);
        }
        let rmse = rmse_from_residuals(sum, src.len(), self.min_points(), 3);
        debug!(
            scale = self.scale,
            omega = self.omega,
            phi = self.phi,
            kappa = self.kappa,
            rmse,
            "helmert 3d computed"
        );
        Ok(rmse)
    }

    fn transform3d(&self, pt: &Point3, order: TransformOrder) -> Result<Point3> {
        let r = self.rotation_matrix();
        match order {
            TransformOrder::Direct => Ok(r.rotate(pt) * self.scale + self.translation()),
            TransformOrder::Inverse => {
                if self.scale == 0.0 {
                    return Err(Error::Singular("helmert 3d with zero scale".into()));
                }
                Ok(r.transpose().rotate(&(*pt - self.translation())) / self.scale)
            }
        }
    }

    fn inverse3d(&self) -> Result<Box<dyn Transform3D>> {
        if self.scale == 0.0 {
            return Err(Error::Singular("helmert 3d with zero scale".into()));
        }
        let rt = self.rotation_matrix().transpose();
        let s = 1.0 / self.scale;
        let t = -(rt.rotate(&self.translation()) * s);
        Ok(Box::new(Helmert3D::from_rotation(t.x, t.y, t.z, s, &rt)))
    }
}
