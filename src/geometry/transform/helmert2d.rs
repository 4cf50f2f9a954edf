// helmert2d.rs -- 2-D similarity transform (rotation, uniform scale, shift).
//
//   x' = a x - b y + tx
//   y' = b x + a y + ty
//
// with a = scale * cos(rotation) and b = scale * sin(rotation).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_point_sets, root_mean_square_error, Transform, TransformKind, TransformOrder};
use crate::error::{Error, Result};
use crate::geometry::point::{centroid, Point};
use crate::math::linalg::NormalEquations;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Helmert2D {
    pub tx: f64,
    pub ty: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl Default for Helmert2D {
    fn default() -> Self {
        Helmert2D::new(0.0, 0.0, 1.0, 0.0)
    }
}

impl Helmert2D {
    pub fn new(tx: f64, ty: f64, scale: f64, rotation: f64) -> Self {
        Helmert2D { tx, ty, scale, rotation }
    }

    /// From the linear coefficients directly.
    pub fn from_coefficients(a: f64, b: f64, tx: f64, ty: f64) -> Self {
        Helmert2D { tx, ty, scale: a.hypot(b), rotation: b.atan2(a) }
    }

    /// (a, b) = scale * (cos, sin) of the rotation.
    pub fn coefficients(&self) -> (f64, f64) {
        let (s, c) = self.rotation.sin_cos();
        (self.scale * c, self.scale * s)
    }

    fn det(&self) -> f64 {
        let (a, b) = self.coefficients();
        a * a + b * b
    }
}

impl Transform for Helmert2D {
    fn kind(&self) -> TransformKind {
        TransformKind::Helmert2D
    }

    fn min_points(&self) -> usize {
        2
    }

    fn compute(&mut self, src: &[Point], dst: &[Point]) -> Result<f64> {
        check_point_sets(src.len(), dst.len(), self.min_points())?;
        let (Some(cs), Some(cd)) = (centroid(src), centroid(dst)) else {
            return Err(Error::NotEnoughPoints { required: 2, found: 0 });
        };
        // Unknowns (a, b) on centered coordinates.
        let mut ne = NormalEquations::new(2);
        for (s, d) in src.iter().zip(dst) {
            let (s, d) = (*s - cs, *d - cd);
            ne.add_row(&[s.x, -s.y], d.x);
            ne.add_row(&[s.y, s.x], d.y);
        }
        let x = ne
            .solve()
            .ok_or_else(|| Error::Singular("helmert 2d: coincident source points".into()))?;
        let (a, b) = (x[0], x[1]);
        *self = Helmert2D::from_coefficients(a, b, cd.x - a * cs.x + b * cs.y, cd.y - b * cs.x - a * cs.y);
        let rmse = root_mean_square_error(self, src, dst)?;
        debug!(scale = self.scale, rotation = self.rotation, tx = self.tx, ty = self.ty, rmse, "helmert 2d computed");
        Ok(rmse)
    }

    fn transform(&self, pt: &Point, order: TransformOrder) -> Result<Point> {
        let (a, b) = self.coefficients();
        match order {
            TransformOrder::Direct => Ok(Point::new(
                a * pt.x - b * pt.y + self.tx,
                b * pt.x + a * pt.y + self.ty,
            )),
            TransformOrder::Inverse => {
                let det = self.det();
                if det == 0.0 {
                    return Err(Error::Singular("helmert 2d with zero scale".into()));
                }
                let (dx, dy) = (pt.x - self.tx, pt.y - self.ty);
                Ok(Point::new((a * dx + b * dy) / det, (-b * dx + a * dy) / det))
            }
        }
    }

    fn inverse(&self) -> Result<Box<dyn Transform>> {
        let det = self.det();
        if det == 0.0 {
            return Err(Error::Singular("helmert 2d with zero scale".into()));
        }
        let (a, b) = self.coefficients();
        Ok(Box::new(Helmert2D::from_coefficients(
            a / det,
            -b / det,
            -(a * self.tx + b * self.ty) / det,
            (b * self.tx - a * self.ty) / det,
        )))
    }

    fn is_valid(&self) -> bool {
        self.tx.is_finite() && self.ty.is_finite() && self.scale.is_finite() && self.det() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::transform::test_support::{assert_points_close, grid};

    #[test]
    fn test_compute_recovers_parameters() {
        let truth = Helmert2D::new(150.0, 75.0, 0.25, 35.0_f64.to_radians());
        let src = grid();
        let dst = truth.transform_points(&src, TransformOrder::Direct).unwrap();

        let mut h = Helmert2D::default();
        let rmse = h.compute(&src, &dst).unwrap();
        assert!((h.tx - 150.0).abs() < 1e-9);
        assert!((h.ty - 75.0).abs() < 1e-9);
        assert!((h.scale - 0.25).abs() < 1e-9);
        assert!((h.rotation - 35.0_f64.to_radians()).abs() < 1e-9);
        assert!(rmse < 1e-9);
    }

    #[test]
    fn test_inverse() {
        let h = Helmert2D::new(-20.0, 3.0, 1.7, -0.4);
        let src = grid();
        let dst = h.transform_points(&src, TransformOrder::Direct).unwrap();
        let inv = h.inverse().unwrap();
        assert_points_close(&inv.transform_points(&dst, TransformOrder::Direct).unwrap(), &src, 1e-9);
        assert_points_close(&h.transform_points(&dst, TransformOrder::Inverse).unwrap(), &src, 1e-9);
    }

    #[test]
    fn test_parameters_and_validity() {
        let mut h = Helmert2D::default();
        assert!(h.is_valid());
        h.scale = 2.0;
        h.rotation = std::f64::consts::FRAC_PI_2;
        let p = h.transform(&Point::new(1.0, 0.0), TransformOrder::Direct).unwrap();
        assert!(p.x.abs() < 1e-12 && (p.y - 2.0).abs() < 1e-12);
        h.scale = 0.0;
        assert!(!h.is_valid());
        assert!(h.inverse().is_err());
    }

    #[test]
    fn test_not_enough_points() {
        let mut h = Helmert2D::default();
        let p = [Point::new(1.0, 1.0)];
        assert!(h.compute(&p, &p).is_err());
    }
}
