// affine.rs -- General 2-D affine transform.
//
//   x' = a x + b y + tx
//   y' = c x + d y + ty
//
// Built from (scale_x, scale_y, rotation):
//   a = sx cos(r), b = -sy sin(r), c = sx sin(r), d = sy cos(r)

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{check_point_sets, root_mean_square_error, Transform, TransformKind, TransformOrder};
use crate::error::{Error, Result};
use crate::geometry::point::{centroid, Point};
use crate::math::linalg::NormalEquations;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Affine::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

impl Affine {
    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Affine { a, b, c, d, tx, ty }
    }

    pub fn from_parameters(tx: f64, ty: f64, scale_x: f64, scale_y: f64, rotation: f64) -> Self {
        let (s, c) = rotation.sin_cos();
        Affine::new(scale_x * c, -scale_y * s, scale_x * s, scale_y * c, tx, ty)
    }

    pub fn scale_x(&self) -> f64 {
        self.a.hypot(self.c)
    }

    pub fn scale_y(&self) -> f64 {
        self.b.hypot(self.d)
    }

    /// Mean of the rotations of both axes.
    pub fn rotation(&self) -> f64 {
        (self.c.atan2(self.a) + (-self.b).atan2(self.d)) / 2.0
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    fn inverted(&self) -> Result<Affine> {
        let det = self.determinant();
        if det == 0.0 {
            warn!("affine transform is singular");
            return Err(Error::Singular("affine determinant is zero".into()));
        }
        Ok(Affine::new(
            self.d / det,
            -self.b / det,
            -self.c / det,
            self.a / det,
            (self.b * self.ty - self.d * self.tx) / det,
            (self.c * self.tx - self.a * self.ty) / det,
        ))
    }

    fn apply(&self, pt: &Point) -> Point {
        Point::new(
            self.a * pt.x + self.b * pt.y + self.tx,
            self.c * pt.x + self.d * pt.y + self.ty,
        )
    }
}

impl Transform for Affine {
    fn kind(&self) -> TransformKind {
        TransformKind::Affine
    }

    fn min_points(&self) -> usize {
        3
    }

    fn compute(&mut self, src: &[Point], dst: &[Point]) -> Result<f64> {
        check_point_sets(src.len(), dst.len(), self.min_points())?;
        // Centered coordinates keep the normal equations well conditioned
        // for large map coordinates. Unknowns (a, b, c, d).
        let (Some(cs), Some(cd)) = (centroid(src), centroid(dst)) else {
            return Err(Error::NotEnoughPoints { required: 3, found: 0 });
        };
        let mut ne = NormalEquations::new(4);
        for (s, t) in src.iter().zip(dst) {
            let (s, t) = (*s - cs, *t - cd);
            ne.add_row(&[s.x, s.y, 0.0, 0.0], t.x);
            ne.add_row(&[0.0, 0.0, s.x, s.y], t.y);
        }
        let x = ne
            .solve()
            .ok_or_else(|| Error::Singular("affine: collinear source points".into()))?;
        let (a, b, c, d) = (x[0], x[1], x[2], x[3]);
        *self = Affine::new(a, b, c, d, cd.x - a * cs.x - b * cs.y, cd.y - c * cs.x - d * cs.y);
        let rmse = root_mean_square_error(self, src, dst)?;
        debug!(
            scale_x = self.scale_x(),
            scale_y = self.scale_y(),
            rotation = self.rotation(),
            rmse,
            "affine computed"
        );
        Ok(rmse)
    }

    fn transform(&self, pt: &Point, order: TransformOrder) -> Result<Point> {
        match order {
            TransformOrder::Direct => Ok(self.apply(pt)),
            TransformOrder::Inverse => Ok(self.inverted()?.apply(pt)),
        }
    }

    fn inverse(&self) -> Result<Box<dyn Transform>> {
        Ok(Box::new(self.inverted()?))
    }

    fn is_valid(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.tx, self.ty].iter().all(|v| v.is_finite())
            && self.determinant() != 0.0
    }
}
