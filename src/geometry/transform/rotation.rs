// rotation.rs -- 2-D rotation about the origin.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_point_sets, root_mean_square_error, Transform, TransformKind, TransformOrder};
use crate::error::{Error, Result};
use crate::geometry::point::Point;
use crate::math::linalg::NormalEquations;

/// Counter-clockwise rotation of `angle` radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub angle: f64,
}

impl Rotation {
    pub fn new(angle: f64) -> Self {
        Rotation { angle }
    }

    fn rotate(&self, pt: &Point, angle: f64) -> Point {
        let (s, c) = angle.sin_cos();
        Point::new(c * pt.x - s * pt.y, s * pt.x + c * pt.y)
    }
}

impl Transform for Rotation {
    fn kind(&self) -> TransformKind {
        TransformKind::Rotation
    }

    fn min_points(&self) -> usize {
        1
    }

    fn compute(&mut self, src: &[Point], dst: &[Point]) -> Result<f64> {
        check_point_sets(src.len(), dst.len(), self.min_points())?;
        // Unknowns (cos, sin).
        let mut ne = NormalEquations::new(2);
        for (s, d) in src.iter().zip(dst) {
            ne.add_row(&[s.x, -s.y], d.x);
            ne.add_row(&[s.y, s.x], d.y);
        }
        let x = ne
            .solve()
            .ok_or_else(|| Error::Singular("rotation: all source points at the origin".into()))?;
        self.angle = x[1].atan2(x[0]);
        let rmse = root_mean_square_error(self, src, dst)?;
        debug!(angle = self.angle, rmse, "rotation computed");
        Ok(rmse)
    }

    fn transform(&self, pt: &Point, order: TransformOrder) -> Result<Point> {
        Ok(match order {
            TransformOrder::Direct => self.rotate(pt, self.angle),
            TransformOrder::Inverse => self.rotate(pt, -self.angle),
        })
    }

    fn inverse(&self) -> Result<Box<dyn Transform>> {
        Ok(Box::new(Rotation::new(-self.angle)))
    }

    fn is_valid(&self) -> bool {
        self.angle.is_finite()
    }
}
