// translation.rs -- Pure 2-D translation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_point_sets, root_mean_square_error, Transform, TransformKind, TransformOrder};
use crate::error::Result;
use crate::geometry::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Translation {
    pub tx: f64,
    pub ty: f64,
}

impl Translation {
    pub fn new(tx: f64, ty: f64) -> Self {
        Translation { tx, ty }
    }
}

impl Transform for Translation {
    fn kind(&self) -> TransformKind {
        TransformKind::Translation
    }

    fn min_points(&self) -> usize {
        1
    }

    /// Mean displacement between the two sets.
    fn compute(&mut self, src: &[Point], dst: &[Point]) -> Result<f64> {
        check_point_sets(src.len(), dst.len(), self.min_points())?;
        let sum = src.iter().zip(dst).fold(Point::default(), |acc, (s, d)| acc + (*d - *s));
        let mean = sum / src.len() as f64;
        self.tx = mean.x;
        self.ty = mean.y;
        let rmse = root_mean_square_error(self, src, dst)?;
        debug!(tx = self.tx, ty = self.ty, rmse, "translation computed");
        Ok(rmse)
    }

    fn transform(&self, pt: &Point, order: TransformOrder) -> Result<Point> {
        let t = Point::new(self.tx, self.ty);
        Ok(match order {
            TransformOrder::Direct => *pt + t,
            TransformOrder::Inverse => *pt - t,
        })
    }

    fn inverse(&self) -> Result<Box<dyn Transform>> {
        Ok(Box::new(Translation::new(-self.tx, -self.ty)))
    }

    fn is_valid(&self) -> bool {
        self.tx.is_finite() && self.ty.is_finite()
    }
}
