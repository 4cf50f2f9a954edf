// scaling.rs -- Uniform scale about the origin.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_point_sets, root_mean_square_error, Transform, TransformKind, TransformOrder};
use crate::error::{Error, Result};
use crate::geometry::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaling {
    pub scale: f64,
}

impl Default for Scaling {
    fn default() -> Self {
        Scaling { scale: 1.0 }
    }
}

impl Scaling {
    pub fn new(scale: f64) -> Self {
        Scaling { scale }
    }
}

impl Transform for Scaling {
    fn kind(&self) -> TransformKind {
        TransformKind::Scaling
    }

    fn min_points(&self) -> usize {
        1
    }

    /// s = sum(src . dst) / sum(src . src)
    fn compute(&mut self, src: &[Point], dst: &[Point]) -> Result<f64> {
        check_point_sets(src.len(), dst.len(), self.min_points())?;
        let (num, den) = src
            .iter()
            .zip(dst)
            .fold((0.0, 0.0), |(n, d), (s, t)| (n + s.dot(t), d + s.dot(s)));
        if den == 0.0 {
            return Err(Error::Singular("scaling: all source points at the origin".into()));
        }
        self.scale = num / den;
        let rmse = root_mean_square_error(self, src, dst)?;
        debug!(scale = self.scale, rmse, "scaling computed");
        Ok(rmse)
    }

    fn transform(&self, pt: &Point, order: TransformOrder) -> Result<Point> {
        match order {
            TransformOrder::Direct => Ok(*pt * self.scale),
            TransformOrder::Inverse if self.scale == 0.0 => Err(Error::Singular("zero scale".into())),
            TransformOrder::Inverse => Ok(*pt / self.scale),
        }
    }

    fn inverse(&self) -> Result<Box<dyn Transform>> {
        if self.scale == 0.0 {
            return Err(Error::Singular("zero scale".into()));
        }
        Ok(Box::new(Scaling::new(1.0 / self.scale)))
    }

    fn is_valid(&self) -> bool {
        self.scale.is_finite() && self.scale != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::transform::test_support::{assert_points_close, grid};

    #[test]
    fn test_compute_recovers_scale() {
        let src = grid();
        let dst: Vec<Point> = src.iter().map(|p| *p * 2.5).collect();
        let mut s = Scaling::default();
        let rmse = s.compute(&src, &dst).unwrap();
        assert!((s.scale - 2.5).abs() < 1e-12);
        assert!(rmse < 1e-9);
        let back = s.transform_points(&dst, TransformOrder::Inverse).unwrap();
        assert_points_close(&back, &src, 1e-12);
    }

    #[test]
    fn test_zero_scale() {
        let s = Scaling::new(0.0);
        assert!(!s.is_valid());
        assert!(s.inverse().is_err());
        assert!(s.transform(&Point::new(1.0, 1.0), TransformOrder::Inverse).is_err());
    }
}
