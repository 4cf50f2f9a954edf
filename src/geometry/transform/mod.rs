// transform/mod.rs -- Geometric transforms estimated from point pairs.
//
// Every 2-D transform implements `Transform`: it can be computed by least
// squares from matched source/destination points, applied in either
// direction, and inverted. `Helmert3D` implements the 3-D counterpart
// `Transform3D`. `ransac::estimate` wraps any `Transform` with outlier
// rejection.

pub mod affine;
pub mod helmert2d;
pub mod helmert3d;
pub mod multiple;
pub mod perspective;
pub mod ransac;
pub mod rotation;
pub mod scaling;
pub mod translation;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::point::{Point, Point3};

pub use affine::Affine;
pub use helmert2d::Helmert2D;
pub use helmert3d::Helmert3D;
pub use multiple::TransformMultiple;
pub use perspective::Perspective;
pub use ransac::{RansacConfig, RansacResult};
pub use rotation::Rotation;
pub use scaling::Scaling;
pub use translation::Translation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    Translation,
    Rotation,
    Scaling,
    Helmert2D,
    Affine,
    Perspective,
    Helmert3D,
    Multiple,
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransformOrder {
    #[default]
    Direct,
    Inverse,
}

/// A 2-D point transform.
pub trait Transform: fmt::Debug + Send + Sync {
    fn kind(&self) -> TransformKind;

    /// Minimum number of point pairs `compute` needs.
    fn min_points(&self) -> usize;

    /// Fit the parameters so that `src` maps onto `dst`. Returns the RMSE
    /// of the fit.
    fn compute(&mut self, src: &[Point], dst: &[Point]) -> Result<f64>;

    fn transform(&self, pt: &Point, order: TransformOrder) -> Result<Point>;

    fn transform_points(&self, pts: &[Point], order: TransformOrder) -> Result<Vec<Point>> {
        pts.iter().map(|p| self.transform(p, order)).collect()
    }

    fn inverse(&self) -> Result<Box<dyn Transform>>;

    /// Parameters are finite and the transform is invertible.
    fn is_valid(&self) -> bool;
}

/// A 3-D point transform.
pub trait Transform3D: fmt::Debug + Send + Sync {
    fn kind(&self) -> TransformKind;

    fn min_points(&self) -> usize;

    fn compute3d(&mut self, src: &[Point3], dst: &[Point3]) -> Result<f64>;

    fn transform3d(&self, pt: &Point3, order: TransformOrder) -> Result<Point3>;

    fn transform3d_points(&self, pts: &[Point3], order: TransformOrder) -> Result<Vec<Point3>> {
        pts.iter().map(|p| self.transform3d(p, order)).collect()
    }

    fn inverse3d(&self) -> Result<Box<dyn Transform3D>>;
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Both sets have the same size and at least `min` points.
pub(crate) fn check_point_sets(src_len: usize, dst_len: usize, min: usize) -> Result<()> {
    if src_len != dst_len {
        return Err(Error::SizeMismatch { expected: src_len, found: dst_len });
    }
    if src_len < min {
        return Err(Error::NotEnoughPoints { required: min, found: src_len });
    }
    Ok(())
}

/// sqrt(sum |residual|^2 / (dims * (n - min))), zero without redundancy.
pub(crate) fn rmse_from_residuals(sum_sq: f64, n: usize, min: usize, dims: usize) -> f64 {
    if n <= min {
        return 0.0;
    }
    (sum_sq / (dims * (n - min)) as f64).sqrt()
}

/// RMSE of `t` mapping `src` onto `dst`.
pub fn root_mean_square_error<T: Transform + ?Sized>(t: &T, src: &[Point], dst: &[Point]) -> Result<f64> {
    check_point_sets(src.len(), dst.len(), 0)?;
    let mut sum = 0.0;
    for (s, d) in src.iter().zip(dst) {
        let r = t.transform(s, TransformOrder::Direct)? - *d;
        sum += r.dot(&r);
    }
    Ok(rmse_from_residuals(sum, src.len(), t.min_points(), 2))
}

/// Residual distances of each pair after the transform.
pub fn residuals<T: Transform + ?Sized>(t: &T, src: &[Point], dst: &[Point]) -> Result<Vec<f64>> {
    check_point_sets(src.len(), dst.len(), 0)?;
    src.iter()
        .zip(dst)
        .map(|(s, d)| Ok(t.transform(s, TransformOrder::Direct)?.distance(d)))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn grid() -> Vec<Point> {
        (0..4)
            .flat_map(|i| (0..3).map(move |j| Point::new(10.0 * i as f64 - 7.0, 12.0 * j as f64 + 3.0)))
            .collect()
    }

    pub fn assert_points_close(a: &[Point], b: &[Point], eps: f64) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            assert!(p.distance(q) < eps, "{p} != {q}");
        }
    }
}
