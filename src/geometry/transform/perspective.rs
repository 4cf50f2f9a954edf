// perspective.rs -- Planar homography.
//
// Estimation follows the normalized DLT:
//   1. Hartley-normalize both point sets (centroid to origin, mean
//      distance sqrt(2)) for conditioning
//   2. Solve the 8 unknowns with h33 = 1 by linear least squares
//   3. Undo the normalization: H = T_dst^-1 * Hn * T_src
//   4. Rescale so that h33 = 1

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{check_point_sets, root_mean_square_error, Transform, TransformKind, TransformOrder};
use crate::error::{Error, Result};
use crate::geometry::point::Point;
use crate::math::linalg::{mat3_det, mat3_mul, Matrix, NormalEquations};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Perspective {
    pub h: [[f64; 3]; 3],
}

impl Default for Perspective {
    fn default() -> Self {
        Perspective::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }
}

impl Perspective {
    pub fn new(h: [[f64; 3]; 3]) -> Self {
        Perspective { h }
    }

    fn inverse_matrix(&self) -> Result<[[f64; 3]; 3]> {
        Matrix::from_array3(&self.h)
            .inverse()
            .and_then(|m| m.to_array3())
            .ok_or_else(|| {
                warn!("homography is singular");
                Error::Singular("homography is not invertible".into())
            })
    }
}

/// Apply `h` to `pt`, dividing by the projective term.
fn project(h: &[[f64; 3]; 3], pt: &Point) -> Result<Point> {
    let w = h[2][0] * pt.x + h[2][1] * pt.y + h[2][2];
    if w.abs() < 1e-15 {
        return Err(Error::Singular(format!("point {pt} maps to infinity")));
    }
    Ok(Point::new(
        (h[0][0] * pt.x + h[0][1] * pt.y + h[0][2]) / w,
        (h[1][0] * pt.x + h[1][1] * pt.y + h[1][2]) / w,
    ))
}

// ============================================================================
// Hartley normalization
// ============================================================================

/// Translate the centroid to the origin and scale so the mean distance
/// from it is sqrt(2).
#[derive(Debug, Clone, Copy)]
struct Normalization {
    cx: f64,
    cy: f64,
    scale: f64,
}

impl Normalization {
    fn from_points(points: &[Point]) -> Self {
        let n = points.len() as f64;
        let (sx, sy) = points.iter().fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
        let (cx, cy) = (sx / n, sy / n);
        let mean_dist = points.iter().map(|p| (p.x - cx).hypot(p.y - cy)).sum::<f64>() / n;
        let scale = if mean_dist > 1e-15 { std::f64::consts::SQRT_2 / mean_dist } else { 1.0 };
        Normalization { cx, cy, scale }
    }

    fn apply(&self, p: &Point) -> Point {
        Point::new((p.x - self.cx) * self.scale, (p.y - self.cy) * self.scale)
    }

    // T = [s 0 -s*cx; 0 s -s*cy; 0 0 1]
    fn matrix(&self) -> [[f64; 3]; 3] {
        let s = self.scale;
        [[s, 0.0, -s * self.cx], [0.0, s, -s * self.cy], [0.0, 0.0, 1.0]]
    }

    fn inverse_matrix(&self) -> [[f64; 3]; 3] {
        let s = 1.0 / self.scale;
        [[s, 0.0, self.cx], [0.0, s, self.cy], [0.0, 0.0, 1.0]]
    }
}

impl Transform for Perspective {
    fn kind(&self) -> TransformKind {
        TransformKind::Perspective
    }

    fn min_points(&self) -> usize {
        4
    }

    fn compute(&mut self, src: &[Point], dst: &[Point]) -> Result<f64> {
        check_point_sets(src.len(), dst.len(), self.min_points())?;

        let ns = Normalization::from_points(src);
        let nd = Normalization::from_points(dst);

        let mut ne = NormalEquations::new(8);
        for (s, d) in src.iter().zip(dst) {
            let s = ns.apply(s);
            let d = nd.apply(d);
            ne.add_row(&[s.x, s.y, 1.0, 0.0, 0.0, 0.0, -s.x * d.x, -s.y * d.x], d.x);
            ne.add_row(&[0.0, 0.0, 0.0, s.x, s.y, 1.0, -s.x * d.y, -s.y * d.y], d.y);
        }
        let x = ne
            .solve()
            .ok_or_else(|| Error::Singular("perspective: degenerate point configuration".into()))?;

        let hn = [[x[0], x[1], x[2]], [x[3], x[4], x[5]], [x[6], x[7], 1.0]];
        let h = mat3_mul(&mat3_mul(&nd.inverse_matrix(), &hn), &ns.matrix());
        if h[2][2].abs() < 1e-15 {
            return Err(Error::Singular("perspective: h33 vanished after denormalization".into()));
        }
        let k = h[2][2];
        self.h = h.map(|row| row.map(|v| v / k));

        let rmse = root_mean_square_error(self, src, dst)?;
        debug!(rmse, "perspective computed");
        Ok(rmse)
    }

    fn transform(&self, pt: &Point, order: TransformOrder) -> Result<Point> {
        match order {
            TransformOrder::Direct => project(&self.h, pt),
            TransformOrder::Inverse => project(&self.inverse_matrix()?, pt),
        }
    }

    fn inverse(&self) -> Result<Box<dyn Transform>> {
        let inv = self.inverse_matrix()?;
        let k = if inv[2][2].abs() > 1e-15 { inv[2][2] } else { 1.0 };
        Ok(Box::new(Perspective::new(inv.map(|row| row.map(|v| v / k)))))
    }

    fn is_valid(&self) -> bool {
        self.h.iter().flatten().all(|v| v.is_finite()) && mat3_det(&self.h).abs() > 1e-15
    }
}
