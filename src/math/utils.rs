// utils.rs -- Assorted numeric helpers: clamping, regression, planes.

use crate::geometry::point::{Point, Point3};
use crate::math::linalg::NormalEquations;

/// Clamp `value` into `[lo, hi]`.
pub fn clamp<T: PartialOrd>(value: T, lo: T, hi: T) -> T {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Least-squares fit of y = m x + b. Returns (m, b).
pub fn linear_regression_y_x(points: &[Point]) -> Option<(f64, f64)> {
    regression(points.iter().map(|p| (p.x, p.y)), points.len())
}

/// Least-squares fit of x = m y + b. Returns (m, b).
pub fn linear_regression_x_y(points: &[Point]) -> Option<(f64, f64)> {
    regression(points.iter().map(|p| (p.y, p.x)), points.len())
}

fn regression(pairs: impl Iterator<Item = (f64, f64)>, n: usize) -> Option<(f64, f64)> {
    if n < 2 {
        return None;
    }
    let (mut sx, mut sy, mut sxx, mut sxy) = (0.0, 0.0, 0.0, 0.0);
    for (x, y) in pairs {
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
    }
    let n = n as f64;
    let den = n * sxx - sx * sx;
    if den.abs() < 1e-12 {
        return None;
    }
    let m = (n * sxy - sx * sy) / den;
    let b = (sy - m * sx) / n;
    Some((m, b))
}

/// Plane `[a, b, c, d]` with a x + b y + c z + d = 0 through three
/// points. With `normalize` the normal (a, b, c) has unit length.
/// None when the points are collinear.
pub fn three_points_plane(p1: &Point3, p2: &Point3, p3: &Point3, normalize: bool) -> Option<[f64; 4]> {
    let n = (*p2 - *p1).cross(&(*p3 - *p1));
    let len = n.norm();
    if len < 1e-12 {
        return None;
    }
    let n = if normalize { n / len } else { n };
    Some([n.x, n.y, n.z, -n.dot(p1)])
}

/// Least-squares plane z = A x + B y + D through `points`, returned as
/// `[A, B, -1, D]` so it reads as a x + b y + c z + d = 0.
pub fn n_points_plane(points: &[Point3]) -> Option<[f64; 4]> {
    if points.len() < 3 {
        return None;
    }
    let mut ne = NormalEquations::new(3);
    for p in points {
        ne.add_row(&[p.x, p.y, 1.0], p.z);
    }
    let x = ne.solve()?;
    Some([x[0], x[1], -1.0, x[2]])
}

/// Signed distance from `p` to the plane `[a, b, c, d]`.
pub fn distance_point_to_plane(p: &Point3, plane: &[f64; 4]) -> f64 {
    let [a, b, c, d] = *plane;
    (a * p.x + b * p.y + c * p.z + d) / (a * a + b * b + c * c).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5, 0, 3), 3);
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_regression() {
        let pts: Vec<Point> = (0..6).map(|i| Point::new(i as f64, 3.0 * i as f64 - 2.0)).collect();
        let (m, b) = linear_regression_y_x(&pts).unwrap();
        assert!((m - 3.0).abs() < 1e-12);
        assert!((b + 2.0).abs() < 1e-12);

        let (m, b) = linear_regression_x_y(&pts).unwrap();
        assert!((m - 1.0 / 3.0).abs() < 1e-12);
        assert!((b - 2.0 / 3.0).abs() < 1e-12);

        assert!(linear_regression_y_x(&pts[..1]).is_none());
        let vertical = [Point::new(1.0, 0.0), Point::new(1.0, 5.0)];
        assert!(linear_regression_y_x(&vertical).is_none());
    }

    #[test]
    fn test_three_points_plane() {
        let plane = three_points_plane(
            &Point3::new(0.0, 0.0, 2.0),
            &Point3::new(1.0, 0.0, 2.0),
            &Point3::new(0.0, 1.0, 2.0),
            true,
        )
        .unwrap();
        assert!((plane[2] - 1.0).abs() < 1e-12);
        assert!((plane[3] + 2.0).abs() < 1e-12);

        let collinear = three_points_plane(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 1.0, 1.0),
            &Point3::new(2.0, 2.0, 2.0),
            false,
        );
        assert!(collinear.is_none());
    }

    #[test]
    fn test_n_points_plane() {
        // z = 0.5 x - 2 y + 3
        let pts: Vec<Point3> = (0..4)
            .flat_map(|i| (0..4).map(move |j| (i as f64, j as f64)))
            .map(|(x, y)| Point3::new(x, y, 0.5 * x - 2.0 * y + 3.0))
            .collect();
        let plane = n_points_plane(&pts).unwrap();
        assert!((plane[0] - 0.5).abs() < 1e-10);
        assert!((plane[1] + 2.0).abs() < 1e-10);
        assert!((plane[3] - 3.0).abs() < 1e-10);
        for p in &pts {
            assert!(distance_point_to_plane(p, &plane).abs() < 1e-9);
        }
        assert!(n_points_plane(&pts[..2]).is_none());
    }
}
