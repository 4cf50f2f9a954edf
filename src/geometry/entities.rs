// entities.rs -- Segments, line strings, polygons and point sets.

use serde::{Deserialize, Serialize};

use super::point::Point;
use super::window::Window;

/// Distances below this are treated as lying on a boundary.
const BOUNDARY_EPS: f64 = 1e-12;

// ============================================================================
// Segment
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub pt1: Point,
    pub pt2: Point,
}

impl Segment {
    pub fn new(pt1: Point, pt2: Point) -> Self {
        Segment { pt1, pt2 }
    }

    pub fn vector(&self) -> Point {
        self.pt2 - self.pt1
    }

    pub fn length(&self) -> f64 {
        self.pt1.distance(&self.pt2)
    }

    pub fn midpoint(&self) -> Point {
        (self.pt1 + self.pt2) / 2.0
    }

    /// Angle with the x axis, in (-pi, pi]. Zero for a degenerate segment.
    pub fn angle_ox(&self) -> f64 {
        let v = self.vector();
        if self.pt1 == self.pt2 {
            0.0
        } else {
            v.y.atan2(v.x)
        }
    }

    /// Angle with the y axis. Zero for a degenerate segment.
    pub fn angle_oy(&self) -> f64 {
        let v = self.vector();
        if self.pt1 == self.pt2 {
            0.0
        } else {
            v.x.atan2(v.y)
        }
    }

    pub fn is_parallel(&self, other: &Segment, tolerance: f64) -> bool {
        (self.angle_ox() - other.angle_ox()).abs() < tolerance
    }

    pub fn window(&self) -> Window {
        Window::from_points(&[self.pt1, self.pt2])
    }

    /// Shortest distance from `p` to any point of the segment.
    pub fn distance_to_point(&self, p: &Point) -> f64 {
        let v = self.vector();
        let len2 = v.dot(&v);
        if len2 == 0.0 {
            return self.pt1.distance(p);
        }
        let t = ((*p - self.pt1).dot(&v) / len2).clamp(0.0, 1.0);
        (self.pt1 + v * t).distance(p)
    }
}

// ============================================================================
// LineString
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineString(pub Vec<Point>);

impl LineString {
    pub fn new() -> Self {
        LineString(Vec::new())
    }

    pub fn push(&mut self, p: Point) {
        self.0.push(p);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Sum of the segment lengths.
    pub fn length(&self) -> f64 {
        self.0.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    pub fn window(&self) -> Window {
        Window::from_points(&self.0)
    }
}

impl From<Vec<Point>> for LineString {
    fn from(points: Vec<Point>) -> Self {
        LineString(points)
    }
}

// ============================================================================
// Polygon
// ============================================================================

/// Closed ring of vertices (the closing edge is implicit) with optional
/// holes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub holes: Vec<Polygon>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Polygon { points, holes: Vec::new() }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn add_hole(&mut self, hole: Polygon) {
        self.holes.push(hole);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Shoelace area of the outer ring minus the hole areas.
    pub fn area(&self) -> f64 {
        let ring = self.edges().map(|s| s.pt1.cross(&s.pt2)).sum::<f64>().abs() / 2.0;
        ring - self.holes.iter().map(Polygon::area).sum::<f64>()
    }

    /// Outer ring perimeter.
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.edges().map(|s| s.length()).sum()
    }

    pub fn window(&self) -> Window {
        Window::from_points(&self.points)
    }

    /// Crossing-number test. Points on the outer boundary are inside;
    /// points strictly inside a hole are outside.
    pub fn is_inner(&self, p: &Point) -> bool {
        if self.points.len() < 3 || !self.window().contains_point(p) {
            return false;
        }
        if !self.ring_contains(p) {
            return false;
        }
        !self.holes.iter().any(|h| h.ring_contains(p) && !h.on_boundary(p))
    }

    fn on_boundary(&self, p: &Point) -> bool {
        self.edges().any(|s| s.distance_to_point(p) < BOUNDARY_EPS)
    }

    fn ring_contains(&self, p: &Point) -> bool {
        if self.on_boundary(p) {
            return true;
        }
        // Half-open rule on y so shared vertices are counted once.
        let mut inside = false;
        for s in self.edges() {
            let (a, b) = (s.pt1, s.pt2);
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Polygon::new(points)
    }
}

// ============================================================================
// MultiPoint
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiPoint(pub Vec<Point>);

impl MultiPoint {
    pub fn new() -> Self {
        MultiPoint(Vec::new())
    }

    pub fn push(&mut self, p: Point) {
        self.0.push(p);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn window(&self) -> Window {
        Window::from_points(&self.0)
    }
}

impl FromIterator<Point> for MultiPoint {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        MultiPoint(iter.into_iter().collect())
    }
}
