// window.rs -- Axis-aligned 2-D windows and 3-D bounding boxes.

use serde::{Deserialize, Serialize};

use super::point::{Point, Point3};

// ============================================================================
// Window
// ============================================================================

/// Axis-aligned rectangle from `pt1` (min corner) to `pt2` (max corner).
///
/// The default window is empty: its corners are inverted at the float
/// limits so that joining any window or point with it yields that window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub pt1: Point,
    pub pt2: Point,
}

impl Default for Window {
    fn default() -> Self {
        Window {
            pt1: Point::new(f64::MAX, f64::MAX),
            pt2: Point::new(-f64::MAX, -f64::MAX),
        }
    }
}

impl Window {
    pub fn new(pt1: Point, pt2: Point) -> Self {
        Window { pt1, pt2 }
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        let half = Point::new(width / 2.0, height / 2.0);
        Window::new(center - half, center + half)
    }

    /// Smallest window holding every point; empty for no points.
    pub fn from_points(points: &[Point]) -> Self {
        points.iter().fold(Window::default(), |mut w, p| {
            w.expand_to(p);
            w
        })
    }

    pub fn width(&self) -> f64 {
        self.pt2.x - self.pt1.x
    }

    pub fn height(&self) -> f64 {
        self.pt2.y - self.pt1.y
    }

    pub fn center(&self) -> Point {
        Point::new((self.pt1.x + self.pt2.x) / 2.0, (self.pt1.y + self.pt2.y) / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        *self == Window::default()
    }

    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Swap corners so that `pt1` is the minimum.
    pub fn normalized(mut self) -> Self {
        if self.pt1.x > self.pt2.x {
            std::mem::swap(&mut self.pt1.x, &mut self.pt2.x);
        }
        if self.pt1.y > self.pt2.y {
            std::mem::swap(&mut self.pt1.y, &mut self.pt2.y);
        }
        self
    }

    /// Borders are inside.
    pub fn contains_point(&self, p: &Point) -> bool {
        self.pt1.x <= p.x && self.pt1.y <= p.y && self.pt2.x >= p.x && self.pt2.y >= p.y
    }

    pub fn contains_window(&self, w: &Window) -> bool {
        self.pt1.x <= w.pt1.x && self.pt1.y <= w.pt1.y && self.pt2.x >= w.pt2.x && self.pt2.y >= w.pt2.y
    }

    pub fn intersects(&self, w: &Window) -> bool {
        self.pt2.x >= w.pt1.x && self.pt2.y >= w.pt1.y && self.pt1.x <= w.pt2.x && self.pt1.y <= w.pt2.y
    }

    /// Overlap of both windows; empty when they do not meet.
    pub fn intersection(&self, w: &Window) -> Window {
        if !self.intersects(w) {
            return Window::default();
        }
        Window::new(
            Point::new(self.pt1.x.max(w.pt1.x), self.pt1.y.max(w.pt1.y)),
            Point::new(self.pt2.x.min(w.pt2.x), self.pt2.y.min(w.pt2.y)),
        )
    }

    pub fn join(&self, w: &Window) -> Window {
        Window::new(
            Point::new(self.pt1.x.min(w.pt1.x), self.pt1.y.min(w.pt1.y)),
            Point::new(self.pt2.x.max(w.pt2.x), self.pt2.y.max(w.pt2.y)),
        )
    }

    pub fn expand_to(&mut self, p: &Point) {
        self.pt1.x = self.pt1.x.min(p.x);
        self.pt1.y = self.pt1.y.min(p.y);
        self.pt2.x = self.pt2.x.max(p.x);
        self.pt2.y = self.pt2.y.max(p.y);
    }

    /// Grow by `dx` on the left and right and `dy` on top and bottom.
    pub fn expand(&self, dx: f64, dy: f64) -> Window {
        Window::new(
            Point::new(self.pt1.x - dx, self.pt1.y - dy),
            Point::new(self.pt2.x + dx, self.pt2.y + dy),
        )
    }
}

// ============================================================================
// BoundingBox
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub pt1: Point3,
    pub pt2: Point3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox {
            pt1: Point3::new(f64::MAX, f64::MAX, f64::MAX),
            pt2: Point3::new(-f64::MAX, -f64::MAX, -f64::MAX),
        }
    }
}

impl BoundingBox {
    pub fn new(pt1: Point3, pt2: Point3) -> Self {
        BoundingBox { pt1, pt2 }
    }

    pub fn from_points(points: &[Point3]) -> Self {
        let mut b = BoundingBox::default();
        for p in points {
            b.pt1 = Point3::new(b.pt1.x.min(p.x), b.pt1.y.min(p.y), b.pt1.z.min(p.z));
            b.pt2 = Point3::new(b.pt2.x.max(p.x), b.pt2.y.max(p.y), b.pt2.z.max(p.z));
        }
        b
    }

    pub fn width(&self) -> f64 {
        self.pt2.x - self.pt1.x
    }

    pub fn height(&self) -> f64 {
        self.pt2.y - self.pt1.y
    }

    pub fn depth(&self) -> f64 {
        self.pt2.z - self.pt1.z
    }

    pub fn center(&self) -> Point3 {
        (self.pt1 + self.pt2) / 2.0
    }

    pub fn is_empty(&self) -> bool {
        *self == BoundingBox::default()
    }

    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0 && self.depth() > 0.0
    }

    pub fn normalized(self) -> Self {
        let (a, b) = (self.pt1, self.pt2);
        BoundingBox::new(
            Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        )
    }

    pub fn contains_point(&self, p: &Point3) -> bool {
        self.pt1.x <= p.x
            && self.pt1.y <= p.y
            && self.pt1.z <= p.z
            && self.pt2.x >= p.x
            && self.pt2.y >= p.y
            && self.pt2.z >= p.z
    }

    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.contains_point(&other.pt1) && self.contains_point(&other.pt2)
    }
}
