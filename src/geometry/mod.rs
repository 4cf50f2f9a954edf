// geometry/mod.rs -- Points, windows, planar entities and transforms.

pub mod entities;
pub mod point;
pub mod transform;
pub mod window;

pub use entities::{LineString, MultiPoint, Polygon, Segment};
pub use point::{Point, Point3};
pub use window::{BoundingBox, Window};
