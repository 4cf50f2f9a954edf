// mod.rs -- 3-D rotations: quaternions, Euler angles, axis-angle, matrices.

pub mod convert;
pub mod euler;
pub mod matrix;
pub mod quaternion;

use serde::{Deserialize, Serialize};

pub use convert::RotationConverter;
pub use euler::{EulerAngles, EulerAxes};
pub use matrix::RotationMatrix;
pub use quaternion::Quaternion;

/// Rotation of `angle` radians about `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    pub axis: [f64; 3],
    pub angle: f64,
}

impl Default for AxisAngle {
    fn default() -> Self {
        AxisAngle::new([1.0, 0.0, 0.0], 0.0)
    }
}

impl AxisAngle {
    pub const fn new(axis: [f64; 3], angle: f64) -> Self {
        AxisAngle { axis, angle }
    }

    /// Axis scaled to unit length; a zero axis falls back to x.
    pub fn unit_axis(&self) -> [f64; 3] {
        let [x, y, z] = self.axis;
        let n = (x * x + y * y + z * z).sqrt();
        if n == 0.0 {
            [1.0, 0.0, 0.0]
        } else {
            [x / n, y / n, z / n]
        }
    }
}
