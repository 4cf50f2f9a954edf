// convert.rs -- Conversions between the four rotation representations.
//
// Every Euler sequence is handled by one formula per family, indexed by
// the axis order and the parity of the permutation.

use tracing::trace;

use super::{AxisAngle, EulerAngles, EulerAxes, Quaternion, RotationMatrix};
use crate::math::utils::clamp;

/// |sin| or |cos| above this is treated as gimbal lock.
const GIMBAL_THRESHOLD: f64 = 1.0 - 1e-10;

pub struct RotationConverter;

impl RotationConverter {
    // ====================================================================
    // Matrix <-> quaternion
    // ====================================================================

    pub fn matrix_to_quaternion(r: &RotationMatrix) -> Quaternion {
        let m = &r.0;
        let q = if m[2][2] < 0.0 {
            if m[0][0] > m[1][1] {
                let x = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 0.5;
                let f = 4.0 * x;
                Quaternion::new(x, (m[0][1] + m[1][0]) / f, (m[0][2] + m[2][0]) / f, (m[2][1] - m[1][2]) / f)
            } else {
                let y = (1.0 - m[0][0] + m[1][1] - m[2][2]).sqrt() * 0.5;
                let f = 4.0 * y;
                Quaternion::new((m[0][1] + m[1][0]) / f, y, (m[1][2] + m[2][1]) / f, (m[0][2] - m[2][0]) / f)
            }
        } else if m[0][0] < -m[1][1] {
            let z = (1.0 - m[0][0] - m[1][1] + m[2][2]).sqrt() * 0.5;
            let f = 4.0 * z;
            Quaternion::new((m[0][2] + m[2][0]) / f, (m[1][2] + m[2][1]) / f, z, (m[1][0] - m[0][1]) / f)
        } else {
            let w = (1.0 + m[0][0] + m[1][1] + m[2][2]).sqrt() * 0.5;
            let f = 4.0 * w;
            Quaternion::new((m[2][1] - m[1][2]) / f, (m[0][2] - m[2][0]) / f, (m[1][0] - m[0][1]) / f, w)
        };
        q.normalized()
    }

    pub fn quaternion_to_matrix(q: &Quaternion) -> RotationMatrix {
        let Quaternion { x, y, z, w } = q.normalized();
        RotationMatrix([
            [1.0 - 2.0 * (y * y + z * z), 2.0 * (x * y - z * w), 2.0 * (x * z + y * w)],
            [2.0 * (x * y + z * w), 1.0 - 2.0 * (x * x + z * z), 2.0 * (y * z - x * w)],
            [2.0 * (x * z - y * w), 2.0 * (y * z + x * w), 1.0 - 2.0 * (x * x + y * y)],
        ])
    }

    // ====================================================================
    // Quaternion <-> axis-angle
    // ====================================================================

    pub fn quaternion_to_axis_angle(q: &Quaternion) -> AxisAngle {
        let q = q.normalized();
        let n = (q.x * q.x + q.y * q.y + q.z * q.z).sqrt();
        if n == 0.0 {
            return AxisAngle::new([1.0, 0.0, 0.0], 0.0);
        }
        let angle = 2.0 * clamp(q.w, -1.0, 1.0).acos();
        AxisAngle::new([q.x / n, q.y / n, q.z / n], angle)
    }

    pub fn axis_angle_to_quaternion(aa: &AxisAngle) -> Quaternion {
        let [x, y, z] = aa.unit_axis();
        let (s, c) = (aa.angle * 0.5).sin_cos();
        Quaternion::new(x * s, y * s, z * s, c)
    }

    // ====================================================================
    // Axis-angle <-> matrix
    // ====================================================================

    /// Rodrigues' formula.
    pub fn axis_angle_to_matrix(aa: &AxisAngle) -> RotationMatrix {
        let [x, y, z] = aa.unit_axis();
        let (s, c) = aa.angle.sin_cos();
        let t = 1.0 - c;
        RotationMatrix([
            [t * x * x + c, t * x * y - s * z, t * x * z + s * y],
            [t * x * y + s * z, t * y * y + c, t * y * z - s * x],
            [t * x * z - s * y, t * y * z + s * x, t * z * z + c],
        ])
    }

    pub fn matrix_to_axis_angle(r: &RotationMatrix) -> AxisAngle {
        Self::quaternion_to_axis_angle(&Self::matrix_to_quaternion(r))
    }

    // ====================================================================
    // Euler <-> matrix
    // ====================================================================

    pub fn euler_to_matrix(e: &EulerAngles) -> RotationMatrix {
        let [a1, a2, a3] = e.axes.indices();
        RotationMatrix::about_axis(a1, e.x) * RotationMatrix::about_axis(a2, e.y) * RotationMatrix::about_axis(a3, e.z)
    }

    /// At gimbal lock the third angle is set to zero (or the first one for
    /// proper sequences, whose free angle is folded into the third).
    pub fn matrix_to_euler(r: &RotationMatrix, axes: EulerAxes) -> EulerAngles {
        let m = &r.0;
        let [i, j, _] = axes.indices();
        let k = 3 - i - j;
        let p = axes.parity();

        if axes.is_proper() {
            let cy = clamp(m[i][i], -1.0, 1.0);
            let y = cy.acos();
            if cy.abs() < GIMBAL_THRESHOLD {
                let x = m[j][i].atan2(-p * m[k][i]);
                let z = m[i][j].atan2(p * m[i][k]);
                EulerAngles::new(x, y, z, axes)
            } else {
                trace!(%axes, "gimbal lock in proper euler extraction");
                let z = (-p * m[j][k]).atan2(m[j][j]);
                EulerAngles::new(0.0, y, z, axes)
            }
        } else {
            let sy = clamp(p * m[i][k], -1.0, 1.0);
            let y = sy.asin();
            if sy.abs() < GIMBAL_THRESHOLD {
                let x = (-p * m[j][k]).atan2(m[k][k]);
                let z = (-p * m[i][j]).atan2(m[i][i]);
                EulerAngles::new(x, y, z, axes)
            } else {
                trace!(%axes, "gimbal lock in tait-bryan euler extraction");
                let x = (p * m[k][j]).atan2(m[j][j]);
                EulerAngles::new(x, y, 0.0, axes)
            }
        }
    }

    // ====================================================================
    // Euler <-> quaternion, Euler <-> axis-angle
    // ====================================================================

    /// Product of the three half-angle quaternions in axis order.
    pub fn euler_to_quaternion(e: &EulerAngles) -> Quaternion {
        let [a1, a2, a3] = e.axes.indices();
        elementary_quaternion(a1, e.x) * elementary_quaternion(a2, e.y) * elementary_quaternion(a3, e.z)
    }

    pub fn quaternion_to_euler(q: &Quaternion, axes: EulerAxes) -> EulerAngles {
        Self::matrix_to_euler(&Self::quaternion_to_matrix(q), axes)
    }

    pub fn euler_to_axis_angle(e: &EulerAngles) -> AxisAngle {
        Self::matrix_to_axis_angle(&Self::euler_to_matrix(e))
    }

    pub fn axis_angle_to_euler(aa: &AxisAngle, axes: EulerAxes) -> EulerAngles {
        Self::matrix_to_euler(&Self::axis_angle_to_matrix(aa), axes)
    }
}

fn elementary_quaternion(axis: usize, angle: f64) -> Quaternion {
    let (s, c) = (angle * 0.5).sin_cos();
    let mut v = [0.0; 3];
    v[axis] = s;
    Quaternion::new(v[0], v[1], v[2], c)
}

// ========================================================================
// From conversions
// ========================================================================

impl From<Quaternion> for RotationMatrix {
    fn from(q: Quaternion) -> Self {
        RotationConverter::quaternion_to_matrix(&q)
    }
}

impl From<RotationMatrix> for Quaternion {
    fn from(r: RotationMatrix) -> Self {
        RotationConverter::matrix_to_quaternion(&r)
    }
}

impl From<AxisAngle> for Quaternion {
    fn from(aa: AxisAngle) -> Self {
        RotationConverter::axis_angle_to_quaternion(&aa)
    }
}

impl From<Quaternion> for AxisAngle {
    fn from(q: Quaternion) -> Self {
        RotationConverter::quaternion_to_axis_angle(&q)
    }
}

impl From<AxisAngle> for RotationMatrix {
    fn from(aa: AxisAngle) -> Self {
        RotationConverter::axis_angle_to_matrix(&aa)
    }
}

impl From<RotationMatrix> for AxisAngle {
    fn from(r: RotationMatrix) -> Self {
        RotationConverter::matrix_to_axis_angle(&r)
    }
}

impl From<EulerAngles> for RotationMatrix {
    fn from(e: EulerAngles) -> Self {
        RotationConverter::euler_to_matrix(&e)
    }
}

impl From<EulerAngles> for Quaternion {
    fn from(e: EulerAngles) -> Self {
        RotationConverter::euler_to_quaternion(&e)
    }
}

impl From<EulerAngles> for AxisAngle {
    fn from(e: EulerAngles) -> Self {
        RotationConverter::euler_to_axis_angle(&e)
    }
}
