// euler.rs -- Euler angle triples and their axis sequences.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Axis sequence for an Euler triple. The rotation is
/// R = R_a1(x) * R_a2(y) * R_a3(z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EulerAxes {
    Zxz,
    Xyx,
    Yzy,
    Zyz,
    Xzx,
    Yxy,
    #[default]
    Xyz,
    Yzx,
    Zxy,
    Xzy,
    Zyx,
    Yxz,
}

impl EulerAxes {
    pub const ALL: [EulerAxes; 12] = [
        EulerAxes::Zxz,
        EulerAxes::Xyx,
        EulerAxes::Yzy,
        EulerAxes::Zyz,
        EulerAxes::Xzx,
        EulerAxes::Yxy,
        EulerAxes::Xyz,
        EulerAxes::Yzx,
        EulerAxes::Zxy,
        EulerAxes::Xzy,
        EulerAxes::Zyx,
        EulerAxes::Yxz,
    ];

    /// Axis indices (0 = x, 1 = y, 2 = z) in application order.
    pub fn indices(self) -> [usize; 3] {
        match self {
            EulerAxes::Zxz => [2, 0, 2],
            EulerAxes::Xyx => [0, 1, 0],
            EulerAxes::Yzy => [1, 2, 1],
            EulerAxes::Zyz => [2, 1, 2],
            EulerAxes::Xzx => [0, 2, 0],
            EulerAxes::Yxy => [1, 0, 1],
            EulerAxes::Xyz => [0, 1, 2],
            EulerAxes::Yzx => [1, 2, 0],
            EulerAxes::Zxy => [2, 0, 1],
            EulerAxes::Xzy => [0, 2, 1],
            EulerAxes::Zyx => [2, 1, 0],
            EulerAxes::Yxz => [1, 0, 2],
        }
    }

    /// Proper Euler sequences repeat the first axis; the rest are Tait-Bryan.
    pub fn is_proper(self) -> bool {
        let [a, _, c] = self.indices();
        a == c
    }

    /// +1 when (first, second, remaining) is a cyclic permutation of (x, y, z).
    pub(crate) fn parity(self) -> f64 {
        let [i, j, _] = self.indices();
        if (i + 1) % 3 == j {
            1.0
        } else {
            -1.0
        }
    }
}

impl fmt::Display for EulerAxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: String = self
            .indices()
            .iter()
            .map(|&i| ['x', 'y', 'z'][i])
            .collect();
        f.write_str(&name)
    }
}

/// Three angles in radians applied about `axes`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub axes: EulerAxes,
}

impl EulerAngles {
    pub const fn new(x: f64, y: f64, z: f64, axes: EulerAxes) -> Self {
        EulerAngles { x, y, z, axes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_kinds() {
        let proper = EulerAxes::ALL.iter().filter(|a| a.is_proper()).count();
        assert_eq!(proper, 6);
        assert_eq!(EulerAxes::Zyx.to_string(), "zyx");
        assert_eq!(EulerAxes::Xyz.parity(), 1.0);
        assert_eq!(EulerAxes::Xzy.parity(), -1.0);
        assert_eq!(EulerAxes::Zxz.parity(), 1.0);
        assert_eq!(EulerAxes::Zyz.parity(), -1.0);
    }
}
