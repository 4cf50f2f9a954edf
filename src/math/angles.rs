// angles.rs -- Angle units (radians, degrees, gradians) and conversions.
//
// Each unit type is a thin f64 newtype. `normalize` folds into the
// half-open range (-half_turn, half_turn]; `normalize_positive` folds into
// [0, full_turn). Degrees split into degrees/minutes/seconds
// sexagesimally; gradians use the centesimal split (x100).

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

pub const TWO_PI: f64 = 2.0 * PI;
pub const HALF_PI: f64 = PI / 2.0;

pub const DEG_TO_RAD: f64 = PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / PI;
pub const GRAD_TO_RAD: f64 = PI / 200.0;
pub const RAD_TO_GRAD: f64 = 200.0 / PI;
pub const DEG_TO_GRAD: f64 = 400.0 / 360.0;
pub const GRAD_TO_DEG: f64 = 360.0 / 400.0;

// ============================================================
// Free conversions
// ============================================================

/// Sexagesimal degrees to decimal degrees. The sign of `degrees` applies
/// to the whole value.
pub fn degrees_to_decimal_degrees(degrees: i32, minutes: i32, seconds: f64) -> f64 {
    let sign = if degrees < 0 { -1.0 } else { 1.0 };
    sign * (degrees.abs() as f64 + minutes as f64 / 60.0 + seconds / 3600.0)
}

/// Decimal degrees to (degrees, minutes, seconds). Only degrees is signed.
pub fn decimal_degrees_to_degrees(value: f64) -> (i32, i32, f64) {
    split_units(value, 60.0)
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * DEG_TO_RAD
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * RAD_TO_DEG
}

pub fn gradians_to_radians(gradians: f64) -> f64 {
    gradians * GRAD_TO_RAD
}

pub fn radians_to_gradians(radians: f64) -> f64 {
    radians * RAD_TO_GRAD
}

pub fn degrees_to_gradians(degrees: f64) -> f64 {
    degrees * DEG_TO_GRAD
}

pub fn gradians_to_degrees(gradians: f64) -> f64 {
    gradians * GRAD_TO_DEG
}

fn split_units(value: f64, base: f64) -> (i32, i32, f64) {
    let whole = value.trunc();
    let frac = (value - whole).abs() * base;
    let minutes = frac.trunc();
    let seconds = (frac - minutes) * base;
    (whole as i32, minutes as i32, seconds)
}

/// Fold `value` into (-half, half].
fn fold_signed(value: f64, half: f64) -> f64 {
    let mut v = value;
    if v <= -half || v > half {
        v = (v + half) % (2.0 * half);
        if v <= 0.0 {
            v += half;
        } else {
            v -= half;
        }
    }
    v
}

/// Fold `value` into [0, full).
fn fold_positive(value: f64, full: f64) -> f64 {
    let mut v = value % full;
    if v < 0.0 {
        v += full;
    }
    // -tiny % full + full can round up to full itself.
    if v >= full {
        v = 0.0;
    }
    v
}

// ============================================================
// Unit types
// ============================================================

macro_rules! angle_unit {
    ($name:ident, $half:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        pub struct $name(pub f64);

        impl $name {
            pub const HALF_TURN: f64 = $half;
            pub const FULL_TURN: f64 = 2.0 * $half;

            pub fn new(value: f64) -> Self {
                $name(value)
            }

            pub fn value(&self) -> f64 {
                self.0
            }

            pub fn set_value(&mut self, value: f64) {
                self.0 = value;
            }

            /// Fold into (-half turn, half turn].
            pub fn normalize(&mut self) {
                self.0 = fold_signed(self.0, Self::HALF_TURN);
            }

            /// Fold into [0, full turn).
            pub fn normalize_positive(&mut self) {
                self.0 = fold_positive(self.0, Self::FULL_TURN);
            }

            pub fn normalized(mut self) -> Self {
                self.normalize();
                self
            }
        }
    };
}

angle_unit!(Radians, PI);
angle_unit!(Degrees, 180.0);
angle_unit!(Gradians, 200.0);

impl Degrees {
    pub fn from_dms(degrees: i32, minutes: i32, seconds: f64) -> Self {
        Degrees(degrees_to_decimal_degrees(degrees, minutes, seconds))
    }

    pub fn degrees(&self) -> i32 {
        split_units(self.0, 60.0).0
    }

    pub fn minutes(&self) -> i32 {
        split_units(self.0, 60.0).1
    }

    pub fn seconds(&self) -> f64 {
        split_units(self.0, 60.0).2
    }
}

impl Gradians {
    /// Centesimal construction: 100 minutes per gradian, 100 seconds per
    /// minute.
    pub fn from_dms(gradians: i32, minutes: i32, seconds: f64) -> Self {
        let sign = if gradians < 0 { -1.0 } else { 1.0 };
        Gradians(sign * (gradians.abs() as f64 + minutes as f64 / 100.0 + seconds / 10_000.0))
    }

    pub fn degrees(&self) -> i32 {
        split_units(self.0, 100.0).0
    }

    pub fn minutes(&self) -> i32 {
        split_units(self.0, 100.0).1
    }

    pub fn seconds(&self) -> f64 {
        split_units(self.0, 100.0).2
    }
}

impl From<Degrees> for Radians {
    fn from(d: Degrees) -> Self {
        Radians(degrees_to_radians(d.0))
    }
}

impl From<Gradians> for Radians {
    fn from(g: Gradians) -> Self {
        Radians(gradians_to_radians(g.0))
    }
}

impl From<Radians> for Degrees {
    fn from(r: Radians) -> Self {
        Degrees(radians_to_degrees(r.0))
    }
}

impl From<Gradians> for Degrees {
    fn from(g: Gradians) -> Self {
        Degrees(gradians_to_degrees(g.0))
    }
}

impl From<Radians> for Gradians {
    fn from(r: Radians) -> Self {
        Gradians(radians_to_gradians(r.0))
    }
}

impl From<Degrees> for Gradians {
    fn from(d: Degrees) -> Self {
        Gradians(degrees_to_gradians(d.0))
    }
}
