// math/mod.rs -- Angles, linear algebra, statistics, rotations.

pub mod angles;
pub mod linalg;
pub mod rng;
pub mod rotations;
pub mod statistics;
pub mod utils;

pub use angles::{Degrees, Gradians, Radians};
pub use linalg::{least_squares, solve, Matrix, NormalEquations};
pub use rng::Rng;
pub use rotations::{AxisAngle, EulerAngles, EulerAxes, Quaternion, RotationConverter, RotationMatrix};
pub use statistics::{
    ConfusionCounts, ConfusionMatrix, DescriptiveStatistics, Series, StatisticsConfig, StatisticsSummary,
};
