// tidop: geomatics and photogrammetry toolkit
//
// Core runtime pieces (tasks with events, progress reporting, bounded
// queues, parallel loops), numeric building blocks (angles, least
// squares, statistics, 3-D rotations), planar geometry with estimable
// transforms, and color handling.

pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod graphic;
pub mod logging;
pub mod math;

pub use config::TidopConfig;
pub use error::{Error, Result};
