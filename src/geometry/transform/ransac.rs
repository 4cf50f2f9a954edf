// ransac.rs -- Robust transform estimation with outlier rejection.
//
// Each iteration fits the model to a random minimal sample and counts the
// pairs whose reprojection distance is below the threshold. The iteration
// cap shrinks as the inlier ratio improves:
//
//   k = ln(1 - confidence) / ln(1 - w^m)
//
// where w is the best inlier ratio so far and m the minimal sample size.
// The best consensus set is refitted with all its members at the end.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{check_point_sets, Transform, TransformOrder};
use crate::error::{Error, Result};
use crate::geometry::point::Point;
use crate::math::rng::Rng;

/// RANSAC configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RansacConfig {
    /// Upper bound on sampling iterations.
    pub max_iterations: usize,
    /// Maximum reprojection distance of an inlier, in destination units.
    pub threshold: f64,
    /// Probability (0..1) of having drawn at least one clean sample
    /// before stopping early.
    pub confidence: f64,
    /// Sampling seed; runs with the same seed are reproducible.
    pub seed: u64,
}

impl Default for RansacConfig {
    fn default() -> Self {
        RansacConfig {
            max_iterations: 200,
            threshold: 1.0,
            confidence: 0.99,
            seed: 42,
        }
    }
}

impl RansacConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::invalid("ransac.max_iterations must be positive"));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(Error::invalid("ransac.threshold must be a positive number"));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(Error::invalid("ransac.confidence must lie in (0, 1)"));
        }
        Ok(())
    }
}

/// Result of a RANSAC estimation.
#[derive(Debug, Clone)]
pub struct RansacResult<T> {
    /// Model refitted on the consensus set.
    pub transform: T,
    /// Inlier mask, one entry per input pair.
    pub inliers: Vec<bool>,
    pub num_inliers: usize,
    pub total: usize,
    /// Sampling iterations used.
    pub iterations: usize,
    /// RMSE of the refit over the inliers.
    pub rmse: f64,
}

/// Estimate a transform robustly. `factory` builds a fresh model for each
/// sample.
pub fn estimate<T, F>(factory: F, src: &[Point], dst: &[Point], config: &RansacConfig) -> Result<RansacResult<T>>
where
    T: Transform,
    F: Fn() -> T,
{
    config.validate()?;
    let min = factory().min_points();
    check_point_sets(src.len(), dst.len(), min.max(1))?;
    let n = src.len();

    let mut rng = Rng::new(config.seed);
    let mut best_inliers = vec![false; n];
    let mut best_count = 0usize;
    let mut iterations = 0;
    let mut adaptive_max = config.max_iterations;

    let mut sample_src = Vec::with_capacity(min);
    let mut sample_dst = Vec::with_capacity(min);

    while iterations < adaptive_max {
        iterations += 1;

        sample_src.clear();
        sample_dst.clear();
        for i in rng.sample_distinct(n, min) {
            sample_src.push(src[i]);
            sample_dst.push(dst[i]);
        }

        let mut model = factory();
        if model.compute(&sample_src, &sample_dst).is_err() {
            trace!(iteration = iterations, "degenerate sample");
            continue;
        }

        let (inliers, count) = consensus(&model, src, dst, config.threshold);
        if count > best_count {
            best_count = count;
            best_inliers = inliers;

            let w = count as f64 / n as f64;
            let p_fail = (1.0 - w.powi(min as i32)).max(1e-15);
            let k = (1.0 - config.confidence).ln() / p_fail.ln();
            adaptive_max = (k.ceil().max(1.0) as usize).min(config.max_iterations);
            trace!(iteration = iterations, inliers = count, adaptive_max, "new best consensus");
        }
    }

    if best_count < min {
        return Err(Error::NotEnoughPoints { required: min, found: best_count });
    }

    // Refit on the consensus set, then recount.
    let (in_src, in_dst): (Vec<Point>, Vec<Point>) = src
        .iter()
        .zip(dst)
        .zip(&best_inliers)
        .filter(|(_, &keep)| keep)
        .map(|((s, d), _)| (*s, *d))
        .unzip();
    let mut transform = factory();
    let rmse = transform.compute(&in_src, &in_dst)?;
    let (inliers, num_inliers) = consensus(&transform, src, dst, config.threshold);

    debug!(iterations, num_inliers, total = n, rmse, "ransac finished");
    Ok(RansacResult { transform, inliers, num_inliers, total: n, iterations, rmse })
}

fn consensus<T: Transform>(model: &T, src: &[Point], dst: &[Point], threshold: f64) -> (Vec<bool>, usize) {
    let mut count = 0;
    let mask = src
        .iter()
        .zip(dst)
        .map(|(s, d)| {
            let inlier = model
                .transform(s, TransformOrder::Direct)
                .map(|p| p.distance(d) < threshold)
                .unwrap_or(false);
            count += inlier as usize;
            inlier
        })
        .collect();
    (mask, count)
}
