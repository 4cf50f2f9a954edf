// statistics.rs -- Descriptive statistics and binary classification metrics.
//
// Conventions:
//   - Variance uses the corrected two-pass formula
//       (sum(d^2) - sum(d)^2 / n) / (n - 1),   d = x - mean
//     which is exact when sum(d) is 0 and absorbs rounding otherwise.
//     It is 0 for n <= 1.
//   - Quantiles follow the Weibull definition (Hyndman-Fan type 6):
//     position h = (n + 1) p, clamped to [1, n], interpolated linearly
//     between neighbouring order statistics.
//   - Every measure of an empty series is 0 (`mode` is None).
//   - A NaN quantile probability yields NaN.

use std::cell::OnceCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================
// Series
// ============================================================

/// Ordered values with optional string labels as a secondary index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series<T> {
    values: Vec<T>,
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl<T> Series<T> {
    pub fn new() -> Self {
        Series { values: Vec::new(), labels: Vec::new(), index: HashMap::new() }
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        Series { values, labels: Vec::new(), index: HashMap::new() }
    }

    /// Labelled series. None when the label count differs from the value
    /// count or a label repeats.
    pub fn with_index(values: Vec<T>, labels: Vec<String>) -> Option<Self> {
        if values.len() != labels.len() {
            return None;
        }
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return None;
            }
        }
        Some(Series { values, labels, index })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.values.get(i)
    }

    pub fn get_by_label(&self, label: &str) -> Option<&T> {
        self.index.get(label).and_then(|&i| self.values.get(i))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Append an unlabelled value. Only valid on unlabelled series;
    /// labelled series use `push_labelled`.
    pub fn push(&mut self, value: T) -> bool {
        if !self.labels.is_empty() {
            return false;
        }
        self.values.push(value);
        true
    }

    pub fn push_labelled(&mut self, label: impl Into<String>, value: T) -> bool {
        if self.labels.len() != self.values.len() {
            return false;
        }
        let label = label.into();
        if self.index.contains_key(&label) {
            return false;
        }
        self.index.insert(label.clone(), self.values.len());
        self.labels.push(label);
        self.values.push(value);
        true
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }
}

impl<T> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Series::from_vec(iter.into_iter().collect())
    }
}

// ============================================================
// Free functions
// ============================================================

pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    sum(data) / data.len() as f64
}

pub fn min(data: &[f64]) -> f64 {
    data.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

pub fn max(data: &[f64]) -> f64 {
    data.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

pub fn range(data: &[f64]) -> f64 {
    max(data) - min(data)
}

fn sorted(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Quantile of already sorted data.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if p.is_nan() {
        return f64::NAN;
    }
    let h = ((n + 1) as f64 * p).clamp(1.0, n as f64);
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    let a = sorted[lo - 1];
    if lo >= n {
        return a;
    }
    a + frac * (sorted[lo] - a)
}

pub fn quantile(data: &[f64], p: f64) -> f64 {
    quantile_sorted(&sorted(data), p)
}

pub fn median(data: &[f64]) -> f64 {
    quantile(data, 0.5)
}

pub fn first_quartile(data: &[f64]) -> f64 {
    quantile(data, 0.25)
}

pub fn third_quartile(data: &[f64]) -> f64 {
    quantile(data, 0.75)
}

pub fn interquartile_range(data: &[f64]) -> f64 {
    let s = sorted(data);
    quantile_sorted(&s, 0.75) - quantile_sorted(&s, 0.25)
}

/// Most frequent value of sorted data; ties go to the smallest value.
fn mode_sorted(sorted: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let v = sorted[i];
        let mut j = i + 1;
        while j < sorted.len() && sorted[j] == v {
            j += 1;
        }
        let count = j - i;
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((v, count));
        }
        i = j;
    }
    best.map(|(v, _)| v)
}

pub fn mode(data: &[f64]) -> Option<f64> {
    mode_sorted(&sorted(data))
}

/// Sum of (x - mean)^2.
pub fn sum_of_squares(data: &[f64]) -> f64 {
    let m = mean(data);
    data.iter().map(|x| (x - m) * (x - m)).sum()
}

/// Sample variance (divides by n - 1).
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n <= 1 {
        return 0.0;
    }
    let m = mean(data);
    let (mut ep, mut ss) = (0.0, 0.0);
    for x in data {
        let d = x - m;
        ep += d;
        ss += d * d;
    }
    (ss - ep * ep / n as f64) / (n - 1) as f64
}

/// Population variance (divides by n).
pub fn population_variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    sum_of_squares(data) / data.len() as f64
}

pub fn standard_deviation(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

pub fn coefficient_of_variation(data: &[f64]) -> f64 {
    let m = mean(data);
    if m == 0.0 {
        return 0.0;
    }
    standard_deviation(data) / m.abs()
}

/// Average of |x - mean|.
pub fn mean_absolute_deviation(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).abs()).sum::<f64>() / data.len() as f64
}

/// Median of |x - median|.
pub fn median_absolute_deviation(data: &[f64]) -> f64 {
    let med = median(data);
    let dev: Vec<f64> = data.iter().map(|x| (x - med).abs()).collect();
    median(&dev)
}

pub fn root_mean_square(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    (data.iter().map(|x| x * x).sum::<f64>() / data.len() as f64).sqrt()
}

/// Adjusted Fisher-Pearson sample skewness. 0 for n < 3 or constant data.
pub fn skewness(data: &[f64]) -> f64 {
    let n = data.len();
    let s = standard_deviation(data);
    if n < 3 || s == 0.0 {
        return 0.0;
    }
    let m = mean(data);
    let m3: f64 = data.iter().map(|x| (x - m).powi(3)).sum();
    let n = n as f64;
    n / ((n - 1.0) * (n - 2.0)) * m3 / s.powi(3)
}

/// Sample excess kurtosis. 0 for n < 4 or constant data.
pub fn kurtosis(data: &[f64]) -> f64 {
    let n = data.len();
    let s = standard_deviation(data);
    if n < 4 || s == 0.0 {
        return 0.0;
    }
    let m = mean(data);
    let m4: f64 = data.iter().map(|x| (x - m).powi(4)).sum();
    let n = n as f64;
    (n + 1.0) * n / ((n - 1.0) * (n - 2.0) * (n - 3.0)) * m4 / s.powi(4)
        - 3.0 * (n - 1.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
}

/// Population covariance. 0 when lengths differ or n <= 1.
pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n <= 1 {
        return 0.0;
    }
    let (mx, my) = (mean(x), mean(y));
    x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum::<f64>() / n as f64
}

/// Pearson correlation coefficient. 0 when undefined.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n <= 1 {
        return 0.0;
    }
    let (mx, my) = (mean(x), mean(y));
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let den = (sxx * syy).sqrt();
    if den == 0.0 {
        0.0
    } else {
        sxy / den
    }
}

// ============================================================
// DescriptiveStatistics
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Sample statistics (n - 1) when true, population (n) when false.
    pub sample: bool,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        StatisticsConfig { sample: true }
    }
}

/// All measures at once, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub size: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub mode: Option<f64>,
    pub range: f64,
    pub variance: f64,
    pub standard_deviation: f64,
    pub first_quartile: f64,
    pub third_quartile: f64,
    pub interquartile_range: f64,
    pub mean_absolute_deviation: f64,
    pub median_absolute_deviation: f64,
    pub sum_of_squares: f64,
    pub root_mean_square: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub coefficient_of_variation: f64,
}

/// Descriptive statistics with lazily computed, cached intermediates.
#[derive(Debug, Clone)]
pub struct DescriptiveStatistics {
    data: Vec<f64>,
    config: StatisticsConfig,
    sorted: OnceCell<Vec<f64>>,
    mean: OnceCell<f64>,
    variance: OnceCell<f64>,
}

impl DescriptiveStatistics {
    pub fn new<T: Copy + Into<f64>>(data: &[T]) -> Self {
        Self::with_config(data, StatisticsConfig::default())
    }

    pub fn from_series<T: Copy + Into<f64>>(series: &Series<T>) -> Self {
        Self::new(series.values())
    }

    pub fn with_config<T: Copy + Into<f64>>(data: &[T], config: StatisticsConfig) -> Self {
        DescriptiveStatistics {
            data: data.iter().map(|&v| v.into()).collect(),
            config,
            sorted: OnceCell::new(),
            mean: OnceCell::new(),
            variance: OnceCell::new(),
        }
    }

    pub fn config(&self) -> StatisticsConfig {
        self.config
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    fn sorted(&self) -> &[f64] {
        self.sorted.get_or_init(|| sorted(&self.data))
    }

    pub fn min(&self) -> f64 {
        self.sorted().first().copied().unwrap_or(0.0)
    }

    pub fn max(&self) -> f64 {
        self.sorted().last().copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        sum(&self.data)
    }

    pub fn mean(&self) -> f64 {
        *self.mean.get_or_init(|| mean(&self.data))
    }

    pub fn median(&self) -> f64 {
        quantile_sorted(self.sorted(), 0.5)
    }

    pub fn mode(&self) -> Option<f64> {
        mode_sorted(self.sorted())
    }

    pub fn range(&self) -> f64 {
        self.max() - self.min()
    }

    pub fn variance(&self) -> f64 {
        *self.variance.get_or_init(|| {
            if self.config.sample {
                variance(&self.data)
            } else {
                population_variance(&self.data)
            }
        })
    }

    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn quantile(&self, p: f64) -> f64 {
        quantile_sorted(self.sorted(), p)
    }

    pub fn first_quartile(&self) -> f64 {
        self.quantile(0.25)
    }

    pub fn third_quartile(&self) -> f64 {
        self.quantile(0.75)
    }

    pub fn interquartile_range(&self) -> f64 {
        self.third_quartile() - self.first_quartile()
    }

    pub fn mean_absolute_deviation(&self) -> f64 {
        mean_absolute_deviation(&self.data)
    }

    pub fn median_absolute_deviation(&self) -> f64 {
        let med = self.median();
        let dev: Vec<f64> = self.data.iter().map(|x| (x - med).abs()).collect();
        median(&dev)
    }

    pub fn sum_of_squares(&self) -> f64 {
        let m = self.mean();
        self.data.iter().map(|x| (x - m) * (x - m)).sum()
    }

    pub fn root_mean_square(&self) -> f64 {
        root_mean_square(&self.data)
    }

    pub fn skewness(&self) -> f64 {
        skewness(&self.data)
    }

    pub fn kurtosis(&self) -> f64 {
        kurtosis(&self.data)
    }

    pub fn coefficient_of_variation(&self) -> f64 {
        let m = self.mean();
        if m == 0.0 {
            return 0.0;
        }
        self.standard_deviation() / m.abs()
    }

    pub fn summary(&self) -> StatisticsSummary {
        StatisticsSummary {
            size: self.size(),
            min: self.min(),
            max: self.max(),
            sum: self.sum(),
            mean: self.mean(),
            median: self.median(),
            mode: self.mode(),
            range: self.range(),
            variance: self.variance(),
            standard_deviation: self.standard_deviation(),
            first_quartile: self.first_quartile(),
            third_quartile: self.third_quartile(),
            interquartile_range: self.interquartile_range(),
            mean_absolute_deviation: self.mean_absolute_deviation(),
            median_absolute_deviation: self.median_absolute_deviation(),
            sum_of_squares: self.sum_of_squares(),
            root_mean_square: self.root_mean_square(),
            skewness: self.skewness(),
            kurtosis: self.kurtosis(),
            coefficient_of_variation: self.coefficient_of_variation(),
        }
    }
}

// ============================================================
// Confusion matrix
// ============================================================

/// Binary classification outcome counts at one threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

fn ratio(num: usize, den: usize) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

// Rates are None when their denominator is zero.
impl ConfusionCounts {
    pub fn positives(&self) -> usize {
        self.true_positives + self.false_negatives
    }

    pub fn negatives(&self) -> usize {
        self.false_positives + self.true_negatives
    }

    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.true_positives + self.true_negatives, self.positives() + self.negatives())
    }

    /// Precision.
    pub fn positive_predictive_value(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn negative_predictive_value(&self) -> Option<f64> {
        ratio(self.true_negatives, self.true_negatives + self.false_negatives)
    }

    /// Recall or sensitivity.
    pub fn true_positive_rate(&self) -> Option<f64> {
        ratio(self.true_positives, self.positives())
    }

    /// Fall-out.
    pub fn false_positive_rate(&self) -> Option<f64> {
        ratio(self.false_positives, self.negatives())
    }

    /// Specificity.
    pub fn true_negative_rate(&self) -> Option<f64> {
        ratio(self.true_negatives, self.negatives())
    }

    pub fn false_negative_rate(&self) -> Option<f64> {
        ratio(self.false_negatives, self.positives())
    }
}

/// Scored samples with their actual class, evaluated at any threshold.
///
/// A sample is predicted positive when its score is at or above the
/// threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    // Sorted by score.
    data: Vec<(f64, bool)>,
    positives: usize,
}

impl ConfusionMatrix {
    pub fn new(data: &[(f64, bool)]) -> Self {
        let mut data = data.to_vec();
        data.sort_by(|a, b| a.0.total_cmp(&b.0));
        let positives = data.iter().filter(|(_, positive)| *positive).count();
        ConfusionMatrix { data, positives }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn positives(&self) -> usize {
        self.positives
    }

    pub fn negatives(&self) -> usize {
        self.data.len() - self.positives
    }

    pub fn counts(&self, threshold: f64) -> ConfusionCounts {
        // Everything before `split` is predicted negative.
        let split = self.data.partition_point(|(score, _)| *score < threshold);
        let false_negatives = self.data[..split].iter().filter(|(_, p)| *p).count();
        let true_positives = self.positives - false_negatives;
        ConfusionCounts {
            true_positives,
            false_positives: (self.data.len() - split) - true_positives,
            true_negatives: split - false_negatives,
            false_negatives,
        }
    }

    pub fn true_positives(&self, threshold: f64) -> usize {
        self.counts(threshold).true_positives
    }

    pub fn false_positives(&self, threshold: f64) -> usize {
        self.counts(threshold).false_positives
    }

    pub fn true_negatives(&self, threshold: f64) -> usize {
        self.counts(threshold).true_negatives
    }

    pub fn false_negatives(&self, threshold: f64) -> usize {
        self.counts(threshold).false_negatives
    }

    pub fn accuracy(&self, threshold: f64) -> Option<f64> {
        self.counts(threshold).accuracy()
    }

    pub fn positive_predictive_value(&self, threshold: f64) -> Option<f64> {
        self.counts(threshold).positive_predictive_value()
    }

    pub fn negative_predictive_value(&self, threshold: f64) -> Option<f64> {
        self.counts(threshold).negative_predictive_value()
    }

    pub fn true_positive_rate(&self, threshold: f64) -> Option<f64> {
        self.counts(threshold).true_positive_rate()
    }

    pub fn false_positive_rate(&self, threshold: f64) -> Option<f64> {
        self.counts(threshold).false_positive_rate()
    }

    pub fn true_negative_rate(&self, threshold: f64) -> Option<f64> {
        self.counts(threshold).true_negative_rate()
    }

    pub fn false_negative_rate(&self, threshold: f64) -> Option<f64> {
        self.counts(threshold).false_negative_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S1: [f64; 9] = [8.0, 8.5, 7.5, 9.0, 6.25, 5.5, 8.5, 7.5, 8.5];
    const S2: [i32; 7] = [1, 0, 1, 3, 2, 0, 1];
    const S3: [f64; 6] = [17.0, 15.0, 23.0, 7.0, 9.0, 13.0];

    fn close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} != {b}");
    }

    #[test]
    fn test_central_tendency() {
        let st = DescriptiveStatistics::new(&S1);
        close(st.mean(), 7.694444, 1e-5);
        close(st.median(), 8.0, 1e-12);
        assert_eq!(st.mode(), Some(8.5));
        close(st.min(), 5.5, 1e-12);
        close(st.max(), 9.0, 1e-12);
        close(st.range(), 3.5, 1e-12);
        close(st.sum(), 69.25, 1e-12);
    }

    #[test]
    fn test_dispersion() {
        let st = DescriptiveStatistics::new(&S1);
        close(st.variance(), 1.34028, 1e-5);
        close(st.standard_deviation(), 1.15770, 1e-5);
        close(st.coefficient_of_variation(), 0.150460, 1e-6);
        close(st.mean_absolute_deviation(), 0.895062, 1e-6);
        close(st.median_absolute_deviation(), 0.5, 1e-12);
        close(st.sum_of_squares(), 10.7222, 1e-4);
        close(st.root_mean_square(), 7.77148, 1e-5);
    }

    #[test]
    fn test_quartiles_weibull() {
        let st = DescriptiveStatistics::new(&S1);
        close(st.first_quartile(), 6.875, 1e-12);
        close(st.third_quartile(), 8.5, 1e-12);
        close(st.interquartile_range(), 1.625, 1e-12);

        let st = DescriptiveStatistics::new(&S3);
        close(st.first_quartile(), 8.5, 1e-12);
        close(st.median(), 14.0, 1e-12);
        close(st.third_quartile(), 18.5, 1e-12);
    }

    #[test]
    fn test_integer_series() {
        let st = DescriptiveStatistics::new(&S2);
        close(st.mean(), 1.142857, 1e-6);
        close(st.variance(), 1.142857, 1e-6);
        close(st.standard_deviation(), 1.069045, 1e-6);
        close(st.first_quartile(), 0.0, 1e-12);
        close(st.third_quartile(), 2.0, 1e-12);
        close(st.median_absolute_deviation(), 1.0, 1e-12);
        close(st.sum_of_squares(), 6.857143, 1e-6);
        close(st.root_mean_square(), 1.511858, 1e-6);
        assert_eq!(st.mode(), Some(1.0));
    }

    #[test]
    fn test_shape() {
        close(skewness(&S1), -1.01235079, 1e-7);
        close(skewness(&S3), 0.451654786, 1e-8);
        let s2: Vec<f64> = S2.iter().map(|&v| v as f64).collect();
        close(skewness(&s2), 0.771716836, 1e-8);
        close(kurtosis(&S1), 0.158880584, 1e-8);
        close(kurtosis(&S3), -0.108869212, 1e-8);
    }

    #[test]
    fn test_s3_dispersion() {
        let st = DescriptiveStatistics::new(&S3);
        close(st.variance(), 33.2, 1e-9);
        close(st.standard_deviation(), 5.76194, 1e-5);
        close(st.mean_absolute_deviation(), 4.33333, 1e-5);
        close(st.median_absolute_deviation(), 4.0, 1e-12);
        close(st.sum_of_squares(), 166.0, 1e-9);
        close(st.root_mean_square(), 14.95549, 1e-5);
        close(st.coefficient_of_variation(), 0.411567, 1e-6);
    }

    #[test]
    fn test_population_config() {
        let st = DescriptiveStatistics::with_config(&S3, StatisticsConfig { sample: false });
        close(st.variance(), 166.0 / 6.0, 1e-9);
    }

    #[test]
    fn test_empty_and_single() {
        let empty: [f64; 0] = [];
        let st = DescriptiveStatistics::new(&empty);
        assert_eq!(st.mean(), 0.0);
        assert_eq!(st.median(), 0.0);
        assert_eq!(st.mode(), None);
        assert_eq!(st.variance(), 0.0);
        assert_eq!(st.range(), 0.0);

        let st = DescriptiveStatistics::new(&[4.0f64]);
        assert_eq!(st.variance(), 0.0);
        assert_eq!(st.median(), 4.0);
        assert_eq!(st.first_quartile(), 4.0);
        assert_eq!(st.skewness(), 0.0);
    }

    #[test]
    fn test_covariance_and_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        close(covariance(&x, &y), 1.2, 1e-12);
        close(pearson_correlation(&x, &y), 0.774596669, 1e-8);
        assert_eq!(covariance(&x, &y[..3]), 0.0);
        close(pearson_correlation(&x, &x), 1.0, 1e-12);
    }

    #[test]
    fn test_series_labels() {
        let s = Series::with_index(
            vec![1.0, 2.0, 3.0],
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap();
        assert_eq!(s.get_by_label("b"), Some(&2.0));
        assert_eq!(s.get_by_label("z"), None);
        assert!(Series::with_index(vec![1.0], vec!["a".into(), "b".into()]).is_none());
        assert!(Series::with_index(vec![1.0, 2.0], vec!["a".into(), "a".into()]).is_none());

        let mut s = s;
        assert!(!s.push(4.0));
        assert!(s.push_labelled("d", 4.0));
        assert!(!s.push_labelled("d", 5.0));
        assert_eq!(s.len(), 4);

        let unlabelled: Series<f64> = (0..3).map(|v| v as f64).collect();
        let st = DescriptiveStatistics::from_series(&unlabelled);
        close(st.mean(), 1.0, 1e-12);
    }

    #[test]
    fn test_quantile_nan_probability() {
        assert!(quantile(&S1, f64::NAN).is_nan());
        let st = DescriptiveStatistics::new(&S3);
        assert!(st.quantile(f64::NAN).is_nan());
        // Out of range probabilities clamp to the extremes.
        assert_eq!(quantile(&S3, f64::INFINITY), 23.0);
        assert_eq!(quantile(&S3, -1.0), 7.0);
    }

    fn scored() -> ConfusionMatrix {
        ConfusionMatrix::new(&[
            (0.9, true),
            (0.1, false),
            (0.8, true),
            (0.35, false),
            (0.6, false),
            (0.4, true),
            (0.2, false),
            (0.7, true),
        ])
    }

    #[test]
    fn test_confusion_counts_at_threshold() {
        let cm = scored();
        assert_eq!(cm.len(), 8);
        assert_eq!(cm.positives(), 4);
        assert_eq!(cm.negatives(), 4);

        let c = cm.counts(0.5);
        assert_eq!(
            c,
            ConfusionCounts {
                true_positives: 3,
                false_positives: 1,
                true_negatives: 3,
                false_negatives: 1
            }
        );
        // The threshold itself counts as positive.
        assert_eq!(cm.true_positives(0.4), 4);
        assert_eq!(cm.false_negatives(0.4), 0);
        assert_eq!(cm.false_positives(0.4), 1);
        assert_eq!(cm.true_negatives(0.4), 3);
    }

    #[test]
    fn test_confusion_rates() {
        let cm = scored();
        close(cm.accuracy(0.5).unwrap(), 0.75, 1e-12);
        close(cm.positive_predictive_value(0.5).unwrap(), 0.75, 1e-12);
        close(cm.negative_predictive_value(0.5).unwrap(), 0.75, 1e-12);
        close(cm.true_positive_rate(0.5).unwrap(), 0.75, 1e-12);
        close(cm.false_positive_rate(0.5).unwrap(), 0.25, 1e-12);
        close(cm.true_negative_rate(0.5).unwrap(), 0.75, 1e-12);
        close(cm.false_negative_rate(0.5).unwrap(), 0.25, 1e-12);

        // Nothing predicted positive above every score.
        assert_eq!(cm.positive_predictive_value(1.0), None);
        close(cm.true_positive_rate(1.0).unwrap(), 0.0, 1e-12);
        close(cm.true_negative_rate(1.0).unwrap(), 1.0, 1e-12);
    }

    #[test]
    fn test_confusion_degenerate() {
        let empty = ConfusionMatrix::new(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.accuracy(0.5), None);
        assert_eq!(empty.counts(0.5), ConfusionCounts::default());

        let only_positive = ConfusionMatrix::new(&[(0.3, true), (0.7, true)]);
        assert_eq!(only_positive.false_positive_rate(0.5), None);
        assert_eq!(only_positive.true_negative_rate(0.5), None);
        close(only_positive.true_positive_rate(0.5).unwrap(), 0.5, 1e-12);

        let c = ConfusionCounts { true_positives: 2, false_negatives: 2, ..Default::default() };
        close(c.false_negative_rate().unwrap(), 0.5, 1e-12);
        assert_eq!(c.negative_predictive_value(), Some(0.0));
    }

    #[test]
    fn test_summary_serializes() {
        let summary = DescriptiveStatistics::new(&S1).summary();
        let json = serde_json::to_string(&summary).unwrap();
        let back: StatisticsSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.size, 9);
        assert_eq!(back.mode, Some(8.5));
        close(back.mean, summary.mean, 1e-12);
        close(back.skewness, summary.skewness, 1e-12);
    }
}
