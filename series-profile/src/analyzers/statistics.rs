//! Descriptive statistics per column.
//!
//! Every statistic is computed over the non-missing values of a column. A
//! statistic without enough observations is reported as NaN:
//!
//! | statistic                      | minimum count |
//! |--------------------------------|---------------|
//! | mean, min, max, quantiles      | 1             |
//! | std (sample, n - 1)            | 2             |
//! | skew (adjusted Fisher-Pearson) | 3             |
//! | kurtosis (excess, Fisher)      | 4             |
//!
//! Quantiles interpolate linearly between order statistics at position
//! `(n - 1) * q`. A zero-variance column has skew and kurtosis 0.0.

use arrow::array::{Array, Float64Array};
use arrow::compute;
use serde::{Deserialize, Serialize};

use crate::dataset::TimeIndexedDataset;

/// Quantile levels reported for every column.
pub const QUANTILES: [f64; 5] = [0.01, 0.05, 0.5, 0.95, 0.99];

/// Central moment terms below this magnitude are treated as zero.
const MOMENT_EPSILON: f64 = 1e-14;

/// Descriptive statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "1%")]
    pub p1: f64,
    #[serde(rename = "5%")]
    pub p5: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "95%")]
    pub p95: f64,
    #[serde(rename = "99%")]
    pub p99: f64,
    pub max: f64,
    pub skew: f64,
    pub kurtosis: f64,
}

impl StatisticsRecord {
    /// Computes the statistics of one column.
    pub fn compute(column: &str, values: &Float64Array) -> Self {
        let mut observed: Vec<f64> = values.iter().flatten().collect();
        let count = observed.len();

        let mean = match compute::sum(values) {
            Some(sum) if count > 0 => sum / count as f64,
            _ => f64::NAN,
        };
        let moments = CentralMoments::new(&observed, mean);

        observed.sort_by(f64::total_cmp);
        let [p1, p5, p50, p95, p99] = QUANTILES.map(|q| quantile_sorted(&observed, q));

        Self {
            column: column.to_string(),
            count,
            mean,
            std: moments.sample_std(count),
            min: compute::min(values).unwrap_or(f64::NAN),
            p1,
            p5,
            p50,
            p95,
            p99,
            max: compute::max(values).unwrap_or(f64::NAN),
            skew: moments.skew(count),
            kurtosis: moments.kurtosis(count),
        }
    }

    /// Values in report order, after `count`.
    pub fn values(&self) -> [f64; 11] {
        [
            self.mean,
            self.std,
            self.min,
            self.p1,
            self.p5,
            self.p50,
            self.p95,
            self.p99,
            self.max,
            self.skew,
            self.kurtosis,
        ]
    }
}

/// Sums of powers of deviations from the mean.
#[derive(Debug, Clone, Copy, Default)]
struct CentralMoments {
    m2: f64,
    m3: f64,
    m4: f64,
}

impl CentralMoments {
    fn new(values: &[f64], mean: f64) -> Self {
        values.iter().fold(Self::default(), |acc, &x| {
            let d = x - mean;
            let d2 = d * d;
            Self {
                m2: acc.m2 + d2,
                m3: acc.m3 + d2 * d,
                m4: acc.m4 + d2 * d2,
            }
        })
    }

    fn sample_std(&self, n: usize) -> f64 {
        if n < 2 {
            return f64::NAN;
        }
        (self.m2 / (n - 1) as f64).sqrt()
    }

    fn skew(&self, n: usize) -> f64 {
        if n < 3 {
            return f64::NAN;
        }
        let m2 = zero_out_noise(self.m2);
        let m3 = zero_out_noise(self.m3);
        if m2 == 0.0 {
            return 0.0;
        }
        let n = n as f64;
        (n * (n - 1.0).sqrt() / (n - 2.0)) * (m3 / m2.powf(1.5))
    }

    fn kurtosis(&self, n: usize) -> f64 {
        if n < 4 {
            return f64::NAN;
        }
        let n = n as f64;
        let adjustment = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
        let numerator = zero_out_noise(n * (n + 1.0) * (n - 1.0) * self.m4);
        let denominator = zero_out_noise((n - 2.0) * (n - 3.0) * self.m2 * self.m2);
        if denominator == 0.0 {
            return 0.0;
        }
        numerator / denominator - adjustment
    }
}

fn zero_out_noise(value: f64) -> f64 {
    if value.abs() < MOMENT_EPSILON {
        0.0
    } else {
        value
    }
}

/// Linear-interpolation quantile of already sorted values.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let position = (n - 1) as f64 * q;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let fraction = position - lower as f64;
            if lower == upper {
                sorted[lower]
            } else {
                sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
            }
        }
    }
}

/// Statistics for every column of a dataset, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStatistics {
    records: Vec<StatisticsRecord>,
}

impl DescriptiveStatistics {
    pub fn compute(dataset: &TimeIndexedDataset) -> Self {
        let records = dataset
            .columns()
            .map(|(name, values)| StatisticsRecord::compute(name, values))
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[StatisticsRecord] {
        &self.records
    }

    /// Record for the column called `name`.
    pub fn get(&self, name: &str) -> Option<&StatisticsRecord> {
        self.records.iter().find(|r| r.column == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Number of non-missing values in an Arrow column.
pub fn observed_count(values: &Float64Array) -> usize {
    values.len() - values.null_count()
}
