//! Analyzers computed over a [`TimeIndexedDataset`](crate::dataset::TimeIndexedDataset).
//!
//! - **Frequency** (`frequency`): coarse sampling-cadence guess from the modal
//!   index delta
//! - **Missingness** (`missingness`): per-column missing count and ratio,
//!   most incomplete first
//! - **Statistics** (`statistics`): count, mean, std, min, quantiles, max,
//!   skew and kurtosis per column
//!
//! All analyzers are pure functions of the dataset and never fail; an empty
//! dataset yields degenerate but well-defined results.

pub mod frequency;
pub mod missingness;
pub mod statistics;

pub use frequency::{estimate_frequency, modal_delta, FrequencyGuess};
pub use missingness::{missing_ratio, MissingnessProfile, MissingnessRecord};
pub use statistics::{
    observed_count, quantile_sorted, DescriptiveStatistics, StatisticsRecord, QUANTILES,
};
