//! Per-column missingness.

use arrow::array::Array;
use serde::{Deserialize, Serialize};

use crate::dataset::TimeIndexedDataset;

/// Missing-value count and ratio for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingnessRecord {
    pub column: String,
    pub missing_count: usize,
    /// `missing_count / n_rows`, rounded to 6 decimals; 0.0 for an empty dataset.
    pub missing_ratio: f64,
}

/// Missingness of every column, most incomplete first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingnessProfile {
    records: Vec<MissingnessRecord>,
}

impl MissingnessProfile {
    /// Profiles every column of `dataset`.
    ///
    /// Records are sorted by ratio descending; equal ratios keep column order.
    pub fn compute(dataset: &TimeIndexedDataset) -> Self {
        let n_rows = dataset.num_rows();
        let mut records: Vec<MissingnessRecord> = dataset
            .columns()
            .map(|(name, values)| {
                let missing_count = values.null_count();
                MissingnessRecord {
                    column: name.to_string(),
                    missing_count,
                    missing_ratio: missing_ratio(missing_count, n_rows),
                }
            })
            .collect();

        // sort_by is stable
        records.sort_by(|a, b| b.missing_ratio.total_cmp(&a.missing_ratio));
        Self { records }
    }

    pub fn records(&self) -> &[MissingnessRecord] {
        &self.records
    }

    /// The `n` most incomplete columns.
    pub fn top(&self, n: usize) -> &[MissingnessRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Record for the column called `name`.
    pub fn get(&self, name: &str) -> Option<&MissingnessRecord> {
        self.records.iter().find(|r| r.column == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Ratio rounded to 6 decimal places.
pub fn missing_ratio(missing: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(missing as f64 / total as f64, 6)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    fn index(n: usize) -> Vec<NaiveDateTime> {
        let t0 = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n).map(|i| t0 + TimeDelta::days(i as i64)).collect()
    }

    #[test]
    fn test_ratios_and_order() {
        let dataset = TimeIndexedDataset::from_columns(
            index(4),
            vec![
                ("complete", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
                ("half", vec![None, Some(2.0), None, Some(4.0)]),
                ("empty", vec![None, None, None, None]),
                ("also_half", vec![Some(1.0), None, Some(3.0), None]),
            ],
        )
        .unwrap();

        let profile = MissingnessProfile::compute(&dataset);
        let order: Vec<&str> = profile.records().iter().map(|r| r.column.as_str()).collect();
        assert_eq!(order, vec!["empty", "half", "also_half", "complete"]);

        assert_eq!(profile.get("complete").unwrap().missing_ratio, 0.0);
        assert_eq!(profile.get("empty").unwrap().missing_ratio, 1.0);
        assert_eq!(profile.get("half").unwrap().missing_count, 2);
        assert_eq!(profile.top(2).len(), 2);
        assert_eq!(profile.top(10).len(), 4);
    }

    #[test]
    fn test_ratio_rounding() {
        assert_eq!(missing_ratio(1, 3), 0.333333);
        assert_eq!(missing_ratio(2, 3), 0.666667);
        assert_eq!(missing_ratio(1, 10), 0.1);
        assert_eq!(missing_ratio(0, 0), 0.0);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset =
            TimeIndexedDataset::from_columns(Vec::new(), vec![("close", Vec::new())]).unwrap();
        let profile = MissingnessProfile::compute(&dataset);

        assert_eq!(profile.len(), 1);
        assert_eq!(profile.records()[0].missing_count, 0);
        assert_eq!(profile.records()[0].missing_ratio, 0.0);
    }
}
