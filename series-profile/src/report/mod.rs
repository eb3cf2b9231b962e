//! Report assembly and persistence.
//!
//! A run produces three artifacts: `missingness.csv`, `stats.csv` and
//! `report.json` (names configurable through
//! [`ArtifactNames`](crate::config::ArtifactNames)). All three are rendered in
//! memory before anything touches the output directory, so a failing run
//! leaves no partial output behind.

mod render;
mod store;

use chrono::{NaiveDateTime, Timelike};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::analyzers::{FrequencyGuess, MissingnessProfile, MissingnessRecord};
use crate::dataset::TimeIndexedDataset;

pub use render::{
    format_float, render_missingness_csv, render_report_json, render_statistics_csv,
    RenderedArtifacts, MISSINGNESS_HEADER, STATISTICS_HEADER,
};
pub use store::{ArtifactStore, InMemoryStore, LocalFileStore};

/// Fixed notes attached to every report.
pub const REPORT_NOTES: [&str; 2] = [
    "Only structural inspection and descriptive statistics layers are active in this profile.",
    "Derived features, correlation analysis and plots are intentionally omitted.",
];

/// Shape, columns, date range and cadence of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub freq_guess: FrequencyGuess,
}

impl StructuralSummary {
    pub fn from_dataset(dataset: &TimeIndexedDataset, freq_guess: FrequencyGuess) -> Self {
        Self {
            n_rows: dataset.num_rows(),
            n_cols: dataset.num_columns(),
            columns: dataset.column_names(),
            date_start: dataset.start().map(format_timestamp),
            date_end: dataset.end().map(format_timestamp),
            freq_guess,
        }
    }
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`, with a fractional part only
/// when one is present.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    if ts.nanosecond() == 0 {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }
}

/// Entry of the `missing_top5` mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    pub missing_count: usize,
    pub missing_ratio: f64,
}

/// Most incomplete columns, serialized as an insertion-ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingTop(Vec<(String, MissingEntry)>);

impl MissingTop {
    pub fn from_records(records: &[MissingnessRecord]) -> Self {
        Self(
            records
                .iter()
                .map(|r| {
                    (
                        r.column.clone(),
                        MissingEntry {
                            missing_count: r.missing_count,
                            missing_ratio: r.missing_ratio,
                        },
                    )
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[(String, MissingEntry)] {
        &self.0
    }

    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.0.iter().find(|(c, _)| c == column).map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for MissingTop {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, entry) in &self.0 {
            map.serialize_entry(column, entry)?;
        }
        map.end()
    }
}

/// The `report.json` document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub input: String,
    pub summary: StructuralSummary,
    pub missing_top5: MissingTop,
    pub notes: Vec<String>,
}

impl Report {
    /// Assembles the report for one run.
    pub fn assemble(
        input: impl Into<String>,
        summary: StructuralSummary,
        missingness: &MissingnessProfile,
        top_n: usize,
    ) -> Self {
        Self {
            input: input.into(),
            summary,
            missing_top5: MissingTop::from_records(missingness.top(top_n)),
            notes: REPORT_NOTES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    fn dataset() -> TimeIndexedDataset {
        let t0 = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TimeIndexedDataset::from_columns(
            (0..3).map(|i| t0 + TimeDelta::days(i)).collect(),
            vec![
                ("b", vec![Some(1.0), None, Some(3.0)]),
                ("a", vec![None, None, Some(3.0)]),
                ("c", vec![Some(1.0), Some(2.0), Some(3.0)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_summary() {
        let summary = StructuralSummary::from_dataset(&dataset(), FrequencyGuess::DailyOrLess);
        assert_eq!(summary.n_rows, 3);
        assert_eq!(summary.n_cols, 3);
        assert_eq!(summary.columns, vec!["b", "a", "c"]);
        assert_eq!(summary.date_start.as_deref(), Some("2020-01-01 00:00:00"));
        assert_eq!(summary.date_end.as_deref(), Some("2020-01-03 00:00:00"));
    }

    #[test]
    fn test_missing_top_keeps_rank_order_in_json() {
        let data = dataset();
        let missingness = MissingnessProfile::compute(&data);
        let report = Report::assemble(
            "/data/in.csv",
            StructuralSummary::from_dataset(&data, FrequencyGuess::Unknown),
            &missingness,
            2,
        );

        assert_eq!(report.missing_top5.len(), 2);
        let json = serde_json::to_string(&report.missing_top5).unwrap();
        assert_eq!(
            json,
            r#"{"a":{"missing_count":2,"missing_ratio":0.666667},"b":{"missing_count":1,"missing_ratio":0.333333}}"#
        );
    }

    #[test]
    fn test_empty_dataset_summary_has_null_range() {
        let empty = TimeIndexedDataset::from_columns(Vec::new(), vec![("x", Vec::new())]).unwrap();
        let summary = StructuralSummary::from_dataset(&empty, FrequencyGuess::Unknown);
        let json = serde_json::to_value(&summary).unwrap();

        assert!(json["date_start"].is_null());
        assert!(json["date_end"].is_null());
        assert_eq!(json["freq_guess"], "unknown");
    }

    #[test]
    fn test_fractional_timestamp_format() {
        let ts = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_milli_opt(9, 30, 0, 250)
            .unwrap();
        assert_eq!(format_timestamp(ts), "2020-01-01 09:30:00.250");
    }
}
