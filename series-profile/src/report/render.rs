//! In-memory rendering of the run artifacts.

use csv::Writer;

use crate::analyzers::{DescriptiveStatistics, MissingnessProfile};
use crate::error::Result;

use super::Report;

/// Header of the missingness table.
pub const MISSINGNESS_HEADER: [&str; 3] = ["column", "missing_count", "missing_ratio"];

/// Header of the statistics table.
pub const STATISTICS_HEADER: [&str; 13] = [
    "column", "count", "mean", "std", "min", "1%", "5%", "50%", "95%", "99%", "max", "skew",
    "kurtosis",
];

/// The three artifacts of a run, rendered and ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub missingness: Vec<u8>,
    pub statistics: Vec<u8>,
    pub report: Vec<u8>,
}

impl RenderedArtifacts {
    pub fn render(
        missingness: &MissingnessProfile,
        statistics: &DescriptiveStatistics,
        report: &Report,
    ) -> Result<Self> {
        Ok(Self {
            missingness: render_missingness_csv(missingness)?,
            statistics: render_statistics_csv(statistics)?,
            report: render_report_json(report)?,
        })
    }
}

/// Formats a statistic for the CSV tables.
///
/// Missing statistics (NaN) become an empty field. Other values use the
/// shortest representation that round-trips, keeping a trailing `.0` on
/// integral values.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:?}")
    }
}

pub fn render_missingness_csv(profile: &MissingnessProfile) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(MISSINGNESS_HEADER)?;
    for record in profile.records() {
        writer.write_record([
            record.column.clone(),
            record.missing_count.to_string(),
            format!("{:.6}", record.missing_ratio),
        ])?;
    }
    finish(writer)
}

pub fn render_statistics_csv(statistics: &DescriptiveStatistics) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(STATISTICS_HEADER)?;
    for record in statistics.records() {
        let mut row = Vec::with_capacity(STATISTICS_HEADER.len());
        row.push(record.column.clone());
        row.push(record.count.to_string());
        row.extend(record.values().into_iter().map(format_float));
        writer.write_record(&row)?;
    }
    finish(writer)
}

/// Pretty-printed JSON with two-space indentation.
pub fn render_report_json(report: &Report) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(report)?)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer.into_inner().map_err(|e| e.into_error().into())
}
