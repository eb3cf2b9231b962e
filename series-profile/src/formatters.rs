//! Console formatting of profiling runs.
//!
//! The artifacts on disk are the primary output of a run; this module renders
//! the short summary printed after a run, in human-readable or JSON form, and
//! a head/tail preview of the cleaned dataset.
//!
//! # Examples
//!
//! ```rust,ignore
//! use series_profile::formatters::{HumanFormatter, OutcomeFormatter};
//!
//! let outcome = series_profile::pipeline::profile_file(&config)?;
//! println!("{}", HumanFormatter::new().format(&outcome)?);
//! ```

use std::fmt::Write;

use arrow::array::Array;

use crate::dataset::TimeIndexedDataset;
use crate::error::Result;
use crate::pipeline::ProfileOutcome;
use crate::report::format_timestamp;

/// Options for console output.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Rows shown at each end of the preview; 0 disables the preview
    pub preview_rows: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self { preview_rows: 5 }
    }
}

impl FormatterConfig {
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }
}

/// Renders a finished run for the console.
pub trait OutcomeFormatter {
    fn format(&self, outcome: &ProfileOutcome) -> Result<String>;
}

/// Prints the report document itself, pretty-printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutcomeFormatter for JsonFormatter {
    fn format(&self, outcome: &ProfileOutcome) -> Result<String> {
        Ok(serde_json::to_string_pretty(&outcome.report)?)
    }
}

/// Short human-readable run summary followed by an optional preview.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn heading(&self, output: &mut String, text: &str) {
        writeln!(output, "{text}").unwrap();
    }
}

impl OutcomeFormatter for HumanFormatter {
    fn format(&self, outcome: &ProfileOutcome) -> Result<String> {
        let mut output = String::new();
        let summary = &outcome.report.summary;

        self.heading(&mut output, "Profile summary");
        writeln!(output, "   Input: {}", outcome.report.input).unwrap();
        match (&summary.date_start, &summary.date_end) {
            (Some(start), Some(end)) => writeln!(output, "   Range: {start} -> {end}").unwrap(),
            _ => writeln!(output, "   Range: (no rows)").unwrap(),
        }
        writeln!(output, "   Rows: {}", summary.n_rows).unwrap();
        writeln!(output, "   Frequency: {}", summary.freq_guess).unwrap();
        writeln!(
            output,
            "   Columns ({}): {}",
            summary.n_cols,
            summary.columns.join(", ")
        )
        .unwrap();

        if !outcome.report.missing_top5.is_empty() {
            writeln!(output).unwrap();
            self.heading(&mut output, "Most incomplete columns");
            for (column, entry) in outcome.report.missing_top5.entries() {
                writeln!(
                    output,
                    "   {column}: {} missing ({:.2}%)",
                    entry.missing_count,
                    entry.missing_ratio * 100.0
                )
                .unwrap();
            }
        }

        writeln!(output).unwrap();
        self.heading(&mut output, "Artifacts");
        for path in outcome.artifacts.iter() {
            writeln!(output, "   {}", path.display()).unwrap();
        }

        if self.config.preview_rows > 0 && !outcome.dataset.is_empty() {
            writeln!(output).unwrap();
            self.heading(&mut output, "Preview");
            output.push_str(&format_preview(&outcome.dataset, self.config.preview_rows));
        }

        Ok(output)
    }
}

/// Renders the first and last `rows` rows of a dataset as an aligned table.
///
/// Datasets with at most `2 * rows` rows are shown in full; otherwise an
/// ellipsis row separates head and tail. Missing cells print as `NaN`.
pub fn format_preview(dataset: &TimeIndexedDataset, rows: usize) -> String {
    let n = dataset.num_rows();
    let shown: Vec<Option<usize>> = if n <= rows.saturating_mul(2) {
        (0..n).map(Some).collect()
    } else {
        (0..rows)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((n - rows..n).map(Some))
            .collect()
    };

    let mut header = vec![dataset.index_column().to_string()];
    header.extend(dataset.column_names());

    let mut table: Vec<Vec<String>> = vec![header];
    for row in &shown {
        let cells = match row {
            Some(i) => {
                let mut cells = vec![format_timestamp(dataset.index()[*i])];
                cells.extend(dataset.columns().map(|(_, values)| {
                    if values.is_null(*i) {
                        "NaN".to_string()
                    } else {
                        values.value(*i).to_string()
                    }
                }));
                cells
            }
            None => vec!["...".to_string(); dataset.num_columns() + 1],
        };
        table.push(cells);
    }

    let widths: Vec<usize> = (0..=dataset.num_columns())
        .map(|col| {
            table
                .iter()
                .map(|cells| cells[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();
    for cells in &table {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                if col == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect();
        writeln!(output, "{}", line.join("  ").trim_end()).unwrap();
    }
    output
}
