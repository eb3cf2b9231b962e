//! Temporal index resolution.
//!
//! The resolver picks the column that carries the timestamps, parses it, drops
//! rows whose timestamp cannot be parsed and sorts the remaining rows by time.
//!
//! Selection order:
//! 1. the first of [`RECOGNIZED_DATETIME_COLUMNS`] present in the header
//!    (case-sensitive, checked in the listed order);
//! 2. otherwise the first column, if strictly more than the configured
//!    fraction of its values parse as timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::error::{ProfileError, Result};
use crate::sources::{RawLabel, RawTable};

/// Column names recognized as the datetime column, in priority order.
pub const RECOGNIZED_DATETIME_COLUMNS: [&str; 6] = [
    "Datetime",
    "datetime",
    "Date",
    "date",
    "timestamp",
    "Timestamp",
];

/// Default minimum fraction of parseable first-column values.
pub const DEFAULT_FIRST_COLUMN_THRESHOLD: f64 = 0.9;

const DATETIME_FORMATS: [&str; 9] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

static COMPACT_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8}$").unwrap());

/// Parses a single cell as a timestamp.
///
/// Offset-carrying values are converted to UTC. Bare integers are rejected
/// unless they form an 8-digit `YYYYMMDD` date.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_utc());
        }
    }
    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in &DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(chrono::NaiveTime::MIN));
        }
    }
    if COMPACT_DATE.is_match(s) {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Some(d.and_time(chrono::NaiveTime::MIN));
        }
    }
    None
}

/// How the index column was chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndexSource {
    /// A column with one of the recognized datetime names.
    Recognized,
    /// The first column, with the fraction of values that parsed.
    FirstColumn { parsed_ratio: f64 },
}

/// Rows of a raw table keyed and sorted by timestamp.
///
/// The index column itself is removed from `labels` and every row.
#[derive(Debug, Clone)]
pub struct IndexedRows {
    pub index_column: String,
    pub source: IndexSource,
    pub timestamps: Vec<NaiveDateTime>,
    pub labels: Vec<RawLabel>,
    pub rows: Vec<Vec<String>>,
    /// Rows dropped because their timestamp did not parse.
    pub dropped_rows: usize,
}

/// Locates, parses and sorts the temporal index of a raw table.
#[derive(Debug, Clone)]
pub struct TemporalIndexResolver {
    first_column_threshold: f64,
}

impl Default for TemporalIndexResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_COLUMN_THRESHOLD)
    }
}

impl TemporalIndexResolver {
    pub fn new(first_column_threshold: f64) -> Self {
        Self {
            first_column_threshold,
        }
    }

    /// Resolves the index, consuming the raw table.
    #[instrument(skip(self, table), fields(rows = table.num_rows(), columns = table.num_columns()))]
    pub fn resolve(&self, table: RawTable) -> Result<IndexedRows> {
        let recognized = RECOGNIZED_DATETIME_COLUMNS
            .iter()
            .find_map(|name| table.position(name));

        let (column, source, parsed) = match recognized {
            Some(column) => {
                let parsed = parse_column(&table, column);
                (column, IndexSource::Recognized, parsed)
            }
            None => {
                let first_name = table
                    .labels()
                    .first()
                    .map(RawLabel::name)
                    .unwrap_or_default();
                if table.num_columns() == 0 {
                    return Err(ProfileError::unresolvable_index(first_name, 0.0));
                }

                let parsed = parse_column(&table, 0);
                let ok = parsed.iter().filter(|t| t.is_some()).count();
                let parsed_ratio = if parsed.is_empty() {
                    0.0
                } else {
                    ok as f64 / parsed.len() as f64
                };
                debug!(column = %first_name, parsed_ratio, "Probed first column for timestamps");

                if parsed_ratio <= self.first_column_threshold {
                    warn!(
                        column = %first_name,
                        parsed_ratio,
                        threshold = self.first_column_threshold,
                        "First column does not look like a timestamp column"
                    );
                    return Err(ProfileError::unresolvable_index(first_name, parsed_ratio));
                }
                (0, IndexSource::FirstColumn { parsed_ratio }, parsed)
            }
        };

        let (mut labels, raw_rows) = table.into_parts();
        let index_label = labels.remove(column);

        let mut keyed: Vec<(NaiveDateTime, Vec<String>)> = Vec::with_capacity(raw_rows.len());
        let mut dropped_rows = 0;
        for (mut row, ts) in raw_rows.into_iter().zip(parsed) {
            match ts {
                Some(ts) => {
                    row.remove(column);
                    keyed.push((ts, row));
                }
                None => dropped_rows += 1,
            }
        }

        // Stable: rows sharing a timestamp keep their file order.
        keyed.sort_by_key(|(ts, _)| *ts);
        let (timestamps, rows): (Vec<_>, Vec<_>) = keyed.into_iter().unzip();

        if dropped_rows > 0 {
            warn!(
                column = %index_label.name(),
                dropped_rows,
                "Dropped rows with unparseable timestamps"
            );
        }
        info!(
            column = %index_label.name(),
            source = ?source,
            rows = timestamps.len(),
            "Resolved temporal index"
        );

        Ok(IndexedRows {
            index_column: index_label.name(),
            source,
            timestamps,
            labels,
            rows,
            dropped_rows,
        })
    }
}

fn parse_column(table: &RawTable, column: usize) -> Vec<Option<NaiveDateTime>> {
    table
        .rows()
        .iter()
        .map(|row| row.get(column).and_then(|cell| parse_timestamp(cell)))
        .collect()
}
