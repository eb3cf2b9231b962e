//! Delimited-file source.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::{RawLabel, RawTable};
use crate::error::{ProfileError, Result};

/// Options for configuring delimited-file reading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Comment prefix (lines starting with this are ignored)
    pub comment: Option<u8>,
    /// Number of header rows; more than one yields composite labels (default: 1)
    pub header_rows: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            comment: None,
            header_rows: 1,
        }
    }
}

/// A single delimited file read eagerly into a [`RawTable`].
///
/// # Examples
///
/// ```rust,no_run
/// use series_profile::sources::{CsvOptions, CsvSource};
///
/// # fn example() -> series_profile::error::Result<()> {
/// let table = CsvSource::new("raw_data/GSPC_max_1d.csv").read()?;
///
/// let tsv = CsvSource::with_options(
///     "raw_data/prices.tsv",
///     CsvOptions { delimiter: b'\t', ..Default::default() },
/// )
/// .read()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a source with default options.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a source with custom options.
    pub fn with_options(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Reads the whole file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<RawTable> {
        if !self.path.is_file() {
            return Err(ProfileError::input_not_found(&self.path));
        }
        let file = File::open(&self.path)?;
        let table = self.read_from(file)?;

        info!(
            rows = table.num_rows(),
            columns = table.num_columns(),
            "Loaded raw table"
        );
        Ok(table)
    }

    /// Reads from any reader using this source's options.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<RawTable> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .comment(self.options.comment)
            .flexible(true)
            .from_reader(reader);

        let header_rows = self.options.header_rows.max(1);
        let mut header: Vec<Vec<String>> = Vec::with_capacity(header_rows);
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record?;
            if header.len() < header_rows {
                header.push(record.iter().map(str::to_string).collect());
                continue;
            }

            let width = header[0].len();
            if record.len() > width {
                let line = record.position().map_or(0, |p| p.line());
                return Err(ProfileError::MalformedRow {
                    line,
                    expected: width,
                    found: record.len(),
                });
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        if header.is_empty() || header[0].iter().all(|h| h.trim().is_empty()) {
            return Err(ProfileError::EmptyHeader {
                path: self.path.clone(),
            });
        }

        let labels = build_labels(&header);
        debug!(labels = labels.len(), header_rows, "Parsed header");

        Ok(RawTable::new(labels, rows))
    }
}

/// Builds one label per column of the first header row.
fn build_labels(header: &[Vec<String>]) -> Vec<RawLabel> {
    let width = header[0].len();
    (0..width)
        .map(|col| {
            if header.len() == 1 {
                RawLabel::new(header[0][col].clone())
            } else {
                RawLabel::composite(
                    header
                        .iter()
                        .map(|row| row.get(col).cloned().unwrap_or_default()),
                )
            }
        })
        .collect()
}
