//! Raw tabular input.
//!
//! A [`RawTable`] is the untyped view of a delimited file: header labels and
//! string cells, in file order. Nothing is parsed or reordered here; that is
//! the job of [`crate::dataset`].

mod csv;

pub use self::csv::{CsvOptions, CsvSource};

/// A header label as read from the file.
///
/// Files written with multi-row headers produce one part per header row;
/// ordinary files produce a single part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLabel {
    parts: Vec<String>,
}

impl RawLabel {
    /// Creates a single-part label.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parts: vec![name.into()],
        }
    }

    /// Creates a composite label from its header-row parts.
    pub fn composite<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// The label parts, one per header row.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The label as it appears in the file.
    ///
    /// Composite labels join their non-empty parts with `_`.
    pub fn name(&self) -> String {
        match self.parts.as_slice() {
            [single] => single.clone(),
            parts => parts
                .iter()
                .filter(|p| !p.trim().is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}

/// Rows × columns of untyped cells, in file order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    labels: Vec<RawLabel>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Creates a table, padding short rows with empty cells.
    pub fn new(labels: Vec<RawLabel>, rows: Vec<Vec<String>>) -> Self {
        let width = labels.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            })
            .collect();
        Self { labels, rows }
    }

    /// Builds a table from string slices. Mostly useful in tests.
    pub fn from_rows(header: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            header.iter().map(|h| RawLabel::new(*h)).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        )
    }

    pub fn labels(&self) -> &[RawLabel] {
        &self.labels
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.labels.len()
    }

    /// Position of the first column whose raw name equals `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.name() == name)
    }

    /// Consumes the table, returning labels and rows.
    pub fn into_parts(self) -> (Vec<RawLabel>, Vec<Vec<String>>) {
        (self.labels, self.rows)
    }
}
