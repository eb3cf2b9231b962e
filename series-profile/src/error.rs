//! Error types for series-profile.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`ProfileError`]. Fatal conditions abort a run before any artifact is written;
//! an empty dataset after cleaning is not an error.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for series-profile.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The input file does not exist.
    #[error("Input file not found: {}", path.display())]
    InputNotFound {
        /// Path as supplied by the caller
        path: PathBuf,
    },

    /// No recognized datetime column, and the first column does not parse as
    /// timestamps often enough to be used as the index.
    #[error(
        "Could not infer a temporal index: no Date/Datetime column and first column \
         '{column}' parsed as timestamps for only {:.1}% of rows",
        parsed_ratio * 100.0
    )]
    UnresolvableTemporalIndex {
        /// Raw name of the first column
        column: String,
        /// Fraction of first-column values that parsed as timestamps
        parsed_ratio: f64,
    },

    /// The input file has no header row.
    #[error("Input file has no header row: {}", path.display())]
    EmptyHeader { path: PathBuf },

    /// A data row holds more fields than the header declares.
    #[error("Malformed row at line {line}: expected at most {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Error from the CSV reader or writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from serialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ProfileError>`.
pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
    /// Creates an input-not-found error for the given path.
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Creates an unresolvable-index error.
    pub fn unresolvable_index(column: impl Into<String>, parsed_ratio: f64) -> Self {
        Self::UnresolvableTemporalIndex {
            column: column.into(),
            parsed_ratio,
        }
    }

    /// Returns true for errors raised before any data could be profiled.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound { .. }
                | Self::UnresolvableTemporalIndex { .. }
                | Self::EmptyHeader { .. }
                | Self::MalformedRow { .. }
        )
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ProfileError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| wrap(msg, e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(&f(), e.into()))
    }
}

fn wrap(msg: &str, base: ProfileError) -> ProfileError {
    match base {
        ProfileError::Internal(inner) => ProfileError::Internal(format!("{msg}: {inner}")),
        other => ProfileError::Internal(format!("{msg}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_message() {
        let err = ProfileError::input_not_found("data/missing.csv");
        assert_eq!(err.to_string(), "Input file not found: data/missing.csv");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_unresolvable_index_message() {
        let err = ProfileError::unresolvable_index("id", 0.25);
        let msg = err.to_string();
        assert!(msg.contains("'id'"));
        assert!(msg.contains("25.0%"));
    }

    #[test]
    fn test_io_error_is_not_input_error() {
        let err: ProfileError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_error_context() {
        fn failing_write() -> std::result::Result<(), std::io::Error> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            ))
        }

        let err = failing_write().context("Writing stats.csv").unwrap_err();
        assert!(err.to_string().contains("Writing stats.csv"));
        assert!(err.to_string().contains("read-only"));
    }
}
