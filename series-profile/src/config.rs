//! Run configuration.
//!
//! Everything a run needs (input path, output directory, artifact names,
//! parsing options) is carried explicitly in a [`ProfileConfig`].

use std::path::{Path, PathBuf};

use crate::dataset::temporal::DEFAULT_FIRST_COLUMN_THRESHOLD;
use crate::error::{ProfileError, Result};
use crate::logging::LogConfig;
use crate::sources::CsvOptions;

/// File names of the three artifacts written per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub missingness: String,
    pub statistics: String,
    pub report: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            missingness: "missingness.csv".to_string(),
            statistics: "stats.csv".to_string(),
            report: "report.json".to_string(),
        }
    }
}

/// Configuration of a single profiling run.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Delimited input file
    pub input: PathBuf,
    /// Directory receiving the artifacts; created if missing
    pub output_dir: PathBuf,
    /// Reader options for the input file
    pub csv: CsvOptions,
    /// Artifact file names inside `output_dir`
    pub artifacts: ArtifactNames,
    /// Minimum fraction of parseable first-column values (exclusive)
    pub first_column_threshold: f64,
    /// Number of columns listed under `missing_top5` in the report
    pub missing_top_n: usize,
    /// Rows shown at each end of the console preview
    pub preview_rows: usize,
    /// Logging behavior of the run
    pub log: LogConfig,
}

impl ProfileConfig {
    /// Creates a configuration with default options.
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            csv: CsvOptions::default(),
            artifacts: ArtifactNames::default(),
            first_column_threshold: DEFAULT_FIRST_COLUMN_THRESHOLD,
            missing_top_n: 5,
            preview_rows: 5,
            log: LogConfig::default(),
        }
    }

    /// Starts a builder.
    pub fn builder(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> ProfileConfigBuilder {
        ProfileConfigBuilder {
            config: Self::new(input, output_dir),
        }
    }

    /// Checks option ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.first_column_threshold) {
            return Err(ProfileError::Configuration(format!(
                "first_column_threshold must be within [0, 1], got {}",
                self.first_column_threshold
            )));
        }
        if self.csv.header_rows == 0 {
            return Err(ProfileError::Configuration(
                "header_rows must be at least 1".to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ProfileError::Configuration(
                "output directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn missingness_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifacts.missingness)
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifacts.statistics)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifacts.report)
    }

    pub fn input(&self) -> &Path {
        &self.input
    }
}

/// Builder for [`ProfileConfig`].
#[derive(Debug, Clone)]
pub struct ProfileConfigBuilder {
    config: ProfileConfig,
}

impl ProfileConfigBuilder {
    /// Set the field delimiter of the input file
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.config.csv.delimiter = delimiter;
        self
    }

    /// Set the number of header rows of the input file
    pub fn header_rows(mut self, rows: usize) -> Self {
        self.config.csv.header_rows = rows;
        self
    }

    /// Replace all reader options
    pub fn csv_options(mut self, options: CsvOptions) -> Self {
        self.config.csv = options;
        self
    }

    /// Set the artifact file names
    pub fn artifacts(mut self, names: ArtifactNames) -> Self {
        self.config.artifacts = names;
        self
    }

    /// Set the first-column parse threshold
    pub fn first_column_threshold(mut self, threshold: f64) -> Self {
        self.config.first_column_threshold = threshold;
        self
    }

    /// Set how many columns the report lists by missingness
    pub fn missing_top_n(mut self, n: usize) -> Self {
        self.config.missing_top_n = n;
        self
    }

    /// Set the number of preview rows
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.config.preview_rows = rows;
        self
    }

    /// Set the logging behavior
    pub fn log(mut self, log: LogConfig) -> Self {
        self.config.log = log;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<ProfileConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProfileConfig::new("in.csv", "out");
        assert_eq!(config.missing_top_n, 5);
        assert_eq!(config.first_column_threshold, 0.9);
        assert_eq!(config.missingness_path(), PathBuf::from("out/missingness.csv"));
        assert_eq!(config.statistics_path(), PathBuf::from("out/stats.csv"));
        assert_eq!(config.report_path(), PathBuf::from("out/report.json"));
    }

    #[test]
    fn test_builder() {
        let config = ProfileConfig::builder("in.tsv", "out")
            .delimiter(b'\t')
            .missing_top_n(3)
            .artifacts(ArtifactNames {
                report: "summary.json".to_string(),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.csv.delimiter, b'\t');
        assert_eq!(config.missing_top_n, 3);
        assert_eq!(config.report_path(), PathBuf::from("out/summary.json"));
    }

    #[test]
    fn test_invalid_threshold() {
        let err = ProfileConfig::builder("in.csv", "out")
            .first_column_threshold(1.5)
            .build()
            .unwrap_err();
        assert!(matches!(err, ProfileError::Configuration(_)));
    }

    #[test]
    fn test_zero_header_rows() {
        let err = ProfileConfig::builder("in.csv", "out")
            .header_rows(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("header_rows"));
    }
}
