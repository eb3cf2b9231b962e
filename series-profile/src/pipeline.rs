//! End-to-end profiling runs.
//!
//! A run reads the input file, resolves its temporal index, coerces every
//! column to numeric, computes frequency, missingness and descriptive
//! statistics, and writes the three artifacts. Any fatal error surfaces before
//! the output directory is touched.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::analyzers::{
    estimate_frequency, DescriptiveStatistics, FrequencyGuess, MissingnessProfile,
};
use crate::config::ProfileConfig;
use crate::dataset::{IndexSource, TemporalIndexResolver, TimeIndexedDataset};
use crate::error::Result;
use crate::log_column;
use crate::logging::truncate_field;
use crate::report::{
    ArtifactStore, LocalFileStore, RenderedArtifacts, Report, StructuralSummary,
};
use crate::sources::CsvSource;

/// Locations of the artifacts written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub missingness: PathBuf,
    pub statistics: PathBuf,
    pub report: PathBuf,
}

impl ArtifactPaths {
    pub fn from_config(config: &ProfileConfig) -> Self {
        Self {
            missingness: config.missingness_path(),
            statistics: config.statistics_path(),
            report: config.report_path(),
        }
    }

    /// Paths in write order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.missingness, &self.statistics, &self.report]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// Everything a run computed, plus where it was written.
#[derive(Debug, Clone)]
pub struct ProfileOutcome {
    pub dataset: TimeIndexedDataset,
    pub index_source: IndexSource,
    /// Rows dropped because their timestamp did not parse
    pub dropped_rows: usize,
    pub frequency: FrequencyGuess,
    pub missingness: MissingnessProfile,
    pub statistics: DescriptiveStatistics,
    pub report: Report,
    pub artifacts: ArtifactPaths,
}

/// Runs profiles against an [`ArtifactStore`].
#[derive(Debug, Clone)]
pub struct ProfilePipeline<S = LocalFileStore> {
    config: ProfileConfig,
    store: S,
}

impl ProfilePipeline<LocalFileStore> {
    /// Pipeline writing to the local filesystem.
    pub fn new(config: ProfileConfig) -> Self {
        Self::with_store(config, LocalFileStore)
    }
}

impl<S: ArtifactStore> ProfilePipeline<S> {
    pub fn with_store(config: ProfileConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Profiles the configured input and writes all artifacts.
    #[instrument(skip(self), fields(input = %self.config.input.display()))]
    pub fn run(&self) -> Result<ProfileOutcome> {
        let config = &self.config;
        config.validate()?;

        let table = CsvSource::with_options(&config.input, config.csv.clone()).read()?;
        let indexed =
            TemporalIndexResolver::new(config.first_column_threshold).resolve(table)?;
        let index_source = indexed.source;
        let dropped_rows = indexed.dropped_rows;
        let dataset = TimeIndexedDataset::from_indexed(indexed)?;

        if dataset.is_empty() {
            warn!(
                index_column = dataset.index_column(),
                "No rows left after cleaning; artifacts will hold empty statistics"
            );
        }

        let frequency = estimate_frequency(dataset.index());
        let missingness = MissingnessProfile::compute(&dataset);
        let statistics = DescriptiveStatistics::compute(&dataset);

        for record in statistics.records() {
            log_column!(
                config.log,
                column = %truncate_field(&record.column, config.log.max_field_length),
                count = record.count,
                missing = dataset.missing_count(&record.column).unwrap_or(0),
                mean = record.mean,
                "Profiled column"
            );
        }

        let input = std::path::absolute(&config.input)?;
        let summary = StructuralSummary::from_dataset(&dataset, frequency);
        let report = Report::assemble(
            input.display().to_string(),
            summary,
            &missingness,
            config.missing_top_n,
        );

        let rendered = RenderedArtifacts::render(&missingness, &statistics, &report)?;
        let artifacts = ArtifactPaths::from_config(config);
        self.write_artifacts(&rendered, &artifacts)?;

        info!(
            rows = dataset.num_rows(),
            columns = dataset.num_columns(),
            dropped_rows,
            frequency = %frequency,
            columns_list = %truncate_field(
                &dataset.column_names().join(","),
                config.log.max_field_length
            ),
            output_dir = %config.output_dir.display(),
            "Profile complete"
        );

        Ok(ProfileOutcome {
            dataset,
            index_source,
            dropped_rows,
            frequency,
            missingness,
            statistics,
            report,
            artifacts,
        })
    }

    fn write_artifacts(&self, rendered: &RenderedArtifacts, paths: &ArtifactPaths) -> Result<()> {
        self.store.create_dir_all(&self.config.output_dir)?;
        self.store.write(&paths.missingness, &rendered.missingness)?;
        self.store.write(&paths.statistics, &rendered.statistics)?;
        self.store.write(&paths.report, &rendered.report)?;
        Ok(())
    }
}

/// Profiles `config.input` and writes the artifacts to `config.output_dir`.
pub fn profile_file(config: &ProfileConfig) -> Result<ProfileOutcome> {
    ProfilePipeline::new(config.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProfileError;
    use crate::report::InMemoryStore;
    use std::fs;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("input.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_run_against_in_memory_store() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(
            &tmp,
            "Date,Open,Close\n2020-01-02,2,\n2020-01-01,1,1.5\n2020-01-03,3,3.5\n",
        );
        let store = InMemoryStore::new();
        let pipeline =
            ProfilePipeline::with_store(ProfileConfig::new(&input, "out"), store.clone());

        let outcome = pipeline.run().unwrap();

        assert_eq!(outcome.index_source, IndexSource::Recognized);
        assert_eq!(outcome.dataset.num_rows(), 3);
        assert_eq!(outcome.frequency, FrequencyGuess::DailyOrLess);
        assert_eq!(store.len(), 3);
        assert!(store.has_dir("out"));

        let missingness = store.get_text("out/missingness.csv").unwrap();
        assert_eq!(
            missingness,
            "column,missing_count,missing_ratio\nClose,1,0.333333\nOpen,0,0.000000\n"
        );
        assert!(outcome.report.input.ends_with("input.csv"));
        assert!(Path::new(&outcome.report.input).is_absolute());
    }

    #[test]
    fn test_fatal_error_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "id,value\n1,10\n2,20\n3,30\n");
        let store = InMemoryStore::new();
        let pipeline =
            ProfilePipeline::with_store(ProfileConfig::new(&input, "out"), store.clone());

        let err = pipeline.run().unwrap_err();

        assert!(matches!(err, ProfileError::UnresolvableTemporalIndex { .. }));
        assert!(store.is_empty());
        assert!(!store.has_dir("out"));
    }

    #[test]
    fn test_missing_input() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let config = ProfileConfig::new(tmp.path().join("nope.csv"), &out);

        let err = profile_file(&config).unwrap_err();

        assert!(matches!(err, ProfileError::InputNotFound { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_artifact_paths_order() {
        let config = ProfileConfig::new("in.csv", "out");
        let artifacts = ArtifactPaths::from_config(&config);
        let paths: Vec<&Path> = artifacts.iter().collect();
        assert_eq!(
            paths,
            vec![
                Path::new("out/missingness.csv"),
                Path::new("out/stats.csv"),
                Path::new("out/report.json")
            ]
        );
    }
}
