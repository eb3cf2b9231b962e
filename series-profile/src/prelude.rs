//! Prelude for commonly used types and traits in series-profile.

pub use crate::analyzers::{DescriptiveStatistics, FrequencyGuess, MissingnessProfile};
pub use crate::config::{ArtifactNames, ProfileConfig};
pub use crate::dataset::{TemporalIndexResolver, TimeIndexedDataset};
pub use crate::error::{ErrorContext, ProfileError, Result};
pub use crate::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, OutcomeFormatter};
pub use crate::logging::LogConfig;
pub use crate::pipeline::{profile_file, ProfileOutcome, ProfilePipeline};
pub use crate::report::{ArtifactStore, InMemoryStore, LocalFileStore, Report};
pub use crate::sources::{CsvOptions, CsvSource};
