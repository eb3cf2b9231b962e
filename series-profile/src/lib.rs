//! # series-profile - Time-Series CSV Profiling
//!
//! series-profile ingests a delimited file of time-stamped observations,
//! builds a clean numeric dataset indexed by time, and writes a compact
//! profile: per-column missingness, descriptive statistics and a structural
//! summary.
//!
//! ## Overview
//!
//! A run goes through these stages:
//!
//! 1. **Read** (`sources`): the file is read with its header rows
//! 2. **Index** (`dataset::temporal`): a `Date`/`Datetime`/`timestamp` column
//!    (or, failing that, a mostly-parseable first column) becomes the index;
//!    rows whose timestamp does not parse are dropped and the rest sorted
//! 3. **Clean** (`dataset`): labels are normalized, cells coerced to numbers,
//!    unparseable cells marked missing
//! 4. **Analyze** (`analyzers`): frequency guess, missingness, statistics
//! 5. **Report** (`report`): `missingness.csv`, `stats.csv` and `report.json`
//!    are rendered and written to the output directory
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use series_profile::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let config = ProfileConfig::builder("data/prices.csv", "out")
//!     .missing_top_n(5)
//!     .build()?;
//!
//! let outcome = profile_file(&config)?;
//! println!("{}", HumanFormatter::new().format(&outcome)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The library emits `tracing` events and spans; install a subscriber with
//! [`logging::setup::init_logging`] or any other `tracing` subscriber.

pub mod analyzers;
pub mod config;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod pipeline;
pub mod prelude;
pub mod report;
pub mod sources;

pub use pipeline::profile_file;
