//! series-profile command line
//!
//! Profiles a time-series CSV file and writes `missingness.csv`, `stats.csv`
//! and `report.json` to the output directory.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use series_profile::logging::setup::{init_logging, LoggingConfig};
use series_profile::prelude::*;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Delimited input file with a timestamp column
    #[arg(long)]
    input: PathBuf,

    /// Directory receiving the artifacts; created if missing
    #[arg(long)]
    out_dir: PathBuf,

    /// Rows shown at each end of the preview (0 disables it)
    #[arg(long, default_value_t = 5)]
    max_rows_preview: usize,

    /// Field delimiter (single ASCII character)
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Number of header rows; several rows are joined into one label per column
    #[arg(long, default_value_t = 1)]
    header_rows: usize,

    /// Console output: run summary with preview, or the report document
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Log output format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Log per-column details
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let log = if args.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    let logging = LoggingConfig::default()
        .with_crate_level(log.base_level)
        .with_json_format(args.log_format == LogFormat::Json);
    if let Err(e) = init_logging(logging) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(&args, log) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!(error = %e, "Profiling failed");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Runs the profile and returns the console output.
fn run(args: &Args, log: LogConfig) -> Result<String> {
    if !args.delimiter.is_ascii() {
        return Err(ProfileError::Configuration(format!(
            "delimiter must be a single ASCII character, got {:?}",
            args.delimiter
        )));
    }

    let config = ProfileConfig::builder(&args.input, &args.out_dir)
        .delimiter(args.delimiter as u8)
        .header_rows(args.header_rows)
        .preview_rows(args.max_rows_preview)
        .log(log)
        .build()?;

    let outcome = profile_file(&config)?;

    match args.format {
        OutputFormat::Human => HumanFormatter::with_config(
            FormatterConfig::default().with_preview_rows(config.preview_rows),
        )
        .format(&outcome),
        OutputFormat::Json => JsonFormatter::new().format(&outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    fn args_for(tmp: &TempDir, extra: &[&str]) -> Args {
        let input = tmp.path().join("prices.csv");
        fs::write(
            &input,
            "Date,Close\n2020-01-01,1\n2020-01-02,\n2020-01-03,3\n",
        )
        .unwrap();
        let out = tmp.path().join("out");
        let mut argv = vec![
            "series-profile".to_string(),
            "--input".to_string(),
            input.display().to_string(),
            "--out-dir".to_string(),
            out.display().to_string(),
        ];
        argv.extend(extra.iter().map(|a| a.to_string()));
        Args::parse_from(argv)
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["series-profile", "--input", "a.csv", "--out-dir", "out"]);
        assert_eq!(args.max_rows_preview, 5);
        assert_eq!(args.delimiter, ',');
        assert_eq!(args.header_rows, 1);
        assert_eq!(args.log_format, LogFormat::Pretty);
        assert_eq!(args.format, OutputFormat::Human);
        assert!(!args.verbose);
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let args = Args::parse_from([
            "series-profile",
            "--input",
            "a.csv",
            "--out-dir",
            "out",
            "--delimiter",
            "§",
        ]);
        let err = run(&args, LogConfig::default()).unwrap_err();
        assert!(matches!(err, ProfileError::Configuration(_)));
    }

    #[test]
    fn test_json_output_is_the_report() {
        let tmp = TempDir::new().unwrap();
        let args = args_for(&tmp, &["--format", "json"]);

        let output = run(&args, LogConfig::default()).unwrap();
        let report: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(report["summary"]["n_rows"], 3);
        assert_eq!(report["summary"]["freq_guess"], "daily_or_less");
        assert_eq!(report["missing_top5"]["Close"]["missing_count"], 1);
        assert!(tmp.path().join("out").join("report.json").is_file());
    }

    #[test]
    fn test_human_output_has_summary_and_preview() {
        let tmp = TempDir::new().unwrap();
        let args = args_for(&tmp, &["--max-rows-preview", "1"]);

        let output = run(&args, LogConfig::default()).unwrap();

        assert!(output.contains("Rows: 3"));
        assert!(output.contains("Preview"));
        assert!(output.lines().any(|line| line.starts_with("...")));
    }
}
