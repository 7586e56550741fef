//! Configuration for the testgate binary
//!
//! The command line is the only configuration source: a log path, a build
//! identifier, and a few switches for format selection and logging.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use testgate_results::LogFormat;

/// Testgate - decide a build verdict from an automation test log
#[derive(Parser, Debug, Clone)]
#[command(name = "testgate")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the test log or JSON results report
    pub log_path: PathBuf,

    /// Build identifier embedded in the archive file name
    pub build_id: String,

    /// Log format to parse
    ///
    /// `auto` picks the JSON report for `.json` files or documents starting
    /// with `{`, the result log when a `Result={` marker is present, and the
    /// automation log otherwise.
    #[arg(short, long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Write a JSON summary of the run to this path
    #[arg(long, value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout carries only test results.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Format choice on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    /// Detect from the file name and contents
    #[default]
    Auto,
    /// `Automation Test <Status> (<short> - <long>)` lines
    AutomationLog,
    /// `Result={..} Name={..} Path={..}` lines
    ResultLog,
    /// JSON report with a `tests` array
    JsonReport,
}

impl FormatArg {
    /// The explicitly requested format, if any
    #[must_use]
    pub fn explicit(self) -> Option<LogFormat> {
        match self {
            Self::Auto => None,
            Self::AutomationLog => Some(LogFormat::AutomationLog),
            Self::ResultLog => Some(LogFormat::ResultLog),
            Self::JsonReport => Some(LogFormat::JsonReport),
        }
    }
}

impl Config {
    /// Build a config for the given log and build with default switches
    #[must_use]
    pub fn new(log_path: impl Into<PathBuf>, build_id: impl Into<String>) -> Self {
        Self {
            log_path: log_path.into(),
            build_id: build_id.into(),
            format: FormatArg::Auto,
            summary_json: None,
            verbose: false,
            quiet: false,
        }
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}
