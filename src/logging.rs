//! Logging System
//!
//! Structured logging using the `tracing` crate. Results go to stdout, so
//! diagnostics default to stderr; a log file may be chosen instead.

use crate::error::TreeCompareError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding a full filter directive; wins over config
pub const LOG_ENV: &str = "TREECOMPARE_LOG";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (required when output is "file")
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, terminal outputs only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Initialize the global subscriber
///
/// Priority order (highest to lowest):
/// 1. `TREECOMPARE_LOG` environment variable (filter only)
/// 2. CLI arguments, already folded into `config`
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), TreeCompareError> {
    let filter = build_env_filter(config)?;
    let json = determine_format(config)? == "json";
    let output = parse_output(config.map(|c| c.output.as_str()).unwrap_or("stderr"))?;
    let use_color = output != Output::File && config.map(|c| c.color).unwrap_or(true);

    let writer = match output {
        Output::Stdout => BoxMakeWriter::new(std::io::stdout),
        Output::Stderr => BoxMakeWriter::new(std::io::stderr),
        Output::File => BoxMakeWriter::new(Mutex::new(open_log_file(config)?)),
    };

    let base_subscriber = Registry::default().with(filter);
    let result = if json {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| TreeCompareError::Config(format!("Failed to initialize logging: {}", e)))
}

fn open_log_file(config: Option<&LoggingConfig>) -> Result<std::fs::File, TreeCompareError> {
    let log_file = config.and_then(|c| c.file.clone()).ok_or_else(|| {
        TreeCompareError::Config("Log output 'file' requires a log file path".to_string())
    })?;

    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TreeCompareError::Config(format!("Failed to create log directory: {}", e))
            })?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            TreeCompareError::Config(format!("Failed to open log file {:?}: {}", log_file, e))
        })
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, TreeCompareError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    // Dependencies stay quiet; only this crate logs at the chosen level.
    let directive = format!("warn,treecompare={}", level);
    EnvFilter::try_new(&directive)
        .map_err(|e| TreeCompareError::Config(format!("Invalid log level '{}': {}", level, e)))
}

/// Determine output format from config
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, TreeCompareError> {
    let format = config.map(|c| c.format.as_str()).unwrap_or("text");

    if format != "json" && format != "text" {
        return Err(TreeCompareError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }

    Ok(format.to_string())
}

fn parse_output(output: &str) -> Result<Output, TreeCompareError> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        _ => Err(TreeCompareError::Config(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr' or 'file')",
            output
        ))),
    }
}
