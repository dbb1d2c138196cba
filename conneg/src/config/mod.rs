//! Command-line configuration module.
//!
//! # Example
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [reader]
//! max_header_len = 4096
//! max_elements = 32
//! max_parameters = 8
//!
//! [output]
//! format = "header"
//! pretty = false
//! ```

pub mod loader;


pub use loader::{load_config, print_default_config, CliArgs, Command, FamilyArg};

use conneg_prefs::ReaderConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration of the `conneg` tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Limits applied while reading header values
    pub reader: ReaderConfig,

    /// How results are printed
    pub output: OutputConfig,
}

impl CliConfig {
    /// Returns `Ok(())` if valid, or every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        self.reader.validate()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level, used when `RUST_LOG` is not set.
    ///
    /// **Default:** `Warn`
    pub level: LogLevel,

    /// Include source file and line number in logs.
    ///
    /// **Default:** `false`
    pub include_file_line: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            include_file_line: false,
        }
    }
}

/// Log level enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// **Default:** `Json`
    pub format: OutputFormat,

    /// Indent JSON output.
    ///
    /// **Default:** `true`
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

/// How preference lists are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured preference lists
    Json,
    /// `name: value` header lines in wire syntax
    Header,
}
