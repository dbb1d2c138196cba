//! Configuration loading and parsing.
//!
//! Precedence, lowest first:
//! 1. Default values
//! 2. Configuration file (TOML)
//! 3. Environment variables (`CONNEG_` prefix, `__` separator)
//! 4. Command-line arguments

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config as ConfigLoader;
use conneg_prefs::Family;

use super::{CliConfig, OutputFormat};

/// Inspect and normalize HTTP Accept-* preference headers.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (TOML format)
    #[arg(long, short = 'c', default_value = "conneg.toml")]
    pub config: String,

    /// Log level (overrides config file)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Output format (overrides config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print default configuration and exit
    #[arg(long)]
    pub print_default_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Install the preferences of one header; omit VALUE for an absent header
    Parse {
        #[arg(value_enum)]
        family: FamilyArg,
        value: Option<String>,
    },
    /// Rewrite a header value in canonical wire syntax
    Normalize {
        #[arg(value_enum)]
        family: FamilyArg,
        value: String,
    },
    /// Read `Name: value` request header lines and print all four lists
    Inspect {
        /// Header file; stdin when omitted
        file: Option<PathBuf>,
    },
}

/// Header selector accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FamilyArg {
    Accept,
    AcceptCharset,
    AcceptEncoding,
    AcceptLanguage,
}

impl From<FamilyArg> for Family {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Accept => Family::MediaType,
            FamilyArg::AcceptCharset => Family::CharacterSet,
            FamilyArg::AcceptEncoding => Family::Encoding,
            FamilyArg::AcceptLanguage => Family::Language,
        }
    }
}

/// Load, override and validate the configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file cannot be read or parsed
/// - Environment variables cannot be loaded
/// - Validation fails
pub fn load_config(cli: &CliArgs) -> Result<CliConfig> {
    let mut config = load_config_file(Path::new(&cli.config))?;

    apply_env_overrides(&mut config)?;
    apply_cli_overrides(&mut config, cli);

    config.validate().map_err(|errors| {
        anyhow::anyhow!("Configuration validation failed:\n{}", errors.join("\n"))
    })?;

    Ok(config)
}

/// Load configuration from a TOML file, or defaults if it does not exist.
pub(crate) fn load_config_file(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }

    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
}

/// Apply environment variable overrides.
///
/// Examples:
/// - `CONNEG_LOGGING__LEVEL=debug`
/// - `CONNEG_READER__MAX_ELEMENTS=32`
/// - `CONNEG_OUTPUT__FORMAT=header`
fn apply_env_overrides(config: &mut CliConfig) -> Result<()> {
    let env_config = ConfigLoader::builder()
        .add_source(config::Environment::with_prefix("CONNEG").separator("__"))
        .build()
        .context("Failed to load environment variables")?;

    if let Ok(level) = env_config.get_string("logging.level") {
        if let Ok(parsed_level) = level.parse() {
            config.logging.level = parsed_level;
        }
    }
    if let Ok(value) = env_config.get_bool("logging.include_file_line") {
        config.logging.include_file_line = value;
    }
    if let Ok(value) = env_config.get_int("reader.max_header_len") {
        config.reader.max_header_len = usize::try_from(value).unwrap_or(0);
    }
    if let Ok(value) = env_config.get_int("reader.max_elements") {
        config.reader.max_elements = usize::try_from(value).unwrap_or(0);
    }
    if let Ok(value) = env_config.get_int("reader.max_parameters") {
        config.reader.max_parameters = usize::try_from(value).unwrap_or(0);
    }
    if let Ok(format) = env_config.get_string("output.format") {
        match format.to_lowercase().as_str() {
            "json" => config.output.format = OutputFormat::Json,
            "header" => config.output.format = OutputFormat::Header,
            _ => {}
        }
    }
    if let Ok(value) = env_config.get_bool("output.pretty") {
        config.output.pretty = value;
    }

    Ok(())
}

/// Apply command-line argument overrides.
pub(crate) fn apply_cli_overrides(config: &mut CliConfig, cli: &CliArgs) {
    if let Some(ref level_str) = cli.log_level {
        if let Ok(level) = level_str.parse() {
            config.logging.level = level;
        } else {
            eprintln!("Invalid log level '{}', ignoring", level_str);
        }
    }

    if let Some(format) = cli.format {
        config.output.format = format;
    }
}

/// Print the default configuration in TOML format.
pub fn print_default_config() -> Result<()> {
    let default_config = CliConfig::default();
    let toml_str =
        toml::to_string_pretty(&default_config).context("Failed to serialize default config")?;
    println!("{}", toml_str);
    Ok(())
}
