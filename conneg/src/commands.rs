//! Subcommand implementations.
//!
//! Every command writes its result to the given writer, so tests can run
//! them against a buffer.

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use conneg_prefs::{
    format_preferences, parse_character_sets_with, parse_encodings_with, parse_languages_with,
    parse_media_types_with, AcceptReader, CharacterSet, ClientPreferences, Encoding, Family,
    Language, MediaType, Metadata, Preference,
};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{Command, OutputConfig, OutputFormat};

/// Run one subcommand.
pub fn run<W: Write>(
    command: &Command,
    reader: &AcceptReader,
    output: &OutputConfig,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Parse { family, value } => {
            let family = Family::from(*family);
            let mut client = ClientPreferences::new();
            install_family(reader, family, value.as_deref(), &mut client);
            write_family(&client, family, output, out)
        }
        Command::Normalize { family, value } => {
            let normalized = normalize(reader, Family::from(*family), value)?;
            writeln!(out, "{}", normalized)?;
            Ok(())
        }
        Command::Inspect { file } => {
            let text = match file {
                Some(path) => read_file(path)?,
                None => {
                    let mut text = String::new();
                    io::stdin()
                        .read_to_string(&mut text)
                        .context("Failed to read headers from stdin")?;
                    text
                }
            };
            let client = ClientPreferences::from_headers_with(reader, &read_header_block(&text));
            write_client(&client, output, out)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read header file: {}", path.display()))
}

fn install_family(
    reader: &AcceptReader,
    family: Family,
    value: Option<&str>,
    client: &mut ClientPreferences,
) {
    match family {
        Family::CharacterSet => parse_character_sets_with(reader, value, client),
        Family::Encoding => parse_encodings_with(reader, value, client),
        Family::Language => parse_languages_with(reader, value, client),
        Family::MediaType => parse_media_types_with(reader, value, client),
    }
}

/// Reads `value` strictly and writes it back in canonical wire syntax.
fn normalize(reader: &AcceptReader, family: Family, value: &str) -> Result<String> {
    match family {
        Family::CharacterSet => normalize_as::<CharacterSet>(reader, value),
        Family::Encoding => normalize_as::<Encoding>(reader, value),
        Family::Language => normalize_as::<Language>(reader, value),
        Family::MediaType => normalize_as::<MediaType>(reader, value),
    }
}

fn normalize_as<M: Metadata>(reader: &AcceptReader, value: &str) -> Result<String> {
    let prefs: Vec<Preference<M>> = reader
        .read_all(value)
        .with_context(|| format!("Failed to read {} value {:?}", M::FAMILY.header_name(), value))?;
    Ok(format_preferences(&prefs)?)
}

fn write_family<W: Write>(
    client: &ClientPreferences,
    family: Family,
    output: &OutputConfig,
    out: &mut W,
) -> Result<()> {
    match family {
        Family::CharacterSet => write_list(&client.accepted_character_sets, output, out),
        Family::Encoding => write_list(&client.accepted_encodings, output, out),
        Family::Language => write_list(&client.accepted_languages, output, out),
        Family::MediaType => write_list(&client.accepted_media_types, output, out),
    }
}

fn write_client<W: Write>(client: &ClientPreferences, output: &OutputConfig, out: &mut W) -> Result<()> {
    match output.format {
        OutputFormat::Json => write_json(client, output.pretty, out),
        OutputFormat::Header => {
            write_header_line(&client.accepted_media_types, out)?;
            write_header_line(&client.accepted_character_sets, out)?;
            write_header_line(&client.accepted_encodings, out)?;
            write_header_line(&client.accepted_languages, out)
        }
    }
}

fn write_list<M, W>(prefs: &[Preference<M>], output: &OutputConfig, out: &mut W) -> Result<()>
where
    M: Metadata + Serialize,
    W: Write,
{
    match output.format {
        OutputFormat::Json => write_json(prefs, output.pretty, out),
        OutputFormat::Header => write_header_line(prefs, out),
    }
}

fn write_json<T: Serialize + ?Sized, W: Write>(value: &T, pretty: bool, out: &mut W) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_header_line<M: Metadata, W: Write>(prefs: &[Preference<M>], out: &mut W) -> Result<()> {
    writeln!(out, "{}: {}", M::FAMILY.header_name(), format_preferences(prefs)?)?;
    Ok(())
}

/// Collects `Name: value` lines into a header map.
///
/// A leading request line is skipped and reading stops at the first blank
/// line after a header.
fn read_header_block(text: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if headers.is_empty() {
                continue;
            }
            break;
        }

        let Some((name, value)) = line.split_once(':') else {
            debug!(line, "skipping line without a colon");
            continue;
        };

        match (
            HeaderName::from_bytes(name.trim().as_bytes()),
            HeaderValue::from_str(value.trim()),
        ) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => warn!(line, "skipping malformed header line"),
        }
    }

    headers
}
