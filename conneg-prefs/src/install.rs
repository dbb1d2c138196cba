//! Header default installer.
//!
//! Turns raw `Accept*` values into preference lists, applying the protocol
//! defaults:
//!
//! | header            | not sent     | sent empty          |
//! |-------------------|--------------|---------------------|
//! | `Accept-Charset`  | `ISO-8859-1` | `ISO-8859-1`        |
//! | `Accept-Encoding` | `identity`   | no preferences      |
//! | `Accept-Language` | `*`          | no preferences      |
//! | `Accept`          | `*/*`        | no preferences      |
//!
//! Only `Accept-Charset` special-cases the empty value (RFC 2616 Section
//! 14.2); the other families hand it to the reader, which yields nothing.
//! A value of only whitespace is not empty and always goes to the reader.

use http::HeaderMap;
use tracing::{debug, warn};

use crate::metadata::{Family, Metadata};
use crate::preference::{ClientPreferences, Preference};
use crate::reader::{AcceptReader, PreferenceReader};

/// Installs the preferences of one header into `target`.
///
/// `None` means the header was not sent. Existing entries are kept and new
/// ones are appended in reader order. Elements the reader cannot read are
/// logged and skipped; a header over the reader limits is logged once and
/// whatever was read before the limit is kept.
pub fn install<M, R>(reader: &R, header: Option<&str>, target: &mut Vec<Preference<M>>)
where
    M: Metadata,
    R: PreferenceReader,
{
    let Some(header) = header else {
        let default = M::absent_default();
        debug!(family = %M::FAMILY, default = default.name(), "header absent, installing default");
        target.push(Preference::new(default));
        return;
    };

    if header.is_empty() {
        if let Some(default) = M::empty_default() {
            debug!(family = %M::FAMILY, default = default.name(), "header empty, installing default");
            target.push(Preference::new(default));
            return;
        }
    }

    for error in reader.read_into(header, target) {
        if error.is_element_local() {
            warn!(family = %M::FAMILY, %error, "skipping unreadable preference");
        } else {
            warn!(family = %M::FAMILY, %error, "header over reader limits, dropping the rest");
        }
    }
}

/// Installs `Accept-Charset` preferences.
pub fn parse_character_sets(header: Option<&str>, client: &mut ClientPreferences) {
    parse_character_sets_with(&AcceptReader::default(), header, client);
}

pub fn parse_character_sets_with<R: PreferenceReader>(
    reader: &R,
    header: Option<&str>,
    client: &mut ClientPreferences,
) {
    install(reader, header, &mut client.accepted_character_sets);
}

/// Installs `Accept-Encoding` preferences.
pub fn parse_encodings(header: Option<&str>, client: &mut ClientPreferences) {
    parse_encodings_with(&AcceptReader::default(), header, client);
}

pub fn parse_encodings_with<R: PreferenceReader>(
    reader: &R,
    header: Option<&str>,
    client: &mut ClientPreferences,
) {
    install(reader, header, &mut client.accepted_encodings);
}

/// Installs `Accept-Language` preferences.
pub fn parse_languages(header: Option<&str>, client: &mut ClientPreferences) {
    parse_languages_with(&AcceptReader::default(), header, client);
}

pub fn parse_languages_with<R: PreferenceReader>(
    reader: &R,
    header: Option<&str>,
    client: &mut ClientPreferences,
) {
    install(reader, header, &mut client.accepted_languages);
}

/// Installs `Accept` preferences.
pub fn parse_media_types(header: Option<&str>, client: &mut ClientPreferences) {
    parse_media_types_with(&AcceptReader::default(), header, client);
}

pub fn parse_media_types_with<R: PreferenceReader>(
    reader: &R,
    header: Option<&str>,
    client: &mut ClientPreferences,
) {
    install(reader, header, &mut client.accepted_media_types);
}

impl ClientPreferences {
    /// Builds all four lists from request headers.
    ///
    /// Repeated header lines are combined with `", "` (RFC 7230 Section
    /// 3.2.2). Values that are not visible ASCII are logged and dropped
    /// before combining.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_headers_with(&AcceptReader::default(), headers)
    }

    pub fn from_headers_with<R: PreferenceReader>(reader: &R, headers: &HeaderMap) -> Self {
        let mut client = Self::new();
        install(
            reader,
            combined_value(headers, Family::CharacterSet).as_deref(),
            &mut client.accepted_character_sets,
        );
        install(
            reader,
            combined_value(headers, Family::Encoding).as_deref(),
            &mut client.accepted_encodings,
        );
        install(
            reader,
            combined_value(headers, Family::Language).as_deref(),
            &mut client.accepted_languages,
        );
        install(
            reader,
            combined_value(headers, Family::MediaType).as_deref(),
            &mut client.accepted_media_types,
        );
        client
    }
}

fn combined_value(headers: &HeaderMap, family: Family) -> Option<String> {
    let name = family.header_name();
    let mut values = headers.get_all(&name).iter().peekable();
    values.peek()?;

    let mut combined = String::new();
    for value in values {
        match value.to_str() {
            Ok(text) => {
                if !combined.is_empty() {
                    combined.push_str(", ");
                }
                combined.push_str(text);
            }
            Err(_) => warn!(header = %name, "ignoring header value that is not visible ASCII"),
        }
    }
    Some(combined)
}
