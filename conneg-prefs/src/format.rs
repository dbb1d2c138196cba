//! Preference formatter.
//!
//! Writes preferences in request wire syntax:
//!
//! ```text
//! name[;own-param[=value]]*[;q=qvalue][;param[=value]]*
//! ```
//!
//! Own parameters only exist on media types. The quality is omitted when it
//! is 1. Lists are joined with `", "` in input order; nothing is sorted and
//! nothing is escaped.

use std::fmt;

use bytes::BytesMut;
use http::{HeaderMap, HeaderValue};

use crate::error::Result;
use crate::metadata::{Metadata, MetadataRef};
use crate::parameter::write_parameters;
use crate::preference::{ClientPreferences, Preference};
use crate::quality::{format_quality, QUALITY_MAX};

const LIST_SEPARATOR: &str = ", ";

/// Initial buffer space per preference, enough for `gzip;q=0.5, `.
const PREFERENCE_SIZE_HINT: usize = 16;

/// Appends the wire form of one preference to `dst`.
///
/// # Errors
///
/// Propagates quality and sink failures. Nothing already written is rolled
/// back.
pub fn format_preference<M, W>(pref: &Preference<M>, dst: &mut W) -> Result<()>
where
    M: Metadata,
    W: fmt::Write + ?Sized,
{
    let metadata = pref.metadata().as_metadata();
    dst.write_str(metadata.name())?;

    if let MetadataRef::MediaType(media_type) = metadata {
        write_parameters(media_type.parameters(), dst)?;
    }

    if pref.quality() < QUALITY_MAX {
        dst.write_str(";q=")?;
        format_quality(pref.quality(), dst)?;
    }

    write_parameters(pref.parameters(), dst)
}

/// Appends a comma separated preference list to `dst`.
pub fn write_preferences<M, W>(prefs: &[Preference<M>], dst: &mut W) -> Result<()>
where
    M: Metadata,
    W: fmt::Write + ?Sized,
{
    for (i, pref) in prefs.iter().enumerate() {
        if i > 0 {
            dst.write_str(LIST_SEPARATOR)?;
        }
        format_preference(pref, dst)?;
    }
    Ok(())
}

/// Formats a preference list. An empty list yields an empty string.
pub fn format_preferences<M: Metadata>(prefs: &[Preference<M>]) -> Result<String> {
    let mut out = String::new();
    write_preferences(prefs, &mut out)?;
    Ok(out)
}

/// Appends a formatted preference list to a byte buffer.
pub fn encode_preferences<M: Metadata>(prefs: &[Preference<M>], dst: &mut BytesMut) -> Result<()> {
    write_preferences(prefs, dst)
}

/// Formats a preference list as a header field value.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidHeaderValue`] when a name or parameter
/// contains bytes not allowed in a field value.
pub fn to_header_value<M: Metadata>(prefs: &[Preference<M>]) -> Result<HeaderValue> {
    let mut buf = BytesMut::with_capacity(prefs.len() * PREFERENCE_SIZE_HINT);
    encode_preferences(prefs, &mut buf)?;
    Ok(HeaderValue::from_maybe_shared(buf.freeze())?)
}

impl ClientPreferences {
    /// Renders every non-empty list into its request header.
    pub fn to_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        insert_list(&mut headers, &self.accepted_media_types)?;
        insert_list(&mut headers, &self.accepted_character_sets)?;
        insert_list(&mut headers, &self.accepted_encodings)?;
        insert_list(&mut headers, &self.accepted_languages)?;
        Ok(headers)
    }
}

fn insert_list<M: Metadata>(headers: &mut HeaderMap, prefs: &[Preference<M>]) -> Result<()> {
    if !prefs.is_empty() {
        headers.insert(M::FAMILY.header_name(), to_header_value(prefs)?);
    }
    Ok(())
}
