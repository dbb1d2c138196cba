//! Accept header reader.
//!
//! Splits a header value into elements following the RFC 7230 list rule and
//! reads each element into a [`Preference`]:
//!
//! ```text
//! element = name *( OWS ";" OWS parameter )
//! parameter = name [ "=" ( token / quoted-string ) ]
//! ```
//!
//! Empty list elements are ignored. The `q` parameter sets the quality.
//! For media types, parameters before `q` belong to the media type and
//! parameters after it to the preference; other families only have
//! preference parameters. Quoted strings are validated and kept verbatim,
//! quotes included, so that formatting reproduces them. Output order is
//! header order.

use std::marker::PhantomData;

use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use crate::metadata::Metadata;
use crate::parameter::Parameter;
use crate::preference::Preference;
use crate::quality::parse_quality;

/// Tokenizer seam used by the installers.
pub trait PreferenceReader {
    /// Appends the preferences read from `header` to `target`, in header
    /// order, and returns the errors of the elements it had to skip.
    fn read_into<M: Metadata>(&self, header: &str, target: &mut Vec<Preference<M>>) -> Vec<Error>;
}

/// The built-in reader for `Accept`, `Accept-Charset`, `Accept-Encoding` and
/// `Accept-Language` values.
#[derive(Debug, Clone, Default)]
pub struct AcceptReader {
    config: ReaderConfig,
}

impl AcceptReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Lazily reads the elements of `header`, one result per element.
    pub fn read<'r, 'h, M: Metadata>(&'r self, header: &'h str) -> Elements<'r, 'h, M> {
        let state = if header.len() > self.config.max_header_len {
            State::TooLong(header.len())
        } else {
            State::Reading(0)
        };

        Elements {
            config: &self.config,
            pieces: Split::new(header, b','),
            state,
            _family: PhantomData,
        }
    }

    /// Reads every element, failing on the first malformed one.
    pub fn read_all<M: Metadata>(&self, header: &str) -> Result<Vec<Preference<M>>> {
        self.read(header).collect()
    }
}

impl PreferenceReader for AcceptReader {
    fn read_into<M: Metadata>(&self, header: &str, target: &mut Vec<Preference<M>>) -> Vec<Error> {
        let mut skipped = Vec::new();
        for element in self.read(header) {
            match element {
                Ok(pref) => target.push(pref),
                Err(e) => skipped.push(e),
            }
        }
        skipped
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    Reading(usize),
    TooLong(usize),
    Done,
}

/// Iterator over the elements of one header value.
pub struct Elements<'r, 'h, M> {
    config: &'r ReaderConfig,
    pieces: Split<'h>,
    state: State,
    _family: PhantomData<fn() -> M>,
}

impl<M: Metadata> Iterator for Elements<'_, '_, M> {
    type Item = Result<Preference<M>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let read = match self.state {
                State::Done => return None,
                State::TooLong(len) => {
                    self.state = State::Done;
                    return Some(Err(Error::HeaderTooLong {
                        len,
                        limit: self.config.max_header_len,
                    }));
                }
                State::Reading(read) => read,
            };

            let Some(piece) = self.pieces.next() else {
                self.state = State::Done;
                return None;
            };
            let element = trim_ows(piece);
            if element.is_empty() {
                continue;
            }

            if read >= self.config.max_elements {
                self.state = State::Done;
                return Some(Err(Error::TooManyElements(self.config.max_elements)));
            }
            self.state = State::Reading(read + 1);

            return Some(read_element(element, self.config));
        }
    }
}

fn read_element<M: Metadata>(element: &str, config: &ReaderConfig) -> Result<Preference<M>> {
    let mut pieces = Split::new(element, b';');
    let name = trim_ows(pieces.next().unwrap_or_default());
    if name.is_empty() {
        return Err(Error::MalformedElement(format!("missing name in {:?}", element)));
    }
    if name.contains(|c: char| c.is_ascii_whitespace() || c == '"' || c == '=') {
        return Err(Error::MalformedElement(format!("invalid name {:?}", name)));
    }

    let mut own = Vec::new();
    let mut params = Vec::new();
    let mut quality = None;
    let mut count = 0;

    for piece in pieces {
        let piece = trim_ows(piece);
        if piece.is_empty() {
            continue;
        }

        count += 1;
        if count > config.max_parameters {
            return Err(Error::TooManyParameters(config.max_parameters));
        }

        let param = read_parameter(piece)?;
        if quality.is_none() && param.name.eq_ignore_ascii_case("q") {
            quality = Some(parse_quality(param.value.as_deref().unwrap_or_default())?);
        } else if quality.is_none() && M::FAMILY.has_own_parameters() {
            own.push(param);
        } else {
            params.push(param);
        }
    }

    let mut pref = Preference::new(M::from_element(name, own));
    if let Some(quality) = quality {
        pref.set_quality(quality)?;
    }
    for param in params {
        pref.push_parameter(param);
    }
    Ok(pref)
}

fn read_parameter(piece: &str) -> Result<Parameter> {
    let Some((name, value)) = piece.split_once('=') else {
        return Ok(Parameter::flag(piece));
    };

    let name = trim_ows(name);
    if name.is_empty() {
        return Err(Error::MalformedElement(format!("parameter without name {:?}", piece)));
    }

    let value = trim_ows(value);
    check_quoted(value)?;
    Ok(Parameter::new(name, value))
}

/// Checks that a quoted-string value is terminated and ends the parameter.
fn check_quoted(value: &str) -> Result<()> {
    let Some(inner) = value.strip_prefix('"') else {
        return Ok(());
    };

    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' if chars.as_str().is_empty() => return Ok(()),
            '"' => {
                return Err(Error::MalformedElement(format!(
                    "text after quoted string {:?}",
                    value
                )))
            }
            _ => {}
        }
    }

    Err(Error::MalformedElement(format!("unterminated quoted string {:?}", value)))
}

fn trim_ows(s: &str) -> &str {
    s.trim_matches(|c: char| c == ' ' || c == '\t')
}

/// Splits on an ASCII separator, ignoring separators inside quoted strings.
struct Split<'a> {
    rest: Option<&'a str>,
    sep: u8,
}

impl<'a> Split<'a> {
    fn new(s: &'a str, sep: u8) -> Self {
        Self { rest: Some(s), sep }
    }
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        let mut in_quotes = false;
        let mut escaped = false;

        for (i, b) in rest.bytes().enumerate() {
            if escaped {
                escaped = false;
                continue;
            }
            match b {
                b'\\' if in_quotes => escaped = true,
                b'"' => in_quotes = !in_quotes,
                _ if b == self.sep && !in_quotes => {
                    self.rest = Some(&rest[i + 1..]);
                    return Some(&rest[..i]);
                }
                _ => {}
            }
        }

        self.rest = None;
        Some(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{CharacterSet, Encoding, Language, MediaType};

    fn names<M: Metadata>(prefs: &[Preference<M>]) -> Vec<&str> {
        prefs.iter().map(|p| p.metadata().name()).collect()
    }

    #[test]
    fn test_split_respects_quotes() {
        let pieces: Vec<_> = Split::new(r#"a;x="1,2", b"#, b',').collect();
        assert_eq!(pieces, vec![r#"a;x="1,2""#, " b"]);

        let pieces: Vec<_> = Split::new(r#"a;x="q\"," , c"#, b',').collect();
        assert_eq!(pieces, vec![r#"a;x="q\"," "#, " c"]);
    }

    #[test]
    fn test_read_encodings_in_order() {
        let reader = AcceptReader::default();
        let prefs: Vec<Preference<Encoding>> =
            reader.read_all("gzip;q=0.5, br, identity;q=0").unwrap();
        assert_eq!(names(&prefs), vec!["gzip", "br", "identity"]);
        assert_eq!(prefs[0].quality(), 0.5);
        assert_eq!(prefs[1].quality(), 1.0);
        assert_eq!(prefs[2].quality(), 0.0);
    }

    #[test]
    fn test_media_type_parameter_split() {
        let reader = AcceptReader::default();
        let prefs: Vec<Preference<MediaType>> = reader
            .read_all("text/html;level=1;q=0.7;ext=yes")
            .unwrap();
        let pref = &prefs[0];
        assert_eq!(pref.metadata().name(), "text/html");
        assert_eq!(pref.metadata().parameters(), &[Parameter::new("level", "1")]);
        assert_eq!(pref.quality(), 0.7);
        assert_eq!(pref.parameters(), &[Parameter::new("ext", "yes")]);
    }

    #[test]
    fn test_non_media_parameters_are_preference_level() {
        let reader = AcceptReader::default();
        let prefs: Vec<Preference<Language>> = reader.read_all("en;x=1;q=0.3").unwrap();
        assert_eq!(prefs[0].parameters(), &[Parameter::new("x", "1")]);
        assert_eq!(prefs[0].quality(), 0.3);
    }

    #[test]
    fn test_empty_elements_ignored() {
        let reader = AcceptReader::default();
        let prefs: Vec<Preference<Language>> = reader.read_all(" , en ,, fr ,").unwrap();
        assert_eq!(names(&prefs), vec!["en", "fr"]);

        let none: Vec<Preference<Language>> = reader.read_all("").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_uppercase_q_and_whitespace() {
        let reader = AcceptReader::default();
        let prefs: Vec<Preference<CharacterSet>> =
            reader.read_all("utf-8 ; Q = 0.9").unwrap();
        assert_eq!(prefs[0].metadata().name(), "utf-8");
        assert_eq!(prefs[0].quality(), 0.9);
    }

    #[test]
    fn test_quoted_value_kept_verbatim() {
        let reader = AcceptReader::default();
        let prefs: Vec<Preference<MediaType>> =
            reader.read_all(r#"text/plain;format="a, b", text/html"#).unwrap();
        assert_eq!(prefs.len(), 2);
        assert_eq!(
            prefs[0].metadata().parameters()[0].value(),
            Some(r#""a, b""#)
        );
    }

    #[test]
    fn test_malformed_elements() {
        let reader = AcceptReader::default();
        for header in [";q=0.5", "gzip;q=2", "gzip;q=high", "gzip;=1", r#"gzip;x="open"#, "g zip"] {
            let result: Result<Vec<Preference<Encoding>>> = reader.read_all(header);
            assert!(result.is_err(), "{:?} should be rejected", header);
        }
    }

    #[test]
    fn test_read_into_skips_bad_elements() {
        let reader = AcceptReader::default();
        let mut target: Vec<Preference<Encoding>> = vec![Preference::new(Encoding::IDENTITY)];
        let skipped = reader.read_into("gzip, br;q=7, deflate", &mut target);
        assert_eq!(names(&target), vec!["identity", "gzip", "deflate"]);
        assert_eq!(skipped.len(), 1);
        assert!(matches!(skipped[0], Error::InvalidQuality(_)));
    }

    #[test]
    fn test_header_length_limit() {
        let reader = AcceptReader::new(ReaderConfig {
            max_header_len: 8,
            ..ReaderConfig::default()
        });
        let results: Vec<Result<Preference<Encoding>>> = reader.read("gzip, deflate").collect();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0],
            Err(Error::HeaderTooLong { len: 13, limit: 8 })
        );
    }

    #[test]
    fn test_element_limit() {
        let reader = AcceptReader::new(ReaderConfig {
            max_elements: 2,
            ..ReaderConfig::default()
        });
        let mut target: Vec<Preference<Language>> = Vec::new();
        let skipped = reader.read_into("a, b, c, d", &mut target);
        assert_eq!(names(&target), vec!["a", "b"]);
        assert_eq!(skipped, vec![Error::TooManyElements(2)]);
    }

    #[test]
    fn test_parameter_limit() {
        let reader = AcceptReader::new(ReaderConfig {
            max_parameters: 2,
            ..ReaderConfig::default()
        });
        let ok: Result<Vec<Preference<MediaType>>> = reader.read_all("text/html;a=1;q=0.5");
        assert!(ok.is_ok());
        let too_many: Result<Vec<Preference<MediaType>>> = reader.read_all("text/html;a=1;b=2;q=0.5");
        assert_eq!(too_many, Err(Error::TooManyParameters(2)));
    }
}
