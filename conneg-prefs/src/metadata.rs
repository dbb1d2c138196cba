//! Negotiable metadata: character sets, encodings, languages and media types.
//!
//! Each family has its own type so that a `Preference<MediaType>` can never
//! end up in the charset list. Code that must treat the four kinds uniformly
//! goes through [`Metadata::as_metadata`], which yields the closed
//! [`MetadataRef`] variant; only its `MediaType` arm carries own parameters.

use std::borrow::Cow;
use std::fmt;

use http::header::{self, HeaderName};
use serde::{Deserialize, Serialize};

use crate::parameter::{write_parameters, Parameter};

/// One of the four negotiable dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    CharacterSet,
    Encoding,
    Language,
    MediaType,
}

impl Family {
    /// The request header carrying preferences of this family.
    pub fn header_name(self) -> HeaderName {
        match self {
            Family::CharacterSet => header::ACCEPT_CHARSET,
            Family::Encoding => header::ACCEPT_ENCODING,
            Family::Language => header::ACCEPT_LANGUAGE,
            Family::MediaType => header::ACCEPT,
        }
    }

    /// Whether metadata of this family carries parameters of its own,
    /// written before the quality (`text/html;level=1;q=0.5`).
    pub fn has_own_parameters(self) -> bool {
        matches!(self, Family::MediaType)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Family::CharacterSet => "character-set",
            Family::Encoding => "encoding",
            Family::Language => "language",
            Family::MediaType => "media-type",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A negotiable value of one family.
pub trait Metadata: sealed::Sealed + Clone + fmt::Debug {
    /// The family this metadata belongs to.
    const FAMILY: Family;

    /// Canonical name, e.g. `text/html`, `gzip`, `en-US`.
    fn name(&self) -> &str;

    /// Tagged view used for kind-specific handling.
    fn as_metadata(&self) -> MetadataRef<'_>;

    /// Builds metadata from a header element name.
    ///
    /// `own` holds the parameters preceding the quality; it is always empty
    /// for families without own parameters.
    fn from_element(name: &str, own: Vec<Parameter>) -> Self;

    /// The preference installed when the header is not sent at all.
    fn absent_default() -> Self;

    /// The preference installed when the header is sent with an empty
    /// value, if the protocol defines one.
    fn empty_default() -> Option<Self> {
        None
    }

    /// True if this value matches any value of its family.
    fn is_wildcard(&self) -> bool {
        self.name() == "*"
    }
}

/// Borrowed tagged view over the four metadata kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataRef<'a> {
    CharacterSet(&'a CharacterSet),
    Encoding(&'a Encoding),
    Language(&'a Language),
    MediaType(&'a MediaType),
}

impl<'a> MetadataRef<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            MetadataRef::CharacterSet(m) => m.name(),
            MetadataRef::Encoding(m) => m.name(),
            MetadataRef::Language(m) => m.name(),
            MetadataRef::MediaType(m) => m.name(),
        }
    }
}

macro_rules! named_metadata {
    ($(#[$attr:meta])* $ty:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $ty {
            name: Cow<'static, str>,
        }

        impl $ty {
            /// Matches any value of this family.
            pub const ALL: $ty = $ty::from_static("*");

            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    name: Cow::Owned(name.into()),
                }
            }

            pub const fn from_static(name: &'static str) -> Self {
                Self {
                    name: Cow::Borrowed(name),
                }
            }
        }

        impl sealed::Sealed for $ty {}

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.name)
            }
        }
    };
}

named_metadata!(
    /// A character set, e.g. `utf-8`.
    CharacterSet
);
named_metadata!(
    /// A content coding, e.g. `gzip`.
    Encoding
);
named_metadata!(
    /// A language tag, e.g. `en-US`.
    Language
);

impl CharacterSet {
    pub const ISO_8859_1: CharacterSet = CharacterSet::from_static("ISO-8859-1");
}

impl Metadata for CharacterSet {
    const FAMILY: Family = Family::CharacterSet;

    fn name(&self) -> &str {
        &self.name
    }

    fn as_metadata(&self) -> MetadataRef<'_> {
        MetadataRef::CharacterSet(self)
    }

    fn from_element(name: &str, _own: Vec<Parameter>) -> Self {
        Self::new(name)
    }

    fn absent_default() -> Self {
        CharacterSet::ISO_8859_1
    }

    // RFC 2616 Section 14.2
    fn empty_default() -> Option<Self> {
        Some(CharacterSet::ISO_8859_1)
    }
}

impl Encoding {
    pub const IDENTITY: Encoding = Encoding::from_static("identity");
}

impl Metadata for Encoding {
    const FAMILY: Family = Family::Encoding;

    fn name(&self) -> &str {
        &self.name
    }

    fn as_metadata(&self) -> MetadataRef<'_> {
        MetadataRef::Encoding(self)
    }

    fn from_element(name: &str, _own: Vec<Parameter>) -> Self {
        Self::new(name)
    }

    fn absent_default() -> Self {
        Encoding::IDENTITY
    }
}

impl Metadata for Language {
    const FAMILY: Family = Family::Language;

    fn name(&self) -> &str {
        &self.name
    }

    fn as_metadata(&self) -> MetadataRef<'_> {
        MetadataRef::Language(self)
    }

    fn from_element(name: &str, _own: Vec<Parameter>) -> Self {
        Self::new(name)
    }

    fn absent_default() -> Self {
        Language::ALL
    }
}

/// A media type or media range with its own parameters,
/// e.g. `text/html;charset=utf-8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaType {
    name: Cow<'static, str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    parameters: Vec<Parameter>,
}

impl MediaType {
    /// Matches any media type.
    pub const ALL: MediaType = MediaType::from_static("*/*");

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            parameters: Vec::new(),
        }
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            parameters: Vec::new(),
        }
    }

    /// Appends an own parameter, written before the quality.
    pub fn with_parameter(mut self, param: impl Into<Parameter>) -> Self {
        self.parameters.push(param.into());
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The part before `/`, e.g. `text`.
    pub fn main_type(&self) -> &str {
        self.name.split('/').next().unwrap_or_default()
    }

    /// The part after `/`, e.g. `html`. Empty if there is none.
    pub fn sub_type(&self) -> &str {
        self.name.split_once('/').map_or("", |(_, sub)| sub)
    }
}

impl sealed::Sealed for MediaType {}

impl Metadata for MediaType {
    const FAMILY: Family = Family::MediaType;

    fn name(&self) -> &str {
        &self.name
    }

    fn as_metadata(&self) -> MetadataRef<'_> {
        MetadataRef::MediaType(self)
    }

    fn from_element(name: &str, own: Vec<Parameter>) -> Self {
        // Some clients send a bare `*` for the full range.
        let mut media_type = if name == "*" {
            MediaType::ALL
        } else {
            MediaType::new(name)
        };
        media_type.parameters = own;
        media_type
    }

    fn absent_default() -> Self {
        MediaType::ALL
    }

    /// True for `*/*` and for `type/*` ranges.
    fn is_wildcard(&self) -> bool {
        self.main_type() == "*" || self.sub_type() == "*"
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        write_parameters(&self.parameters, f).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_header_names() {
        assert_eq!(Family::CharacterSet.header_name(), header::ACCEPT_CHARSET);
        assert_eq!(Family::Encoding.header_name(), header::ACCEPT_ENCODING);
        assert_eq!(Family::Language.header_name(), header::ACCEPT_LANGUAGE);
        assert_eq!(Family::MediaType.header_name(), header::ACCEPT);
    }

    #[test]
    fn test_only_media_types_have_own_parameters() {
        assert!(Family::MediaType.has_own_parameters());
        assert!(!Family::CharacterSet.has_own_parameters());
        assert!(!Family::Encoding.has_own_parameters());
        assert!(!Family::Language.has_own_parameters());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(CharacterSet::absent_default().name(), "ISO-8859-1");
        assert_eq!(CharacterSet::empty_default(), Some(CharacterSet::ISO_8859_1));
        assert_eq!(Encoding::absent_default().name(), "identity");
        assert_eq!(Encoding::empty_default(), None);
        assert_eq!(Language::absent_default().name(), "*");
        assert_eq!(Language::empty_default(), None);
        assert_eq!(MediaType::absent_default().name(), "*/*");
        assert_eq!(MediaType::empty_default(), None);
    }

    #[test]
    fn test_wildcards() {
        assert!(CharacterSet::ALL.is_wildcard());
        assert!(!CharacterSet::ISO_8859_1.is_wildcard());
        assert!(Language::ALL.is_wildcard());
        assert!(MediaType::ALL.is_wildcard());
        assert!(MediaType::new("text/*").is_wildcard());
        assert!(!MediaType::new("text/html").is_wildcard());
    }

    #[test]
    fn test_media_type_parts() {
        let media_type = MediaType::new("application/json");
        assert_eq!(media_type.main_type(), "application");
        assert_eq!(media_type.sub_type(), "json");
        assert_eq!(MediaType::new("text").sub_type(), "");
    }

    #[test]
    fn test_bare_star_media_range() {
        let media_type = MediaType::from_element("*", Vec::new());
        assert_eq!(media_type, MediaType::ALL);
    }

    #[test]
    fn test_media_type_display() {
        let media_type = MediaType::new("text/html").with_parameter(("charset", "utf-8"));
        assert_eq!(media_type.to_string(), "text/html;charset=utf-8");
    }

    #[test]
    fn test_tagged_view() {
        let media_type = MediaType::new("text/plain");
        let view = media_type.as_metadata();
        assert!(matches!(view, MetadataRef::MediaType(_)));
        assert_eq!(view.name(), "text/plain");
        assert!(matches!(Encoding::IDENTITY.as_metadata(), MetadataRef::Encoding(_)));
    }
}
