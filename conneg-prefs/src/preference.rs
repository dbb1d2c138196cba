//! Weighted preferences and the per-client preference lists.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::format::format_preference;
use crate::metadata::{CharacterSet, Encoding, Language, MediaType, Metadata};
use crate::parameter::Parameter;
use crate::quality::{is_quality, QUALITY_MAX};

/// A metadata value weighted by a quality, with optional parameters.
///
/// The quality is always within `[0, 1]`: every way of setting it validates
/// and fails with [`Error::InvalidQuality`] instead of clamping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preference<M> {
    metadata: M,
    quality: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parameters: Vec<Parameter>,
}

impl<M: Metadata> Preference<M> {
    /// Creates a preference with the implicit quality of 1.
    pub fn new(metadata: M) -> Self {
        Self {
            metadata,
            quality: QUALITY_MAX,
            parameters: Vec::new(),
        }
    }

    /// Creates a preference with an explicit quality.
    pub fn with_quality(metadata: M, quality: f32) -> Result<Self> {
        let mut pref = Self::new(metadata);
        pref.set_quality(quality)?;
        Ok(pref)
    }

    /// Appends a preference-level parameter, written after the quality.
    pub fn with_parameter(mut self, param: impl Into<Parameter>) -> Self {
        self.parameters.push(param.into());
        self
    }

    pub fn set_quality(&mut self, quality: f32) -> Result<()> {
        if !is_quality(quality) {
            return Err(Error::invalid_quality(quality));
        }
        self.quality = quality;
        Ok(())
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn push_parameter(&mut self, param: Parameter) {
        self.parameters.push(param);
    }

    /// True when the metadata matches any value of its family.
    pub fn is_wildcard(&self) -> bool {
        self.metadata.is_wildcard()
    }
}

impl<M: Metadata> From<M> for Preference<M> {
    fn from(metadata: M) -> Self {
        Self::new(metadata)
    }
}

impl<M: Metadata> fmt::Display for Preference<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_preference(self, f).map_err(|_| fmt::Error)
    }
}

/// The four preference lists of one client, one per family.
///
/// Installers only ever append to these lists; entries keep the order in
/// which they were read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientPreferences {
    pub accepted_character_sets: Vec<Preference<CharacterSet>>,
    pub accepted_encodings: Vec<Preference<Encoding>>,
    pub accepted_languages: Vec<Preference<Language>>,
    pub accepted_media_types: Vec<Preference<MediaType>>,
}

impl ClientPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no list holds any preference.
    pub fn is_empty(&self) -> bool {
        self.accepted_character_sets.is_empty()
            && self.accepted_encodings.is_empty()
            && self.accepted_languages.is_empty()
            && self.accepted_media_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quality() {
        let pref = Preference::new(Encoding::new("gzip"));
        assert_eq!(pref.quality(), 1.0);
        assert!(pref.parameters().is_empty());
    }

    #[test]
    fn test_quality_is_validated_not_clamped() {
        assert!(matches!(
            Preference::with_quality(Encoding::new("gzip"), 1.5),
            Err(Error::InvalidQuality(_))
        ));

        let mut pref = Preference::with_quality(Encoding::new("gzip"), 0.3).unwrap();
        assert!(pref.set_quality(-0.1).is_err());
        assert_eq!(pref.quality(), 0.3);
    }

    #[test]
    fn test_display_uses_wire_form() {
        let pref = Preference::with_quality(Language::new("en-GB"), 0.7)
            .unwrap()
            .with_parameter(("x", "y"));
        assert_eq!(pref.to_string(), "en-GB;q=0.7;x=y");
    }

    #[test]
    fn test_from_metadata() {
        let pref: Preference<MediaType> = MediaType::ALL.into();
        assert!(pref.is_wildcard());
        assert_eq!(pref.quality(), 1.0);
    }

    #[test]
    fn test_client_preferences_empty() {
        let mut client = ClientPreferences::new();
        assert!(client.is_empty());
        client.accepted_encodings.push(Encoding::IDENTITY.into());
        assert!(!client.is_empty());
    }
}
