//! Preference lists for HTTP content negotiation.
//!
//! This crate encodes and decodes the request headers through which a client
//! states what it accepts: `Accept`, `Accept-Charset`, `Accept-Encoding` and
//! `Accept-Language` (RFC 2616 Section 14).
//!
//! # Features
//!
//! - **Quality values**: validation, two-digit wire formatting and parsing.
//! - **Formatter**: preference lists to wire syntax, into any
//!   `fmt::Write`, a `BytesMut` or an `http::HeaderValue`.
//! - **Installer**: header values to preference lists, with the protocol
//!   defaults for absent and empty headers.
//! - **Reader**: a bounded tokenizer behind the [`PreferenceReader`] seam.
//!
//! Selecting the best variant for a client is out of scope.
//!
//! # Example
//!
//! ```rust
//! use conneg_prefs::{format_preferences, parse_encodings, ClientPreferences};
//!
//! let mut client = ClientPreferences::new();
//! parse_encodings(Some("gzip;q=0.8, br"), &mut client);
//! assert_eq!(format_preferences(&client.accepted_encodings).unwrap(), "gzip;q=0.8, br");
//!
//! // A missing header installs the protocol default.
//! let mut client = ClientPreferences::new();
//! parse_encodings(None, &mut client);
//! assert_eq!(format_preferences(&client.accepted_encodings).unwrap(), "identity");
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod install;
pub mod metadata;
pub mod parameter;
pub mod preference;
pub mod quality;
pub mod reader;

pub use config::ReaderConfig;
pub use error::{Error, Result};
pub use format::{
    encode_preferences, format_preference, format_preferences, to_header_value, write_preferences,
};
pub use install::{
    install, parse_character_sets, parse_character_sets_with, parse_encodings,
    parse_encodings_with, parse_languages, parse_languages_with, parse_media_types,
    parse_media_types_with,
};
pub use metadata::{CharacterSet, Encoding, Family, Language, MediaType, Metadata, MetadataRef};
pub use parameter::{write_parameters, Parameter};
pub use preference::{ClientPreferences, Preference};
pub use quality::{format_quality, is_quality, parse_quality};
pub use reader::{AcceptReader, Elements, PreferenceReader};
