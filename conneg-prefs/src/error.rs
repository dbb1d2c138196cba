//! Error types for preference encoding and decoding.
//!
//! Quality and formatting errors are raised synchronously to the immediate
//! caller. Reader errors describe a single header element; the installer
//! logs and skips them so that well-formed siblings still get installed.

use std::fmt;

use thiserror::Error;

/// Result type for preference operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding preferences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Quality value outside `[0, 1]`, or quality text that is not numeric.
    ///
    /// Range and numeric failures are deliberately the same kind.
    #[error("invalid quality value {0:?}: value must be between 0 and 1")]
    InvalidQuality(String),

    /// The text sink rejected a write.
    #[error("failed to write preference: {0}")]
    Format(#[from] fmt::Error),

    /// A header element could not be read.
    ///
    /// This occurs when:
    /// - The element has no metadata name (e.g. `;q=0.5`)
    /// - A parameter has no name (e.g. `text/html;=x`)
    /// - A quoted string is not terminated
    #[error("malformed preference element: {0}")]
    MalformedElement(String),

    /// The whole header value exceeds the configured length limit.
    #[error("header value is {len} bytes, limit is {limit}")]
    HeaderTooLong { len: usize, limit: usize },

    /// The header holds more elements than the configured limit.
    #[error("header holds more than {0} elements")]
    TooManyElements(usize),

    /// A single element carries more parameters than the configured limit.
    #[error("element carries more than {0} parameters")]
    TooManyParameters(usize),

    /// Formatted output cannot be carried in an HTTP header field.
    #[error("formatted preferences are not a valid header value")]
    InvalidHeaderValue,
}

impl Error {
    pub(crate) fn invalid_quality(value: impl fmt::Display) -> Self {
        Error::InvalidQuality(value.to_string())
    }

    /// Returns true if this error concerns one element only, so the
    /// remaining elements of the same header are still readable.
    pub fn is_element_local(&self) -> bool {
        matches!(
            self,
            Error::InvalidQuality(_) | Error::MalformedElement(_) | Error::TooManyParameters(_)
        )
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(_: http::header::InvalidHeaderValue) -> Self {
        Error::InvalidHeaderValue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_quality_message() {
        let err = Error::invalid_quality(1.5);
        assert_eq!(err, Error::InvalidQuality("1.5".into()));
        assert!(err.to_string().contains("between 0 and 1"));
    }

    #[test]
    fn test_element_local() {
        assert!(Error::MalformedElement("x".into()).is_element_local());
        assert!(Error::TooManyParameters(16).is_element_local());
        assert!(!Error::TooManyElements(64).is_element_local());
        assert!(!Error::HeaderTooLong { len: 10, limit: 5 }.is_element_local());
    }

    #[test]
    fn test_from_fmt_error() {
        let err: Error = fmt::Error.into();
        assert!(matches!(err, Error::Format(_)));
    }
}
