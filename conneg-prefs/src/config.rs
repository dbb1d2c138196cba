//! Reader limits.
//!
//! Accept headers come from untrusted clients, so the reader bounds how much
//! of a header it is willing to look at.

use serde::{Deserialize, Serialize};

/// Limits applied by [`crate::AcceptReader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Maximum length of a header value in bytes (default: 8 KB).
    ///
    /// Longer values are rejected as a whole.
    pub max_header_len: usize,

    /// Maximum number of elements read from one header (default: 64).
    ///
    /// Elements past the limit are ignored after a single
    /// `TooManyElements` report.
    pub max_elements: usize,

    /// Maximum number of parameters on one element, `q` included
    /// (default: 16).
    pub max_parameters: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_header_len: 8 * 1024,
            max_elements: 64,
            max_parameters: 16,
        }
    }
}

impl ReaderConfig {
    /// Tight limits for edge proxies facing arbitrary clients.
    pub fn strict() -> Self {
        Self {
            max_header_len: 1024,
            max_elements: 16,
            max_parameters: 4,
        }
    }

    /// Loose limits for trusted, internal traffic.
    pub fn permissive() -> Self {
        Self {
            max_header_len: 64 * 1024,
            max_elements: 1024,
            max_parameters: 64,
        }
    }

    /// Returns `Ok(())` if valid, or every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.max_header_len == 0 {
            errors.push("reader.max_header_len must be > 0".to_string());
        }
        if self.max_elements == 0 {
            errors.push("reader.max_elements must be > 0".to_string());
        }
        // Room for `q` plus at least one other parameter.
        if self.max_parameters < 2 {
            errors.push(format!(
                "reader.max_parameters must be >= 2, got {}",
                self.max_parameters
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
