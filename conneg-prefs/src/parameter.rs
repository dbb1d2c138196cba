//! Preference and media type parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A `name[=value]` parameter attached to a media type or a preference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Parameter {
    /// Creates a parameter with a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a value-less parameter, written as `;name`.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Returns the value, treating an empty value as absent.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Parameter {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// Appends each parameter as `;name` or `;name=value`.
///
/// Parameters with an empty name are skipped. Order is preserved and
/// duplicates are written as given. Values are written verbatim.
pub fn write_parameters<W: fmt::Write + ?Sized>(params: &[Parameter], dst: &mut W) -> Result<()> {
    for param in params.iter().filter(|p| !p.name.is_empty()) {
        dst.write_char(';')?;
        dst.write_str(&param.name)?;

        if let Some(value) = param.value() {
            dst.write_char('=')?;
            dst.write_str(value)?;
        }
    }
    Ok(())
}
