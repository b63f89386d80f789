//! Docstring conventions and diagnostic severities.
//!
//! Enums serialize as lowercase strings so they can be read from config files
//! and command-line flags alike.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// DocFormat
// ---------------------------------------------------------------------------

/// Docstring convention used to document parameters and return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    /// numpydoc: underlined `Parameters` / `Returns` sections.
    #[serde(alias = "numpydoc")]
    Numpy,
    /// Google style: `Args:` / `Returns:` sections.
    Google,
    /// reStructuredText field lists: `:type x:` / `:rtype:`.
    #[serde(alias = "rst", alias = "sphinx")]
    Rest,
}

impl DocFormat {
    /// Detection order used when no convention is configured.
    pub const ALL: [Self; 3] = [Self::Numpy, Self::Google, Self::Rest];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numpy => "numpy",
            Self::Google => "google",
            Self::Rest => "rest",
        }
    }
}

impl fmt::Display for DocFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numpy" | "numpydoc" => Ok(Self::Numpy),
            "google" => Ok(Self::Google),
            "rest" | "rst" | "sphinx" => Ok(Self::Rest),
            other => Err(CoreError::Validation(format!(
                "unknown docstring format '{other}' (expected numpy, google or rest)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of a [`crate::Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
