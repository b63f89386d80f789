//! Diagnostics emitted while reading a docstring.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::Severity;

/// A warning tied to a line of the file being converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// 1-based line in the source file.
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
