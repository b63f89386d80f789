//! Cross-cutting error types for docsig.
//!
//! Domain-specific errors (`ParserError`, `ConfigError`, `FixerError`) live in
//! their respective crates. `anyhow` takes over in `docsig-cli` where all crate
//! errors converge.

use thiserror::Error;

/// Errors that can be raised by any docsig crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value failed validation (unknown enum name, malformed field).
    #[error("Validation error: {0}")]
    Validation(String),
}
