//! Parser error types for docsig-parser.

/// Errors that can occur while analyzing a Python source file.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Parse failed at line {line}: {message}")]
    ParseFailed { line: usize, message: String },
}
