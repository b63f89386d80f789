//! Fixer error types.

use std::path::PathBuf;

use docsig_parser::ParserError;

#[derive(Debug, thiserror::Error)]
pub enum FixerError {
    #[error(transparent)]
    Parse(#[from] ParserError),

    #[error("'{}' is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FixerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
