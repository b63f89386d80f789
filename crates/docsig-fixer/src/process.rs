//! Per-file conversion.

use std::fs;
use std::path::{Component, Path, PathBuf};

use docsig_core::Diagnostic;

use crate::convert::{ConvertOptions, convert_source};
use crate::diff::unified_diff;
use crate::error::FixerError;

/// A converted file, before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub original: String,
    pub converted: String,
    pub diagnostics: Vec<Diagnostic>,
    pub changed_functions: usize,
}

impl FileOutcome {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.original != self.converted
    }

    /// Unified diff labelled with the file path, minus any root, so absolute
    /// paths read `a/tmp/x.py` rather than `a//tmp/x.py`.
    #[must_use]
    pub fn diff(&self) -> String {
        let relative: PathBuf = self
            .path
            .components()
            .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
            .collect();
        let label = relative.to_string_lossy().replace('\\', "/");
        unified_diff(&self.original, &self.converted, &label)
    }
}

/// Read and convert one file.
///
/// Warnings found in its docstrings are logged against the file and kept on
/// the outcome.
///
/// # Errors
/// Returns [`FixerError::Io`] if the file cannot be read,
/// [`FixerError::NotUtf8`] if it is not UTF-8 and [`FixerError::Parse`] if it
/// is not valid Python.
pub fn process_file(path: &Path, options: &ConvertOptions) -> Result<FileOutcome, FixerError> {
    let bytes = fs::read(path).map_err(|e| FixerError::io(path, e))?;
    let source = String::from_utf8(bytes).map_err(|_| FixerError::NotUtf8 {
        path: path.to_path_buf(),
    })?;
    process_source(path, source, options)
}

/// Convert source text that did not come from a file on disk, such as stdin.
///
/// # Errors
/// Returns [`FixerError::Parse`] if `source` is not valid Python.
pub fn process_source(
    path: impl Into<PathBuf>,
    source: String,
    options: &ConvertOptions,
) -> Result<FileOutcome, FixerError> {
    let path = path.into();
    let conversion = convert_source(&source, options)?;
    for diagnostic in &conversion.diagnostics {
        tracing::warn!(file = %path.display(), "{diagnostic}");
    }
    tracing::debug!(
        file = %path.display(),
        changed = conversion.changed_functions,
        "converted"
    );
    Ok(FileOutcome {
        path,
        original: source,
        converted: conversion.output,
        diagnostics: conversion.diagnostics,
        changed_functions: conversion.changed_functions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(path: &str) -> FileOutcome {
        FileOutcome {
            path: PathBuf::from(path),
            original: "a = 1\n".to_string(),
            converted: "a = 2\n".to_string(),
            diagnostics: Vec::new(),
            changed_functions: 1,
        }
    }

    #[test]
    fn absolute_paths_lose_their_root_in_labels() {
        let diff = outcome("/tmp/pkg/x.py").diff();
        assert!(diff.starts_with("--- a/tmp/pkg/x.py\n+++ b/tmp/pkg/x.py\n"), "{diff}");
    }

    #[test]
    fn relative_paths_are_labelled_as_given() {
        let diff = outcome("pkg/x.py").diff();
        assert!(diff.starts_with("--- a/pkg/x.py\n"), "{diff}");
    }
}
