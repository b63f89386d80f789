//! Where converted files are written.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FixerError;
use crate::process::FileOutcome;

/// Write policy for converted files.
///
/// Without an output directory files are rewritten in place, optionally
/// keeping a `.bak` copy. With one, each file lands at its path relative to
/// `input_base` under that directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPlan {
    pub output_dir: Option<PathBuf>,
    pub input_base: PathBuf,
    pub add_suffix: String,
    pub backup: bool,
    pub write_unchanged_files: bool,
}

impl OutputPlan {
    #[must_use]
    pub fn target_path(&self, input: &Path) -> PathBuf {
        let target = match &self.output_dir {
            Some(dir) => {
                let relative = input
                    .strip_prefix(&self.input_base)
                    .ok()
                    .filter(|rel| !rel.as_os_str().is_empty())
                    .or_else(|| input.file_name().map(Path::new))
                    .unwrap_or(input);
                dir.join(relative)
            }
            None => input.to_path_buf(),
        };
        with_suffix(&target, &self.add_suffix)
    }

    /// Write a converted file. Returns the written path, or `None` when the
    /// file is unchanged and unchanged files are not written.
    ///
    /// # Errors
    /// Returns [`FixerError::Io`] when a directory, backup or file cannot be
    /// written.
    pub fn write(&self, outcome: &FileOutcome) -> Result<Option<PathBuf>, FixerError> {
        if !outcome.changed() && !self.write_unchanged_files {
            return Ok(None);
        }
        let target = self.target_path(&outcome.path);
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FixerError::io(parent, e))?;
        }
        if self.backup && target == outcome.path {
            let backup = backup_path(&outcome.path);
            fs::copy(&outcome.path, &backup).map_err(|e| FixerError::io(&backup, e))?;
            tracing::debug!(path = %backup.display(), "backup written");
        }
        fs::write(&target, &outcome.converted).map_err(|e| FixerError::io(&target, e))?;
        Ok(Some(target))
    }
}

/// `<path>.bak`
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bak")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return path.to_path_buf();
    }
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Deepest directory containing every input; output paths mirror the inputs
/// relative to it.
#[must_use]
pub fn common_base(inputs: &[PathBuf]) -> PathBuf {
    let mut dirs = inputs.iter().map(|path| {
        if path.is_dir() {
            path.clone()
        } else {
            path.parent().map(Path::to_path_buf).unwrap_or_default()
        }
    });
    let Some(first) = dirs.next() else {
        return PathBuf::new();
    };
    dirs.fold(first, |base, dir| {
        base.components()
            .zip(dir.components())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a)
            .collect()
    })
}
