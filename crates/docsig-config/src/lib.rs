//! # docsig-config
//!
//! Layered configuration loading for docsig using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Command-line flags ([`Overrides`])
//! 2. Environment variables (`DOCSIG_*` prefix, `__` as separator)
//! 3. The config file: `setup.cfg`-style INI (`[docsig]` section), or TOML
//!    (`[docsig]` table) when the path ends in `.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DOCSIG_FORMAT` -> `format` and
//! `DOCSIG_DEFAULT_ARG_TYPES__LOGGER` -> `default_arg_types.logger`.
//!
//! # Usage
//!
//! ```no_run
//! use docsig_config::{DocsigConfig, Overrides};
//!
//! let config = DocsigConfig::load(None, &Overrides::default()).expect("config");
//! println!("workers: {}", config.processes);
//! ```

mod error;
mod ini_file;
mod overrides;

pub use error::ConfigError;
pub use ini_file::IniFile;
pub use overrides::Overrides;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docsig_core::DocFormat;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Config file read when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "setup.cfg";

const fn default_processes() -> usize {
    1
}

fn default_return_type() -> String {
    "None".to_string()
}

const fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocsigConfig {
    /// Force a docstring convention instead of detecting it per docstring.
    #[serde(default)]
    pub format: Option<DocFormat>,

    /// Write changes back instead of printing diffs.
    #[serde(default)]
    pub write: bool,

    /// Keep a `.bak` copy of every file that is rewritten in place.
    #[serde(default)]
    pub backup: bool,

    /// Worker threads.
    #[serde(default = "default_processes")]
    pub processes: usize,

    /// Return type used when a docstring documents none.
    #[serde(default = "default_return_type")]
    pub default_return_type: String,

    /// Normalize natural-language types (`string or None`).
    #[serde(default)]
    pub translate_types: bool,

    #[serde(default = "enabled")]
    pub allow_yields: bool,

    #[serde(default = "enabled")]
    pub allow_named_results: bool,

    /// Mirror written files under this directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Write files even when nothing changed. Implies `write`.
    #[serde(default)]
    pub write_unchanged_files: bool,

    /// Suffix appended to written file names.
    #[serde(default)]
    pub add_suffix: String,

    /// Types for arguments that are conventionally left undocumented.
    #[serde(default)]
    pub default_arg_types: BTreeMap<String, String>,
}

impl Default for DocsigConfig {
    fn default() -> Self {
        Self {
            format: None,
            write: false,
            backup: false,
            processes: default_processes(),
            default_return_type: default_return_type(),
            translate_types: false,
            allow_yields: true,
            allow_named_results: true,
            output_dir: None,
            write_unchanged_files: false,
            add_suffix: String::new(),
            default_arg_types: BTreeMap::new(),
        }
    }
}

impl DocsigConfig {
    /// Load configuration from all sources.
    ///
    /// `config_path` names the config file; without it `setup.cfg` in the
    /// working directory is read when present.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingFile`] when an explicit config file does
    /// not exist, [`ConfigError::Figment`] when a source cannot be read or
    /// extracted, and [`ConfigError::InvalidValue`] for out-of-range values.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::MissingFile {
                    path: path.to_path_buf(),
                });
            }
        }
        let figment = Self::figment(config_path).merge(Serialized::defaults(overrides));
        let mut config: Self = figment.extract()?;
        config.finish()?;
        Ok(config)
    }

    /// Build the figment provider chain without command-line overrides.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let path = config_path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        if path.exists() {
            tracing::debug!(path = %path.display(), "reading config file");
            figment = if path.extension().is_some_and(|ext| ext == "toml") {
                figment.merge(Figment::from(Toml::file(&path)).focus("docsig"))
            } else {
                figment.merge(IniFile::file(&path))
            };
        }

        figment.merge(Env::prefixed("DOCSIG_").split("__"))
    }

    fn finish(&mut self) -> Result<(), ConfigError> {
        if self.processes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "processes".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.default_return_type.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default_return_type".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.write_unchanged_files {
            self.write = true;
        }
        Ok(())
    }

    /// Whether results are written to disk rather than printed as diffs.
    #[must_use]
    pub const fn writes(&self) -> bool {
        self.write || self.output_dir.is_some()
    }
}
