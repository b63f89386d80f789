//! Command-line values layered over every other source.

use std::path::PathBuf;

use docsig_core::DocFormat;
use serde::Serialize;

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DocFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_return_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_types: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_yields: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_named_results: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_unchanged_files: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_suffix: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocsigConfig;
    use figment::{Figment, providers::Serialized};

    #[test]
    fn unset_fields_keep_lower_layers() {
        let base = DocsigConfig {
            processes: 3,
            allow_yields: false,
            ..DocsigConfig::default()
        };
        let overrides = Overrides {
            write: Some(true),
            ..Overrides::default()
        };
        let config: DocsigConfig = Figment::from(Serialized::defaults(base))
            .merge(Serialized::defaults(&overrides))
            .extract()
            .expect("extract");
        assert!(config.write);
        assert_eq!(config.processes, 3);
        assert!(!config.allow_yields);
    }
}
