//! figment provider for `setup.cfg`-style INI files.
//!
//! ```ini
//! [docsig]
//! format = numpy
//! allow-named-results = false
//!
//! [docsig:default_arg_types]
//! logger = logging.Logger
//! ```

use std::path::{Path, PathBuf};

use figment::value::{Dict, Map, Tag, Value};
use figment::{Error, Metadata, Profile, Provider};

const SECTION: &str = "docsig";
const ARG_TYPES_SECTION: &str = "docsig:default_arg_types";

/// Keys read with `setup.cfg` boolean spellings (`yes`, `Off`, `1`, ...).
const BOOL_KEYS: [&str; 6] = [
    "write",
    "backup",
    "translate_types",
    "allow_yields",
    "allow_named_results",
    "write_unchanged_files",
];

/// Reads the `[docsig]` section and its `default_arg_types` companion.
#[derive(Debug, Clone)]
pub struct IniFile {
    path: PathBuf,
}

impl IniFile {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Provider for IniFile {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("INI file `{}`", self.path.display()))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let ini = ::ini::Ini::load_from_file(&self.path)
            .map_err(|e| Error::from(format!("{}: {e}", self.path.display())))?;

        let mut dict = Dict::new();
        if let Some(section) = ini.section(Some(SECTION)) {
            for (key, value) in section.iter() {
                let key = key.trim().replace('-', "_");
                let value = if BOOL_KEYS.contains(&key.as_str()) {
                    boolean(value).map_or_else(|| scalar(value), Value::from)
                } else {
                    scalar(value)
                };
                dict.insert(key, value);
            }
        }
        if let Some(section) = ini.section(Some(ARG_TYPES_SECTION)) {
            let arg_types: Dict = section
                .iter()
                .map(|(name, ty)| (name.trim().to_string(), Value::from(ty.trim().to_string())))
                .collect();
            dict.insert(
                "default_arg_types".to_string(),
                Value::Dict(Tag::Default, arg_types),
            );
        }

        Ok(Profile::Default.collect(dict))
    }
}

/// Values are typed the way environment variables are: `true`, `4` and
/// `numpy` become a bool, an integer and a string.
fn scalar(raw: &str) -> Value {
    let raw = raw.trim();
    raw.parse::<Value>()
        .unwrap_or_else(|_| Value::from(raw.to_string()))
}

/// Case-insensitive `1`/`yes`/`true`/`on` and `0`/`no`/`false`/`off`.
fn boolean(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Figment;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn reads_section_and_arg_types() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "setup.cfg",
                "[metadata]\nname = pkg\n\n[docsig]\nformat = google\nallow-yields = false\nprocesses = 4\n\n[docsig:default_arg_types]\nlogger = logging.Logger\n",
            )?;
            let figment = Figment::from(IniFile::file("setup.cfg"));
            assert_eq!(figment.extract_inner::<String>("format")?, "google");
            assert!(!figment.extract_inner::<bool>("allow_yields")?);
            assert_eq!(figment.extract_inner::<u32>("processes")?, 4);
            assert_eq!(
                figment.extract_inner::<BTreeMap<String, String>>("default_arg_types")?,
                BTreeMap::from([("logger".to_string(), "logging.Logger".to_string())])
            );
            assert!(figment.find_value("name").is_err());
            Ok(())
        });
    }

    #[test]
    fn boolean_spellings() {
        for raw in ["True", "YES", "on", "1", " true "] {
            assert_eq!(boolean(raw), Some(true), "{raw}");
        }
        for raw in ["False", "no", "OFF", "0"] {
            assert_eq!(boolean(raw), Some(false), "{raw}");
        }
        assert_eq!(boolean("maybe"), None);
    }

    #[test]
    fn numeric_keys_keep_numbers() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("setup.cfg", "[docsig]
processes = 1
backup = 1
")?;
            let figment = Figment::from(IniFile::file("setup.cfg"));
            assert_eq!(figment.extract_inner::<u32>("processes")?, 1);
            assert!(figment.extract_inner::<bool>("backup")?);
            Ok(())
        });
    }

    #[test]
    fn missing_section_is_empty() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("setup.cfg", "[flake8]\nmax-line-length = 100\n")?;
            let data = IniFile::file("setup.cfg").data()?;
            assert!(data.get(&Profile::Default).is_some_and(Dict::is_empty));
            Ok(())
        });
    }
}
