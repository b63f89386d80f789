use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use docsig_config::Overrides;
use docsig_core::DocFormat;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Docstring convention accepted by `--format`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FormatArg {
    #[value(alias = "numpydoc")]
    Numpy,
    Google,
    #[value(alias = "rst")]
    Rest,
}

impl From<FormatArg> for DocFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Numpy => Self::Numpy,
            FormatArg::Google => Self::Google,
            FormatArg::Rest => Self::Rest,
        }
    }
}

/// Top-level CLI parser for the `docsig` binary.
#[derive(Debug, Parser)]
#[command(
    name = "docsig",
    version,
    about = "Add PEP 484 type comments derived from numpy, google and reST docstrings"
)]
pub struct Cli {
    /// Files or directories to convert (`-` reads standard input)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Write back modified files instead of printing diffs
    #[arg(short, long)]
    pub write: bool,

    /// Keep a `.bak` copy of every file rewritten in place
    #[arg(short, long)]
    pub backup: bool,

    /// Number of worker threads
    #[arg(short = 'j', long, value_name = "N")]
    pub processes: Option<usize>,

    /// Config file (defaults to ./setup.cfg when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Force the docstring convention instead of detecting it
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Return type used when a docstring documents none
    #[arg(long, value_name = "TYPE")]
    pub default_return_type: Option<String>,

    /// Normalize natural-language types such as `string or None`
    #[arg(long)]
    pub translate_types: bool,

    /// Reject `Yields` sections
    #[arg(long)]
    pub no_yields: bool,

    /// Reject several named return values
    #[arg(long)]
    pub no_named_results: bool,

    /// Write output files under this directory, mirroring the inputs
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write files even when nothing changed (implies --write)
    #[arg(short = 'W', long)]
    pub write_unchanged_files: bool,

    /// Append this suffix to written file names
    #[arg(long, value_name = "SUFFIX")]
    pub add_suffix: Option<String>,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flag values layered over config file and environment. Switches that
    /// were not given leave the lower layers alone.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            format: self.format.map(DocFormat::from),
            write: self.write.then_some(true),
            backup: self.backup.then_some(true),
            processes: self.processes,
            default_return_type: self.default_return_type.clone(),
            translate_types: self.translate_types.then_some(true),
            allow_yields: self.no_yields.then_some(false),
            allow_named_results: self.no_named_results.then_some(false),
            output_dir: self.output_dir.clone(),
            write_unchanged_files: self.write_unchanged_files.then_some(true),
            add_suffix: self.add_suffix.clone(),
        }
    }

    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.paths.iter().any(|path| path == Path::new(STDIN_PATH))
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clap_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "docsig",
            "-w",
            "-j",
            "4",
            "--format",
            "numpydoc",
            "--no-yields",
            "--add-suffix",
            ".typed",
            "src",
        ])
        .expect("cli should parse");

        let overrides = cli.overrides();
        assert_eq!(overrides.write, Some(true));
        assert_eq!(overrides.processes, Some(4));
        assert_eq!(overrides.format, Some(DocFormat::Numpy));
        assert_eq!(overrides.allow_yields, Some(false));
        assert_eq!(overrides.allow_named_results, None);
        assert_eq!(overrides.backup, None);
        assert_eq!(overrides.add_suffix.as_deref(), Some(".typed"));
        assert_eq!(cli.paths, vec![PathBuf::from("src")]);
    }

    #[test]
    fn unset_switches_do_not_override() {
        let cli = Cli::try_parse_from(["docsig", "a.py"]).expect("cli should parse");
        assert_eq!(cli.overrides(), Overrides::default());
        assert!(!cli.reads_stdin());
    }

    #[test]
    fn dash_means_stdin() {
        let cli = Cli::try_parse_from(["docsig", "-"]).expect("cli should parse");
        assert!(cli.reads_stdin());
    }

    #[test]
    fn paths_are_required() {
        assert!(Cli::try_parse_from(["docsig"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["docsig", "-q", "-v", "a.py"]).is_err());
    }
}
