//! File discovery, the worker pool and result reporting.

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use docsig_config::DocsigConfig;
use docsig_fixer::{
    ConvertOptions, FileOutcome, FixerError, OutputPlan, common_base, process_file,
    process_source,
};
use docsig_parser::{ParseOptions, is_python_path};
use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::cli::{Cli, STDIN_PATH};
use crate::progress::Progress;

/// Diff label used for standard input.
const STDIN_LABEL: &str = "<stdin>";

/// Per-run counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub changed: usize,
    pub failed: usize,
}

impl RunSummary {
    /// `1` when any file failed, otherwise `0`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(self.failed > 0)
    }
}

#[must_use]
pub fn convert_options(config: &DocsigConfig) -> ConvertOptions {
    ConvertOptions {
        format: config.format,
        parse: ParseOptions {
            allow_yields: config.allow_yields,
            allow_named_results: config.allow_named_results,
            translate_types: config.translate_types,
        },
        default_return_type: config.default_return_type.clone(),
        default_arg_types: config.default_arg_types.clone(),
    }
}

/// Run the command line. `Err` means a usage problem: bad configuration,
/// stdin combined with writing, or no files to convert.
pub fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = DocsigConfig::load(cli.config.as_deref(), &cli.overrides())
        .context("failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");
    let options = convert_options(&config);

    if cli.reads_stdin() {
        if cli.paths.len() > 1 {
            bail!("'{STDIN_PATH}' cannot be combined with other paths");
        }
        if config.writes() {
            bail!("cannot write files when reading from standard input");
        }
        return run_stdin(&options);
    }

    let files = discover(&cli.paths);
    if files.is_empty() {
        bail!("no Python files found");
    }
    let plan = OutputPlan {
        output_dir: config.output_dir.clone(),
        input_base: common_base(&cli.paths),
        add_suffix: config.add_suffix.clone(),
        backup: config.backup,
        write_unchanged_files: config.write_unchanged_files,
    };
    let writes = config.writes();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.processes)
        .thread_name(|i| format!("docsig-worker-{i}"))
        .build()
        .context("failed to start worker pool")?;
    tracing::debug!(files = files.len(), threads = config.processes, "converting");

    let show_progress = io::stderr().is_terminal() && !cli.quiet && files.len() > 1;
    let progress = Progress::bar(files.len() as u64, "converting", show_progress);
    let results: Vec<Result<Converted, FixerError>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let result = convert_file(path, &options, &plan, writes);
                progress.inc(1);
                result
            })
            .collect()
    });
    progress.finish_clear();

    let mut summary = RunSummary::default();
    let mut stdout = io::stdout().lock();
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(converted) => {
                summary.processed += 1;
                if converted.outcome.changed() {
                    summary.changed += 1;
                }
                if let Some(target) = &converted.written {
                    tracing::info!(file = %path.display(), target = %target.display(), "wrote");
                } else if !writes {
                    stdout
                        .write_all(converted.outcome.diff().as_bytes())
                        .context("failed to write diff")?;
                }
            }
            Err(error) => {
                summary.failed += 1;
                tracing::error!(file = %path.display(), "{error}");
            }
        }
    }
    stdout.flush().context("failed to flush stdout")?;

    tracing::info!(
        processed = summary.processed,
        changed = summary.changed,
        failed = summary.failed,
        "done"
    );
    Ok(summary)
}

struct Converted {
    outcome: FileOutcome,
    written: Option<PathBuf>,
}

fn convert_file(
    path: &Path,
    options: &ConvertOptions,
    plan: &OutputPlan,
    writes: bool,
) -> Result<Converted, FixerError> {
    let outcome = process_file(path, options)?;
    let written = if writes { plan.write(&outcome)? } else { None };
    Ok(Converted { outcome, written })
}

fn run_stdin(options: &ConvertOptions) -> anyhow::Result<RunSummary> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .context("failed to read standard input")?;

    let mut summary = RunSummary::default();
    match process_source(STDIN_LABEL, source, options) {
        Ok(outcome) => {
            summary.processed = 1;
            if outcome.changed() {
                summary.changed = 1;
            }
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(outcome.diff().as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write diff")?;
        }
        Err(error) => {
            summary.failed = 1;
            tracing::error!(file = STDIN_LABEL, "{error}");
        }
    }
    Ok(summary)
}

/// Expand targets into Python files. Files are taken as given; directories
/// are walked honouring `.gitignore` and sorted per directory.
#[must_use]
pub fn discover(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkBuilder::new(path)
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(error) => {
                    tracing::warn!(path = %path.display(), "skipping entry: {error}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ty| ty.is_file()))
            .map(ignore::DirEntry::into_path)
            .filter(|file| is_python_path(file))
            .collect();
        found.sort();
        files.extend(found);
    }
    files
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn exit_code_reflects_failures() {
        assert_eq!(RunSummary::default().exit_code(), 0);
        let failed = RunSummary {
            processed: 2,
            changed: 1,
            failed: 1,
        };
        assert_eq!(failed.exit_code(), 1);
    }

    #[test]
    fn discovery_walks_directories_for_python_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        fs::create_dir_all(root.join("pkg/sub")).expect("mkdir");
        fs::write(root.join("pkg/b.py"), "").expect("write");
        fs::write(root.join("pkg/a.py"), "").expect("write");
        fs::write(root.join("pkg/sub/c.pyi"), "").expect("write");
        fs::write(root.join("pkg/readme.txt"), "").expect("write");
        let explicit = root.join("script.txt");
        fs::write(&explicit, "").expect("write");

        let files = discover(&[root.join("pkg"), explicit.clone()]);

        assert_eq!(
            files,
            vec![
                root.join("pkg/a.py"),
                root.join("pkg/b.py"),
                root.join("pkg/sub/c.pyi"),
                explicit,
            ]
        );
    }

    #[test]
    fn options_follow_config() {
        let config = DocsigConfig {
            allow_yields: false,
            translate_types: true,
            default_return_type: "Any".to_string(),
            ..DocsigConfig::default()
        };
        let options = convert_options(&config);
        assert!(!options.parse.allow_yields);
        assert!(options.parse.allow_named_results);
        assert!(options.parse.translate_types);
        assert_eq!(options.default_return_type, "Any");
    }
}
