//! # docsig-fixer
//!
//! Turns parsed docstrings into PEP 484 `# type:` comments and writes them
//! back into Python source.
//!
//! - [`convert`]: renders one comment per documented function and splices it
//!   below the signature.
//! - [`process`]: reads a file, converts it and logs docstring warnings.
//! - [`diff`]: unified diffs for dry runs.
//! - [`output`]: in-place rewrites, backups, output directories and suffixes.

pub mod convert;
pub mod diff;
pub mod error;
pub mod output;
pub mod process;

pub use convert::{ConvertOptions, Conversion, convert_source, render_type_comment};
pub use diff::unified_diff;
pub use error::FixerError;
pub use output::{OutputPlan, backup_path, common_base};
pub use process::{FileOutcome, process_file, process_source};
