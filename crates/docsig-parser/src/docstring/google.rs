//! Google-style docstrings.
//!
//! ```text
//! Args:
//!     path (str): The path of the file to wrap
//!     mode: undocumented type
//!
//! Returns:
//!     bool: True if successful
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::clean::indent_width;
use super::lines::LineCursor;
use super::sections::{Dialect, RawSections, SectionParser, partition_on_colon, section_kind};

/// `name (type)` with the type taken up to the first closing parenthesis.
static TYPED_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(.+?)\s*\(\s*(.+?)\s*\)").expect("valid typed-arg regex"));

static SECTION_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\w]+:\s*$").expect("valid section regex"));

pub(crate) fn parse(text: &str) -> RawSections {
    SectionParser::new(text, Dialect::Google).parse()
}

/// A header is an unindented known title ending in a colon, followed by a
/// more deeply indented body.
pub(crate) fn is_section_header(cursor: &LineCursor) -> bool {
    let Some(line) = cursor.peek() else {
        return false;
    };
    let lower = line.text.to_lowercase();
    if !SECTION_SHAPE.is_match(&lower) {
        return false;
    }
    if section_kind(lower.trim_end().trim_end_matches(':')).is_none() {
        return false;
    }
    cursor.current_indent(1) > indent_width(&lower)
}

/// Split `name (type): description` into name and optional type.
pub(crate) fn split_field(line: &str) -> (String, Option<String>) {
    let (before, _, _) = partition_on_colon(line);
    match TYPED_ARG.captures(before) {
        Some(caps) => (caps[1].to_string(), Some(caps[2].to_string())),
        None => (before.to_string(), None),
    }
}

/// Type of a returns entry; a line without a colon is description only.
pub(crate) fn return_type(line: &str) -> Option<String> {
    let (before, colon, _) = partition_on_colon(line);
    if !colon {
        return None;
    }
    let ty = match TYPED_ARG.captures(before) {
        Some(caps) => caps[2].to_string(),
        None => before.to_string(),
    };
    (!ty.is_empty()).then_some(ty)
}
