//! Type comment rendering and splicing.
//!
//! For every documented function the comment goes on the line after the
//! signature, indented like the body:
//!
//! ```python
//! def foo(one, *two):
//!     # type: (str, *int) -> bool
//!     """..."""
//! ```
//!
//! An existing `# type:` comment in that position is replaced and other
//! comments stay below the new one, so converting twice changes nothing.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use docsig_core::{Diagnostic, DocFormat, ParsedDocstring};
use docsig_parser::{FunctionSite, Param, ParseOptions, analyze_source, parse_docstring};
use regex::Regex;

use crate::error::FixerError;

const TYPE_COMMENT_PREFIX: &str = "# type:";

/// Any spelling of an existing type comment: `# type:`, `#type:`, `#  type:`.
static TYPE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*type:").expect("valid type comment regex"));

/// Everything that shapes the rendered comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Force a convention instead of detecting one per docstring.
    pub format: Option<DocFormat>,
    pub parse: ParseOptions,
    /// Return type when a docstring documents none.
    pub default_return_type: String,
    /// Types for undocumented arguments, by name.
    pub default_arg_types: BTreeMap<String, String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: None,
            parse: ParseOptions::default(),
            default_return_type: "None".to_string(),
            default_arg_types: BTreeMap::new(),
        }
    }
}

/// Result of converting one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Functions whose comment region was rewritten.
    pub changed_functions: usize,
}

/// Replacement for the lines `start..end` (0-based, exclusive end).
struct Edit {
    start: usize,
    end: usize,
    lines: Vec<String>,
}

/// Insert or refresh type comments for every documented function.
///
/// # Errors
/// Returns [`FixerError::Parse`] when `source` is not valid Python.
pub fn convert_source(source: &str, options: &ConvertOptions) -> Result<Conversion, FixerError> {
    let sites = analyze_source(source)?;
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };

    let mut diagnostics = Vec::new();
    let mut edits = Vec::new();
    for site in &sites {
        let Some(comment) = type_comment(site, options, &mut diagnostics) else {
            continue;
        };
        let start = site.header_line;
        let end = site.body_line - 1;
        let region = lines.get(start..end).unwrap_or_default();

        let mut replacement = vec![format!("{}{comment}{newline}", site.body_indent)];
        replacement.extend(
            region
                .iter()
                .filter(|line| !TYPE_COMMENT.is_match(line))
                .map(|line| (*line).to_string()),
        );
        if replacement.iter().map(String::as_str).ne(region.iter().copied()) {
            tracing::debug!(function = %site.name, line = site.header_line, %comment, "type comment");
            edits.push(Edit {
                start,
                end,
                lines: replacement,
            });
        }
    }

    let changed_functions = edits.len();
    let output = if edits.is_empty() {
        source.to_string()
    } else {
        apply(&lines, edits)
    };
    Ok(Conversion {
        output,
        diagnostics,
        changed_functions,
    })
}

fn apply(lines: &[&str], mut edits: Vec<Edit>) -> String {
    let mut out: Vec<String> = lines.iter().map(|line| (*line).to_string()).collect();
    edits.sort_by(|a, b| b.start.cmp(&a.start));
    for edit in edits {
        let tail = out.split_off(edit.end);
        out.truncate(edit.start);
        out.extend(edit.lines);
        out.extend(tail);
    }
    out.concat()
}

/// Comment for one function, or `None` when it should be left alone.
fn type_comment(
    site: &FunctionSite,
    options: &ConvertOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    let docstring = site.docstring.as_ref()?;
    if site.leading_comments.iter().any(|c| is_notype(c)) {
        tracing::debug!(function = %site.name, "skipped by notype comment");
        return None;
    }
    if site.annotated {
        tracing::debug!(function = %site.name, "skipped annotated function");
        return None;
    }

    let (parsed, found) = parse_docstring(
        &docstring.text,
        docstring.line,
        options.format,
        &options.parse,
    );
    diagnostics.extend(found);
    if !has_effect(site, &parsed) {
        tracing::debug!(function = %site.name, "no documented types");
        return None;
    }
    Some(render_type_comment(site, &parsed, options))
}

/// A comment is only worth writing when it says more than `(Any, ...) -> None`:
/// a documented return type, or a documented argument type other than `Any`.
/// Types from `default_arg_types` do not count.
fn has_effect(site: &FunctionSite, parsed: &ParsedDocstring) -> bool {
    parsed.return_type().is_some()
        || signature_params(site, parsed)
            .iter()
            .filter_map(|param| documented_type(parsed, &param.name))
            .any(|ty| ty != "Any")
}

/// Parameters that appear in the comment. A method's leading `self` or `cls`
/// is left out unless the docstring gives it a type.
fn signature_params<'a>(site: &'a FunctionSite, parsed: &ParsedDocstring) -> &'a [Param] {
    let params = site.params.as_slice();
    if !site.is_method {
        return params;
    }
    match params.split_first() {
        Some((first, rest))
            if matches!(first.name.as_str(), "self" | "cls")
                && parsed.param_type(&first.name).is_none() =>
        {
            rest
        }
        _ => params,
    }
}

fn documented_type<'a>(parsed: &'a ParsedDocstring, name: &str) -> Option<&'a str> {
    parsed
        .param_type(name)
        .map(strip_stars)
        .filter(|ty| !ty.is_empty())
}

fn is_notype(comment: &str) -> bool {
    comment.trim_start_matches('#').trim() == "notype"
}

/// Render `# type: (A, *B, **C) -> R` for a function.
///
/// A method's leading `self` or `cls` is left out unless the docstring gives
/// it a type.
#[must_use]
pub fn render_type_comment(
    site: &FunctionSite,
    parsed: &ParsedDocstring,
    options: &ConvertOptions,
) -> String {
    let args: Vec<String> = signature_params(site, parsed)
        .iter()
        .map(|param| {
            let ty = documented_type(parsed, &param.name)
                .or_else(|| options.default_arg_types.get(&param.name).map(String::as_str))
                .unwrap_or("Any");
            format!("{}{ty}", param.kind.prefix())
        })
        .collect();

    let returns = parsed
        .return_type()
        .unwrap_or(&options.default_return_type);
    format!("{TYPE_COMMENT_PREFIX} ({}) -> {returns}", args.join(", "))
}

/// `*str`, `\*str` and `**str` all document the element type `str`.
fn strip_stars(ty: &str) -> &str {
    ty.trim().trim_start_matches(['\\', '*']).trim()
}
