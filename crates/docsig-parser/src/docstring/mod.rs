//! Docstring grammars.
//!
//! A docstring is cleaned, matched to a convention, and split into
//! `(name, type)` pairs plus the documented return. Returns and yields are
//! then reconciled into a single return type:
//!
//! - several returned fields become `Tuple[...]`
//! - yields become `Iterator[...]`
//! - when both are documented, yields win

pub mod clean;
mod google;
mod lines;
mod normalize;
mod numpy;
mod rest;
mod sections;

use std::sync::LazyLock;

use docsig_core::{Diagnostic, DocFormat, ParsedDocstring, TypeField};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use clean::{Cleaned, cleandoc};
pub use normalize::standardize;

use sections::RawSections;

pub const NAMED_RESULTS_WARNING: &str =
    "Named results are not allowed. Use Tuple[] or NamedTuple, or enable allow_named_results";
pub const YIELDS_WARNING: &str =
    "'Yields' is not allowed. Use 'Returns' with Iterator[], or enable allow_yields";
pub const RETURN_AND_YIELD_WARNING: &str = "types found for both return and yield";

static NUMPY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:Parameters|Returns?|Yields?)[ \t]*\n-{3,}[ \t]*$")
        .expect("valid numpy marker regex")
});

static GOOGLE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:Args|Arguments|Returns?|Yields?):[ \t]*$")
        .expect("valid google marker regex")
});

static REST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*:(?:param\s|type\s|rtype:|Yields:|ytype:)")
        .expect("valid rest marker regex")
});

/// Switches that shape how return fields and type text are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Accept `Yields` sections, rendered as `Iterator[T]`.
    pub allow_yields: bool,
    /// Accept several returned fields, rendered as `Tuple[...]`.
    pub allow_named_results: bool,
    /// Pass every type through [`standardize`].
    pub translate_types: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_yields: true,
            allow_named_results: true,
            translate_types: false,
        }
    }
}

/// Parameter names are documented with escaped or literal stars
/// (`\*args`, `**kwargs`); signatures are matched on the bare name.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim()
        .trim_start_matches(['*', '\\'])
        .trim()
        .to_string()
}

/// Detect the convention of a docstring from its section markers, trying
/// numpy, then google, then rest.
#[must_use]
pub fn guess_format(docstring: &str) -> Option<DocFormat> {
    guess_cleaned(&cleandoc(docstring, true).text)
}

fn guess_cleaned(text: &str) -> Option<DocFormat> {
    DocFormat::ALL
        .into_iter()
        .find(|format| marker(*format).is_match(text))
}

fn marker(format: DocFormat) -> &'static Regex {
    match format {
        DocFormat::Numpy => &NUMPY_MARKER,
        DocFormat::Google => &GOOGLE_MARKER,
        DocFormat::Rest => &REST_MARKER,
    }
}

/// Parse a raw docstring literal body.
///
/// `line` is the 1-based source line of the docstring's first line; every
/// returned line is absolute in that frame. An explicit `format` wins over
/// detection, and undetectable docstrings are read as rest.
#[must_use]
pub fn parse_docstring(
    raw: &str,
    line: usize,
    format: Option<DocFormat>,
    options: &ParseOptions,
) -> (ParsedDocstring, Vec<Diagnostic>) {
    let cleaned = cleandoc(raw, true);
    let format = format
        .or_else(|| guess_cleaned(&cleaned.text))
        .unwrap_or(DocFormat::Rest);
    tracing::trace!(%format, line, "parsing docstring");

    let mut sections = match format {
        DocFormat::Numpy => numpy::parse(&cleaned.text),
        DocFormat::Google => google::parse(&cleaned.text),
        DocFormat::Rest => rest::parse(&cleaned.text),
    };

    // cleaned line n sits at raw line leading_lines + n
    rebase(&mut sections, line + cleaned.leading_lines);
    if options.translate_types {
        translate(&mut sections);
    }

    let mut diagnostics = Vec::new();
    let returns = reconcile(&sections, options, &mut diagnostics);
    let parsed = ParsedDocstring {
        params: sections.params,
        returns,
    };
    (parsed, diagnostics)
}

fn rebase(sections: &mut RawSections, base: usize) {
    let fields = sections
        .params
        .iter_mut()
        .map(|(_, field)| field)
        .chain(sections.returns.iter_mut())
        .chain(sections.yields.iter_mut());
    for field in fields {
        field.line = (field.line + base).saturating_sub(1);
    }
}

fn translate(sections: &mut RawSections) {
    for (_, field) in &mut sections.params {
        field.ty = field.ty.as_deref().map(|ty| standardize(ty, false));
    }
    for field in sections.returns.iter_mut().chain(sections.yields.iter_mut()) {
        field.ty = field.ty.as_deref().map(|ty| standardize(ty, true));
    }
}

fn reconcile(
    sections: &RawSections,
    options: &ParseOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<TypeField> {
    if let (Some(first), false) = (sections.returns.first(), sections.yields.is_empty()) {
        diagnostics.push(Diagnostic::warning(first.line, RETURN_AND_YIELD_WARNING));
    }

    if let Some(first) = sections.yields.first() {
        if !options.allow_yields {
            diagnostics.push(Diagnostic::warning(first.line, YIELDS_WARNING));
            return None;
        }
        let inner = combine(&sections.yields, options, diagnostics)?;
        let ty = inner.ty()?;
        return Some(TypeField::typed(format!("Iterator[{ty}]"), inner.line));
    }

    combine(&sections.returns, options, diagnostics)
}

/// One field stands for itself; several become a tuple of the typed ones.
fn combine(
    fields: &[TypeField],
    options: &ParseOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<TypeField> {
    match fields {
        [] => None,
        [single] => Some(single.clone()),
        [first, ..] => {
            if !options.allow_named_results {
                diagnostics.push(Diagnostic::warning(first.line, NAMED_RESULTS_WARNING));
                return None;
            }
            let members: Vec<&str> = fields.iter().filter_map(TypeField::ty).collect();
            if members.is_empty() {
                return None;
            }
            Some(TypeField::typed(
                format!("Tuple[{}]", members.join(", ")),
                first.line,
            ))
        }
    }
}
