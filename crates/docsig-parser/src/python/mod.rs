//! Python source analysis.
//!
//! Finds every `function_definition` in a module, including nested
//! functions, methods and decorated definitions, and records what a type
//! comment needs: the signature's parameters, the docstring, and the source
//! lines between the signature and the first body statement.

mod helpers;

use ast_grep_core::Node;
use ast_grep_core::matcher::KindMatcher;
use ast_grep_language::SupportLang;
use serde::{Deserialize, Serialize};

use crate::error::ParserError;
use crate::parser::parse_python;

/// How a parameter collects arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Plain,
    Star,
    DoubleStar,
}

impl ParamKind {
    /// Prefix carried into the rendered type list.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Star => "*",
            Self::DoubleStar => "**",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
}

/// Decoded docstring text and the 1-based line its literal starts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Docstring {
    pub text: String,
    pub line: usize,
}

/// One `def` in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSite {
    pub name: String,
    pub params: Vec<Param>,
    /// Defined directly in a class body.
    pub is_method: bool,
    /// Carries parameter or return annotations.
    pub annotated: bool,
    /// Own docstring, or the class docstring for an undocumented `__init__`.
    pub docstring: Option<Docstring>,
    /// 1-based line holding the colon that ends the signature.
    pub header_line: usize,
    /// 1-based line of the first body statement.
    pub body_line: usize,
    /// Leading whitespace of the first body statement.
    pub body_indent: String,
    /// Comment lines between the signature and the first statement, trimmed.
    pub leading_comments: Vec<String>,
}

/// Locate every function in `source`.
///
/// # Errors
/// Returns [`ParserError::ParseFailed`] when the source does not parse as
/// Python.
pub fn analyze_source(source: &str) -> Result<Vec<FunctionSite>, ParserError> {
    let tree = parse_python(source);
    let root = tree.root();
    if let Some(line) = helpers::first_error_line(&root) {
        return Err(ParserError::ParseFailed {
            line,
            message: "invalid Python syntax".to_string(),
        });
    }

    let lines: Vec<&str> = source.lines().collect();
    let matcher = KindMatcher::new("function_definition", SupportLang::Python);
    let sites = root
        .find_all(matcher)
        .filter_map(|node| function_site(&node, &lines))
        .collect::<Vec<_>>();
    tracing::debug!(functions = sites.len(), "analyzed source");
    Ok(sites)
}

fn function_site<D: ast_grep_core::Doc>(node: &Node<D>, lines: &[&str]) -> Option<FunctionSite> {
    let name = node.field("name")?.text().to_string();
    let body = node.field("body")?;
    let statement = helpers::first_statement(&body)?;

    let header_line = node
        .children()
        .find(|c| c.kind().as_ref() == ":")
        .map_or_else(|| body.start_pos().line(), |colon| colon.start_pos().line())
        + 1;
    let body_line = statement.start_pos().line() + 1;
    if body_line <= header_line {
        // `def f(x): return x`
        return None;
    }

    let body_text = lines.get(body_line - 1).copied().unwrap_or_default();
    let body_indent = body_text[..body_text.len() - body_text.trim_start().len()].to_string();

    let leading_comments = lines
        .get(header_line..body_line - 1)
        .unwrap_or_default()
        .iter()
        .map(|line| line.trim())
        .filter(|line| line.starts_with('#'))
        .map(str::to_string)
        .collect();

    let owner = helpers::owning_class(node);
    let mut docstring = own_docstring(&statement);
    if docstring.is_none() && name == "__init__" {
        docstring = owner.as_ref().and_then(class_docstring);
    }

    Some(FunctionSite {
        params: helpers::extract_params(node),
        is_method: owner.is_some(),
        annotated: helpers::is_annotated(node),
        name,
        docstring,
        header_line,
        body_line,
        body_indent,
        leading_comments,
    })
}

fn own_docstring<D: ast_grep_core::Doc>(statement: &Node<D>) -> Option<Docstring> {
    let literal = helpers::docstring_node(statement)?;
    Some(Docstring {
        text: helpers::string_value(&literal.text())?,
        line: literal.start_pos().line() + 1,
    })
}

fn class_docstring<D: ast_grep_core::Doc>(class: &Node<D>) -> Option<Docstring> {
    let body = class.field("body")?;
    own_docstring(&helpers::first_statement(&body)?)
}
