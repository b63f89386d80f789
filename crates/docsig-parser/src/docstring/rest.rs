//! reStructuredText field lists.
//!
//! ```text
//! :param path: The path of the file to wrap
//! :type path: str
//! :rtype: bool
//! ```

use std::sync::LazyLock;

use docsig_core::TypeField;
use regex::Regex;

use super::lines::{Line, LineCursor};
use super::normalize_name;
use super::sections::RawSections;

/// `:name args: body` starting at column 0.
static FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([^:]+):(?:\s+(.*))?$").expect("valid field regex"));

pub(crate) fn parse(text: &str) -> RawSections {
    let mut cursor = LineCursor::new(text);
    let mut out = RawSections::default();

    while let Some(line) = cursor.next_line() {
        let Some(caps) = FIELD.captures(&line.text) else {
            continue;
        };
        let marker = caps[1].to_string();
        let first = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
        let body = consume_body(&mut cursor);

        let parts: Vec<&str> = marker.split_whitespace().collect();
        match parts.as_slice() {
            ["type", name] => {
                if let Some(field) = first_paragraph(&first, line.number, &body) {
                    out.params.push((normalize_name(name), field));
                }
            }
            // Sphinx shorthand `:param T name:`
            ["param", ty @ .., name] if !ty.is_empty() => {
                out.params
                    .push((normalize_name(name), TypeField::typed(ty.join(" "), line.number)));
            }
            [keyword] => {
                let Some(field) = first_paragraph(&first, line.number, &body) else {
                    continue;
                };
                match keyword.to_lowercase().as_str() {
                    "rtype" => out.returns.push(field),
                    "yields" | "ytype" => out.yields.push(field),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    out
}

/// Indented and blank lines following a field marker.
fn consume_body(cursor: &mut LineCursor) -> Vec<Line> {
    let mut body = Vec::new();
    while cursor
        .peek()
        .is_some_and(|line| line.is_blank() || line.indent() > 0)
    {
        if let Some(line) = cursor.next_line() {
            body.push(line);
        }
    }
    body
}

/// First paragraph of a field body with its lines joined by spaces, located
/// at the line where the paragraph starts.
fn first_paragraph(first: &str, number: usize, body: &[Line]) -> Option<TypeField> {
    let mut pieces = std::iter::once((first, number))
        .chain(body.iter().map(|line| (line.text.trim(), line.number)))
        .skip_while(|(text, _)| text.is_empty());

    let (head, start) = pieces.next()?;
    let mut value = head.to_string();
    for (text, _) in pieces.take_while(|(text, _)| !text.is_empty()) {
        value.push(' ');
        value.push_str(text);
    }
    Some(TypeField::typed(value, start))
}
