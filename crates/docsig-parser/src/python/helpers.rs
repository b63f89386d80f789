use ast_grep_core::Node;

use super::{Param, ParamKind};

/// Line of the first `ERROR` node in document order, 1-based.
pub(super) fn first_error_line<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<usize> {
    for child in node.children() {
        if child.kind().as_ref() == "ERROR" {
            return Some(child.start_pos().line() + 1);
        }
        if let Some(line) = first_error_line(&child) {
            return Some(line);
        }
    }
    None
}

const SKIPPED_PARAM_KINDS: &[&str] = &[
    "(",
    ")",
    ",",
    "comment",
    "keyword_separator",
    "positional_separator",
];

/// Signature parameters in order, bare `*` and `/` excluded.
pub(super) fn extract_params<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<Param> {
    let Some(params) = node.field("parameters") else {
        return Vec::new();
    };
    params
        .children()
        .filter(|c| !SKIPPED_PARAM_KINDS.contains(&c.kind().as_ref()))
        .filter_map(|c| param_from_text(&c.text()))
        .collect()
}

/// Parse `name`, `*name`, `**name`, `name: T` or `name=default`.
pub(super) fn param_from_text(text: &str) -> Option<Param> {
    let text = text.trim();
    let (kind, rest) = if let Some(rest) = text.strip_prefix("**") {
        (ParamKind::DoubleStar, rest)
    } else if let Some(rest) = text.strip_prefix('*') {
        (ParamKind::Star, rest)
    } else {
        (ParamKind::Plain, text)
    };
    let end = rest.find([':', '=']).unwrap_or(rest.len());
    let name = rest[..end].trim();
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some(Param {
        name: name.to_string(),
        kind,
    })
}

/// Whether the signature carries a return or parameter annotation.
pub(super) fn is_annotated<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    if node.field("return_type").is_some() {
        return true;
    }
    node.field("parameters").is_some_and(|params| {
        params.children().any(|c| {
            matches!(
                c.kind().as_ref(),
                "typed_parameter" | "typed_default_parameter"
            )
        })
    })
}

/// The class whose body directly holds a definition, looking through
/// decorators.
pub(super) fn owning_class<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    let mut parent = node.parent()?;
    if parent.kind().as_ref() == "decorated_definition" {
        parent = parent.parent()?;
    }
    if parent.kind().as_ref() != "block" {
        return None;
    }
    parent
        .parent()
        .filter(|owner| owner.kind().as_ref() == "class_definition")
}

/// First statement of a block, skipping comments.
pub(super) fn first_statement<'r, D: ast_grep_core::Doc>(
    block: &Node<'r, D>,
) -> Option<Node<'r, D>> {
    block.children().find(|c| c.kind().as_ref() != "comment")
}

/// The string literal forming a docstring: an expression statement holding
/// a lone string.
pub(super) fn docstring_node<'r, D: ast_grep_core::Doc>(
    statement: &Node<'r, D>,
) -> Option<Node<'r, D>> {
    if statement.kind().as_ref() != "expression_statement" {
        return None;
    }
    let mut children = statement.children();
    let string = children.next()?;
    if string.kind().as_ref() != "string" || children.next().is_some() {
        return None;
    }
    Some(string)
}

/// Value of a Python string literal: prefix and quotes removed, escapes
/// decoded unless the literal is raw.
pub(super) fn string_value(literal: &str) -> Option<String> {
    let quote_at = literal.find(['"', '\''])?;
    let prefix = literal[..quote_at].to_ascii_lowercase();
    if !prefix.chars().all(|c| matches!(c, 'r' | 'u' | 'b' | 'f')) {
        return None;
    }
    let body = &literal[quote_at..];
    let quote = if body.starts_with("\"\"\"") || body.starts_with("'''") {
        &body[..3]
    } else {
        &body[..1]
    };
    let inner = body.strip_prefix(quote)?.strip_suffix(quote)?;
    if prefix.contains('r') {
        Some(inner.to_string())
    } else {
        Some(decode_escapes(inner))
    }
}

fn decode_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            // line continuation
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.clone().take(width).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if digits.len() == width => {
                        out.push(decoded);
                        for _ in 0..width {
                            chars.next();
                        }
                    }
                    _ => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            }
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or('\u{fffd}'));
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}
