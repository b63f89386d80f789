//! Translation of natural-language type descriptions into `typing` names.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(boolean|string|integer|list|dictionary|dict|any|tuple|set|sequence|iterable|mapping)\b",
    )
    .expect("valid type-word regex")
});

static OPTIONAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),\s*optional\s*$").expect("valid optional regex"));

fn translate(word: &str) -> &'static str {
    match word {
        "boolean" => "bool",
        "string" => "str",
        "integer" => "int",
        "list" => "List",
        "dict" | "dictionary" => "Dict",
        "tuple" => "Tuple",
        "set" => "Set",
        "sequence" => "Sequence",
        "iterable" => "Iterable",
        "mapping" => "Mapping",
        _ => "Any",
    }
}

/// Rewrite a documented type.
///
/// `is_result` disables the `, optional` suffix handling, which only applies
/// to parameters.
#[must_use]
pub fn standardize(ty: &str, is_result: bool) -> String {
    let mut text = ty.trim();
    let mut optional = false;
    if !is_result {
        if let Some(found) = OPTIONAL_SUFFIX.find(text) {
            text = text[..found.start()].trim_end();
            optional = true;
        }
    }

    let members: Vec<String> = split_top_level(text, '|')
        .into_iter()
        .flat_map(split_on_or)
        .map(|member| {
            WORDS
                .replace_all(member.trim(), |caps: &Captures<'_>| translate(&caps[1]))
                .into_owned()
        })
        .filter(|member| !member.is_empty())
        .collect();

    let joined = match members.len() {
        0 => return String::new(),
        1 => members.into_iter().next().unwrap_or_default(),
        _ => format!("Union[{}]", members.join(", ")),
    };

    if optional && !joined.starts_with("Optional[") {
        format!("Optional[{joined}]")
    } else {
        joined
    }
}

/// Split on `sep` outside of brackets.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Split on the word `or` outside of brackets.
fn split_on_or(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'[' | b'(' => depth += 1,
            b']' | b')' => depth = depth.saturating_sub(1),
            b' ' if depth == 0 && text[idx..].starts_with(" or ") => {
                parts.push(&text[start..idx]);
                idx += " or ".len();
                start = idx;
                continue;
            }
            _ => {}
        }
        idx += 1;
    }
    parts.push(&text[start..]);
    parts
}
