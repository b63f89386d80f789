//! numpydoc docstrings.
//!
//! ```text
//! Parameters
//! ----------
//! arg1 : Union[str, int]
//!     Description of `arg1`
//!
//! Returns
//! -------
//! bool
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::lines::LineCursor;
use super::sections::{Dialect, RawSections, SectionParser, partition_on_colon, section_kind};

static UNDERLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[=\-`:'"~^_*+#<>]{2,}\s*$"#).expect("valid underline regex")
});

pub(crate) fn parse(text: &str) -> RawSections {
    SectionParser::new(text, Dialect::Numpy).parse()
}

/// A header is a known title followed by an underline, or an `.. index::`
/// directive.
pub(crate) fn is_section_header(cursor: &LineCursor) -> bool {
    let Some(line) = cursor.peek() else {
        return false;
    };
    let lower = line.text.to_lowercase();
    if section_kind(&lower).is_some() {
        return cursor
            .peek_nth(1)
            .is_some_and(|underline| UNDERLINE.is_match(&underline.text));
    }
    lower.starts_with(".. index::")
}

/// Split `name : type`. With `prefer_type`, an entry without a type is read
/// as a type rather than a name (returns and yields sections), unless it is
/// prose.
pub(crate) fn split_field(line: &str, prefer_type: bool) -> (String, Option<String>) {
    let (name, _, ty) = partition_on_colon(line);
    if prefer_type && ty.is_empty() {
        if is_prose(name) {
            return (String::new(), None);
        }
        return (String::new(), Some(name.to_string()));
    }
    (name.to_string(), Some(ty.to_string()))
}

/// Whitespace outside brackets marks a sentence, not a type expression.
fn is_prose(text: &str) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => return true,
            _ => {}
        }
    }
    false
}
