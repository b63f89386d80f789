//! Docstring normalization ahead of section parsing.

/// A docstring with indentation removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    pub text: String,
    /// Blank lines dropped from the top, needed to map cleaned lines back to
    /// source lines.
    pub leading_lines: usize,
}

/// Dedent a raw docstring.
///
/// Tabs are expanded to 8-column stops, the first line loses its leading
/// whitespace, the remaining lines lose their common indentation, and blank
/// lines at either end are dropped. When `strip_backticks` is set every
/// backtick is removed so inline literals and roles read as plain text.
#[must_use]
pub fn cleandoc(raw: &str, strip_backticks: bool) -> Cleaned {
    let expanded: Vec<String> = raw.split('\n').map(expand_tabs).collect();

    let margin = expanded
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_width(line))
        .min()
        .unwrap_or(0);

    let mut lines: Vec<String> = expanded
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.trim_start().to_string()
            } else {
                drop_chars(line, margin).trim_end_matches('\r').to_string()
            }
        })
        .collect();

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let leading_lines = lines
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count();
    lines.drain(..leading_lines);

    let mut text = lines.join("\n");
    if strip_backticks {
        text.retain(|c| c != '`');
    }
    Cleaned {
        text,
        leading_lines,
    }
}

/// Number of leading whitespace characters; a blank line counts in full.
#[must_use]
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn drop_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + 8);
    let mut column = 0usize;
    for c in line.chars() {
        if c == '\t' {
            let pad = 8 - column % 8;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(c);
            column = if c == '\n' { 0 } else { column + 1 };
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dedents_body_and_drops_blank_edges() {
        let raw = "\n        Summary.\n\n        Parameters\n        ----------\n        x : int\n            desc\n    ";
        let cleaned = cleandoc(raw, true);
        assert_eq!(
            cleaned.text,
            "Summary.\n\nParameters\n----------\nx : int\n    desc"
        );
        assert_eq!(cleaned.leading_lines, 1);
    }

    #[test]
    fn first_line_is_stripped_independently() {
        let cleaned = cleandoc("Summary line.\n    Args:\n        x (int): value", true);
        assert_eq!(cleaned.text, "Summary line.\nArgs:\n    x (int): value");
        assert_eq!(cleaned.leading_lines, 0);
    }

    #[test]
    fn backticks_removed_on_request() {
        assert_eq!(cleandoc(":type x: `int`", true).text, ":type x: int");
        assert_eq!(cleandoc(":type x: `int`", false).text, ":type x: `int`");
    }

    #[test]
    fn tabs_expand_to_eight_columns() {
        let cleaned = cleandoc("x\n\ta\n\t\tb", true);
        assert_eq!(cleaned.text, "x\na\n        b");
    }

    #[test]
    fn empty_docstring_stays_empty() {
        let cleaned = cleandoc("   \n  \n", true);
        assert_eq!(cleaned.text, "");
    }
}
