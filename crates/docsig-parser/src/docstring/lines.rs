//! Peekable line cursor shared by the section-based grammars.

use super::clean::indent_width;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    /// Line text with trailing whitespace removed.
    pub text: String,
    /// 1-based line number inside the cleaned docstring.
    pub number: usize,
}

impl Line {
    pub(crate) fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn indent(&self) -> usize {
        indent_width(&self.text)
    }
}

pub(crate) struct LineCursor {
    lines: Vec<Line>,
    pos: usize,
}

impl LineCursor {
    pub(crate) fn new(text: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| Line {
                text: line.trim_end().to_string(),
                number: i + 1,
            })
            .collect();
        Self { lines, pos: 0 }
    }

    pub(crate) fn has_next(&self) -> bool {
        self.pos < self.lines.len()
    }

    pub(crate) fn peek(&self) -> Option<&Line> {
        self.peek_nth(0)
    }

    /// Look `n` lines past the current one without consuming.
    pub(crate) fn peek_nth(&self, n: usize) -> Option<&Line> {
        self.lines.get(self.pos + n)
    }

    pub(crate) fn next_line(&mut self) -> Option<Line> {
        let line = self.lines.get(self.pos).cloned();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    /// Indentation of the first non-blank line at or after `peek_ahead`,
    /// or 0 when only blank lines remain.
    pub(crate) fn current_indent(&self, peek_ahead: usize) -> usize {
        self.lines
            .iter()
            .skip(self.pos + peek_ahead)
            .find(|line| !line.is_blank())
            .map_or(0, Line::indent)
    }
}

/// True when `line` is longer than `indent` and its first `indent`
/// characters are all whitespace.
pub(crate) fn is_indented(line: &str, indent: usize) -> bool {
    for (i, c) in line.chars().enumerate() {
        if i >= indent {
            return true;
        }
        if !c.is_whitespace() {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_peeks_without_consuming() {
        let mut cursor = LineCursor::new("a\n  b  \n\nc");
        assert_eq!(cursor.peek().map(|l| l.text.as_str()), Some("a"));
        assert_eq!(cursor.peek_nth(1).map(|l| l.text.as_str()), Some("  b"));
        assert_eq!(cursor.next_line().map(|l| l.number), Some(1));
        assert_eq!(cursor.current_indent(0), 2);
        assert_eq!(cursor.current_indent(1), 0);
        cursor.next_line();
        cursor.next_line();
        cursor.next_line();
        assert!(!cursor.has_next());
        assert!(cursor.next_line().is_none());
    }

    #[test]
    fn indentation_check() {
        assert!(is_indented("    x", 4));
        assert!(!is_indented("   x", 4));
        assert!(is_indented("x", 0));
        assert!(!is_indented("    ", 4));
        assert!(!is_indented("", 0));
    }
}
