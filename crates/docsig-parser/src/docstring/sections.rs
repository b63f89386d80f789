//! Section walker shared by the google and numpy grammars.
//!
//! Both conventions split a docstring into titled sections whose bodies are
//! indented field lists. They differ only in how a section header looks and in
//! how a single field line is split, so the walker delegates exactly those
//! decisions to the dialect modules.

use docsig_core::TypeField;

use super::lines::{Line, LineCursor, is_indented};
use super::{google, normalize_name, numpy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    Google,
    Numpy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionKind {
    Parameters,
    Returns,
    Yields,
    Skip,
}

/// Known section titles, lowercase and without a trailing colon.
pub(crate) fn section_kind(title: &str) -> Option<SectionKind> {
    match title {
        "args" | "arguments" | "parameters" => Some(SectionKind::Parameters),
        "return" | "returns" => Some(SectionKind::Returns),
        "yield" | "yields" => Some(SectionKind::Yields),
        "attributes" | "example" | "examples" | "keyword args" | "keyword arguments"
        | "methods" | "note" | "notes" | "other parameters" | "raises" | "references"
        | "see also" | "todo" | "warning" | "warnings" | "warns" => Some(SectionKind::Skip),
        _ => None,
    }
}

/// Fields collected from the sections, before return reconciliation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RawSections {
    pub params: Vec<(String, TypeField)>,
    pub returns: Vec<TypeField>,
    pub yields: Vec<TypeField>,
}

pub(crate) struct SectionParser {
    cursor: LineCursor,
    dialect: Dialect,
    in_section: bool,
    section_indent: usize,
    out: RawSections,
}

impl SectionParser {
    pub(crate) fn new(text: &str, dialect: Dialect) -> Self {
        Self {
            cursor: LineCursor::new(text),
            dialect,
            in_section: false,
            section_indent: 0,
            out: RawSections::default(),
        }
    }

    pub(crate) fn parse(mut self) -> RawSections {
        self.consume_empty();

        while self.cursor.has_next() {
            if self.is_section_header() {
                let title = self.consume_section_header();
                self.in_section = true;
                self.section_indent = self.cursor.current_indent(0);

                if is_directive(&title) {
                    self.consume_to_next_section();
                } else {
                    let key = title.trim().trim_end_matches(':').to_lowercase();
                    match section_kind(&key) {
                        Some(SectionKind::Parameters) => {
                            let fields = self.consume_fields(false);
                            self.out.params.extend(fields);
                        }
                        Some(SectionKind::Returns) => {
                            let fields = self.consume_returns_section();
                            self.out.returns.extend(fields);
                        }
                        Some(SectionKind::Yields) => {
                            let fields = self.consume_returns_section();
                            self.out.yields.extend(fields);
                        }
                        Some(SectionKind::Skip) | None => {
                            self.consume_to_next_section();
                        }
                    }
                }

                self.in_section = false;
                self.section_indent = 0;
            } else {
                self.consume_to_next_section();
            }
        }

        self.out
    }

    fn is_section_header(&self) -> bool {
        match self.dialect {
            Dialect::Google => google::is_section_header(&self.cursor),
            Dialect::Numpy => numpy::is_section_header(&self.cursor),
        }
    }

    fn is_section_break(&self) -> bool {
        let Some(line) = self.cursor.peek() else {
            return true;
        };
        if self.is_section_header() {
            return true;
        }
        if self.dialect == Dialect::Numpy
            && line.is_blank()
            && self.cursor.peek_nth(1).is_some_and(Line::is_blank)
        {
            return true;
        }
        self.in_section && !line.is_blank() && !is_indented(&line.text, self.section_indent)
    }

    fn consume_section_header(&mut self) -> String {
        let title = self.cursor.next_line().map(|l| l.text).unwrap_or_default();
        if self.dialect == Dialect::Numpy && !is_directive(&title) {
            // underline
            self.cursor.next_line();
        }
        title
    }

    fn consume_empty(&mut self) {
        while self.cursor.peek().is_some_and(Line::is_blank) {
            self.cursor.next_line();
        }
    }

    fn consume_to_next_section(&mut self) -> Vec<Line> {
        self.consume_empty();
        let mut lines = Vec::new();
        while !self.is_section_break() {
            match self.cursor.next_line() {
                Some(line) => lines.push(line),
                None => break,
            }
        }
        self.consume_empty();
        lines
    }

    fn consume_indented_block(&mut self, indent: usize) {
        while !self.is_section_break() {
            let keep = self
                .cursor
                .peek()
                .is_some_and(|line| line.is_blank() || is_indented(&line.text, indent));
            if !keep {
                break;
            }
            self.cursor.next_line();
        }
    }

    fn consume_fields(&mut self, prefer_type: bool) -> Vec<(String, TypeField)> {
        self.consume_empty();
        let mut fields = Vec::new();
        while !self.is_section_break() {
            let Some(line) = self.cursor.next_line() else {
                break;
            };
            let (name, ty) = match self.dialect {
                Dialect::Google => google::split_field(&line.text),
                Dialect::Numpy => numpy::split_field(&line.text, prefer_type),
            };
            self.consume_indented_block(line.indent() + 1);

            let name = normalize_name(&name);
            let field = TypeField::new(ty, line.number);
            if !name.is_empty() || field.ty.is_some() {
                fields.push((name, field));
            }
        }
        fields
    }

    fn consume_returns_section(&mut self) -> Vec<TypeField> {
        match self.dialect {
            Dialect::Google => {
                let lines = self.consume_to_next_section();
                lines
                    .iter()
                    .find(|line| !line.is_blank())
                    .and_then(|line| {
                        google::return_type(&line.text).map(|ty| TypeField::typed(ty, line.number))
                    })
                    .into_iter()
                    .collect()
            }
            Dialect::Numpy => self
                .consume_fields(true)
                .into_iter()
                .map(|(_, field)| field)
                .collect(),
        }
    }
}

/// reST directive line such as `.. index:: foo`.
pub(crate) fn is_directive(line: &str) -> bool {
    line.strip_prefix(".. ").is_some_and(|rest| {
        rest.split_whitespace()
            .next()
            .is_some_and(|word| word.len() > 2 && word.ends_with("::"))
    })
}

/// Split a field line on its first colon into trimmed `(before, found, after)`.
pub(crate) fn partition_on_colon(line: &str) -> (&str, bool, &str) {
    match line.split_once(':') {
        Some((before, after)) => (before.trim(), true, after.trim()),
        None => (line.trim(), false, ""),
    }
}
