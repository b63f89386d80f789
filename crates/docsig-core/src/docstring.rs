//! Parsed docstring records.

use serde::{Deserialize, Serialize};

/// A documented type and where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeField {
    /// The type text; `None` when the entry is present but untyped.
    pub ty: Option<String>,
    /// 1-based line in the source file once the docstring has been placed;
    /// grammar-level parsing counts from the first docstring line.
    pub line: usize,
}

impl TypeField {
    #[must_use]
    pub fn new(ty: Option<String>, line: usize) -> Self {
        let ty = ty.filter(|t| !t.trim().is_empty());
        Self { ty, line }
    }

    #[must_use]
    pub fn typed(ty: impl Into<String>, line: usize) -> Self {
        Self::new(Some(ty.into()), line)
    }

    #[must_use]
    pub fn ty(&self) -> Option<&str> {
        self.ty.as_deref()
    }
}

/// Parameter and return types recovered from one docstring.
///
/// `params` keeps docstring order and may be sparse: undocumented signature
/// arguments simply have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocstring {
    pub params: Vec<(String, TypeField)>,
    pub returns: Option<TypeField>,
}

impl ParsedDocstring {
    /// Look up a parameter by name. A name documented twice resolves to the
    /// later entry.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&TypeField> {
        self.params
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, field)| field)
    }

    /// Documented type for `name`, skipping untyped entries.
    #[must_use]
    pub fn param_type(&self, name: &str) -> Option<&str> {
        self.param(name).and_then(TypeField::ty)
    }

    #[must_use]
    pub fn return_type(&self) -> Option<&str> {
        self.returns.as_ref().and_then(TypeField::ty)
    }
}
