//! ast-grep wrapper and Python file detection.

use std::path::Path;

use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;

/// The concrete AST tree type returned by [`parse_python`].
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// Whether `path` names a Python source file.
#[must_use]
pub fn is_python_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "py" | "pyi" | "pyw"))
}

/// Parse Python source code into an ast-grep tree.
#[must_use]
pub fn parse_python(source: &str) -> AstTree {
    use ast_grep_language::LanguageExt;
    SupportLang::Python.ast_grep(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_python() {
        assert!(is_python_path(Path::new("app.py")));
        assert!(is_python_path(Path::new("pkg/stubs/mod.pyi")));
    }

    #[test]
    fn detect_non_python() {
        assert!(!is_python_path(Path::new("setup.cfg")));
        assert!(!is_python_path(Path::new("README")));
        assert!(!is_python_path(Path::new("src/main.rs")));
    }

    #[test]
    fn parse_produces_module_root() {
        let tree = parse_python("def hello():\n    pass\n");
        assert_eq!(tree.root().kind().as_ref(), "module");
    }
}
