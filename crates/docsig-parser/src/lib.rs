//! # docsig-parser
//!
//! Docstring grammars and ast-grep-based Python source analysis for docsig.
//!
//! - [`docstring`]: numpy, google and reStructuredText grammars that recover
//!   `(name, type)` pairs and a return type from a docstring.
//! - [`python`]: locates every `def` in a Python file together with its
//!   parameters, docstring and the lines a type comment would occupy.

pub mod docstring;
pub mod error;
pub mod parser;
pub mod python;

pub use docstring::{ParseOptions, guess_format, parse_docstring};
pub use error::ParserError;
pub use parser::{is_python_path, parse_python};
pub use python::{Docstring, FunctionSite, Param, ParamKind, analyze_source};
