//! # docsig-core
//!
//! Core types and error types for docsig.
//!
//! This crate provides the value types shared across all docsig crates:
//! - Parsed docstring records (`TypeField`, `ParsedDocstring`)
//! - The docstring convention enum (`DocFormat`)
//! - Diagnostics raised while reading docstrings
//! - Cross-cutting error types

pub mod diagnostic;
pub mod docstring;
pub mod enums;
pub mod errors;

pub use diagnostic::Diagnostic;
pub use docstring::{ParsedDocstring, TypeField};
pub use enums::{DocFormat, Severity};
pub use errors::CoreError;
