//! Core library for the Sorrel Lisp: reading, evaluation, and REPL
//! utilities.

pub mod diagnostics;
pub mod environment;
pub mod form;
pub mod primitives;
pub mod reader;
pub mod repl;
pub mod runtime;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticKind, SorrelError, SourceSpan};
pub use repl::Repl;
pub use runtime::Interpreter;
