//! Diagnostics for criteria expressions
//!
//! Error codes, source locations and the compile-time error type shared by the
//! lexer and parser. Everything a study author sees when an expression is
//! rejected at save time is built from the types in this crate.

mod error;
mod error_code;
mod span;

pub use error::*;
pub use error_code::*;
pub use span::*;

/// Result type for compiling criteria expressions
pub type Result<T> = std::result::Result<T, CompileError>;
