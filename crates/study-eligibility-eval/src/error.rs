//! Evaluation errors

use study_eligibility_ast::{CompareValue, Field};
use study_eligibility_diagnostics::{ELG0200, ELG0201, ELG0301, ELG0302, ErrorCode};
use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors raised while evaluating a criteria expression or building the
/// context it is evaluated against
///
/// Trees produced by the parser never trigger `UnknownFlag` or `FieldMismatch`;
/// seeing one means a hand-built tree slipped past validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Flag name absent from both the condition and the language catalog
    #[error("Unknown flag: {name}")]
    UnknownFlag { name: String },

    /// Comparison whose value or comparator does not suit the field
    #[error("Cannot compare {field} {op} {value}")]
    FieldMismatch {
        field: Field,
        op: String,
        value: CompareValue,
    },

    /// Condition name not in the catalog
    #[error("Unknown condition: {name}")]
    UnknownCondition { name: String },

    /// Language code not in the catalog
    #[error("Unknown language code: {code}")]
    UnknownLanguage { code: String },
}

impl EvalError {
    pub fn unknown_flag(name: impl Into<String>) -> Self {
        Self::UnknownFlag { name: name.into() }
    }

    pub fn field_mismatch(field: Field, op: impl Into<String>, value: CompareValue) -> Self {
        Self::FieldMismatch {
            field,
            op: op.into(),
            value,
        }
    }

    pub fn unknown_condition(name: impl Into<String>) -> Self {
        Self::UnknownCondition { name: name.into() }
    }

    pub fn unknown_language(code: impl Into<String>) -> Self {
        Self::UnknownLanguage { code: code.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownFlag { .. } => ELG0201,
            Self::UnknownCondition { .. } => ELG0301,
            Self::UnknownLanguage { .. } => ELG0302,
            Self::FieldMismatch { .. } => ELG0200,
        }
    }
}
