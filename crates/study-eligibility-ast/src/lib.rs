//! Syntax tree for eligibility criteria expressions
//!
//! This crate defines the token catalog, the lexical tokens and the syntax
//! tree of the criteria language used by researchers to restrict who may take
//! part in a study, e.g.
//!
//! ```text
//! (deaf OR hearing_impairment) AND age_in_days >= 365
//! ```

pub mod catalog;
mod expression;
mod operator;
mod token;

pub use catalog::{Field, FlagRef, Gender, LANGUAGE_FLAG_PREFIX, NOT_ANSWERED_LITERAL};
pub use expression::*;
pub use operator::*;
pub use token::*;

pub use study_eligibility_diagnostics::{Span, Spanned};

/// A validated criteria expression together with the source it came from
///
/// Immutable once built; compiled expressions are shared read-only between
/// evaluations and threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledExpression {
    source: String,
    ast: Expression,
}

impl CompiledExpression {
    pub fn new(source: impl Into<String>, ast: Expression) -> Self {
        Self {
            source: source.into(),
            ast,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Expression {
        &self.ast
    }
}
