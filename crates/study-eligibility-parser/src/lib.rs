//! Criteria expression parser
//!
//! Two stages: a winnow-based lexer turns the source into tokens, then a
//! recursive-descent parser builds the [`Expression`] tree, resolving every
//! identifier against the token catalog on the way. Parsing stops at the first
//! error.

mod combinators;
mod expression;
mod lexer;

pub use expression::MAX_NESTING_DEPTH;
pub use lexer::tokenize;

use expression::ExpressionParser;
use study_eligibility_ast::{CompiledExpression, Expression};
use study_eligibility_diagnostics::Result;

/// Parse `source` into a syntax tree
pub fn parse_expression(source: &str) -> Result<Expression> {
    let tokens = tokenize(source)?;
    ExpressionParser::new(source, tokens).parse()
}

/// Parse `source` and keep it alongside its tree
pub fn compile(source: &str) -> Result<CompiledExpression> {
    match parse_expression(source) {
        Ok(ast) => {
            log::debug!("compiled criteria {:?} ({} nodes)", source, ast.node_count());
            Ok(CompiledExpression::new(source, ast))
        }
        Err(err) => {
            log::debug!("criteria {:?} rejected: {}", source, err);
            Err(err)
        }
    }
}
