//! Criteria evaluation engine
//!
//! Walks an expression tree against a [`ChildEvaluationContext`]. Boolean
//! operators live in `operators::logical`, field comparisons in
//! `operators::comparison`.

use crate::context::ChildEvaluationContext;
use crate::error::EvalResult;
use study_eligibility_ast::{CompiledExpression, Expression};

/// Stateless evaluator for criteria expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct CriteriaEngine;

impl CriteriaEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a compiled expression
    pub fn evaluate_compiled(
        &self,
        compiled: &CompiledExpression,
        ctx: &ChildEvaluationContext,
    ) -> EvalResult<bool> {
        self.evaluate(compiled.ast(), ctx)
    }

    /// Evaluate an expression tree
    pub fn evaluate(&self, expr: &Expression, ctx: &ChildEvaluationContext) -> EvalResult<bool> {
        match expr {
            Expression::Flag(name) => ctx.has_flag(name),
            Expression::Compare(cmp) => self.eval_compare(cmp, ctx),
            Expression::Not(inner) => self.eval_not(inner, ctx),
            Expression::And(left, right) => self.eval_and(left, right, ctx),
            Expression::Or(left, right) => self.eval_or(left, right, ctx),
        }
    }
}
