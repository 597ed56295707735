//! Logical operators: And, Or, Not
//!
//! Two-valued and short-circuiting. The right operand is not evaluated when the
//! left one decides the result, so an error on that side goes unnoticed.

use crate::context::ChildEvaluationContext;
use crate::engine::CriteriaEngine;
use crate::error::EvalResult;
use study_eligibility_ast::Expression;

impl CriteriaEngine {
    pub fn eval_and(
        &self,
        left: &Expression,
        right: &Expression,
        ctx: &ChildEvaluationContext,
    ) -> EvalResult<bool> {
        Ok(self.evaluate(left, ctx)? && self.evaluate(right, ctx)?)
    }

    pub fn eval_or(
        &self,
        left: &Expression,
        right: &Expression,
        ctx: &ChildEvaluationContext,
    ) -> EvalResult<bool> {
        Ok(self.evaluate(left, ctx)? || self.evaluate(right, ctx)?)
    }

    pub fn eval_not(&self, operand: &Expression, ctx: &ChildEvaluationContext) -> EvalResult<bool> {
        Ok(!self.evaluate(operand, ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    fn ctx() -> ChildEvaluationContext {
        ChildEvaluationContext::builder(100)
            .condition("deaf")
            .build()
            .unwrap()
    }

    #[test]
    fn test_truth_table() {
        let engine = CriteriaEngine::new();
        let t = Expression::flag("deaf");
        let f = Expression::flag("dyslexia");
        let ctx = ctx();
        assert!(engine.eval_and(&t, &t, &ctx).unwrap());
        assert!(!engine.eval_and(&t, &f, &ctx).unwrap());
        assert!(!engine.eval_and(&f, &t, &ctx).unwrap());
        assert!(engine.eval_or(&f, &t, &ctx).unwrap());
        assert!(!engine.eval_or(&f, &f, &ctx).unwrap());
        assert!(engine.eval_not(&f, &ctx).unwrap());
    }

    #[test]
    fn test_short_circuit_skips_right_operand() {
        let engine = CriteriaEngine::new();
        let bogus = Expression::flag("not_a_flag");
        let ctx = ctx();
        assert!(!engine.eval_and(&Expression::flag("dyslexia"), &bogus, &ctx).unwrap());
        assert!(engine.eval_or(&Expression::flag("deaf"), &bogus, &ctx).unwrap());
        assert_eq!(
            engine.eval_or(&Expression::flag("dyslexia"), &bogus, &ctx),
            Err(EvalError::unknown_flag("not_a_flag"))
        );
    }
}
