//! Field comparisons
//!
//! | Field                      | Values          | Comparators |
//! |----------------------------|-----------------|-------------|
//! | `age_in_days`              | integer         | all         |
//! | `gestational_age_in_weeks` | integer, `na`   | all, `=`    |
//! | `gender`                   | gender literal  | `=`         |
//! | `num_languages`            | integer         | all         |
//!
//! A numeric comparison against an unanswered gestational age is false.

use crate::context::ChildEvaluationContext;
use crate::engine::CriteriaEngine;
use crate::error::{EvalError, EvalResult};
use study_eligibility_ast::{CompareOp, CompareValue, Comparison, Field};

impl CriteriaEngine {
    pub fn eval_compare(&self, cmp: &Comparison, ctx: &ChildEvaluationContext) -> EvalResult<bool> {
        let Comparison { field, op, value } = *cmp;
        match (field, value) {
            (Field::AgeInDays, CompareValue::Number(n)) => Ok(op.apply(ctx.age_in_days(), n)),
            (Field::NumLanguages, CompareValue::Number(n)) => Ok(op.apply(ctx.num_languages(), n)),
            (Field::GestationalAgeInWeeks, CompareValue::Number(n)) => Ok(ctx
                .gestational_age_in_weeks()
                .is_some_and(|weeks| op.apply(weeks, n))),
            (Field::GestationalAgeInWeeks, CompareValue::NotAnswered) if op == CompareOp::Equal => {
                Ok(ctx.gestational_age_in_weeks().is_none())
            }
            (Field::Gender, CompareValue::Gender(gender)) if op == CompareOp::Equal => {
                Ok(ctx.gender() == gender)
            }
            _ => Err(EvalError::field_mismatch(field, op.symbol(), value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use study_eligibility_ast::Gender;

    fn compare(field: Field, op: CompareOp, value: CompareValue) -> Comparison {
        Comparison { field, op, value }
    }

    fn child(weeks: Option<i64>) -> ChildEvaluationContext {
        ChildEvaluationContext::builder(400)
            .languages(["en", "es", "ase"])
            .gender(Gender::Male)
            .gestational_age_in_weeks(weeks)
            .build()
            .unwrap()
    }

    #[rstest]
    #[case(Some(25), CompareOp::Less, 28, true)]
    #[case(Some(35), CompareOp::Less, 28, false)]
    #[case(None, CompareOp::Less, 28, false)]
    #[case(None, CompareOp::GreaterOrEqual, 0, false)]
    #[case(Some(40), CompareOp::Equal, 40, true)]
    fn test_gestational_numeric(
        #[case] weeks: Option<i64>,
        #[case] op: CompareOp,
        #[case] value: i64,
        #[case] expected: bool,
    ) {
        let cmp = compare(Field::GestationalAgeInWeeks, op, CompareValue::Number(value));
        assert_eq!(CriteriaEngine::new().eval_compare(&cmp, &child(weeks)).unwrap(), expected);
    }

    #[test]
    fn test_gestational_not_answered() {
        let engine = CriteriaEngine::new();
        let cmp = compare(
            Field::GestationalAgeInWeeks,
            CompareOp::Equal,
            CompareValue::NotAnswered,
        );
        assert!(engine.eval_compare(&cmp, &child(None)).unwrap());
        assert!(!engine.eval_compare(&cmp, &child(Some(25))).unwrap());
    }

    #[test]
    fn test_num_languages_counts_bits() {
        let engine = CriteriaEngine::new();
        let cmp = compare(Field::NumLanguages, CompareOp::Equal, CompareValue::Number(3));
        assert!(engine.eval_compare(&cmp, &child(None)).unwrap());
    }

    #[test]
    fn test_mismatched_value_is_an_error() {
        let engine = CriteriaEngine::new();
        let cmp = compare(Field::Gender, CompareOp::Equal, CompareValue::Number(1));
        assert!(matches!(
            engine.eval_compare(&cmp, &child(None)),
            Err(EvalError::FieldMismatch { field: Field::Gender, .. })
        ));
        let cmp = compare(Field::Gender, CompareOp::Less, CompareValue::Gender(Gender::Male));
        assert!(engine.eval_compare(&cmp, &child(None)).is_err());
    }
}
