//! Study eligibility for child research participants
//!
//! Decides whether a child may take part in a study by combining three rules:
//! a researcher-written criteria expression, the study's age range and the
//! child's earlier participation in other studies.
//!
//! # Example
//!
//! ```ignore
//! use study_eligibility::{is_eligible, ChildEvaluationContext, StudyEligibilitySpec};
//!
//! let study = StudyEligibilitySpec::new()
//!     .with_criteria("(deaf OR hearing_impairment) AND NOT multiple_birth")
//!     .with_min_age(1, 0, 0)
//!     .with_max_age(3, 0, 0);
//! let child = ChildEvaluationContext::builder(500).condition("deaf").build()?;
//!
//! assert!(is_eligible(&child, &study, &[]));
//! ```

pub use study_eligibility_ast as ast;
pub use study_eligibility_diagnostics as diagnostics;
pub use study_eligibility_eval as eval;
pub use study_eligibility_parser as parser;

pub mod cache;
pub mod eligibility;

pub use cache::ExpressionCache;
pub use eligibility::{
    CriteriaOutcome, EligibilityChecker, EligibilityReport, compile_expression, evaluate_criteria,
    is_eligible, try_evaluate_criteria, validate_expression,
};

// Convenience re-exports
pub use study_eligibility_ast::{CompiledExpression, Expression, Gender, catalog};
pub use study_eligibility_diagnostics::{CompileError, Diagnostic, LexError, ParseError};
pub use study_eligibility_eval::{
    ChildEvaluationContext, EvalError, ParticipationRecord, ResponseKind, StudyEligibilitySpec,
    StudyRef, age_in_days_from_birthday,
};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
