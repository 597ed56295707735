//! Eligibility rule evaluation
//!
//! The three independent rules a child must pass to take part in a study:
//!
//! - **Criteria**: [`CriteriaEngine`] evaluates a parsed criteria expression
//!   against a [`ChildEvaluationContext`]
//! - **Age range**: [`age_range`] converts study bounds to days and checks them
//!   inclusively
//! - **Participation history**: [`participation`] checks required and forbidden
//!   earlier studies
//!
//! # Example
//!
//! ```ignore
//! use study_eligibility_eval::{ChildEvaluationContext, CriteriaEngine};
//!
//! let ast = study_eligibility_parser::parse_expression("deaf AND age_in_days >= 365")?;
//! let child = ChildEvaluationContext::builder(400).condition("deaf").build()?;
//! assert!(CriteriaEngine::new().evaluate(&ast, &child)?);
//! ```

pub mod age_range;
pub mod context;
pub mod engine;
pub mod error;
pub mod flags;
pub mod operators;
pub mod participation;
pub mod study;

pub use age_range::{
    age_in_days_bounds, age_in_days_from_birthday, days_from_parts, is_in_range, signed_day_offset,
};
pub use context::{ChildEvaluationContext, ChildEvaluationContextBuilder};
pub use engine::CriteriaEngine;
pub use error::{EvalError, EvalResult};
pub use flags::FlagSet;
pub use participation::{
    ParticipationCheck, ParticipationRecord, ResponseKind, StudyRef, assess_participation,
    check_participation,
};
pub use study::StudyEligibilitySpec;
