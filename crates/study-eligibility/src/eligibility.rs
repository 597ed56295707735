//! Eligibility orchestration
//!
//! A child is eligible for a study when all of the following hold:
//!
//! 1. the child is born (`age_in_days >= 0`)
//! 2. the age falls inside the study's inclusive age range
//! 3. the participation history satisfies the required and forbidden lists
//! 4. the criteria expression, if any, evaluates to true
//!
//! A criteria expression that does not compile, or whose evaluation fails,
//! makes the child ineligible.

use crate::cache::ExpressionCache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use study_eligibility_ast::CompiledExpression;
use study_eligibility_diagnostics::{CompileError, Diagnostic, ELG0008};
use study_eligibility_eval::{
    ChildEvaluationContext, CriteriaEngine, EvalError, ParticipationCheck, ParticipationRecord,
    StudyEligibilitySpec, age_in_days_bounds, assess_participation, check_participation,
    is_in_range, signed_day_offset,
};

/// Compile a criteria expression without touching any cache
pub fn compile_expression(source: &str) -> Result<CompiledExpression, CompileError> {
    study_eligibility_parser::compile(source)
}

/// Save-time check of a criteria expression
///
/// Returns an error diagnostic for an expression that does not compile and a
/// warning for a blank one, which studies treat as "no criteria".
pub fn validate_expression(source: &str) -> Vec<Diagnostic> {
    if source.trim().is_empty() {
        return vec![Diagnostic::warning(
            ELG0008,
            "Criteria expression is blank; every child passes the criteria rule",
        )];
    }
    match compile_expression(source) {
        Ok(_) => Vec::new(),
        Err(err) => vec![err.to_diagnostic()],
    }
}

pub fn try_evaluate_criteria(
    compiled: &CompiledExpression,
    ctx: &ChildEvaluationContext,
) -> Result<bool, EvalError> {
    CriteriaEngine::new().evaluate_compiled(compiled, ctx)
}

/// Evaluate `compiled`, treating an evaluation error as "not satisfied"
pub fn evaluate_criteria(compiled: &CompiledExpression, ctx: &ChildEvaluationContext) -> bool {
    try_evaluate_criteria(compiled, ctx).unwrap_or_else(|err| {
        log::error!(
            "{}: evaluating criteria {:?} failed: {}",
            err.code(),
            compiled.source(),
            err
        );
        false
    })
}

/// Eligibility through the process-wide expression cache
pub fn is_eligible(
    ctx: &ChildEvaluationContext,
    spec: &StudyEligibilitySpec,
    records: &[ParticipationRecord],
) -> bool {
    EligibilityChecker::new().is_eligible(ctx, spec, records)
}

/// Outcome of the criteria rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CriteriaOutcome {
    /// The study has no (or a blank) criteria expression
    NotSet,
    Passed,
    Failed,
    /// The expression does not compile
    Invalid { message: String },
    /// Evaluation raised an error
    Error { message: String },
}

impl CriteriaOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, Self::NotSet | Self::Passed)
    }
}

/// Per-rule breakdown of one eligibility decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub age_in_days: i64,
    /// Inclusive study bounds, in days
    pub age_bounds: (i64, i64),
    pub age_range: bool,
    /// `0` inside the range, negative when too young, positive when too old
    pub day_offset: i64,
    pub participation: ParticipationCheck,
    pub criteria: CriteriaOutcome,
}

/// Criteria prepared once per study
enum PreparedCriteria {
    Absent,
    Compiled(Arc<CompiledExpression>),
    Invalid(CompileError),
}

/// Eligibility decisions backed by an expression cache
#[derive(Debug, Clone)]
pub struct EligibilityChecker {
    cache: Arc<ExpressionCache>,
    engine: CriteriaEngine,
}

impl Default for EligibilityChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl EligibilityChecker {
    /// Checker sharing the process-wide cache
    pub fn new() -> Self {
        Self::with_cache(ExpressionCache::global())
    }

    pub fn with_cache(cache: Arc<ExpressionCache>) -> Self {
        Self {
            cache,
            engine: CriteriaEngine::new(),
        }
    }

    pub fn cache(&self) -> &Arc<ExpressionCache> {
        &self.cache
    }

    /// Whether the child may take part in the study
    ///
    /// Rules are checked cheapest first and the first failure decides.
    pub fn is_eligible(
        &self,
        ctx: &ChildEvaluationContext,
        spec: &StudyEligibilitySpec,
        records: &[ParticipationRecord],
    ) -> bool {
        let age = ctx.age_in_days();
        if age < 0 {
            log::debug!("ineligible: child not born yet ({age} days)");
            return false;
        }

        let (lower, upper) = age_in_days_bounds(spec);
        if !is_in_range(age, lower, upper) {
            log::debug!("ineligible: age {age} outside {lower}..={upper} days");
            return false;
        }

        if !check_participation(spec, records) {
            log::debug!("ineligible: participation history");
            return false;
        }

        let criteria = self.prepare(spec);
        let outcome = self.evaluate_prepared(&criteria, ctx);
        log::debug!("criteria outcome: {outcome:?}");
        outcome.passed()
    }

    /// Evaluate every rule and report each outcome
    pub fn assess(
        &self,
        ctx: &ChildEvaluationContext,
        spec: &StudyEligibilitySpec,
        records: &[ParticipationRecord],
    ) -> EligibilityReport {
        let criteria = self.prepare(spec);
        self.assess_prepared(&criteria, ctx, spec, records)
    }

    /// Children from `candidates` eligible for the study, in input order
    ///
    /// The criteria expression is compiled once for the whole batch.
    pub fn eligible_children<'a, I>(
        &self,
        spec: &StudyEligibilitySpec,
        candidates: I,
    ) -> Vec<&'a ChildEvaluationContext>
    where
        I: IntoIterator<Item = (&'a ChildEvaluationContext, &'a [ParticipationRecord])>,
    {
        let criteria = self.prepare(spec);
        candidates
            .into_iter()
            .filter(|(ctx, records)| self.assess_prepared(&criteria, ctx, spec, records).eligible)
            .map(|(ctx, _)| ctx)
            .collect()
    }

    fn prepare(&self, spec: &StudyEligibilitySpec) -> PreparedCriteria {
        match spec.criteria() {
            None => PreparedCriteria::Absent,
            Some(source) => match self.cache.get_or_compile(source) {
                Ok(compiled) => PreparedCriteria::Compiled(compiled),
                Err(err) => {
                    log::error!(
                        "{}: study criteria {:?} do not compile: {}",
                        err.code(),
                        source,
                        err
                    );
                    PreparedCriteria::Invalid(err)
                }
            },
        }
    }

    fn evaluate_prepared(
        &self,
        criteria: &PreparedCriteria,
        ctx: &ChildEvaluationContext,
    ) -> CriteriaOutcome {
        match criteria {
            PreparedCriteria::Absent => CriteriaOutcome::NotSet,
            PreparedCriteria::Invalid(err) => CriteriaOutcome::Invalid {
                message: err.to_string(),
            },
            PreparedCriteria::Compiled(compiled) => {
                match self.engine.evaluate_compiled(compiled, ctx) {
                    Ok(true) => CriteriaOutcome::Passed,
                    Ok(false) => CriteriaOutcome::Failed,
                    Err(err) => {
                        log::error!(
                            "{}: evaluating criteria {:?} failed: {}",
                            err.code(),
                            compiled.source(),
                            err
                        );
                        CriteriaOutcome::Error {
                            message: err.to_string(),
                        }
                    }
                }
            }
        }
    }

    fn assess_prepared(
        &self,
        criteria: &PreparedCriteria,
        ctx: &ChildEvaluationContext,
        spec: &StudyEligibilitySpec,
        records: &[ParticipationRecord],
    ) -> EligibilityReport {
        let age = ctx.age_in_days();
        let (lower, upper) = age_in_days_bounds(spec);
        let age_range = is_in_range(age, lower, upper);
        let participation = assess_participation(spec, records);
        let criteria = self.evaluate_prepared(criteria, ctx);

        EligibilityReport {
            eligible: age >= 0 && age_range && participation.passed() && criteria.passed(),
            age_in_days: age,
            age_bounds: (lower, upper),
            age_range,
            day_offset: signed_day_offset(age, lower, upper),
            participation,
            criteria,
        }
    }
}
