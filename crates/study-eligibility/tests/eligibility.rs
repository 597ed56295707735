//! Orchestrator tests: all three rules combined

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Arc;
use study_eligibility::eval::{FlagSet, ParticipationCheck};
use study_eligibility::*;

fn checker() -> EligibilityChecker {
    EligibilityChecker::with_cache(Arc::new(ExpressionCache::new()))
}

fn child(age_in_days: i64) -> ChildEvaluationContext {
    ChildEvaluationContext::builder(age_in_days)
        .conditions(["deaf", "dyslexia"])
        .languages(["en"])
        .gender(Gender::Female)
        .build()
        .unwrap()
}

fn study() -> StudyEligibilitySpec {
    StudyEligibilitySpec::new()
        .with_criteria("deaf AND dyslexia AND age_in_days >= 1000")
        .with_min_age(0, 0, 0)
        .with_max_age(12, 0, 0)
}

#[test]
fn test_all_rules_pass() {
    assert!(checker().is_eligible(&child(3650), &study(), &[]));
}

#[test]
fn test_global_cache_entry_point() {
    assert!(is_eligible(&child(3650), &study(), &[]));
    assert!(!is_eligible(&child(900), &study(), &[]));
}

#[rstest]
#[case(-1)]
#[case(-300)]
fn test_unborn_child_is_never_eligible(#[case] age: i64) {
    let spec = StudyEligibilitySpec::new()
        .with_criteria("NOT deaf OR deaf")
        .with_max_age(1, 0, 0);
    let unborn = ChildEvaluationContext::builder(age).build().unwrap();
    assert!(!checker().is_eligible(&unborn, &spec, &[]));
    let report = checker().assess(&unborn, &spec, &[]);
    assert!(!report.eligible);
}

#[test]
fn test_extreme_unborn_age_reports_negative_offset() {
    let spec = study().with_min_age(1, 0, 0);
    let unborn = ChildEvaluationContext::builder(i64::MIN).build().unwrap();
    let report = checker().assess(&unborn, &spec, &[]);
    assert!(!report.eligible);
    assert_eq!(report.day_offset, i64::MIN);
}

#[test]
fn test_age_range_failure() {
    let spec = study().with_max_age(5, 0, 0);
    assert!(!checker().is_eligible(&child(3650), &spec, &[]));
}

#[test]
fn test_participation_failure() {
    let spec = study().requiring("intro").excluding("pilot");
    let c = child(3650);
    let checker = checker();
    assert!(!checker.is_eligible(&c, &spec, &[]));
    assert!(checker.is_eligible(&c, &spec, &[ParticipationRecord::external("intro")]));
    assert!(!checker.is_eligible(
        &c,
        &spec,
        &[
            ParticipationRecord::external("intro"),
            ParticipationRecord::session("pilot", &["consent"]),
        ]
    ));
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("  \t\n"))]
fn test_missing_criteria_pass(#[case] criteria: Option<&str>) {
    let mut spec = study();
    spec.criteria_expression = criteria.map(str::to_string);
    let c = ChildEvaluationContext::builder(10).build().unwrap();
    let checker = checker();
    assert!(checker.is_eligible(&c, &spec, &[]));
    assert!(checker.cache().is_empty());
    assert_eq!(checker.assess(&c, &spec, &[]).criteria, CriteriaOutcome::NotSet);
}

#[rstest]
#[case("deaf or dyslexia")]
#[case("speaks_esperanto")]
#[case("(deaf")]
fn test_invalid_criteria_fail_closed(#[case] criteria: &str) {
    let spec = study().with_criteria(criteria);
    let checker = checker();
    assert!(!checker.is_eligible(&child(3650), &spec, &[]));
    assert!(matches!(
        checker.assess(&child(3650), &spec, &[]).criteria,
        CriteriaOutcome::Invalid { .. }
    ));
}

#[test]
fn test_evaluation_error_fails_closed() {
    let compiled = CompiledExpression::new("not_a_flag", Expression::flag("not_a_flag"));
    let c = child(3650);
    assert!(try_evaluate_criteria(&compiled, &c).is_err());
    assert!(!evaluate_criteria(&compiled, &c));
}

#[test]
fn test_compile_then_evaluate() {
    let compiled = compile_expression("gender = male OR gender = OTHER").unwrap();
    let male = ChildEvaluationContext::builder(10).gender(Gender::Male).build().unwrap();
    let female = ChildEvaluationContext::builder(10).gender(Gender::Female).build().unwrap();
    assert!(evaluate_criteria(&compiled, &male));
    assert!(!evaluate_criteria(&compiled, &female));
}

#[test]
fn test_compile_error_kinds() {
    let lex: LexError = compile_expression("deaf, dyslexia").unwrap_err();
    assert!(lex.is_lex_error());
    let parse: ParseError = compile_expression("deaf or dyslexia").unwrap_err();
    assert!(!parse.is_lex_error());
}

#[test]
fn test_report_breakdown() {
    let spec = study()
        .with_min_age(11, 0, 0)
        .requiring("intro")
        .with_criteria("deaf AND NOT dyslexia");
    let report = checker().assess(&child(3650), &spec, &[]);
    assert_eq!(
        report,
        EligibilityReport {
            eligible: false,
            age_in_days: 3650,
            age_bounds: (4015, 4380),
            age_range: false,
            day_offset: -365,
            participation: ParticipationCheck {
                missing: vec![StudyRef::from("intro")],
                forbidden: vec![],
            },
            criteria: CriteriaOutcome::Failed,
        }
    );
}

#[test]
fn test_report_serializes() {
    let report = checker().assess(&child(3650), &study(), &[]);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["eligible"], true);
    assert_eq!(json["criteria"]["status"], "passed");
    assert_eq!(json["day_offset"], 0);
}

#[test]
fn test_batch_compiles_once() {
    let checker = checker();
    let spec = study();
    let older = child(3650);
    let younger = child(900);
    let twin = ChildEvaluationContext::from_parts(
        FlagSet::from_bits(0b1_0000),
        FlagSet::EMPTY,
        Gender::Male,
        3650,
        None,
    );
    let no_records: &[ParticipationRecord] = &[];
    let eligible = checker.eligible_children(
        &spec,
        [(&older, no_records), (&younger, no_records), (&twin, no_records)],
    );
    assert_eq!(eligible, vec![&older]);
    assert_eq!(checker.cache().misses(), 1);
    assert_eq!(checker.cache().hits(), 0);
}
