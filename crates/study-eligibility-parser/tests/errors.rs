//! Tests for rejected criteria expressions
//!
//! Every malformed expression must come back as a `CompileError` with a code
//! and, where one exists, the position of the offending token.

use rstest::rstest;
use study_eligibility_diagnostics::*;
use study_eligibility_parser::{MAX_NESTING_DEPTH, compile, parse_expression};

fn parse_err(input: &str) -> CompileError {
    match parse_expression(input) {
        Ok(expr) => panic!("Expected '{}' to be rejected, got: {:?}", input, expr),
        Err(err) => err,
    }
}

// === Lexical errors ===

#[rstest]
#[case("deaf, dyslexia", ',', 5)]
#[case("deaf AND 'dyslexia'", '\'', 10)]
#[case("!deaf", '!', 1)]
#[case("deaf != 1", '!', 6)]
#[case("gender = männlich", 'ä', 11)]
fn test_unrecognised_character(#[case] input: &str, #[case] ch: char, #[case] column: usize) {
    let err = parse_err(input);
    assert!(err.is_lex_error());
    assert_eq!(err.code(), ELG0001);
    match err {
        CompileError::Lex {
            snippet, location, ..
        } => {
            assert_eq!(snippet, ch);
            assert_eq!(location.column, column);
            assert_eq!(location.line, 1);
        }
        other => panic!("Expected Lex error, got: {:?}", other),
    }
}

#[test]
fn test_lex_error_on_second_line() {
    let err = parse_err("deaf AND\n  dyslexia;");
    let location = err.location().unwrap();
    assert_eq!((location.line, location.column), (2, 11));
}

// === Structural errors ===

#[test]
fn test_lower_case_or_rejected() {
    let err = parse_err("deaf or dyslexia");
    assert_eq!(err.code(), ELG0006);
    assert_eq!(err.location().unwrap().column, 6);
    let help = err.to_diagnostic().help.unwrap();
    assert!(help.contains("'OR'"), "unexpected help: {help}");
}

#[rstest]
#[case("deaf and dyslexia")]
#[case("not deaf")]
#[case("deaf Or dyslexia")]
fn test_lower_case_keywords_rejected(#[case] input: &str) {
    assert!(parse_expression(input).is_err());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t")]
fn test_empty_expression(#[case] input: &str) {
    assert_eq!(parse_err(input).code(), ELG0008);
}

#[test]
fn test_missing_closing_paren() {
    let err = parse_err("(deaf OR dyslexia");
    assert_eq!(err.code(), ELG0005);
    let help = err.to_diagnostic().help.unwrap();
    assert!(help.contains("column 1"), "unexpected help: {help}");
}

#[test]
fn test_unbalanced_closing_paren() {
    assert_eq!(parse_err("deaf)").code(), ELG0006);
}

#[rstest]
#[case("deaf AND")]
#[case("NOT")]
#[case("(")]
fn test_unexpected_end(#[case] input: &str) {
    assert_eq!(parse_err(input).code(), ELG0002);
}

#[rstest]
#[case("AND deaf")]
#[case("deaf AND OR dyslexia")]
#[case(")")]
#[case("365")]
#[case("deaf AND >= 3")]
fn test_unexpected_token(#[case] input: &str) {
    assert_eq!(parse_err(input).code(), ELG0003);
}

#[rstest]
#[case("age_in_days >=")]
#[case("age_in_days >= )")]
#[case("num_languages = (2)")]
fn test_comparator_without_value(#[case] input: &str) {
    assert_eq!(parse_err(input).code(), ELG0007);
}

#[test]
fn test_trailing_number() {
    assert_eq!(parse_err("deaf 42").code(), ELG0006);
}

// === Nesting depth ===

fn parenthesised(depth: usize) -> String {
    format!("{}deaf{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_deep_parentheses_rejected() {
    let err = parse_err(&parenthesised(10_000));
    assert_eq!(err.code(), ELG0009);
    assert_eq!(err.location().unwrap().column, MAX_NESTING_DEPTH + 1);
}

#[test]
fn test_long_not_chain_rejected() {
    let source = format!("{}deaf", "NOT ".repeat(10_000));
    assert_eq!(parse_err(&source).code(), ELG0009);
}

#[test]
fn test_long_or_chain_rejected() {
    let source = vec!["deaf"; 10_000].join(" OR ");
    assert_eq!(parse_err(&source).code(), ELG0009);
}

#[test]
fn test_nesting_at_limit_accepted() {
    assert!(parse_expression(&parenthesised(MAX_NESTING_DEPTH)).is_ok());
    assert!(parse_expression(&vec!["deaf"; MAX_NESTING_DEPTH].join(" AND ")).is_ok());
    assert_eq!(parse_err(&parenthesised(MAX_NESTING_DEPTH + 1)).code(), ELG0009);
    let one_too_many = vec!["deaf"; MAX_NESTING_DEPTH + 1].join(" AND ");
    assert_eq!(parse_err(&one_too_many).code(), ELG0009);
}

// === Identifier resolution and field typing ===

#[rstest]
#[case("speaks_esperanto")]
#[case("Deaf")]
#[case("blind")]
#[case("deaf AND speaks_xx")]
#[case("age_in_months > 3")]
fn test_unknown_identifier(#[case] input: &str) {
    let err = parse_err(input);
    assert_eq!(err.code(), ELG0100);
    assert!(err.is_unknown_identifier());
    assert!(!err.is_lex_error());
}

#[test]
fn test_unknown_identifier_location() {
    let err = parse_err("deaf OR speaks_esperanto");
    let location = err.location().unwrap();
    assert_eq!(location.column, 9);
    assert_eq!(location.length, "speaks_esperanto".len());
}

#[test]
fn test_flag_cannot_be_compared() {
    assert_eq!(parse_err("deaf = 1").code(), ELG0101);
}

#[rstest]
#[case("age_in_days")]
#[case("deaf AND gender")]
fn test_field_used_as_flag(#[case] input: &str) {
    assert_eq!(parse_err(input).code(), ELG0104);
}

#[rstest]
#[case("gender = 1")]
#[case("gender = boy")]
#[case("age_in_days = na")]
#[case("num_languages > many")]
#[case("gestational_age_in_weeks = NA")]
fn test_invalid_field_value(#[case] input: &str) {
    assert_eq!(parse_err(input).code(), ELG0102);
}

#[rstest]
#[case("gender > male")]
#[case("gender <= female")]
#[case("gestational_age_in_weeks < na")]
fn test_unsupported_comparator(#[case] input: &str) {
    assert_eq!(parse_err(input).code(), ELG0103);
}

#[test]
fn test_compile_error_keeps_expression() {
    let err = compile("deaf OR OR").unwrap_err();
    assert_eq!(err.expression(), "deaf OR OR");
}
