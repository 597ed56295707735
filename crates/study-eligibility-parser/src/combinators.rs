//! Character-level parsers for the lexer

use study_eligibility_ast::CompareOp;
use winnow::ascii::digit1;
use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

pub type Input<'a> = &'a str;
pub type PResult<T> = winnow::Result<T>;

/// One lexeme as it appears in the source, before conversion to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme<'a> {
    Identifier(&'a str),
    Integer(&'a str),
    Comparator(CompareOp),
    LParen,
    RParen,
}

/// Skip whitespace
pub fn ws(input: &mut Input<'_>) -> PResult<()> {
    take_while(0.., char::is_whitespace).void().parse_next(input)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn identifier<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Integer with an optional sign; the digits are converted by the lexer
pub fn integer<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    (opt(one_of(['+', '-'])), digit1).take().parse_next(input)
}

/// `<=`, `>=`, `<`, `>` or `=`
pub fn comparator(input: &mut Input<'_>) -> PResult<CompareOp> {
    // two-character comparators first so `<=` is not read as `<` `=`
    alt((
        "<=".value(CompareOp::LessOrEqual),
        ">=".value(CompareOp::GreaterOrEqual),
        "<".value(CompareOp::Less),
        ">".value(CompareOp::Greater),
        "=".value(CompareOp::Equal),
    ))
    .parse_next(input)
}

pub fn lexeme<'a>(input: &mut Input<'a>) -> PResult<Lexeme<'a>> {
    alt((
        identifier.map(Lexeme::Identifier),
        integer.map(Lexeme::Integer),
        comparator.map(Lexeme::Comparator),
        '('.value(Lexeme::LParen),
        ')'.value(Lexeme::RParen),
    ))
    .parse_next(input)
}
