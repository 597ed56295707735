//! Lexer: expression source to token stream

use crate::combinators::{Input, Lexeme, lexeme, ws};
use study_eligibility_ast::{Span, Spanned, Token};
use study_eligibility_diagnostics::{CompileError, ELG0004, Result};

/// Split `source` into tokens
///
/// The returned stream always ends with a single [`Token::Eof`]. Any character
/// outside the language (commas, quotes, `!`, non-ASCII letters, ...) is a
/// lex error carrying that character and its position.
pub fn tokenize(source: &str) -> Result<Vec<Spanned<Token>>> {
    let mut input: Input<'_> = source;
    let mut tokens = Vec::new();

    loop {
        ws(&mut input).ok();
        let start = source.len() - input.len();

        if input.is_empty() {
            tokens.push(Spanned::new(Token::Eof, Span::point(start)));
            return Ok(tokens);
        }

        let rest = input;
        let lexeme = match lexeme(&mut input) {
            Ok(lexeme) => lexeme,
            Err(_) => {
                // `rest` is non-empty here
                let ch = rest.chars().next().unwrap_or('\0');
                return Err(CompileError::unexpected_char(ch, start, source));
            }
        };
        let span = Span::new(start, source.len() - input.len());

        let token = match lexeme {
            Lexeme::Identifier(name) => Token::Identifier(name.to_string()),
            Lexeme::Integer(digits) => match digits.parse::<i64>() {
                Ok(value) => Token::Number(value),
                Err(_) => {
                    return Err(CompileError::lex(
                        ELG0004,
                        format!("Integer literal '{digits}' is out of range"),
                        span,
                        source,
                    ));
                }
            },
            Lexeme::Comparator(op) => Token::Comparator(op),
            Lexeme::LParen => Token::LParen,
            Lexeme::RParen => Token::RParen,
        };
        tokens.push(Spanned::new(token, span));
    }
}
