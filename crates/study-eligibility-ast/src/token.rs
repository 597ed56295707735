//! Lexical tokens

use crate::{CompareOp, Keyword};
use std::fmt;

/// A token produced by the lexer
///
/// `AND`, `OR` and `NOT` arrive as plain identifiers; the parser decides whether
/// an identifier is a keyword through [`Token::keyword`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `[A-Za-z_][A-Za-z0-9_]*`
    Identifier(String),
    /// Optionally signed integer
    Number(i64),
    Comparator(CompareOp),
    LParen,
    RParen,
    Eof,
}

impl Token {
    /// The boolean keyword this token spells, if any
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Self::Identifier(name) => Keyword::from_identifier(name),
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => write!(f, "'{name}'"),
            Self::Number(n) => write!(f, "'{n}'"),
            Self::Comparator(op) => write!(f, "'{op}'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Eof => f.write_str("end of expression"),
        }
    }
}
