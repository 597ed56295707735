//! Expression parser using recursive descent over the token stream
//!
//! Precedence, lowest first: `OR`, `AND`, `NOT`, then atoms (parenthesised
//! expressions, comparisons and flags). Identifiers are checked against the
//! token catalog as they are read, so an unknown name fails the parse the same
//! way a syntax error does.

use study_eligibility_ast::catalog::lookup_flag;
use study_eligibility_ast::{
    CompareOp, CompareValue, Expression, Field, Gender, Keyword, NOT_ANSWERED_LITERAL, Span,
    Spanned, Token,
};
use study_eligibility_diagnostics::{
    CompileError, ELG0002, ELG0003, ELG0005, ELG0006, ELG0007, ELG0008, ELG0009, ELG0100, ELG0101,
    ELG0102, ELG0103, ELG0104, ErrorCode, Result, offset_to_line_col,
};

/// Deepest parenthesis/`NOT` nesting, and deepest tree, accepted by the parser
pub const MAX_NESTING_DEPTH: usize = 256;

/// A parsed subtree and its depth
type Node = (Expression, usize);

pub struct ExpressionParser<'s> {
    source: &'s str,
    tokens: Vec<Spanned<Token>>,
    pos: usize,
    nesting: usize,
}

impl<'s> ExpressionParser<'s> {
    /// `tokens` must end with `Token::Eof`, as produced by the lexer
    pub fn new(source: &'s str, tokens: Vec<Spanned<Token>>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            nesting: 0,
        }
    }

    /// Parse the whole token stream into one expression
    pub fn parse(mut self) -> Result<Expression> {
        if self.at_eof() {
            return Err(CompileError::parse(
                ELG0008,
                "Criteria expression is empty",
                self.source,
            ));
        }

        let (expr, _) = self.or_expression()?;

        if !self.at_eof() {
            let trailing = self.peek().clone();
            let mut err = self.error_at(
                ELG0006,
                format!("Unexpected {} after a complete expression", trailing.inner),
                trailing.span,
            );
            if let Token::Identifier(name) = &trailing.inner {
                if let Some(keyword) = Keyword::from_identifier(&name.to_ascii_uppercase()) {
                    err = err.with_context(format!(
                        "Boolean operators are case-sensitive: write '{keyword}' instead of '{name}'"
                    ));
                }
            }
            return Err(err);
        }

        Ok(expr)
    }

    fn peek(&self) -> &Spanned<Token> {
        &self.tokens[self.pos]
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().inner, Token::Eof)
    }

    /// Consume the current token. The trailing `Eof` is never consumed.
    fn bump(&mut self) -> Spanned<Token> {
        let token = self.tokens[self.pos].clone();
        if !matches!(token.inner, Token::Eof) {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `keyword`, returning its span
    fn eat_keyword(&mut self, keyword: Keyword) -> Option<Span> {
        if self.peek().is_keyword(keyword) {
            Some(self.bump().span)
        } else {
            None
        }
    }

    fn error_at(&self, code: ErrorCode, message: String, span: Span) -> CompileError {
        CompileError::parse_at(code, message, span, self.source)
    }

    fn too_deep(&self, span: Span) -> CompileError {
        self.error_at(
            ELG0009,
            format!("Expression is nested more than {MAX_NESTING_DEPTH} levels deep"),
            span,
        )
    }

    /// Enter a parenthesised group or `NOT` operand
    fn enter(&mut self, span: Span) -> Result<()> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING_DEPTH {
            return Err(self.too_deep(span));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    fn check_depth(&self, depth: usize, span: Span) -> Result<usize> {
        if depth > MAX_NESTING_DEPTH {
            return Err(self.too_deep(span));
        }
        Ok(depth)
    }

    /// `or_expr := and_expr ("OR" and_expr)*`
    fn or_expression(&mut self) -> Result<Node> {
        let (mut left, mut depth) = self.and_expression()?;
        while let Some(op_span) = self.eat_keyword(Keyword::Or) {
            let (right, right_depth) = self.and_expression()?;
            depth = self.check_depth(depth.max(right_depth) + 1, op_span)?;
            left = Expression::or(left, right);
        }
        Ok((left, depth))
    }

    /// `and_expr := unary ("AND" unary)*`
    fn and_expression(&mut self) -> Result<Node> {
        let (mut left, mut depth) = self.unary_expression()?;
        while let Some(op_span) = self.eat_keyword(Keyword::And) {
            let (right, right_depth) = self.unary_expression()?;
            depth = self.check_depth(depth.max(right_depth) + 1, op_span)?;
            left = Expression::and(left, right);
        }
        Ok((left, depth))
    }

    /// `unary := "NOT" unary | atom`
    fn unary_expression(&mut self) -> Result<Node> {
        if let Some(op_span) = self.eat_keyword(Keyword::Not) {
            self.enter(op_span)?;
            let (operand, depth) = self.unary_expression()?;
            self.leave();
            let depth = self.check_depth(depth + 1, op_span)?;
            return Ok((Expression::not(operand), depth));
        }
        self.atom()
    }

    /// `atom := "(" expr ")" | compare | IDENT`
    fn atom(&mut self) -> Result<Node> {
        let token = self.bump();
        match token.inner {
            Token::LParen => {
                self.enter(token.span)?;
                let inner = self.or_expression()?;
                let close = self.peek().clone();
                if !matches!(close.inner, Token::RParen) {
                    let (line, column) = offset_to_line_col(self.source, token.span.start);
                    return Err(self
                        .error_at(
                            ELG0005,
                            format!("Expected ')' but found {}", close.inner),
                            close.span,
                        )
                        .with_context(format!(
                            "The '(' at line {line}, column {column} is never closed"
                        )));
                }
                self.bump();
                self.leave();
                Ok(inner)
            }
            Token::Identifier(name) => {
                if let Some(keyword) = Keyword::from_identifier(&name) {
                    return Err(self.error_at(
                        ELG0003,
                        format!("Expected a flag, comparison or '(' but found keyword '{keyword}'"),
                        token.span,
                    ));
                }
                if let Token::Comparator(op) = self.peek().inner {
                    let op_span = self.bump().span;
                    Ok((self.comparison(name, token.span, op, op_span)?, 1))
                } else {
                    Ok((self.flag(name, token.span)?, 1))
                }
            }
            Token::Eof => Err(self.error_at(
                ELG0002,
                "Unexpected end of expression".to_string(),
                token.span,
            )),
            other => Err(self.error_at(
                ELG0003,
                format!("Expected a flag, comparison or '(' but found {other}"),
                token.span,
            )),
        }
    }

    /// A bare identifier must be a catalog flag
    fn flag(&self, name: String, span: Span) -> Result<Expression> {
        if lookup_flag(&name).is_some() {
            return Ok(Expression::Flag(name));
        }
        if let Some(field) = Field::from_name(&name) {
            return Err(self.error_at(
                ELG0104,
                format!("Field '{field}' must be used in a comparison"),
                span,
            ));
        }
        Err(self.error_at(ELG0100, format!("Unknown identifier '{name}'"), span))
    }

    /// `compare := IDENT comparator (NUMBER | IDENT)`, comparator already read
    fn comparison(
        &mut self,
        name: String,
        name_span: Span,
        op: CompareOp,
        op_span: Span,
    ) -> Result<Expression> {
        let Some(field) = Field::from_name(&name) else {
            let (code, message) = if lookup_flag(&name).is_some() {
                (ELG0101, format!("Flag '{name}' cannot be compared"))
            } else {
                (ELG0100, format!("Unknown identifier '{name}'"))
            };
            return Err(self.error_at(code, message, name_span));
        };

        if field.is_enumerated() && op != CompareOp::Equal {
            return Err(self.error_at(
                ELG0103,
                format!("Field '{field}' only supports '='"),
                op_span,
            ));
        }

        let value = self.bump();
        let compared = match (&value.inner, field) {
            (Token::Number(_), Field::Gender) => {
                return Err(self.invalid_gender(&value));
            }
            (Token::Number(n), _) => CompareValue::Number(*n),
            (Token::Identifier(literal), Field::Gender) => match Gender::from_literal(literal) {
                Some(gender) => CompareValue::Gender(gender),
                None => return Err(self.invalid_gender(&value)),
            },
            (Token::Identifier(literal), Field::GestationalAgeInWeeks)
                if literal == NOT_ANSWERED_LITERAL =>
            {
                if op != CompareOp::Equal {
                    return Err(self.error_at(
                        ELG0103,
                        format!("'{NOT_ANSWERED_LITERAL}' can only be matched with '='"),
                        op_span,
                    ));
                }
                CompareValue::NotAnswered
            }
            (Token::Identifier(literal), _) => {
                let expected = if field == Field::GestationalAgeInWeeks {
                    format!("an integer or '{NOT_ANSWERED_LITERAL}'")
                } else {
                    "an integer".to_string()
                };
                return Err(self.error_at(
                    ELG0102,
                    format!("Field '{field}' expects {expected}, found '{literal}'"),
                    value.span,
                ));
            }
            (other, _) => {
                return Err(self.error_at(
                    ELG0007,
                    format!("Expected a value after '{op}' but found {other}"),
                    value.span,
                ));
            }
        };

        Ok(Expression::compare(field, op, compared))
    }

    fn invalid_gender(&self, value: &Spanned<Token>) -> CompileError {
        let choices: Vec<_> = Gender::ALL.iter().map(Gender::literal).collect();
        self.error_at(
            ELG0102,
            format!(
                "Field 'gender' expects one of {}, found {}",
                choices.join(", "),
                value.inner
            ),
            value.span,
        )
    }
}
