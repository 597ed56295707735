//! Syntax tree of a criteria expression

use crate::{CompareOp, Field, Gender, Keyword, NOT_ANSWERED_LITERAL};
use std::fmt;

/// A node of a compiled criteria expression
///
/// Every flag name and field in a tree produced by the parser is known to the
/// token catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Condition or language flag, e.g. `deaf`, `speaks_fr`
    Flag(String),
    /// `field op value`
    Compare(Comparison),
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag(name.into())
    }

    pub fn compare(field: Field, op: CompareOp, value: CompareValue) -> Self {
        Self::Compare(Comparison { field, op, value })
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Expression) -> Self {
        Self::Not(Box::new(inner))
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Flag names referenced anywhere in the tree, in source order
    pub fn referenced_flags(&self) -> Vec<&str> {
        let mut flags = Vec::new();
        self.collect_flags(&mut flags);
        flags
    }

    fn collect_flags<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Flag(name) => out.push(name),
            Self::Compare(_) => {}
            Self::Not(inner) => inner.collect_flags(out),
            Self::And(l, r) | Self::Or(l, r) => {
                l.collect_flags(out);
                r.collect_flags(out);
            }
        }
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Self::Flag(_) | Self::Compare(_) => 1,
            Self::Not(inner) => 1 + inner.node_count(),
            Self::And(l, r) | Self::Or(l, r) => 1 + l.node_count() + r.node_count(),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Or(..) => Keyword::Or.precedence(),
            Self::And(..) => Keyword::And.precedence(),
            Self::Not(_) => Keyword::Not.precedence(),
            Self::Flag(_) | Self::Compare(_) => u8::MAX,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        if self.precedence() < parent {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

/// Canonical source form. Parentheses appear only where precedence needs them,
/// and `a OR (b OR c)` keeps its grouping since it parsed that way.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(name) => f.write_str(name),
            Self::Compare(cmp) => write!(f, "{cmp}"),
            Self::Not(inner) => {
                f.write_str("NOT ")?;
                inner.fmt_operand(f, Keyword::Not.precedence())
            }
            Self::And(l, r) | Self::Or(l, r) => {
                let prec = self.precedence();
                let keyword = if matches!(self, Self::And(..)) {
                    Keyword::And
                } else {
                    Keyword::Or
                };
                l.fmt_operand(f, prec)?;
                write!(f, " {keyword} ")?;
                // left-associative: an equal-precedence right child was parenthesised
                r.fmt_operand(f, prec + 1)
            }
        }
    }
}

/// `field op value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub field: Field,
    pub op: CompareOp,
    pub value: CompareValue,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareValue {
    Number(i64),
    Gender(Gender),
    /// The `na` literal of `gestational_age_in_weeks`
    NotAnswered,
}

impl fmt::Display for CompareValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Gender(g) => write!(f, "{g}"),
            Self::NotAnswered => f.write_str(NOT_ANSWERED_LITERAL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn age_at_least(days: i64) -> Expression {
        Expression::compare(Field::AgeInDays, CompareOp::GreaterOrEqual, CompareValue::Number(days))
    }

    #[test]
    fn test_display_adds_needed_parentheses() {
        let expr = Expression::and(
            Expression::or(Expression::flag("deaf"), Expression::flag("hearing_impairment")),
            age_at_least(365),
        );
        assert_eq!(
            expr.to_string(),
            "(deaf OR hearing_impairment) AND age_in_days >= 365"
        );
    }

    #[test]
    fn test_display_omits_redundant_parentheses() {
        let expr = Expression::or(
            Expression::and(Expression::flag("deaf"), Expression::flag("dyslexia")),
            Expression::not(Expression::flag("multiple_birth")),
        );
        assert_eq!(expr.to_string(), "deaf AND dyslexia OR NOT multiple_birth");
    }

    #[test]
    fn test_display_keeps_right_grouping() {
        let expr = Expression::or(
            Expression::flag("deaf"),
            Expression::or(Expression::flag("dyslexia"), Expression::flag("speaks_en")),
        );
        assert_eq!(expr.to_string(), "deaf OR (dyslexia OR speaks_en)");
    }

    #[test]
    fn test_display_literals() {
        let na = Expression::compare(
            Field::GestationalAgeInWeeks,
            CompareOp::Equal,
            CompareValue::NotAnswered,
        );
        assert_eq!(na.to_string(), "gestational_age_in_weeks = na");
        let gender = Expression::compare(
            Field::Gender,
            CompareOp::Equal,
            CompareValue::Gender(Gender::Other),
        );
        assert_eq!(gender.to_string(), "gender = other");
    }

    #[test]
    fn test_referenced_flags_in_source_order() {
        let expr = Expression::and(
            Expression::not(Expression::flag("speaks_en")),
            Expression::or(age_at_least(10), Expression::flag("deaf")),
        );
        assert_eq!(expr.referenced_flags(), vec!["speaks_en", "deaf"]);
        assert_eq!(expr.node_count(), 6);
    }
}
