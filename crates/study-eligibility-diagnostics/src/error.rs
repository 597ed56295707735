//! Compile-time error types for criteria expressions

use crate::{ELG0001, ErrorCode, SourceLocation, Span};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// The expression is rejected
    Error,
    /// The expression is accepted but probably not what the author meant
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A message presented to the study author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    pub message: String,
    pub location: Option<SourceLocation>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

/// Error raised while compiling a criteria expression
///
/// Both variants mean "malformed expression" to the caller. `Lex` is raised for
/// characters the language does not know at all; `Parse` covers structural
/// problems as well as identifiers missing from the token catalog, which are
/// told apart by their error code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Unrecognised character
    #[error("{code}: {message}")]
    Lex {
        code: ErrorCode,
        message: String,
        expression: String,
        location: SourceLocation,
        snippet: char,
    },

    /// Malformed structure or unknown identifier
    #[error("{code}: {message}")]
    Parse {
        code: ErrorCode,
        message: String,
        expression: String,
        location: Option<SourceLocation>,
        context: Option<String>,
    },
}

/// Lexer errors surface under this name
pub type LexError = CompileError;

/// Parser errors surface under this name
pub type ParseError = CompileError;

impl CompileError {
    /// Unrecognised character `snippet` at byte offset `offset`
    pub fn unexpected_char(snippet: char, offset: usize, expression: &str) -> Self {
        let span = Span::new(offset, offset + snippet.len_utf8());
        let location = SourceLocation::from_span(span, expression);
        Self::Lex {
            code: ELG0001,
            message: format!(
                "Unexpected character '{}' at line {}, column {}",
                snippet, location.line, location.column
            ),
            expression: expression.to_string(),
            location,
            snippet,
        }
    }

    /// Lexical error other than an unknown character
    pub fn lex(code: ErrorCode, message: impl Into<String>, span: Span, expression: &str) -> Self {
        let location = SourceLocation::from_span(span, expression);
        let snippet = expression[span.start..].chars().next().unwrap_or(' ');
        Self::Lex {
            code,
            message: message.into(),
            expression: expression.to_string(),
            location,
            snippet,
        }
    }

    /// Parse error without a location
    pub fn parse(
        code: ErrorCode,
        message: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            expression: expression.into(),
            location: None,
            context: None,
        }
    }

    /// Parse error pointing at `span`
    pub fn parse_at(
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        expression: &str,
    ) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            expression: expression.to_string(),
            location: Some(SourceLocation::from_span(span, expression)),
            context: None,
        }
    }

    /// Attach a hint about what was expected
    pub fn with_context(self, hint: impl Into<String>) -> Self {
        match self {
            Self::Parse {
                code,
                message,
                expression,
                location,
                ..
            } => Self::Parse {
                code,
                message,
                expression,
                location,
                context: Some(hint.into()),
            },
            lex => lex,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Lex { code, .. } | Self::Parse { code, .. } => *code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Lex { message, .. } | Self::Parse { message, .. } => message,
        }
    }

    /// Source text of the rejected expression
    pub fn expression(&self) -> &str {
        match self {
            Self::Lex { expression, .. } | Self::Parse { expression, .. } => expression,
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Lex { location, .. } => Some(location),
            Self::Parse { location, .. } => location.as_ref(),
        }
    }

    pub fn is_lex_error(&self) -> bool {
        matches!(self, Self::Lex { .. })
    }

    /// True when the expression names something outside the token catalog
    pub fn is_unknown_identifier(&self) -> bool {
        self.code().is_resolution_error()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code(), self.message());
        if let Some(loc) = self.location() {
            diag = diag.with_location(loc.clone());
        }
        let help = match self {
            Self::Parse {
                context: Some(ctx), ..
            } => Some(ctx.clone()),
            _ => self.code().info().help.map(str::to_string),
        };
        if let Some(help) = help {
            diag = diag.with_help(help);
        }
        diag
    }
}
