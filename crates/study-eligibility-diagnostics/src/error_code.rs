//! Error codes for criteria expressions
//!
//! Error code ranges:
//! - ELG0001-ELG0099: Lexical and syntax errors
//! - ELG0100-ELG0199: Identifier resolution and field typing errors
//! - ELG0200-ELG0299: Evaluation errors
//! - ELG0300-ELG0399: Input document errors (children, studies, responses)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Description and help text for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Lexical or syntax error (0001-0099)
    pub const fn is_syntax_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Identifier resolution or field typing error (0100-0199)
    pub const fn is_resolution_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Evaluation error (0200-0299)
    pub const fn is_evaluation_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Input document error (0300-0399)
    pub const fn is_input_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ELG{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    pub description: &'static str,
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Lexical and syntax errors (0001-0099)
    map.insert(
        1,
        ErrorInfo::new("Unexpected character")
            .with_help("Expressions may only contain identifiers, integers, comparators and parentheses"),
    );
    map.insert(2, ErrorInfo::new("Unexpected end of expression"));
    map.insert(3, ErrorInfo::new("Unexpected token"));
    map.insert(4, ErrorInfo::new("Integer literal out of range"));
    map.insert(5, ErrorInfo::new("Missing closing parenthesis"));
    map.insert(
        6,
        ErrorInfo::new("Unexpected input after expression")
            .with_help("Boolean operators must be written in upper case: AND, OR, NOT"),
    );
    map.insert(7, ErrorInfo::new("Expected a value after comparator"));
    map.insert(8, ErrorInfo::new("Empty expression"));
    map.insert(
        9,
        ErrorInfo::new("Expression nested too deeply")
            .with_help("Remove redundant parentheses or NOT operators, or split long AND/OR chains"),
    );

    // Resolution and typing errors (0100-0199)
    map.insert(
        100,
        ErrorInfo::new("Unknown identifier")
            .with_help("Run `eligibility catalog` to list the known conditions, languages and fields"),
    );
    map.insert(
        101,
        ErrorInfo::new("Identifier cannot be compared")
            .with_help("Only age_in_days, gestational_age_in_weeks, gender and num_languages take a comparator"),
    );
    map.insert(102, ErrorInfo::new("Invalid value for field"));
    map.insert(103, ErrorInfo::new("Comparator not supported for field"));
    map.insert(104, ErrorInfo::new("Field used without a comparison"));

    // Evaluation errors (0200-0299)
    map.insert(200, ErrorInfo::new("Evaluation failed"));
    map.insert(201, ErrorInfo::new("Flag not present in evaluation context"));

    // Input document errors (0300-0399)
    map.insert(300, ErrorInfo::new("Invalid input document"));
    map.insert(301, ErrorInfo::new("Unknown condition"));
    map.insert(302, ErrorInfo::new("Unknown language code"));
    map.insert(303, ErrorInfo::new("Missing child age"));

    map
});

// Lexical and syntax errors
pub const ELG0001: ErrorCode = ErrorCode::new(1);
pub const ELG0002: ErrorCode = ErrorCode::new(2);
pub const ELG0003: ErrorCode = ErrorCode::new(3);
pub const ELG0004: ErrorCode = ErrorCode::new(4);
pub const ELG0005: ErrorCode = ErrorCode::new(5);
pub const ELG0006: ErrorCode = ErrorCode::new(6);
pub const ELG0007: ErrorCode = ErrorCode::new(7);
pub const ELG0008: ErrorCode = ErrorCode::new(8);
pub const ELG0009: ErrorCode = ErrorCode::new(9);

// Resolution and typing errors
pub const ELG0100: ErrorCode = ErrorCode::new(100);
pub const ELG0101: ErrorCode = ErrorCode::new(101);
pub const ELG0102: ErrorCode = ErrorCode::new(102);
pub const ELG0103: ErrorCode = ErrorCode::new(103);
pub const ELG0104: ErrorCode = ErrorCode::new(104);

// Evaluation errors
pub const ELG0200: ErrorCode = ErrorCode::new(200);
pub const ELG0201: ErrorCode = ErrorCode::new(201);

// Input document errors
pub const ELG0300: ErrorCode = ErrorCode::new(300);
pub const ELG0301: ErrorCode = ErrorCode::new(301);
pub const ELG0302: ErrorCode = ErrorCode::new(302);
pub const ELG0303: ErrorCode = ErrorCode::new(303);
