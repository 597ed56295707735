//! Validate command implementation

use super::output::{self, OutputFormat};
use crate::eligibility::validate_expression;
use anyhow::{Result, bail};
use colored::Colorize;
use serde::Serialize;
use study_eligibility_diagnostics::{Diagnostic, Severity};

/// Configuration for validate command
pub struct ValidateConfig {
    pub expressions: Vec<String>,
    pub format: OutputFormat,
}

/// Validation result for a single expression
#[derive(Debug, Serialize)]
pub struct ValidationResult {
    pub expression: String,
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn validate_all(expressions: &[String]) -> Vec<ValidationResult> {
    expressions
        .iter()
        .map(|expression| {
            let diagnostics = validate_expression(expression);
            ValidationResult {
                expression: expression.clone(),
                valid: diagnostics.iter().all(|d| d.severity != Severity::Error),
                diagnostics,
            }
        })
        .collect()
}

/// Validate criteria expressions; fails when any of them does not compile
pub fn validate(config: ValidateConfig) -> Result<()> {
    if config.expressions.is_empty() {
        bail!("No expressions specified for validation");
    }

    let results = validate_all(&config.expressions);
    let invalid = results.iter().filter(|r| !r.valid).count();

    match config.format {
        OutputFormat::Json => println!("{}", output::to_json(&results)?),
        OutputFormat::Pretty => {
            for result in &results {
                print_validation_result(result);
            }
        }
    }

    if invalid > 0 {
        bail!("{} of {} expression(s) invalid", invalid, results.len());
    }
    if config.format == OutputFormat::Pretty {
        println!(
            "{}",
            output::format_success(&format!("{} expression(s) valid", results.len()))
        );
    }
    Ok(())
}

fn print_validation_result(result: &ValidationResult) {
    let status = if result.valid {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("{} {}", status, result.expression.cyan());
    for diag in &result.diagnostics {
        print!("{}", output::render_diagnostic(diag, &result.expression));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_expression_is_valid_with_warning() {
        let results = validate_all(&["".to_string(), "deaf OR NOT dyslexia".to_string()]);
        assert!(results[0].valid);
        assert_eq!(results[0].diagnostics.len(), 1);
        assert!(results[1].valid);
        assert!(results[1].diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_expression_fails_command() {
        let config = ValidateConfig {
            expressions: vec!["speaks_esperanto".to_string()],
            format: OutputFormat::Json,
        };
        assert!(validate(config).is_err());
    }
}
