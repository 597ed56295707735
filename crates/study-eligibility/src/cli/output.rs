//! Output formatting utilities

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::IsTerminal;
use study_eligibility_diagnostics::{Diagnostic, Severity};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable JSON
    Json,
    /// Human-readable text
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: ColorMode) {
    let enabled = match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(enabled);
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}

/// Render a diagnostic against the expression it refers to:
///
/// ```text
/// error[ELG0006]: Unexpected 'or' after a complete expression
///   --> 1:6
///    |
///    | deaf or dyslexia
///    |      ^^
///    = help: Boolean operators are case-sensitive: write 'OR' instead of 'or'
/// ```
pub fn render_diagnostic(diag: &Diagnostic, source: &str) -> String {
    let level = match diag.severity {
        Severity::Error => format!("error[{}]", diag.code).red().bold(),
        Severity::Warning => format!("warning[{}]", diag.code).yellow().bold(),
    };
    let mut out = format!("{}: {}\n", level, diag.message.bold());

    if let Some(loc) = &diag.location {
        let gutter = "   |".blue();
        out.push_str(&format!("  {} {}\n", "-->".blue(), loc));
        out.push_str(&format!("{gutter}\n"));
        if let Some(line) = source.lines().nth(loc.line.saturating_sub(1)) {
            let width = source
                .get(loc.offset..loc.offset + loc.length)
                .map_or(1, |s| s.chars().count().max(1));
            let caret = format!(
                "{}{}",
                " ".repeat(loc.column.saturating_sub(1)),
                "^".repeat(width)
            );
            out.push_str(&format!("{gutter} {line}\n"));
            out.push_str(&format!("{gutter} {}\n", caret.red().bold()));
        }
    }

    if let Some(help) = &diag.help {
        out.push_str(&format!("   {} {}\n", "= help:".cyan(), help));
    }
    out
}
