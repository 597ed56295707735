//! Check command implementation

use super::documents::{ChildRecord, load_json};
use super::output::{self, OutputFormat};
use crate::eligibility::{CriteriaOutcome, EligibilityChecker, EligibilityReport};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use colored::Colorize;
use std::path::PathBuf;
use study_eligibility_eval::{ParticipationRecord, StudyEligibilitySpec};

/// Configuration for check command
pub struct CheckConfig {
    pub study: PathBuf,
    pub child: PathBuf,
    pub responses: Option<PathBuf>,
    /// Reference date for birthdays; the local date when absent
    pub today: Option<NaiveDate>,
    pub format: OutputFormat,
}

/// Load the documents named in `config` and assess the child
pub fn run_check(config: &CheckConfig) -> Result<EligibilityReport> {
    let spec: StudyEligibilitySpec = load_json(&config.study).context("Failed to load study")?;
    let record: ChildRecord = load_json(&config.child).context("Failed to load child")?;
    let responses: Vec<ParticipationRecord> = match &config.responses {
        Some(path) => load_json(path).context("Failed to load responses")?,
        None => Vec::new(),
    };

    let today = config.today.unwrap_or_else(|| Local::now().date_naive());
    let child = record.to_context(today)?;
    log::debug!("assessing child aged {} days on {}", child.age_in_days(), today);

    Ok(EligibilityChecker::new().assess(&child, &spec, &responses))
}

pub fn check(config: CheckConfig) -> Result<()> {
    let report = run_check(&config)?;
    match config.format {
        OutputFormat::Json => println!("{}", output::to_json(&report)?),
        OutputFormat::Pretty => print_report(&report),
    }
    Ok(())
}

fn mark(passed: bool) -> colored::ColoredString {
    if passed {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    }
}

fn print_report(report: &EligibilityReport) {
    let verdict = if report.eligible {
        "ELIGIBLE".green().bold()
    } else {
        "NOT ELIGIBLE".red().bold()
    };
    println!("{verdict}");

    let (lower, upper) = report.age_bounds;
    println!(
        "  {} age: {} days (range {}..={}, offset {:+})",
        mark(report.age_in_days >= 0 && report.age_range),
        report.age_in_days,
        lower,
        upper,
        report.day_offset
    );

    println!("  {} participation", mark(report.participation.passed()));
    for study in &report.participation.missing {
        println!("      missing required study {}", study.to_string().cyan());
    }
    for study in &report.participation.forbidden {
        println!("      took part in excluded study {}", study.to_string().cyan());
    }

    let criteria = match &report.criteria {
        CriteriaOutcome::NotSet => "not set".dimmed().to_string(),
        CriteriaOutcome::Passed => "satisfied".to_string(),
        CriteriaOutcome::Failed => "not satisfied".to_string(),
        CriteriaOutcome::Invalid { message } => format!("invalid expression: {message}"),
        CriteriaOutcome::Error { message } => format!("evaluation error: {message}"),
    };
    println!("  {} criteria: {}", mark(report.criteria.passed()), criteria);
}
