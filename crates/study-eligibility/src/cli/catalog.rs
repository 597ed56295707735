//! Catalog command implementation

use super::output::{self, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use study_eligibility_ast::{Gender, NOT_ANSWERED_LITERAL, catalog};

#[derive(Debug, Serialize)]
pub struct CatalogListing {
    pub conditions: Vec<&'static str>,
    pub languages: Vec<LanguageEntry>,
    pub fields: Vec<&'static str>,
    pub gender_literals: Vec<&'static str>,
    pub not_answered_literal: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LanguageEntry {
    pub flag: String,
    pub code: &'static str,
    pub name: &'static str,
}

pub fn listing() -> CatalogListing {
    CatalogListing {
        conditions: catalog::conditions().collect(),
        languages: catalog::languages()
            .map(|(code, name)| LanguageEntry {
                flag: format!("{}{}", catalog::LANGUAGE_FLAG_PREFIX, code),
                code,
                name,
            })
            .collect(),
        fields: catalog::fields().map(|f| f.name()).collect(),
        gender_literals: Gender::ALL.iter().map(Gender::literal).collect(),
        not_answered_literal: NOT_ANSWERED_LITERAL,
    }
}

pub fn catalog(format: OutputFormat) -> Result<()> {
    let listing = listing();
    match format {
        OutputFormat::Json => println!("{}", output::to_json(&listing)?),
        OutputFormat::Pretty => {
            println!("{}", "Conditions".bold());
            for condition in &listing.conditions {
                println!("  {condition}");
            }
            println!("{}", "Languages".bold());
            for language in &listing.languages {
                println!("  {:<14} {}", language.flag, language.name.dimmed());
            }
            println!("{}", "Fields".bold());
            for field in &listing.fields {
                println!("  {field}");
            }
            println!(
                "{} {}",
                "Gender literals:".bold(),
                listing.gender_literals.join(", ")
            );
            println!(
                "{} gestational_age_in_weeks = {}",
                "Not answered:".bold(),
                listing.not_answered_literal
            );
        }
    }
    Ok(())
}
