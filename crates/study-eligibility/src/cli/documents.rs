//! JSON input documents for the `check` command

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use study_eligibility_ast::Gender;
use study_eligibility_diagnostics::{ELG0300, ELG0303};
use study_eligibility_eval::{ChildEvaluationContext, age_in_days_from_birthday};

/// A child as described in a child document
///
/// ```json
/// {
///   "birthday": "2022-03-14",
///   "conditions": ["deaf"],
///   "languages": ["en", "ase"],
///   "gender": "female",
///   "gestational_age_in_weeks": null
/// }
/// ```
///
/// `age_in_days` takes precedence over `birthday` when both are given.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChildRecord {
    pub conditions: Vec<String>,
    pub languages: Vec<String>,
    pub gender: Gender,
    pub birthday: Option<NaiveDate>,
    pub age_in_days: Option<i64>,
    pub gestational_age_in_weeks: Option<i64>,
}

impl ChildRecord {
    /// Resolve catalog names and the age on `today`
    pub fn to_context(&self, today: NaiveDate) -> Result<ChildEvaluationContext> {
        let age_in_days = match (self.age_in_days, self.birthday) {
            (Some(days), _) => days,
            (None, Some(birthday)) => age_in_days_from_birthday(birthday, today),
            (None, None) => {
                bail!("{ELG0303}: child record needs either `birthday` or `age_in_days`")
            }
        };

        ChildEvaluationContext::builder(age_in_days)
            .conditions(self.conditions.iter().cloned())
            .languages(self.languages.iter().cloned())
            .gender(self.gender)
            .gestational_age_in_weeks(self.gestational_age_in_weeks)
            .build()
            .map_err(|err| anyhow::anyhow!("{}: {}", err.code(), err))
    }
}

/// Read and deserialize a JSON document
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{ELG0300}: invalid JSON document: {}", path.display()))
}
