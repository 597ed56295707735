//! Study eligibility configuration

use crate::participation::StudyRef;
use serde::{Deserialize, Serialize};

/// The eligibility rules a study declares
///
/// Deserialised from a study document; every field is optional there.
///
/// ```json
/// {
///   "criteria_expression": "deaf OR hearing_impairment",
///   "min_age_years": 1,
///   "max_age_years": 3,
///   "must_not_have_participated": ["pilot-2023"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyEligibilitySpec {
    pub criteria_expression: Option<String>,
    pub min_age_years: u32,
    pub min_age_months: u32,
    pub min_age_days: u32,
    pub max_age_years: u32,
    pub max_age_months: u32,
    pub max_age_days: u32,
    pub must_have_participated: Vec<StudyRef>,
    pub must_not_have_participated: Vec<StudyRef>,
}

impl StudyEligibilitySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criteria(mut self, expression: impl Into<String>) -> Self {
        self.criteria_expression = Some(expression.into());
        self
    }

    pub fn with_min_age(mut self, years: u32, months: u32, days: u32) -> Self {
        self.min_age_years = years;
        self.min_age_months = months;
        self.min_age_days = days;
        self
    }

    pub fn with_max_age(mut self, years: u32, months: u32, days: u32) -> Self {
        self.max_age_years = years;
        self.max_age_months = months;
        self.max_age_days = days;
        self
    }

    /// Require a valid earlier participation in `study`
    pub fn requiring(mut self, study: impl Into<StudyRef>) -> Self {
        self.must_have_participated.push(study.into());
        self
    }

    /// Exclude children with a valid earlier participation in `study`
    pub fn excluding(mut self, study: impl Into<StudyRef>) -> Self {
        self.must_not_have_participated.push(study.into());
        self
    }

    /// The criteria expression, unless absent or blank
    pub fn criteria(&self) -> Option<&str> {
        self.criteria_expression
            .as_deref()
            .filter(|source| !source.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_criteria_count_as_none() {
        assert_eq!(StudyEligibilitySpec::new().criteria(), None);
        assert_eq!(StudyEligibilitySpec::new().with_criteria("  \n").criteria(), None);
        assert_eq!(
            StudyEligibilitySpec::new().with_criteria("deaf").criteria(),
            Some("deaf")
        );
    }

    #[test]
    fn test_deserialize_partial_document() {
        let spec: StudyEligibilitySpec = serde_json::from_str(
            r#"{"criteria_expression": "deaf", "max_age_years": 2, "must_have_participated": ["intro"]}"#,
        )
        .unwrap();
        assert_eq!(spec.criteria(), Some("deaf"));
        assert_eq!(spec.max_age_years, 2);
        assert_eq!(spec.min_age_days, 0);
        assert_eq!(spec.must_have_participated, vec![StudyRef::from("intro")]);
        assert!(spec.must_not_have_participated.is_empty());
    }
}
