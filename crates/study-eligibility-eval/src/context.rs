//! Evaluation context: the facts about one child that criteria can test

use crate::error::{EvalError, EvalResult};
use crate::flags::FlagSet;
use serde::{Deserialize, Serialize};
use study_eligibility_ast::Gender;
use study_eligibility_ast::catalog::{self, FlagRef};

/// Everything a criteria expression may ask about a child
///
/// Built once per (child, evaluation) and read-only afterwards.
/// `gestational_age_in_weeks` of `None` means the parent was not sure or
/// preferred not to answer, which criteria spell `na`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEvaluationContext {
    conditions: FlagSet,
    languages: FlagSet,
    gender: Gender,
    age_in_days: i64,
    gestational_age_in_weeks: Option<i64>,
}

impl ChildEvaluationContext {
    pub fn builder(age_in_days: i64) -> ChildEvaluationContextBuilder {
        ChildEvaluationContextBuilder::new(age_in_days)
    }

    /// Build from already-resolved bit sets
    pub fn from_parts(
        conditions: FlagSet,
        languages: FlagSet,
        gender: Gender,
        age_in_days: i64,
        gestational_age_in_weeks: Option<i64>,
    ) -> Self {
        Self {
            conditions,
            languages,
            gender,
            age_in_days,
            gestational_age_in_weeks,
        }
    }

    pub fn conditions(&self) -> FlagSet {
        self.conditions
    }

    pub fn languages(&self) -> FlagSet {
        self.languages
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Negative for children not yet born
    pub fn age_in_days(&self) -> i64 {
        self.age_in_days
    }

    pub fn gestational_age_in_weeks(&self) -> Option<i64> {
        self.gestational_age_in_weeks
    }

    /// Number of languages spoken
    pub fn num_languages(&self) -> i64 {
        i64::from(self.languages.len())
    }

    /// Whether the flag `name` (condition or `speaks_<code>`) is set
    pub fn has_flag(&self, name: &str) -> EvalResult<bool> {
        match catalog::lookup_flag(name) {
            Some(flag) => Ok(self.has(flag)),
            None => Err(EvalError::unknown_flag(name)),
        }
    }

    pub fn has(&self, flag: FlagRef) -> bool {
        match flag {
            FlagRef::Condition(bit) => self.conditions.contains(bit),
            FlagRef::Language(bit) => self.languages.contains(bit),
        }
    }
}

/// Builder for [`ChildEvaluationContext`] taking catalog names
///
/// Names are checked in [`build`](Self::build), which reports the first
/// unknown condition or language code.
#[derive(Debug, Clone)]
pub struct ChildEvaluationContextBuilder {
    conditions: Vec<String>,
    languages: Vec<String>,
    gender: Gender,
    age_in_days: i64,
    gestational_age_in_weeks: Option<i64>,
}

impl ChildEvaluationContextBuilder {
    fn new(age_in_days: i64) -> Self {
        Self {
            conditions: Vec::new(),
            languages: Vec::new(),
            gender: Gender::default(),
            age_in_days,
            gestational_age_in_weeks: None,
        }
    }

    pub fn condition(mut self, name: impl Into<String>) -> Self {
        self.conditions.push(name.into());
        self
    }

    pub fn conditions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.extend(names.into_iter().map(Into::into));
        self
    }

    /// Language by code, e.g. `"en"`
    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.languages.push(code.into());
        self
    }

    pub fn languages<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn gestational_age_in_weeks(mut self, weeks: Option<i64>) -> Self {
        self.gestational_age_in_weeks = weeks;
        self
    }

    pub fn build(self) -> EvalResult<ChildEvaluationContext> {
        let mut conditions = FlagSet::EMPTY;
        for name in &self.conditions {
            let bit =
                catalog::condition_bit(name).ok_or_else(|| EvalError::unknown_condition(name))?;
            conditions.insert(bit);
        }

        let mut languages = FlagSet::EMPTY;
        for code in &self.languages {
            let bit = catalog::language_bit(code).ok_or_else(|| EvalError::unknown_language(code))?;
            languages.insert(bit);
        }

        Ok(ChildEvaluationContext {
            conditions,
            languages,
            gender: self.gender,
            age_in_days: self.age_in_days,
            gestational_age_in_weeks: self.gestational_age_in_weeks,
        })
    }
}
