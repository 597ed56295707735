//! Participation-history rule
//!
//! A study can require a valid earlier participation in some studies and
//! forbid one in others. A session-based response only counts once it has at
//! least one completed step; an externally hosted response always counts.

use crate::study::StudyEligibilitySpec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a study
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyRef(String);

impl StudyRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StudyRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StudyRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for StudyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a study collects responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Hosted here, completion tracked step by step
    Session,
    /// Hosted elsewhere, no step tracking
    External,
}

/// One child's response to one study
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationRecord {
    pub study: StudyRef,
    pub response_kind: ResponseKind,
    /// Completed step identifiers, in order
    #[serde(default)]
    pub sequence: Vec<String>,
}

impl ParticipationRecord {
    pub fn new(study: impl Into<StudyRef>, response_kind: ResponseKind) -> Self {
        Self {
            study: study.into(),
            response_kind,
            sequence: Vec::new(),
        }
    }

    pub fn session(study: impl Into<StudyRef>, sequence: &[&str]) -> Self {
        let mut record = Self::new(study, ResponseKind::Session);
        record.sequence = sequence.iter().map(|s| s.to_string()).collect();
        record
    }

    pub fn external(study: impl Into<StudyRef>) -> Self {
        Self::new(study, ResponseKind::External)
    }

    /// Whether this record counts as having taken part
    pub fn is_valid(&self) -> bool {
        match self.response_kind {
            ResponseKind::Session => !self.sequence.is_empty(),
            ResponseKind::External => true,
        }
    }
}

/// Outcome of the participation-history rule
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParticipationCheck {
    /// Required studies without a valid record
    pub missing: Vec<StudyRef>,
    /// Forbidden studies with a valid record
    pub forbidden: Vec<StudyRef>,
}

impl ParticipationCheck {
    pub fn passed(&self) -> bool {
        self.missing.is_empty() && self.forbidden.is_empty()
    }
}

/// Check `records` against the study's required and forbidden lists
pub fn assess_participation(
    spec: &StudyEligibilitySpec,
    records: &[ParticipationRecord],
) -> ParticipationCheck {
    let participated: HashSet<&StudyRef> = records
        .iter()
        .filter(|record| {
            let valid = record.is_valid();
            if !valid {
                log::debug!("ignoring incomplete session response to {}", record.study);
            }
            valid
        })
        .map(|record| &record.study)
        .collect();

    ParticipationCheck {
        missing: spec
            .must_have_participated
            .iter()
            .filter(|study| !participated.contains(study))
            .cloned()
            .collect(),
        forbidden: spec
            .must_not_have_participated
            .iter()
            .filter(|study| participated.contains(study))
            .cloned()
            .collect(),
    }
}

pub fn check_participation(spec: &StudyEligibilitySpec, records: &[ParticipationRecord]) -> bool {
    assess_participation(spec, records).passed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validity() {
        assert!(!ParticipationRecord::session("a", &[]).is_valid());
        assert!(ParticipationRecord::session("a", &["intro"]).is_valid());
        assert!(ParticipationRecord::external("a").is_valid());
    }

    #[test]
    fn test_assess_reports_offending_studies() {
        let spec = StudyEligibilitySpec::new()
            .requiring("a")
            .requiring("b")
            .excluding("c");
        let records = vec![
            ParticipationRecord::session("a", &["intro", "task"]),
            ParticipationRecord::session("b", &[]),
            ParticipationRecord::external("c"),
        ];
        let check = assess_participation(&spec, &records);
        assert_eq!(
            check,
            ParticipationCheck {
                missing: vec![StudyRef::from("b")],
                forbidden: vec![StudyRef::from("c")],
            }
        );
        assert!(!check.passed());
    }

    #[test]
    fn test_record_deserializes() {
        let record: ParticipationRecord =
            serde_json::from_str(r#"{"study": "pilot", "response_kind": "external"}"#).unwrap();
        assert_eq!(record, ParticipationRecord::external("pilot"));
    }
}
