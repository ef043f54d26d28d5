//! Per-DOI validation results

use std::collections::BTreeMap;

use doicheck_identifiers::{Doi, DoiSet};
use serde::Serialize;

use crate::error::FailureReason;
use crate::registry::types::UpdateRelation;

/// Result of validating one DOI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DoiOutcome {
    /// Registry confirmed the DOI; the list holds its declared updates
    Success(Vec<UpdateRelation>),
    Failure(FailureReason),
}

impl DoiOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DoiOutcome::Success(_))
    }

    pub fn updates(&self) -> &[UpdateRelation] {
        match self {
            DoiOutcome::Success(updates) => updates,
            DoiOutcome::Failure(_) => &[],
        }
    }
}

/// Outcome for every DOI that was submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    outcomes: BTreeMap<Doi, DoiOutcome>,
    cancelled: bool,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, doi: Doi, outcome: DoiOutcome) {
        self.outcomes.insert(doi, outcome);
    }

    pub(crate) fn contains(&self, doi: &Doi) -> bool {
        self.outcomes.contains_key(doi)
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub fn get(&self, doi: &Doi) -> Option<&DoiOutcome> {
        self.outcomes.get(doi)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Doi, &DoiOutcome)> + '_ {
        self.outcomes.iter()
    }

    /// Confirmed DOIs with their update relations
    pub fn successes(&self) -> impl Iterator<Item = (&Doi, &[UpdateRelation])> + '_ {
        self.outcomes.iter().filter_map(|(doi, outcome)| match outcome {
            DoiOutcome::Success(updates) => Some((doi, updates.as_slice())),
            DoiOutcome::Failure(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Doi, &FailureReason)> + '_ {
        self.outcomes.iter().filter_map(|(doi, outcome)| match outcome {
            DoiOutcome::Failure(reason) => Some((doi, reason)),
            DoiOutcome::Success(_) => None,
        })
    }

    /// Confirmed DOIs that declare at least one update
    pub fn updated(&self) -> impl Iterator<Item = (&Doi, &[UpdateRelation])> + '_ {
        self.successes().filter(|(_, updates)| !updates.is_empty())
    }

    /// Whether the run was cut short by cancellation
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Entries for the DOIs in `dois` only; the cancelled flag carries over
    pub fn subset(&self, dois: &DoiSet) -> ValidationReport {
        let outcomes = dois
            .iter()
            .filter_map(|doi| {
                self.outcomes
                    .get(doi)
                    .map(|outcome| (doi.clone(), outcome.clone()))
            })
            .collect();
        ValidationReport {
            outcomes,
            cancelled: self.cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doi(s: &str) -> Doi {
        Doi::parse(s).unwrap()
    }

    fn correction() -> UpdateRelation {
        UpdateRelation {
            doi: "10.1000/old".to_string(),
            update_type: "correction".to_string(),
            label: None,
            updated: None,
        }
    }

    fn sample() -> ValidationReport {
        let mut report = ValidationReport::new();
        report.insert(doi("10.1000/a"), DoiOutcome::Success(vec![]));
        report.insert(doi("10.1000/b"), DoiOutcome::Success(vec![correction()]));
        report.insert(doi("10.1000/c"), DoiOutcome::Failure(FailureReason::NotFound));
        report
    }

    #[test]
    fn test_views() {
        let report = sample();
        assert_eq!(report.len(), 3);
        assert_eq!(report.successes().count(), 2);
        assert_eq!(report.failures().count(), 1);

        let updated: Vec<_> = report.updated().map(|(d, _)| d.as_str()).collect();
        assert_eq!(updated, vec!["10.1000/b"]);
    }

    #[test]
    fn test_subset() {
        let report = sample();
        let wanted: DoiSet = [doi("10.1000/c"), doi("10.1000/zzz")].into_iter().collect();
        let subset = report.subset(&wanted);
        assert_eq!(subset.len(), 1);
        assert_eq!(
            subset.get(&doi("10.1000/c")),
            Some(&DoiOutcome::Failure(FailureReason::NotFound))
        );
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["cancelled"], false);
        assert_eq!(json["outcomes"]["10.1000/c"]["failure"]["kind"], "not_found");
        assert_eq!(
            json["outcomes"]["10.1000/b"]["success"][0]["update_type"],
            "correction"
        );
    }
}
