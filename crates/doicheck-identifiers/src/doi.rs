//! `Doi` and `DoiSet`

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extractors::trim_doi_boundary;
use crate::validators::{is_valid_doi, strip_doi_prefix};

/// A normalized DOI.
///
/// DOIs are case-insensitive, so the stored form is trimmed and
/// ASCII-lowercased. Equality, hashing and ordering all operate on that
/// normalized string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Doi(String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a DOI: {0:?}")]
pub struct InvalidDoi(pub String);

impl Doi {
    /// Parse a single identifier.
    ///
    /// Accepts a bare DOI or one carrying a `doi:` / `https://doi.org/`
    /// prefix. Trailing sentence punctuation is dropped with the same rule
    /// the extractor uses; anything else that is not DOI-shaped is rejected.
    pub fn parse(input: &str) -> Option<Doi> {
        let candidate = trim_doi_boundary(strip_doi_prefix(input.trim()));
        if is_valid_doi(candidate) {
            Some(Doi(candidate.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Build from a regex match that already passed the boundary policy.
    pub(crate) fn from_match(matched: &str) -> Doi {
        Doi(matched.to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Doi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Doi {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Doi {
    type Err = InvalidDoi;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Doi::parse(s).ok_or_else(|| InvalidDoi(s.to_string()))
    }
}

impl TryFrom<String> for Doi {
    type Error = InvalidDoi;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Doi> for String {
    fn from(doi: Doi) -> Self {
        doi.0
    }
}

/// A deduplicated set of DOIs.
///
/// Iteration happens to be sorted, which keeps reports stable, but nothing
/// downstream relies on the order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoiSet(BTreeSet<Doi>);

impl DoiSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a DOI; returns `false` if an equal DOI was already present.
    pub fn insert(&mut self, doi: Doi) -> bool {
        self.0.insert(doi)
    }

    pub fn contains(&self, doi: &Doi) -> bool {
        self.0.contains(doi)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Doi> + '_ {
        self.0.iter()
    }

    /// Merge another set into this one.
    pub fn union_with(&mut self, other: DoiSet) {
        self.0.extend(other.0);
    }
}

impl FromIterator<Doi> for DoiSet {
    fn from_iter<I: IntoIterator<Item = Doi>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Doi> for DoiSet {
    fn extend<I: IntoIterator<Item = Doi>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for DoiSet {
    type Item = Doi;
    type IntoIter = std::collections::btree_set::IntoIter<Doi>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DoiSet {
    type Item = &'a Doi;
    type IntoIter = std::collections::btree_set::Iter<'a, Doi>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
