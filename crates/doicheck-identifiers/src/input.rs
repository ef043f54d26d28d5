//! Direct DOI input, for audits that involve no document

use serde::{Deserialize, Serialize};

use crate::doi::DoiSet;
use crate::extractors::extract_dois;

/// DOIs supplied by the caller instead of extracted from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoiInput {
    /// One string, possibly a comma-separated list
    Single(String),
    /// Already-split entries
    List(Vec<String>),
}

/// Result of turning a `DoiInput` into a set.
///
/// `rejected` holds entries that contained no recognizable DOI. They are
/// reported as given; nothing tries to repair them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectDois {
    pub dois: DoiSet,
    pub rejected: Vec<String>,
}

impl DoiInput {
    /// Non-empty, trimmed entries. Commas separate entries in a single
    /// string; semicolons do not, since they may appear inside a DOI.
    pub fn entries(&self) -> Vec<&str> {
        let raw: Vec<&str> = match self {
            DoiInput::Single(s) => s.split(',').collect(),
            DoiInput::List(items) => items.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    pub fn into_doi_set(self) -> DirectDois {
        let mut direct = DirectDois::default();
        for entry in self.entries() {
            let found = extract_dois(entry);
            if found.is_empty() {
                direct.rejected.push(entry.to_string());
            } else {
                direct.dois.union_with(found);
            }
        }
        direct
    }
}

impl From<&str> for DoiInput {
    fn from(value: &str) -> Self {
        DoiInput::Single(value.to_string())
    }
}

impl From<String> for DoiInput {
    fn from(value: String) -> Self {
        DoiInput::Single(value)
    }
}

impl From<Vec<String>> for DoiInput {
    fn from(value: Vec<String>) -> Self {
        DoiInput::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_comma_separated() {
        let input = DoiInput::from(
            "https://doi.org/10.1002/ppap.200700154, doi:10.1001/jama.1994.03520230061039",
        );
        let direct = input.into_doi_set();
        assert_eq!(direct.dois.len(), 2);
        assert!(direct.rejected.is_empty());
    }

    #[test]
    fn test_rejected_entries_are_kept_verbatim() {
        let input = DoiInput::List(vec![
            "10.1038/nature12373".to_string(),
            "  not-a-doi ".to_string(),
            "".to_string(),
        ]);
        let direct = input.into_doi_set();
        assert_eq!(direct.dois.len(), 1);
        assert_eq!(direct.rejected, vec!["not-a-doi".to_string()]);
    }

    #[test]
    fn test_duplicates_across_entries() {
        let direct = DoiInput::from("10.1038/nature12373,10.1038/NATURE12373").into_doi_set();
        assert_eq!(direct.dois.len(), 1);
    }
}
