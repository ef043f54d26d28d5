//! DOI extraction from text
//!
//! Boundary policy:
//! - a DOI starts at a word boundary with `10.`, a 4-9 digit registrant and `/`
//! - the suffix runs over `[A-Za-z0-9-._;()/:]` and stops at anything else,
//!   so whitespace always ends a DOI
//! - trailing `.` `,` `;` `:` are dropped
//! - a trailing `)` is dropped only while the DOI has unbalanced parentheses
//!
//! Known limitation: characters outside that alphabet end the match even
//! when the registered DOI contains them. SICI-style DOIs are cut at the
//! first `<`, so `10.1002/(SICI)1097-4679(199911)55:11<1401::AID-JCLP4>3.0.CO;2-G`
//! is reported (and looked up) as `10.1002/(sici)1097-4679(199911)55:11`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::doi::{Doi, DoiSet};
use crate::validators::is_valid_doi;

lazy_static! {
    static ref DOI_REGEX: Regex =
        Regex::new(r"(?i)\b10\.\d{4,9}/[-._;()/:a-z0-9]+").unwrap();
}

/// A DOI found in text, with byte offsets of the trimmed match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoiSpan {
    pub doi: Doi,
    pub start: usize,
    pub end: usize,
}

/// Extract the unique DOIs contained in `text`.
pub fn extract_dois(text: &str) -> DoiSet {
    find_doi_spans(text).into_iter().map(|span| span.doi).collect()
}

/// Every DOI occurrence in `text`, in order of appearance, duplicates kept.
pub fn find_doi_spans(text: &str) -> Vec<DoiSpan> {
    DOI_REGEX
        .find_iter(text)
        .filter_map(|m| {
            let trimmed = trim_doi_boundary(m.as_str());
            if !is_valid_doi(trimmed) {
                return None;
            }
            Some(DoiSpan {
                doi: Doi::from_match(trimmed),
                start: m.start(),
                end: m.start() + trimmed.len(),
            })
        })
        .collect()
}

/// Drop sentence punctuation and unmatched closing parentheses from the end
/// of a candidate.
pub fn trim_doi_boundary(candidate: &str) -> &str {
    let mut s = candidate;
    loop {
        if let Some(stripped) = s.strip_suffix(|c: char| matches!(c, '.' | ',' | ';' | ':')) {
            s = stripped;
        } else if s.ends_with(')') && s.matches(')').count() > s.matches('(').count() {
            s = &s[..s.len() - 1];
        } else {
            return s;
        }
    }
}
