//! Identifier validation functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Whole-string DOI check; same alphabet as the extraction pattern
    static ref DOI_PATTERN: Regex =
        Regex::new(r"(?i)^10\.\d{4,9}/[-._;()/:a-z0-9]+$").unwrap();
}

/// Resolver and scheme prefixes people paste in front of a DOI
const DOI_PREFIXES: [&str; 5] = [
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

/// True if `doi` is exactly one DOI and nothing else.
pub fn is_valid_doi(doi: &str) -> bool {
    DOI_PATTERN.is_match(doi)
}

/// Remove a leading `doi:` or resolver URL, case-insensitively.
pub fn strip_doi_prefix(input: &str) -> &str {
    for prefix in DOI_PREFIXES {
        let n = prefix.len();
        if input.len() >= n
            && input.is_char_boundary(n)
            && input[..n].eq_ignore_ascii_case(prefix)
        {
            return input[n..].trim_start();
        }
    }
    input
}
