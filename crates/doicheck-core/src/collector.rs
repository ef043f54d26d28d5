//! Accumulates DOIs across the text units of one document

use doicheck_identifiers::{extract_dois, DoiSet};

use crate::document::TextUnit;
use crate::error::DocumentError;

/// Set-union of the DOIs found in every unit added so far.
///
/// The result does not depend on how the text was split into units, as long
/// as no DOI straddles a unit boundary.
#[derive(Debug, Default)]
pub struct DoiCollector {
    dois: DoiSet,
    units_seen: usize,
}

impl DoiCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, unit: &TextUnit) {
        self.dois.union_with(extract_dois(&unit.text));
        self.units_seen += 1;
    }

    pub fn units_seen(&self) -> usize {
        self.units_seen
    }

    /// DOIs collected so far, without consuming the collector
    pub fn dois(&self) -> &DoiSet {
        &self.dois
    }

    pub fn finish(self) -> DoiSet {
        self.dois
    }

    /// Drain a stream of units into one set.
    ///
    /// The first error aborts collection; partial results are discarded.
    pub fn collect<I>(units: I) -> Result<DoiSet, DocumentError>
    where
        I: IntoIterator<Item = Result<TextUnit, DocumentError>>,
    {
        let mut collector = Self::new();
        for unit in units {
            collector.add(&unit?);
        }
        Ok(collector.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn unit(i: usize, text: &str) -> TextUnit {
        TextUnit::chunk(Path::new("refs.txt"), i, text.to_string())
    }

    #[test]
    fn test_union_across_units() {
        let mut collector = DoiCollector::new();
        collector.add(&unit(0, "first 10.1038/nature12373 and 10.1000/a"));
        collector.add(&unit(1, "again 10.1038/NATURE12373."));
        collector.add(&unit(2, "nothing here"));

        assert_eq!(collector.units_seen(), 3);
        let dois = collector.finish();
        assert_eq!(dois.len(), 2);
    }

    #[test]
    fn test_split_equals_whole() {
        let text = "A 10.1016/j.cell.2020.01.001\nB doi:10.1126/science.1234567\nC 10.1016/j.cell.2020.01.001";
        let whole = extract_dois(text);

        let (left, right) = text.split_at(text.find('\n').unwrap() + 1);
        let split = DoiCollector::collect(vec![Ok(unit(0, left)), Ok(unit(1, right))]).unwrap();

        assert_eq!(split, whole);
    }

    #[test]
    fn test_error_aborts() {
        let units = vec![
            Ok(unit(0, "10.1000/a")),
            Err(DocumentError::extraction_failed("refs.txt", "truncated")),
            Ok(unit(2, "10.1000/b")),
        ];
        assert!(DoiCollector::collect(units).is_err());
    }

    #[test]
    fn test_empty_stream() {
        let dois = DoiCollector::collect(Vec::new()).unwrap();
        assert!(dois.is_empty());
    }
}
