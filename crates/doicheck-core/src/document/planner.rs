//! Bulk vs chunked reading

use serde::Serialize;

use crate::config::ReaderConfig;
use crate::document::extractor::ContentExtractor;
use crate::document::resource::FileResource;
use crate::document::text_unit::TextStream;
use crate::error::DocumentError;

/// How a document gets read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Whole document as one unit
    Bulk,
    /// Lazy sequence of units
    Chunked,
}

impl ExtractionStrategy {
    /// Read `resource` with this strategy. Bulk yields exactly one unit.
    pub fn read(
        self,
        extractor: &ContentExtractor,
        resource: &FileResource,
    ) -> Result<TextStream, DocumentError> {
        match self {
            ExtractionStrategy::Bulk => {
                let unit = extractor.extract(resource)?;
                Ok(Box::new(std::iter::once(Ok(unit))))
            }
            ExtractionStrategy::Chunked => extractor.extract_stream(resource),
        }
    }
}

/// Chooses a strategy from the file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPlanner {
    threshold_bytes: u64,
}

impl StreamPlanner {
    pub fn new(config: &ReaderConfig) -> Self {
        Self::with_threshold(config.max_chunk_size)
    }

    pub fn with_threshold(threshold_bytes: u64) -> Self {
        Self { threshold_bytes }
    }

    pub fn threshold_bytes(&self) -> u64 {
        self.threshold_bytes
    }

    pub fn plan(&self, resource: &FileResource) -> ExtractionStrategy {
        plan_for_size(resource.size(), self.threshold_bytes)
    }
}

/// Chunked only when `size` is strictly above the threshold
pub fn plan_for_size(size: u64, threshold_bytes: u64) -> ExtractionStrategy {
    if size > threshold_bytes {
        ExtractionStrategy::Chunked
    } else {
        ExtractionStrategy::Bulk
    }
}
