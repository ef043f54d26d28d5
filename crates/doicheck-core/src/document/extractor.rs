//! Format dispatch for text extraction

use tracing::debug;

use crate::config::ReaderConfig;
use crate::document::format::DocumentFormat;
use crate::document::formats::{docx, pdf, plain, pptx};
use crate::document::resource::FileResource;
use crate::document::text_unit::{TextStream, TextUnit};
use crate::error::DocumentError;

/// Turns a validated resource into text.
///
/// Parser failures come back as `DocumentError::ExtractionFailed`; nothing
/// here panics on malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentExtractor {
    chunk_size: usize,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(&ReaderConfig::default())
    }
}

impl ContentExtractor {
    pub fn new(config: &ReaderConfig) -> Self {
        Self {
            chunk_size: config.chunk_size.max(1),
        }
    }

    /// Target chunk size for chunked plain-text reads
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Read the whole document into one unit
    pub fn extract(&self, resource: &FileResource) -> Result<TextUnit, DocumentError> {
        debug!(
            path = %resource.path().display(),
            format = resource.format().display_name(),
            "bulk extraction"
        );
        let text = match resource.format() {
            DocumentFormat::PlainText => plain::read_all(resource)?,
            DocumentFormat::WordProcessing => docx::read_all(resource)?,
            DocumentFormat::Presentation => pptx::read_all(resource)?,
            DocumentFormat::Pdf => pdf::read_all(resource)?,
        };
        Ok(TextUnit::whole(resource.path(), text))
    }

    /// Read the document lazily as a sequence of units.
    ///
    /// Errors opening the container are returned here; errors part-way
    /// through are yielded as the last item of the stream.
    pub fn extract_stream(&self, resource: &FileResource) -> Result<TextStream, DocumentError> {
        debug!(
            path = %resource.path().display(),
            format = resource.format().display_name(),
            chunk_size = self.chunk_size,
            "chunked extraction"
        );
        match resource.format() {
            DocumentFormat::PlainText => plain::stream(resource, self.chunk_size),
            DocumentFormat::WordProcessing => docx::stream(resource),
            DocumentFormat::Presentation => pptx::stream(resource),
            DocumentFormat::Pdf => pdf::stream(resource),
        }
    }
}
