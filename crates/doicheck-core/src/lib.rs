//! doicheck-core: DOI auditing for documents
//!
//! This library provides:
//! - Document validation and text extraction (plain text, docx, pptx, PDF)
//! - Bulk or chunked reading depending on document size
//! - DOI collection across text units
//! - Crossref lookups with bounded concurrency, timeouts and retries
//! - An audit pipeline tying the above together
//!
//! DOI recognition itself lives in `doicheck-identifiers`.

pub mod audit;
pub mod collector;
pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod registry;

// Re-export main types for convenience
pub use audit::{
    scan_document, scan_documents, scan_documents_blocking, AuditReport, AuditedDocument, Auditor,
    DirectAudit, DocumentAudit, DocumentOutcome, DocumentScan,
};
pub use collector::DoiCollector;
pub use config::{ConfigError, DoicheckConfig, ReaderConfig, RegistryConfig};
pub use document::{
    ChunkIndex, ContentExtractor, DocumentFormat, ExtractionStrategy, FileResource, Provenance,
    StreamPlanner, TextStream, TextUnit,
};
pub use error::{
    ConfigurationError, DocumentError, DoicheckError, FailureReason, InvalidDocumentReason,
    RegistryRequestFailed, Result,
};
pub use registry::{
    CrossrefClient, DoiOutcome, RetryPolicy, UpdateRelation, ValidationOptions,
    ValidationOrchestrator, ValidationReport, WorkFetcher, WorkMetadata,
};

pub use doicheck_identifiers::{Doi, DoiInput, DoiSet};
