//! Document audit pipeline
//!
//! path → FileResource → StreamPlanner → ContentExtractor → DoiCollector,
//! then one validation pass over the DOIs of every document together.

use std::path::{Path, PathBuf};

use doicheck_identifiers::{DoiInput, DoiSet};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::collector::DoiCollector;
use crate::config::ReaderConfig;
use crate::document::{
    ContentExtractor, DocumentFormat, ExtractionStrategy, FileResource, StreamPlanner,
};
use crate::error::DocumentError;
use crate::registry::{ValidationOrchestrator, ValidationReport, WorkFetcher};

/// DOIs found in one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentScan {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub strategy: ExtractionStrategy,
    /// Text units read
    pub units: usize,
    pub dois: DoiSet,
}

/// Scan result for one requested path
#[derive(Debug)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub scan: Result<DocumentScan, DocumentError>,
}

/// Extract the DOIs of a single document
pub fn scan_document(
    path: impl AsRef<Path>,
    config: &ReaderConfig,
) -> Result<DocumentScan, DocumentError> {
    let resource = FileResource::open(path.as_ref(), config)?;
    let strategy = StreamPlanner::new(config).plan(&resource);
    let extractor = ContentExtractor::new(config);

    let mut collector = DoiCollector::new();
    for unit in strategy.read(&extractor, &resource)? {
        collector.add(&unit?);
    }

    let scan = DocumentScan {
        path: resource.path().to_path_buf(),
        format: resource.format(),
        strategy,
        units: collector.units_seen(),
        dois: collector.finish(),
    };
    info!(
        path = %scan.path.display(),
        format = scan.format.display_name(),
        strategy = ?scan.strategy,
        units = scan.units,
        dois = scan.dois.len(),
        "document scanned"
    );
    Ok(scan)
}

/// Scan documents one after another; a failing document never stops the rest
pub fn scan_documents<I, P>(paths: I, config: &ReaderConfig) -> Vec<DocumentOutcome>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref().to_path_buf();
            let scan = scan_document(&path, config);
            if let Err(e) = &scan {
                warn!(path = %path.display(), error = %e, "document not processed");
            }
            DocumentOutcome { path, scan }
        })
        .collect()
}

/// `scan_documents` on tokio's blocking thread pool.
///
/// File I/O, inflation, XML parsing and pdfium all block, so async callers
/// go through here. If the scan thread dies, every path is reported as an
/// extraction failure.
pub async fn scan_documents_blocking(
    paths: Vec<PathBuf>,
    config: ReaderConfig,
) -> Vec<DocumentOutcome> {
    let scanned = paths.clone();
    match tokio::task::spawn_blocking(move || scan_documents(&scanned, &config)).await {
        Ok(outcomes) => outcomes,
        Err(e) => {
            warn!(error = %e, "document scan did not complete");
            paths
                .into_iter()
                .map(|path| DocumentOutcome {
                    scan: Err(DocumentError::extraction_failed(&path, &e)),
                    path,
                })
                .collect()
        }
    }
}

/// Per-document section of an audit
#[derive(Debug)]
pub struct DocumentAudit {
    pub path: PathBuf,
    pub result: Result<AuditedDocument, DocumentError>,
}

/// A scanned document and the validation outcomes for its DOIs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditedDocument {
    pub scan: DocumentScan,
    pub report: ValidationReport,
}

#[derive(Debug)]
pub struct AuditReport {
    pub documents: Vec<DocumentAudit>,
    pub cancelled: bool,
}

impl AuditReport {
    /// Documents that could not be read
    pub fn failed_documents(&self) -> impl Iterator<Item = (&Path, &DocumentError)> + '_ {
        self.documents.iter().filter_map(|doc| match &doc.result {
            Err(e) => Some((doc.path.as_path(), e)),
            Ok(_) => None,
        })
    }

    /// True when documents were requested and none could be read
    pub fn all_documents_failed(&self) -> bool {
        !self.documents.is_empty() && self.documents.iter().all(|doc| doc.result.is_err())
    }
}

/// Result of auditing a caller-supplied DOI list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectAudit {
    /// Entries with no recognizable DOI, as given
    pub rejected: Vec<String>,
    pub report: ValidationReport,
}

/// Runs scans and validation end to end
pub struct Auditor<F> {
    orchestrator: ValidationOrchestrator<F>,
}

impl<F: WorkFetcher> Auditor<F> {
    pub fn new(orchestrator: ValidationOrchestrator<F>) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &ValidationOrchestrator<F> {
        &self.orchestrator
    }

    /// Scan every document, validate the union of their DOIs once, and hand
    /// each document the outcomes for its own DOIs.
    pub async fn audit_documents<I, P>(
        &self,
        paths: I,
        config: &ReaderConfig,
        cancel: &CancellationToken,
    ) -> AuditReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths: Vec<PathBuf> = paths
            .into_iter()
            .map(|path| path.as_ref().to_path_buf())
            .collect();
        let outcomes = scan_documents_blocking(paths, config.clone()).await;

        let mut all = DoiSet::new();
        for outcome in &outcomes {
            if let Ok(scan) = &outcome.scan {
                all.extend(scan.dois.iter().cloned());
            }
        }

        let report = self.orchestrator.validate(&all, cancel).await;

        let documents = outcomes
            .into_iter()
            .map(|outcome| DocumentAudit {
                path: outcome.path,
                result: outcome.scan.map(|scan| AuditedDocument {
                    report: report.subset(&scan.dois),
                    scan,
                }),
            })
            .collect();

        AuditReport {
            documents,
            cancelled: report.is_cancelled(),
        }
    }

    /// Validate DOIs given directly, with no document involved
    pub async fn audit_dois(&self, input: DoiInput, cancel: &CancellationToken) -> DirectAudit {
        let direct = input.into_doi_set();
        if !direct.rejected.is_empty() {
            warn!(count = direct.rejected.len(), "entries without a DOI");
        }
        let report = self.orchestrator.validate(&direct.dois, cancel).await;
        DirectAudit {
            rejected: direct.rejected,
            report,
        }
    }
}
