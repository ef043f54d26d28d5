//! Seam between the orchestrator and the registry

use std::future::Future;

use doicheck_identifiers::Doi;

use crate::error::RegistryRequestFailed;
use crate::registry::types::WorkMetadata;

/// Looks up one DOI. One call means one request; retrying is the caller's
/// business.
pub trait WorkFetcher: Send + Sync + 'static {
    fn fetch_work(
        &self,
        doi: &Doi,
    ) -> impl Future<Output = Result<WorkMetadata, RegistryRequestFailed>> + Send;
}
