//! DOI registry access and validation
//!
//! - `client`: Crossref HTTP client (identity + endpoint checks, lookups)
//! - `fetcher`: the `WorkFetcher` trait the orchestrator is generic over
//! - `orchestrator`: bounded, cancellable, retrying validation of a DOI set
//! - `report`: per-DOI outcomes

pub mod client;
pub mod fetcher;
pub mod orchestrator;
pub mod report;
pub mod retry;
pub mod types;

pub use client::{is_valid_identity, CrossrefClient};
pub use fetcher::WorkFetcher;
pub use orchestrator::{ValidationOptions, ValidationOrchestrator};
pub use report::{DoiOutcome, ValidationReport};
pub use retry::RetryPolicy;
pub use types::{UpdateRelation, WorkMetadata};
