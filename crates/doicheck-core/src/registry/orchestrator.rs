//! Concurrent validation of a DOI set against the registry

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use doicheck_identifiers::{Doi, DoiSet};
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::error::FailureReason;
use crate::registry::fetcher::WorkFetcher;
use crate::registry::report::{DoiOutcome, ValidationReport};
use crate::registry::retry::RetryPolicy;

/// Pool size, per-call timeout and retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Maximum registry calls in flight
    pub max_concurrent: usize,
    /// Upper bound for a single call, retries not included
    pub call_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}

impl ValidationOptions {
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent,
            call_timeout: config.timeout(),
            retry: RetryPolicy::from_config(config),
        }
    }
}

/// Validates DOI sets with a bounded pool of registry calls.
///
/// Every DOI submitted gets exactly one entry in the report, whatever
/// happens to its task.
pub struct ValidationOrchestrator<F> {
    fetcher: Arc<F>,
    options: ValidationOptions,
}

impl<F: WorkFetcher> ValidationOrchestrator<F> {
    pub fn new(fetcher: Arc<F>, options: ValidationOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn fetcher(&self) -> &Arc<F> {
        &self.fetcher
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub async fn validate(&self, dois: &DoiSet, cancel: &CancellationToken) -> ValidationReport {
        let mut report = ValidationReport::new();
        if dois.is_empty() {
            return report;
        }

        info!(
            count = dois.len(),
            max_concurrent = self.options.max_concurrent,
            "validating DOIs"
        );

        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrent.max(1)));
        let mut tasks = JoinSet::new();
        let mut task_dois: HashMap<Id, Doi> = HashMap::with_capacity(dois.len());

        for doi in dois.iter().cloned() {
            let fetcher = Arc::clone(&self.fetcher);
            let semaphore = Arc::clone(&semaphore);
            let options = self.options;
            let task_doi = doi.clone();
            let handle = tasks.spawn(async move {
                let outcome = fetch_with_retry(fetcher.as_ref(), &doi, &semaphore, &options).await;
                (doi, outcome)
            });
            task_dois.insert(handle.id(), task_doi);
        }

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!(
                        completed = report.len(),
                        pending = tasks.len(),
                        "validation cancelled"
                    );
                    tasks.abort_all();
                    report.mark_cancelled();
                    // Keep results that finished before the abort landed
                    while let Some(joined) = tasks.join_next().await {
                        match joined {
                            Ok((doi, outcome)) => report.insert(doi, outcome),
                            Err(e) => record_panic(&mut report, &task_dois, &e),
                        }
                    }
                    break;
                }
                joined = tasks.join_next() => match joined {
                    Some(Ok((doi, outcome))) => {
                        if let DoiOutcome::Failure(reason) = &outcome {
                            warn!(doi = %doi, reason = %reason, "DOI not validated");
                        }
                        report.insert(doi, outcome);
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "validation task did not complete");
                        record_panic(&mut report, &task_dois, &e);
                    }
                    None => break,
                },
            }
        }

        let fallback = if report.is_cancelled() {
            FailureReason::Cancelled
        } else {
            FailureReason::Internal("validation task panicked".to_string())
        };
        for doi in dois.iter() {
            if !report.contains(doi) {
                report.insert(doi.clone(), DoiOutcome::Failure(fallback.clone()));
            }
        }

        info!(
            total = report.len(),
            confirmed = report.successes().count(),
            failed = report.failures().count(),
            "validation finished"
        );
        report
    }
}

/// Record `Internal` for the DOI of a panicked task. Aborted tasks are left
/// for the cancellation fallback.
fn record_panic(
    report: &mut ValidationReport,
    task_dois: &HashMap<Id, Doi>,
    error: &JoinError,
) {
    if !error.is_panic() {
        return;
    }
    if let Some(doi) = task_dois.get(&error.id()) {
        report.insert(
            doi.clone(),
            DoiOutcome::Failure(FailureReason::Internal("validation task panicked".to_string())),
        );
    }
}

/// One DOI, with timeout and retries. A pool slot is held only while a
/// request is outstanding, not during backoff.
async fn fetch_with_retry<F: WorkFetcher>(
    fetcher: &F,
    doi: &Doi,
    semaphore: &Semaphore,
    options: &ValidationOptions,
) -> DoiOutcome {
    let mut attempt = 0;
    loop {
        let reason = {
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(e) => return DoiOutcome::Failure(FailureReason::Internal(e.to_string())),
            };
            match tokio::time::timeout(options.call_timeout, fetcher.fetch_work(doi)).await {
                Ok(Ok(work)) => return DoiOutcome::Success(work.update_to),
                Ok(Err(failed)) => failed.cause,
                Err(_) => FailureReason::Timeout,
            }
        };

        if !options.retry.should_retry(attempt, &reason) {
            return DoiOutcome::Failure(reason);
        }

        let delay = options.retry.backoff(attempt);
        debug!(doi = %doi, attempt, reason = %reason, delay_ms = delay.as_millis() as u64, "retrying");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
