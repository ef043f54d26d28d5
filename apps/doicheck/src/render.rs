//! Report rendering (human-readable text or JSON)

use doicheck_core::{
    AuditReport, DirectAudit, DocumentError, DocumentOutcome, DoiOutcome, DoiSet, FailureReason,
    UpdateRelation, ValidationReport,
};
use serde_json::{json, Value};

fn document_error_json(error: &DocumentError) -> Value {
    json!({
        "reason": error.invalid_reason(),
        "message": error.to_string(),
    })
}

fn update_line(update: &UpdateRelation) -> String {
    let date = update
        .updated
        .as_ref()
        .map(|parts| {
            let parts: Vec<String> = parts.iter().map(|p| format!("{:02}", p)).collect();
            format!(" ({})", parts.join("-"))
        })
        .unwrap_or_default();
    format!("{} of {}{}", update.update_type, update.doi, date)
}

fn report_lines(report: &ValidationReport, indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for (doi, outcome) in report.iter() {
        match outcome {
            DoiOutcome::Success(updates) if updates.is_empty() => {
                lines.push(format!("{indent}ok       {doi}"));
            }
            DoiOutcome::Success(updates) => {
                for update in updates {
                    lines.push(format!("{indent}UPDATED  {doi}  {}", update_line(update)));
                }
            }
            DoiOutcome::Failure(FailureReason::Cancelled) => {
                lines.push(format!("{indent}skipped  {doi}  (cancelled)"));
            }
            DoiOutcome::Failure(reason) => {
                lines.push(format!("{indent}FAILED   {doi}  {reason}"));
            }
        }
    }
    lines
}

fn doi_lines(dois: &DoiSet, indent: &str) -> Vec<String> {
    dois.iter().map(|doi| format!("{indent}{doi}")).collect()
}

/// `file --extract` output
pub fn scans_text(outcomes: &[DocumentOutcome]) -> String {
    let mut lines = Vec::new();
    for outcome in outcomes {
        match &outcome.scan {
            Ok(scan) => {
                lines.push(format!(
                    "{} ({}, {} DOIs)",
                    outcome.path.display(),
                    scan.format.display_name(),
                    scan.dois.len()
                ));
                lines.extend(doi_lines(&scan.dois, "  "));
            }
            Err(e) => {
                lines.push(format!("{}", outcome.path.display()));
                lines.push(format!("  NOT PROCESSED  {e}"));
            }
        }
    }
    lines.join("\n")
}

pub fn scans_json(outcomes: &[DocumentOutcome]) -> Value {
    let documents: Vec<Value> = outcomes
        .iter()
        .map(|outcome| match &outcome.scan {
            Ok(scan) => json!({ "path": outcome.path, "scan": scan }),
            Err(e) => json!({ "path": outcome.path, "error": document_error_json(e) }),
        })
        .collect();
    json!({ "documents": documents })
}

/// `file --validate` output
pub fn audit_text(report: &AuditReport) -> String {
    let mut lines = Vec::new();
    for doc in &report.documents {
        match &doc.result {
            Ok(audited) => {
                lines.push(format!(
                    "{} ({}, {} DOIs, {} updated, {} not validated)",
                    doc.path.display(),
                    audited.scan.format.display_name(),
                    audited.report.len(),
                    audited.report.updated().count(),
                    audited.report.failures().count()
                ));
                lines.extend(report_lines(&audited.report, "  "));
            }
            Err(e) => {
                lines.push(format!("{}", doc.path.display()));
                lines.push(format!("  NOT PROCESSED  {e}"));
            }
        }
    }
    if report.cancelled {
        lines.push("Validation was cancelled; the report is partial.".to_string());
    }
    lines.join("\n")
}

pub fn audit_json(report: &AuditReport) -> Value {
    let documents: Vec<Value> = report
        .documents
        .iter()
        .map(|doc| match &doc.result {
            Ok(audited) => json!({
                "path": doc.path,
                "scan": audited.scan,
                "outcomes": audited.report,
            }),
            Err(e) => json!({ "path": doc.path, "error": document_error_json(e) }),
        })
        .collect();
    json!({ "documents": documents, "cancelled": report.cancelled })
}

/// `doi` output without validation
pub fn direct_text(dois: &DoiSet, rejected: &[String]) -> String {
    let mut lines = doi_lines(dois, "");
    lines.extend(rejected.iter().map(|entry| format!("REJECTED {entry}")));
    lines.join("\n")
}

pub fn direct_json(dois: &DoiSet, rejected: &[String]) -> Value {
    json!({ "dois": dois, "rejected": rejected })
}

/// `doi --validate` output
pub fn direct_audit_text(audit: &DirectAudit) -> String {
    let mut lines = report_lines(&audit.report, "");
    lines.extend(audit.rejected.iter().map(|entry| format!("REJECTED {entry}")));
    if audit.report.is_cancelled() {
        lines.push("Validation was cancelled; the report is partial.".to_string());
    }
    lines.join("\n")
}

pub fn direct_audit_json(audit: &DirectAudit) -> Value {
    json!(audit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_line() {
        let update = UpdateRelation {
            doi: "10.1000/original".to_string(),
            update_type: "retraction".to_string(),
            label: None,
            updated: Some(vec![2021, 2, 4]),
        };
        assert_eq!(
            update_line(&update),
            "retraction of 10.1000/original (2021-02-04)"
        );
    }

    #[test]
    fn test_direct_text_lists_rejected() {
        let direct = doicheck_identifiers::DoiInput::from("10.1000/a, nonsense").into_doi_set();
        assert_eq!(
            direct_text(&direct.dois, &direct.rejected),
            "10.1000/a\nREJECTED nonsense"
        );
    }
}
