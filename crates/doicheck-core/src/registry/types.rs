//! Crossref work payloads
//!
//! API docs: https://api.crossref.org/swagger-ui/index.html

use serde::{Deserialize, Serialize};

use crate::error::FailureReason;

#[derive(Debug, Deserialize)]
struct CrossrefResponse {
    message: CrossrefMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CrossrefMessage {
    WorkList(CrossrefWorkList),
    Work(Box<CrossrefWork>),
}

#[derive(Debug, Deserialize)]
struct CrossrefWorkList {
    items: Vec<CrossrefWork>,
}

#[derive(Debug, Deserialize)]
struct CrossrefWork {
    #[serde(rename = "DOI")]
    doi: String,
    title: Option<Vec<String>>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(rename = "update-to")]
    update_to: Option<Vec<CrossrefUpdate>>,
}

#[derive(Debug, Deserialize)]
struct CrossrefUpdate {
    #[serde(rename = "DOI")]
    doi: String,
    #[serde(rename = "type")]
    update_type: Option<String>,
    label: Option<String>,
    updated: Option<CrossrefDate>,
}

#[derive(Debug, Deserialize)]
struct CrossrefDate {
    #[serde(rename = "date-parts")]
    date_parts: Option<Vec<Vec<i32>>>,
}

/// Registry record for one DOI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkMetadata {
    pub doi: String,
    pub title: Option<String>,
    /// Crossref work type, e.g. `journal-article`
    pub kind: Option<String>,
    /// Updates (corrections, retractions, ...) this work declares
    pub update_to: Vec<UpdateRelation>,
}

/// One entry of a work's `update-to` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRelation {
    /// DOI of the updated work
    pub doi: String,
    /// `correction`, `retraction`, `erratum`, ...
    pub update_type: String,
    pub label: Option<String>,
    /// Date parts `[year, month, day]`, as precise as the registry has them
    pub updated: Option<Vec<i32>>,
}

impl UpdateRelation {
    pub fn is_retraction(&self) -> bool {
        self.update_type.eq_ignore_ascii_case("retraction")
            || self.update_type.eq_ignore_ascii_case("withdrawal")
    }
}

impl WorkMetadata {
    pub fn has_updates(&self) -> bool {
        !self.update_to.is_empty()
    }

    fn from_crossref(work: CrossrefWork) -> Self {
        let update_to = work
            .update_to
            .unwrap_or_default()
            .into_iter()
            .map(|u| UpdateRelation {
                doi: u.doi.to_ascii_lowercase(),
                update_type: u.update_type.unwrap_or_else(|| "unknown".to_string()),
                label: u.label,
                updated: u
                    .updated
                    .and_then(|d| d.date_parts)
                    .and_then(|dp| dp.into_iter().next()),
            })
            .collect();

        WorkMetadata {
            doi: work.doi.to_ascii_lowercase(),
            title: work.title.and_then(|t| t.into_iter().next()),
            kind: work.kind,
            update_to,
        }
    }
}

fn parse_response(json: &str) -> Result<CrossrefMessage, FailureReason> {
    let response: CrossrefResponse = serde_json::from_str(json)
        .map_err(|e| FailureReason::Parse(format!("Invalid Crossref JSON: {}", e)))?;
    Ok(response.message)
}

/// Parse a single-work response (`GET {endpoint}/{doi}`)
pub fn parse_work_response(json: &str) -> Result<WorkMetadata, FailureReason> {
    match parse_response(json)? {
        CrossrefMessage::Work(work) => Ok(WorkMetadata::from_crossref(*work)),
        CrossrefMessage::WorkList(_) => Err(FailureReason::Parse(
            "Unexpected response format".to_string(),
        )),
    }
}

/// Parse a filtered listing (`GET {endpoint}?filter=...`)
pub fn parse_work_list_response(json: &str) -> Result<Vec<WorkMetadata>, FailureReason> {
    match parse_response(json)? {
        CrossrefMessage::WorkList(list) => Ok(list
            .items
            .into_iter()
            .map(WorkMetadata::from_crossref)
            .collect()),
        CrossrefMessage::Work(work) => Ok(vec![WorkMetadata::from_crossref(*work)]),
    }
}
