//! Crossref registry client
//!
//! Rate limit: polite pool with `mailto`, ~50 req/sec. Validation checks
//! happen once in [`CrossrefClient::connect`]; a client that exists is
//! known to have a usable identity and a reachable endpoint.

use doicheck_identifiers::Doi;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use crate::config::RegistryConfig;
use crate::error::{ConfigurationError, FailureReason, RegistryRequestFailed};
use crate::http::{HttpClient, HttpError, HttpResponse};
use crate::registry::fetcher::WorkFetcher;
use crate::registry::types::{parse_work_list_response, parse_work_response, WorkMetadata};

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
}

/// Email-shaped contact identity, as Crossref expects for `mailto`
pub fn is_valid_identity(identity: &str) -> bool {
    EMAIL_PATTERN.is_match(identity)
}

#[derive(Debug, Clone)]
pub struct CrossrefClient {
    http: HttpClient,
    endpoint: String,
    mailto: String,
}

impl CrossrefClient {
    /// Validate the identity, then probe the endpoint.
    ///
    /// A bad identity is reported without touching the network.
    pub async fn connect(config: &RegistryConfig) -> Result<Self, ConfigurationError> {
        let mailto = config.mailto.trim().to_string();
        if !is_valid_identity(&mailto) {
            return Err(ConfigurationError::BadIdentity { identity: mailto });
        }

        let endpoint = config.endpoint.trim().trim_end_matches('/').to_string();
        let unreachable = |cause: String| ConfigurationError::UnreachableEndpoint {
            endpoint: endpoint.clone(),
            cause,
        };

        let parsed = url::Url::parse(&endpoint).map_err(|e| unreachable(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(unreachable(format!(
                "unsupported scheme {:?}",
                parsed.scheme()
            )));
        }

        let user_agent = format!("doicheck/{} (mailto:{})", env!("CARGO_PKG_VERSION"), mailto);
        let http = HttpClient::new(&user_agent, config.timeout())
            .map_err(|e| unreachable(e.to_string()))?;

        let probe = http
            .get_with_params(&endpoint, &[("mailto", mailto.as_str()), ("rows", "0")])
            .await
            .map_err(|e| unreachable(e.to_string()))?;
        if probe.status != 200 {
            return Err(unreachable(format!("probe returned HTTP {}", probe.status)));
        }

        info!(endpoint = %endpoint, "registry endpoint reachable");
        Ok(Self {
            http,
            endpoint,
            mailto,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn mailto(&self) -> &str {
        &self.mailto
    }

    /// Look up one DOI. No retries at this layer.
    pub async fn fetch_work(&self, doi: &Doi) -> Result<WorkMetadata, RegistryRequestFailed> {
        let url = format!("{}/{}", self.endpoint, urlencoding::encode(doi.as_str()));
        debug!(doi = %doi, "fetching work");

        let response = self
            .http
            .get_with_params(&url, &[("mailto", self.mailto.as_str())])
            .await
            .map_err(|e| RegistryRequestFailed::new(doi.as_str(), failure_from_http(e)))?;

        match response.status {
            200 => parse_work_response(&response.body)
                .map_err(|cause| RegistryRequestFailed::new(doi.as_str(), cause)),
            404 => Err(RegistryRequestFailed::new(
                doi.as_str(),
                FailureReason::NotFound,
            )),
            status => Err(RegistryRequestFailed::new(
                doi.as_str(),
                FailureReason::Status(status),
            )),
        }
    }

    /// Filtered listing, e.g. `&[("updates", "10.1000/xyz")]` for the
    /// notices that update a work.
    pub async fn query_works(
        &self,
        filters: &[(&str, &str)],
        rows: usize,
    ) -> Result<Vec<WorkMetadata>, FailureReason> {
        let filter = filters
            .iter()
            .map(|(name, value)| format!("{}:{}", name, value))
            .collect::<Vec<_>>()
            .join(",");
        let rows = rows.to_string();

        let mut params = vec![("mailto", self.mailto.as_str()), ("rows", rows.as_str())];
        if !filter.is_empty() {
            params.push(("filter", filter.as_str()));
        }

        let response: HttpResponse = self
            .http
            .get_with_params(&self.endpoint, &params)
            .await
            .map_err(failure_from_http)?;

        if !response.is_success() {
            return Err(FailureReason::Status(response.status));
        }
        parse_work_list_response(&response.body)
    }
}

impl WorkFetcher for CrossrefClient {
    async fn fetch_work(&self, doi: &Doi) -> Result<WorkMetadata, RegistryRequestFailed> {
        CrossrefClient::fetch_work(self, doi).await
    }
}

fn failure_from_http(err: HttpError) -> FailureReason {
    match err {
        HttpError::Timeout => FailureReason::Timeout,
        HttpError::RateLimited => FailureReason::RateLimited,
        HttpError::RequestFailed { message } => FailureReason::Transport(message),
        HttpError::InvalidUrl { url } => FailureReason::Internal(format!("invalid URL {}", url)),
        HttpError::ParseError { message } => FailureReason::Parse(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("someone@example.org", true)]
    #[case("first.last+tag@sub.example.co.uk", true)]
    #[case("", false)]
    #[case("not-an-email", false)]
    #[case("a@b", false)]
    #[case("a@b.c", false)]
    #[case("two@@example.org", false)]
    fn test_identity_shape(#[case] identity: &str, #[case] valid: bool) {
        assert_eq!(is_valid_identity(identity), valid);
    }

    #[tokio::test]
    async fn test_bad_identity_skips_network() {
        let config = RegistryConfig {
            endpoint: "http://127.0.0.1:9/works".to_string(),
            mailto: "nobody".to_string(),
            ..RegistryConfig::default()
        };
        let err = CrossrefClient::connect(&config).await.unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::BadIdentity {
                identity: "nobody".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_endpoint() {
        let config = RegistryConfig {
            endpoint: "not a url".to_string(),
            mailto: "someone@example.org".to_string(),
            ..RegistryConfig::default()
        };
        let err = CrossrefClient::connect(&config).await.unwrap_err();
        assert!(matches!(err, ConfigurationError::UnreachableEndpoint { .. }));
    }

    #[test]
    fn test_failure_from_http() {
        assert_eq!(failure_from_http(HttpError::Timeout), FailureReason::Timeout);
        assert_eq!(
            failure_from_http(HttpError::RateLimited),
            FailureReason::RateLimited
        );
        assert!(matches!(
            failure_from_http(HttpError::RequestFailed {
                message: "connection refused".to_string()
            }),
            FailureReason::Transport(_)
        ));
    }
}
