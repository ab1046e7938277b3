//! UniProtKB REST search client.
//!
//! [`SearchClient`] issues GET requests against the `search` (paginated) and
//! `stream` (single-shot) endpoints of the UniProt REST API and decodes the
//! JSON bodies into [`UniProtEntry`] values. Pagination state lives in
//! [`SearchPages`].

mod pagination;

pub use pagination::SearchPages;

use regex::Regex;

use crate::models::{SearchBody, UniProtEntry};
use crate::utils::{with_retry, HttpClient, RetryConfig};

/// Production endpoint of the UniProt REST API.
pub const DEFAULT_BASE_URL: &str = "https://rest.uniprot.org";

/// Default resource collection to search.
pub const DEFAULT_NAMESPACE: &str = "uniprotkb";

/// Default page size. Mid-sized to balance request count against payload
/// size; UniProt accepts up to 500.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Errors from a search request.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The server answered with a non-success status (after retries for
    /// the transient class).
    #[error("server returned {status}: {reason}")]
    Fetch { status: u16, reason: String },

    /// The response body was not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The request produced no response at all.
    #[error("network error: {0}")]
    Network(String),

    /// The request could not be built from the given parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl SearchError {
    /// Whether a retry may resolve this error: server-overload and
    /// gateway-class statuses, plus transport-level failures.
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Fetch { status, .. } => matches!(*status, 500 | 502 | 503 | 504),
            SearchError::Network(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Network(err.to_string())
    }
}

/// Client for the UniProt search endpoints.
///
/// Holds one [`HttpClient`] so all pages of a fetch reuse the same
/// connection pool. One in-flight request at a time; not designed for
/// concurrent overlapping fetches without external synchronization.
#[derive(Debug)]
pub struct SearchClient {
    http: HttpClient,
    base_url: String,
    retry: RetryConfig,
    next_link_re: Regex,
}

impl SearchClient {
    /// Create a client against the production endpoint.
    pub fn new() -> Result<Self, SearchError> {
        Ok(Self {
            http: HttpClient::new()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryConfig::default(),
            next_link_re: Regex::new(r#"<(.+)>; rel="next""#).expect("valid literal regex"),
        })
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the retry policy.
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Start a paginated search.
    ///
    /// Returns a lazy cursor; no request is issued until the first
    /// [`SearchPages::next_batch`] call.
    pub fn paginate(
        &self,
        query: &str,
        size: usize,
        namespace: &str,
    ) -> Result<SearchPages<'_>, SearchError> {
        if query.is_empty() {
            return Err(SearchError::InvalidRequest("empty query".to_string()));
        }
        if size == 0 {
            return Err(SearchError::InvalidRequest(
                "page size must be positive".to_string(),
            ));
        }

        let url = format!(
            "{}/{}/search?query={}&size={}",
            self.base_url,
            namespace,
            urlencoding::encode(query),
            size
        );
        Ok(SearchPages::new(self, url))
    }

    /// Fetch every match in one request against the `stream` endpoint.
    ///
    /// No pagination loop, so no per-page progress; intended for small
    /// result sets. Subject to the same retry policy and failure taxonomy
    /// as pagination.
    pub async fn fetch_all(
        &self,
        query: &str,
        namespace: &str,
    ) -> Result<Vec<UniProtEntry>, SearchError> {
        if query.is_empty() {
            return Err(SearchError::InvalidRequest("empty query".to_string()));
        }

        let url = format!(
            "{}/{}/stream?query={}",
            self.base_url,
            namespace,
            urlencoding::encode(query)
        );
        let response = self.get_with_retry(&url).await?;
        let body: SearchBody = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        Ok(body.results)
    }

    /// One GET with the transient-failure retry policy applied.
    pub(crate) async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response, SearchError> {
        with_retry(self.retry, || async move {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| SearchError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SearchError::Fetch {
                    status: status.as_u16(),
                    reason: status
                        .canonical_reason()
                        .unwrap_or("unknown status")
                        .to_string(),
                });
            }
            Ok(response)
        })
        .await
    }

    /// Extract the next-page URL from a `Link` header value, if present.
    pub(crate) fn next_link(&self, link_header: Option<&str>) -> Option<String> {
        let header = link_header?;
        self.next_link_re
            .captures(header)
            .map(|captures| captures[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SearchClient {
        SearchClient::new().unwrap()
    }

    #[test]
    fn test_next_link_extraction() {
        let header = r#"<https://rest.uniprot.org/uniprotkb/search?cursor=abc&query=p53&size=50>; rel="next""#;
        assert_eq!(
            client().next_link(Some(header)),
            Some("https://rest.uniprot.org/uniprotkb/search?cursor=abc&query=p53&size=50".to_string())
        );
    }

    #[test]
    fn test_next_link_absent() {
        assert_eq!(client().next_link(None), None);
        assert_eq!(
            client().next_link(Some(r#"<https://example.org/x>; rel="prev""#)),
            None
        );
    }

    #[test]
    fn test_paginate_rejects_empty_query() {
        let client = client();
        assert!(matches!(
            client.paginate("", 50, DEFAULT_NAMESPACE),
            Err(SearchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_paginate_rejects_zero_page_size() {
        let client = client();
        assert!(matches!(
            client.paginate("cdc7 human", 0, DEFAULT_NAMESPACE),
            Err(SearchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_transient_classification() {
        for status in [500, 502, 503, 504] {
            let err = SearchError::Fetch {
                status,
                reason: String::new(),
            };
            assert!(err.is_transient(), "status {status} should be transient");
        }

        let client_error = SearchError::Fetch {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert!(!client_error.is_transient());
        assert!(!SearchError::Decode("bad json".to_string()).is_transient());
        assert!(SearchError::Network("connection reset".to_string()).is_transient());
    }
}
