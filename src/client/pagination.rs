//! Pull-driven pagination over search results.

use super::{SearchClient, SearchError};
use crate::models::{SearchBody, UniProtEntry};

/// Response header carrying the server's total match count.
const TOTAL_RECORDS_HEADER: &str = "x-total-records";

/// Response header carrying page navigation links.
const LINK_HEADER: &str = "link";

/// Lazy cursor over paginated search results.
///
/// Each [`next_batch`](Self::next_batch) call fetches one page, decodes its
/// records, and remembers the `<url>; rel="next"` link from the response
/// headers for the page after it. The consumer drives fetching; dropping the
/// value abandons the remaining pages. Batches arrive in server order.
///
/// The next-page URL is opaque server state and is followed verbatim; no
/// query parameters are re-appended to it.
pub struct SearchPages<'a> {
    client: &'a SearchClient,
    next_url: Option<String>,
    fetched: usize,
    total: Option<usize>,
}

impl<'a> SearchPages<'a> {
    pub(crate) fn new(client: &'a SearchClient, initial_url: String) -> Self {
        Self {
            client,
            next_url: Some(initial_url),
            fetched: 0,
            total: None,
        }
    }

    /// Whether another page remains to be fetched.
    pub fn has_next(&self) -> bool {
        self.next_url.is_some()
    }

    /// Records yielded so far across all batches.
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    /// Server-reported total match count, known after the first page.
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// Fetch the next page, or `Ok(None)` once the results are exhausted.
    ///
    /// An error aborts the remaining pagination: later calls return
    /// `Ok(None)`. Batches already yielded are unaffected.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<UniProtEntry>>, SearchError> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        let response = self.client.get_with_retry(&url).await?;

        self.total = response
            .headers()
            .get(TOTAL_RECORDS_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok());
        let next = self.client.next_link(
            response
                .headers()
                .get(LINK_HEADER)
                .and_then(|value| value.to_str().ok()),
        );

        let body: SearchBody = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        // Assigned only after a clean decode, so a failed page ends the
        // sequence instead of resuming past a hole.
        self.next_url = next;
        self.fetched += body.results.len();

        match self.total {
            Some(total) => tracing::info!("fetched {}/{}", self.fetched, total),
            None => tracing::info!("fetched {}", self.fetched),
        }

        Ok(Some(body.results))
    }

    /// Drain every remaining page into one flat record list.
    pub async fn collect_all(mut self) -> Result<Vec<UniProtEntry>, SearchError> {
        let mut records = Vec::new();
        while let Some(batch) = self.next_batch().await? {
            records.extend(batch);
        }
        Ok(records)
    }
}
