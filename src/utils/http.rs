//! HTTP client utilities.

use reqwest::Client;
use std::time::Duration;

/// Shared HTTP client with sensible defaults.
///
/// One instance owns a single connection pool; all requests of a fetch
/// operation go through it so the server sees a reused connection. Not
/// intended for concurrent use by overlapping fetch calls without external
/// synchronization.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the crate's default user agent.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
    }

    /// Create a new HTTP client with a custom user agent.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self { client })
    }

    /// Start building a GET request.
    pub fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url)
    }
}
