//! HTTP transport and retry utilities.

mod http;
mod retry;

pub use http::HttpClient;
pub use retry::{with_retry, RetryConfig};
