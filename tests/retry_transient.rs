//! Retry behavior against a server that fails transiently.
//!
//! Uses wiremock rather than mockito for these scenarios: expiring mocks
//! (`up_to_n_times`) model a server that returns an error and then
//! recovers on the retried request to the same URL.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use uniprot_feature_search::client::DEFAULT_NAMESPACE;
use uniprot_feature_search::utils::RetryConfig;
use uniprot_feature_search::{SearchClient, SearchError};

fn fast_retries() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
    }
}

fn client_for(server: &MockServer) -> SearchClient {
    SearchClient::new()
        .expect("client")
        .with_base_url(server.uri())
        .with_retry_config(fast_retries())
}

fn results_body() -> serde_json::Value {
    json!({
        "results": [{
            "primaryAccession": "P04637",
            "features": [{
                "type": "Motif",
                "description": "9aaTAD",
                "location": {"start": {"value": 10}, "end": {"value": 19}}
            }]
        }]
    })
}

async fn mount_success(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/uniprotkb/search"))
        .and(query_param("query", "p53"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-records", "1")
                .set_body_json(results_body()),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_transient_error_then_success_is_invisible() {
    // Flaky server: one 503, then healthy.
    let flaky = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/search"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&flaky)
        .await;
    mount_success(&flaky).await;

    // Healthy server for the reference fetch.
    let healthy = MockServer::start().await;
    mount_success(&healthy).await;

    let from_flaky = client_for(&flaky)
        .paginate("p53", 50, DEFAULT_NAMESPACE)
        .expect("pagination")
        .collect_all()
        .await
        .expect("retried fetch");
    let from_healthy = client_for(&healthy)
        .paginate("p53", 50, DEFAULT_NAMESPACE)
        .expect("pagination")
        .collect_all()
        .await
        .expect("clean fetch");

    let flaky_accessions: Vec<_> = from_flaky.iter().map(|e| &e.primary_accession).collect();
    let healthy_accessions: Vec<_> = from_healthy.iter().map(|e| &e.primary_accession).collect();
    assert_eq!(flaky_accessions, healthy_accessions);

    // First page took two requests: the failed attempt and the retry.
    let requests = flaky.received_requests().await.expect("request log");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_exhausted_retries_surface_the_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut pages = client
        .paginate("p53", 50, DEFAULT_NAMESPACE)
        .expect("pagination");

    let error = pages.next_batch().await.expect_err("should fail");
    assert!(matches!(error, SearchError::Fetch { status: 503, .. }));
}

#[tokio::test]
async fn test_stream_endpoint_shares_the_retry_policy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/stream"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/stream"))
        .and(query_param("query", "p53"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results_body()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results = client
        .fetch_all("p53", DEFAULT_NAMESPACE)
        .await
        .expect("retried stream fetch");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].primary_accession, "P04637");
}
