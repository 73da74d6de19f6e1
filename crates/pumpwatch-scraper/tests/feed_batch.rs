//! Integration tests for `fetch_all_feeds`.
//!
//! Exercises the batch semantics end to end against a local `wiremock`
//! server: per-retailer failure isolation, the batch deadline, and the
//! concurrency cap. Timing assertions only ever check lower bounds or
//! generous upper bounds so the tests stay stable on slow machines.

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pumpwatch_core::Retailer;
use pumpwatch_scraper::{fetch_all_feeds, BatchOptions, FeedClient, FetchError};

fn test_client() -> FeedClient {
    FeedClient::new(5, "pumpwatch-test/0.1").expect("failed to build test FeedClient")
}

fn retailer(name: &str, server: &MockServer, feed_path: &str) -> Retailer {
    Retailer {
        name: name.to_string(),
        source_url: format!("{}{feed_path}", server.uri()),
    }
}

fn one_station_feed(site_id: &str) -> serde_json::Value {
    json!({
        "last_updated": "20/08/2026 09:00:00",
        "stations": [{
            "site_id": site_id,
            "prices": { "E10": 141.9 }
        }]
    })
}

// ---------------------------------------------------------------------------
// Test 1 – one bad feed never takes the batch down
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_feeds_isolates_per_retailer_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alpha.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&one_station_feed("alpha-001")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/beta.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gamma.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/delta.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&one_station_feed("delta-001")))
        .mount(&server)
        .await;

    let retailers = vec![
        retailer("Alpha", &server, "/alpha.json"),
        retailer("Beta", &server, "/beta.json"),
        retailer("Gamma", &server, "/gamma.json"),
        retailer("Delta", &server, "/delta.json"),
    ];

    let client = test_client();
    let batch = fetch_all_feeds(&client, retailers, &BatchOptions::default()).await;

    assert_eq!(batch.fetched.len(), 2, "expected 2 successes");
    assert_eq!(batch.failures.len(), 2, "expected 2 failures");

    // Arrival order is not defined, so compare as sorted names.
    let mut fetched_names: Vec<&str> = batch
        .fetched
        .iter()
        .map(|f| f.retailer.name.as_str())
        .collect();
    fetched_names.sort_unstable();
    assert_eq!(fetched_names, vec!["Alpha", "Delta"]);

    let beta = batch
        .failures
        .iter()
        .find(|f| f.retailer.name == "Beta")
        .expect("Beta should be among the failures");
    assert!(
        matches!(beta.error, FetchError::NotFound { .. }),
        "expected NotFound for Beta, got: {:?}",
        beta.error
    );

    let gamma = batch
        .failures
        .iter()
        .find(|f| f.retailer.name == "Gamma")
        .expect("Gamma should be among the failures");
    assert!(
        matches!(gamma.error, FetchError::Deserialize { .. }),
        "expected Deserialize for Gamma, got: {:?}",
        gamma.error
    );
}

// ---------------------------------------------------------------------------
// Test 2 – the batch deadline cancels outstanding fetches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_feeds_cancels_outstanding_fetches_at_the_deadline() {
    let server = MockServer::start().await;

    // Every feed answers far too slowly to finish before the deadline.
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&one_station_feed("slow-001"))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let retailers = vec![
        retailer("Slow One", &server, "/one.json"),
        retailer("Slow Two", &server, "/two.json"),
        retailer("Slow Three", &server, "/three.json"),
    ];

    let options = BatchOptions {
        max_parallel: 2,
        deadline: Duration::from_millis(250),
    };

    let client = test_client();
    let started = Instant::now();
    let batch = fetch_all_feeds(&client, retailers, &options).await;
    let elapsed = started.elapsed();

    assert!(
        batch.fetched.is_empty(),
        "no feed should complete before the deadline"
    );
    assert_eq!(batch.failures.len(), 3, "every retailer should fail");
    assert!(
        batch
            .failures
            .iter()
            .all(|f| matches!(f.error, FetchError::Cancelled { .. })),
        "every failure should be Cancelled, got: {:?}",
        batch.failures
    );
    // 30s server delay, 5s client timeout: returning this fast proves the
    // deadline cut the batch short rather than any timeout firing.
    assert!(
        elapsed < Duration::from_secs(3),
        "batch should return promptly after the deadline, took {elapsed:?}"
    );
}

// ---------------------------------------------------------------------------
// Test 3 – the concurrency cap is honoured
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_feeds_respects_the_concurrency_cap() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&one_station_feed("slow-001"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let retailers = vec![
        retailer("One", &server, "/one.json"),
        retailer("Two", &server, "/two.json"),
    ];

    let options = BatchOptions {
        max_parallel: 1,
        deadline: Duration::from_secs(30),
    };

    let client = test_client();
    let started = Instant::now();
    let batch = fetch_all_feeds(&client, retailers, &options).await;
    let elapsed = started.elapsed();

    assert_eq!(batch.fetched.len(), 2, "both feeds should succeed");
    assert!(
        elapsed >= Duration::from_millis(600),
        "with max_parallel=1 two 300ms responses must run back to back, took {elapsed:?}"
    );
}

// ---------------------------------------------------------------------------
// Test 4 – degenerate inputs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_feeds_accepts_an_empty_retailer_list() {
    let client = test_client();
    let batch = fetch_all_feeds(&client, Vec::new(), &BatchOptions::default()).await;

    assert!(batch.fetched.is_empty());
    assert!(batch.failures.is_empty());
}

#[tokio::test]
async fn fetch_all_feeds_treats_a_zero_cap_as_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alpha.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&one_station_feed("alpha-001")))
        .mount(&server)
        .await;

    let options = BatchOptions {
        max_parallel: 0,
        deadline: Duration::from_secs(30),
    };

    let client = test_client();
    let batch = fetch_all_feeds(
        &client,
        vec![retailer("Alpha", &server, "/alpha.json")],
        &options,
    )
    .await;

    assert_eq!(
        batch.fetched.len(),
        1,
        "a zero cap must still fetch, got failures: {:?}",
        batch.failures
    );
}
