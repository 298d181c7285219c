//! Integration tests for the blocking client.
//!
//! The mock server needs a tokio runtime while the blocking client must not
//! run on one, so every client call happens inside `spawn_blocking`.

use latindictionary::{
    blocking, Backoff, Error, ErrorKind, InflectionTableOptions, LatinParseOptions,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(base_url: &str, max_retries: usize) -> blocking::Client {
    blocking::Client::builder()
        .base_url(base_url)
        .unwrap()
        .max_retries(max_retries)
        .backoff(Backoff::new(
            Duration::from_millis(10),
            Duration::from_millis(40),
        ))
        .timeout(Duration::from_secs(5))
        .build_blocking()
        .unwrap()
}

async fn run_blocking<F, R>(f: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup() {
    let mock_server = MockServer::start().await;
    let body = json!({"word": "canis", "definitions": ["dog"]});

    Mock::given(method("GET"))
        .and(path("/api/v1/la-to-en/canis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = format!("{}/api/v1/", mock_server.uri());
    let response = run_blocking(move || {
        let client = client(&base_url, 0);
        let response = client.latin_to_english("canis");
        client.close();
        response
    })
    .await
    .unwrap();

    assert_eq!(response.to_value(), body);
    assert_eq!(response.attempts, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_all_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/en-to-la/dog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"word": "dog"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auto-detect/amor"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"language": "latin", "data": []})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/latin-parse"))
        .and(query_param("q", "Gallia"))
        .and(query_param("max_alternates", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tokens": []})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/inflection-table"))
        .and(query_param("lemma", "amo"))
        .and(query_param("entry_id", "amo-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"entries": [], "lemma": "amo"})),
        )
        .mount(&mock_server)
        .await;

    let base_url = format!("{}/api/v1", mock_server.uri());
    run_blocking(move || {
        let client = client(&base_url, 0);

        let dog = client.english_to_latin("dog").unwrap();
        assert_eq!(dog.get("word"), Some(&json!("dog")));

        let amor = client.auto_detect("amor").unwrap();
        assert_eq!(amor.language(), Some("latin"));

        let parsed = client
            .latin_parse("Gallia", &LatinParseOptions::new().max_alternates(2))
            .unwrap();
        assert_eq!(parsed.tokens().map(Vec::len), Some(0));

        let table = client
            .inflection_table("amo", &InflectionTableOptions::new().entry_id("amo-1"))
            .unwrap();
        assert_eq!(table.lemma(), Some("amo"));
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_retries_429_then_succeeds() {
    let mock_server = MockServer::start().await;
    let attempt_count = Arc::new(AtomicUsize::new(0));
    let attempt_count_clone = attempt_count.clone();

    Mock::given(method("GET"))
        .respond_with(move |_req: &wiremock::Request| {
            let count = attempt_count_clone.fetch_add(1, Ordering::SeqCst);
            if count < 3 {
                ResponseTemplate::new(429).set_body_string("Too Many")
            } else {
                ResponseTemplate::new(200).set_body_json(json!({"word": "canis"}))
            }
        })
        .mount(&mock_server)
        .await;

    let base_url = format!("{}/api/v1", mock_server.uri());
    let response = run_blocking(move || client(&base_url, 3).get::<Value>("la-to-en/canis"))
        .await
        .unwrap();

    assert_eq!(response.data, json!({"word": "canis"}));
    assert_eq!(response.attempts, 4);
    assert_eq!(attempt_count.load(Ordering::SeqCst), 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_500_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = format!("{}/api/v1", mock_server.uri());
    let err = run_blocking(move || client(&base_url, 3).latin_to_english("canis"))
        .await
        .unwrap_err();

    match err {
        Error::Api { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "Internal Error");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timeout_without_retries_fails_immediately() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let base_url = format!("{}/api/v1", mock_server.uri());
    let (result, elapsed) = run_blocking(move || {
        let client = blocking::Client::builder()
            .base_url(&base_url)
            .unwrap()
            .max_retries(0)
            .timeout(Duration::from_millis(100))
            .build_blocking()
            .unwrap();

        let start = Instant::now();
        let result = client.latin_to_english("canis");
        (result, start.elapsed())
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(err.attempts(), Some(1));
    assert!(elapsed < Duration::from_millis(900));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rate_limit_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&mock_server)
        .await;

    let base_url = format!("{}/api/v1", mock_server.uri());
    let err = run_blocking(move || client(&base_url, 1).auto_detect("amor"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert_eq!(err.attempts(), Some(2));
    assert_eq!(err.body(), Some("Rate limited"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base_url = format!("http://127.0.0.1:{}/api/v1", port);
    let err = run_blocking(move || client(&base_url, 2).latin_to_english("canis"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Connection);
    assert_eq!(err.attempts(), Some(3));
}
