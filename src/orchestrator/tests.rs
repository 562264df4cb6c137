// Orchestrator tests against a local mock origin.

use std::time::Duration;

use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::bulk::{bulk_outcome, outcomes_in_order};
use super::*;
use crate::config::Config;
use crate::error_handling::AnalyzeError;
use crate::fetch::{walk, WalkOptions};
use crate::models::{Chain, Hop};
use crate::initialization::init_redirect_client;
use crate::user_agent::RequestIdentity;

fn client() -> reqwest::Client {
    init_redirect_client(&Config {
        timeout_seconds: 5,
        ..Default::default()
    })
    .expect("client should build in tests")
}

fn redirect(status: u16, location: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).insert_header("Location", location)
}

#[tokio::test]
async fn test_analyze_url_rejected_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // The mock listens on loopback, which validation must refuse
    let result = analyze_url(
        &client(),
        &server.uri(),
        &RequestIdentity::default(),
        &WalkOptions::default(),
    )
    .await;

    assert_eq!(
        result,
        Err(AnalyzeError::ValidationRejected(
            "Private/reserved IP address not allowed".to_string()
        ))
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_compare_desktop_mobile_consistent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(redirect(301, "/home"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let start = format!("{}/", server.uri());
    let result = compare_desktop_mobile(&client(), &start, &WalkOptions::default()).await;

    assert!(result.consistent);
    assert!(result.redirect_counts_consistent);
    let labels: Vec<_> = result
        .variants
        .iter()
        .map(|v| v.identity_label.as_str())
        .collect();
    assert_eq!(labels, vec!["desktop", "mobile"]);
    assert_eq!(
        result.variant("mobile").unwrap().final_url,
        format!("{}/home", server.uri())
    );
}

#[tokio::test]
async fn test_compare_trailing_slash_is_a_difference() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_regex("user-agent", "iPhone"))
        .respond_with(redirect(302, "/m/"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(redirect(302, "/m"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let start = format!("{}/", server.uri());
    let result = compare_desktop_mobile(&client(), &start, &WalkOptions::default()).await;

    assert!(!result.consistent);
    assert!(result.redirect_counts_consistent);
    assert!(result.variant("desktop").unwrap().final_url.ends_with("/m"));
    assert!(result.variant("mobile").unwrap().final_url.ends_with("/m/"));
}

#[tokio::test]
async fn test_compare_keeps_failed_variants() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = format!("http://127.0.0.1:{}/", listener.local_addr().unwrap().port());
    drop(listener);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_regex("user-agent", "Googlebot"))
        .respond_with(redirect(302, &dead))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let identities = vec![
        RequestIdentity::bot("googlebot").unwrap(),
        RequestIdentity::bot("bingbot").unwrap(),
        RequestIdentity::bot("slackbot").unwrap(),
    ];
    let result = compare(&client(), &server.uri(), &identities, &WalkOptions::default()).await;

    assert_eq!(result.variants.len(), 3);
    let google = result.variant("googlebot").unwrap();
    assert!(google.chain.terminal_error.is_some());
    assert_eq!(google.final_url, dead);
    assert!(result.variant("bingbot").unwrap().chain.terminal_error.is_none());
    assert!(!result.consistent);
    assert!(!result.redirect_counts_consistent);
}

#[tokio::test]
async fn test_compare_runs_variants_concurrently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .mount(&server)
        .await;

    let identities: Vec<_> = ["googlebot", "bingbot", "twitterbot", "discordbot"]
        .iter()
        .filter_map(|name| RequestIdentity::bot(name))
        .collect();
    let started = std::time::Instant::now();
    let result = compare(&client(), &server.uri(), &identities, &WalkOptions::default()).await;

    assert!(result.consistent);
    // Sequential walks would need at least 1.6s
    assert!(started.elapsed() < Duration::from_millis(1500));
}

#[tokio::test]
async fn test_compare_no_identities_is_trivially_consistent() {
    let result = compare(
        &client(),
        "https://example.com/",
        &[],
        &WalkOptions::default(),
    )
    .await;
    assert!(result.variants.is_empty());
    assert!(result.consistent);
}

#[tokio::test]
async fn test_walk_many_blocks_without_sending() {
    let urls = [
        "http://10.0.0.1/",
        "ftp://example.com/file",
        "http://printer.local/",
        "nonsense",
    ];
    let outcomes = walk_many(
        &client(),
        &urls,
        &RequestIdentity::default(),
        &WalkOptions::default(),
    )
    .await;

    assert_eq!(outcomes.len(), 4);
    for (outcome, url) in outcomes.iter().zip(urls) {
        assert_eq!(outcome.url(), url);
        assert!(matches!(outcome, BulkOutcome::Blocked { .. }), "{url}");
    }
    assert_eq!(
        outcomes[1],
        BulkOutcome::Blocked {
            url: "ftp://example.com/file".to_string(),
            error: "Only HTTP/HTTPS schemes allowed".to_string(),
        }
    );
}

fn hop(step: usize, url: &str, status: u16, next: Option<&str>, ms: u64) -> Hop {
    Hop {
        step,
        requested_url: url.to_string(),
        status_code: status,
        is_redirect: next.is_some(),
        response_time_ms: ms,
        response_headers: Default::default(),
        redirect_kind: None,
        next_url: next.map(str::to_string),
    }
}

#[test]
fn test_bulk_outcome_classification() {
    let blocked = bulk_outcome(
        "http://10.0.0.1/",
        Err(AnalyzeError::ValidationRejected(
            "Private/reserved IP address not allowed".to_string(),
        )),
    );
    assert_eq!(
        blocked,
        BulkOutcome::Blocked {
            url: "http://10.0.0.1/".to_string(),
            error: "Private/reserved IP address not allowed".to_string(),
        }
    );

    let failed = Chain {
        hops: vec![hop(1, "https://a.example/", 302, Some("https://b.example/"), 30)],
        terminal_error: Some("error sending request: connection refused".to_string()),
    };
    assert_eq!(
        bulk_outcome("https://a.example/", Ok(failed)),
        BulkOutcome::Error {
            url: "https://a.example/".to_string(),
            error: "error sending request: connection refused".to_string(),
        }
    );

    let done = Chain {
        hops: vec![
            hop(1, "https://a.example/", 301, Some("https://b.example/"), 30),
            hop(2, "https://b.example/", 200, None, 12),
        ],
        terminal_error: None,
    };
    assert_eq!(
        bulk_outcome("https://a.example/", Ok(done)),
        BulkOutcome::Success {
            url: "https://a.example/".to_string(),
            final_url: "https://b.example/".to_string(),
            redirect_count: 1,
            total_time_ms: 42,
        }
    );

    let empty_failure = Chain {
        hops: vec![],
        terminal_error: Some("dns error".to_string()),
    };
    assert!(matches!(
        bulk_outcome("https://gone.example/", Ok(empty_failure)),
        BulkOutcome::Error { .. }
    ));
}

#[tokio::test]
async fn test_bulk_results_keep_input_order() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = format!("http://127.0.0.1:{}/", listener.local_addr().unwrap().port());
    drop(listener);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(redirect(302, "/done").set_delay(Duration::from_millis(600)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/medium"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    // Slowest first, so completion order is the reverse of input order
    let urls = vec![
        format!("{}/slow", server.uri()),
        format!("{}/medium", server.uri()),
        dead.clone(),
        format!("{}/fast", server.uri()),
    ];
    let http = client();
    let identity = RequestIdentity::default();
    let options = WalkOptions::default();
    let started = std::time::Instant::now();
    let outcomes = outcomes_in_order(&urls, |url| {
        let (http, identity, options) = (&http, &identity, &options);
        async move { Ok(walk(http, url, identity, options).await) }
    })
    .await;

    assert!(started.elapsed() < Duration::from_millis(1500));
    let order: Vec<_> = outcomes.iter().map(BulkOutcome::url).collect();
    assert_eq!(order, urls.iter().map(String::as_str).collect::<Vec<_>>());

    match &outcomes[0] {
        BulkOutcome::Success {
            final_url,
            redirect_count,
            ..
        } => {
            assert_eq!(final_url, &format!("{}/done", server.uri()));
            assert_eq!(*redirect_count, 1);
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert!(matches!(outcomes[1], BulkOutcome::Success { redirect_count: 0, .. }));
    assert!(matches!(outcomes[2], BulkOutcome::Error { .. }));
    assert!(matches!(outcomes[3], BulkOutcome::Success { .. }));
}

#[test]
fn test_bulk_outcome_wire_shape() {
    let outcome = BulkOutcome::Success {
        url: "https://a.example/".to_string(),
        final_url: "https://b.example/".to_string(),
        redirect_count: 1,
        total_time_ms: 42,
    };
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["status"], "success");
    assert_eq!(value["redirect_count"], 1);

    let blocked = BulkOutcome::Blocked {
        url: "http://10.0.0.1/".to_string(),
        error: "Private/reserved IP address not allowed".to_string(),
    };
    assert_eq!(serde_json::to_value(&blocked).unwrap()["status"], "blocked");
}
