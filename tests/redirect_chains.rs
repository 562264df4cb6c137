//! End-to-end walks against a local axum redirect server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use tokio::net::TcpListener;

use redirect_analyzer::{
    detect_loop, init_redirect_client, walk, AnalysisReport, Config, RedirectKind,
    RequestIdentity, WalkOptions, MAX_REDIRECTS_REACHED,
};

/// Starts a server where `/redirect/{n}` redirects to `/redirect/{n-1}` and
/// `/redirect/0` answers 200. `/loop/a` and `/loop/b` redirect to each other.
/// Returns the base URL and a request counter.
async fn start_redirect_server() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route(
            "/redirect/{hop}",
            get({
                let hits = hits.clone();
                move |Path(hop): Path<usize>| async move {
                    hits.fetch_add(1, Ordering::Relaxed);
                    if hop > 0 {
                        Redirect::temporary(&format!("/redirect/{}", hop - 1)).into_response()
                    } else {
                        "Final Destination".into_response()
                    }
                }
            }),
        )
        .route(
            "/loop/{side}",
            get({
                let hits = hits.clone();
                move |Path(side): Path<String>| async move {
                    hits.fetch_add(1, Ordering::Relaxed);
                    let other = if side == "a" { "b" } else { "a" };
                    (
                        StatusCode::MOVED_PERMANENTLY,
                        [(header::LOCATION, format!("/loop/{}", other))],
                    )
                }
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    (format!("http://{}", addr), hits)
}

fn client() -> reqwest::Client {
    init_redirect_client(&Config {
        timeout_seconds: 5,
        ..Default::default()
    })
    .expect("client")
}

#[tokio::test]
async fn test_deep_chain_is_recorded_hop_by_hop() {
    let (base, hits) = start_redirect_server().await;
    let start = format!("{}/redirect/5", base);

    let chain = walk(
        &client(),
        &start,
        &RequestIdentity::default(),
        &WalkOptions::default(),
    )
    .await;

    assert!(chain.terminal_error.is_none());
    assert_eq!(chain.len(), 6);
    assert_eq!(chain.total_redirects(), 5);
    assert_eq!(hits.load(Ordering::Relaxed), 6);
    for (i, hop) in chain.hops.iter().enumerate() {
        assert_eq!(hop.step, i + 1);
        assert_eq!(hop.requested_url, format!("{}/redirect/{}", base, 5 - i));
    }
    assert_eq!(
        chain.hops[0].redirect_kind,
        Some(RedirectKind::TemporaryPreserve)
    );
    assert_eq!(chain.final_url(), Some(format!("{}/redirect/0", base).as_str()));
    assert_eq!(chain.final_status(), Some(200));

    let report = AnalysisReport::build(&start, &chain);
    assert_eq!(report.chain_length, 6);
    // Plain http plus more than three redirects
    assert!(report.safety_score < 80);
    assert!(!report.security_analysis.https_only);
}

#[tokio::test]
async fn test_chain_longer_than_budget_is_cut() {
    let (base, hits) = start_redirect_server().await;
    let options = WalkOptions {
        max_hops: 4,
        ..Default::default()
    };

    let chain = walk(
        &client(),
        &format!("{}/redirect/30", base),
        &RequestIdentity::default(),
        &options,
    )
    .await;

    assert_eq!(chain.len(), 4);
    assert_eq!(hits.load(Ordering::Relaxed), 4);
    assert_eq!(chain.terminal_error.as_deref(), Some(MAX_REDIRECTS_REACHED));
    assert!(chain.hops.iter().all(|h| h.is_redirect));

    // A long straight chain is not a loop
    let report = detect_loop(&chain);
    assert!(!report.detected);
    assert!(report.hop_limit_reached);
}

#[tokio::test]
async fn test_two_url_loop_is_detected() {
    let (base, _) = start_redirect_server().await;

    let chain = walk(
        &client(),
        &format!("{}/loop/a", base),
        &RequestIdentity::default(),
        &WalkOptions::default(),
    )
    .await;

    assert_eq!(chain.len(), 15);
    assert!(chain.hit_redirect_limit());

    let report = detect_loop(&chain);
    assert!(report.detected);
    assert_eq!(report.start_index, Some(0));
    assert_eq!(
        report.cycle_urls,
        vec![
            format!("{}/loop/a", base),
            format!("{}/loop/b", base),
            format!("{}/loop/a", base),
        ]
    );
    assert!(report.hop_limit_reached);
}

#[tokio::test]
async fn test_concurrent_walks_do_not_interfere() {
    let (base, hits) = start_redirect_server().await;
    let client = client();
    let identity = RequestIdentity::default();
    let options = WalkOptions::default();

    let starts: Vec<String> = (0..10).map(|n| format!("{}/redirect/{}", base, n)).collect();
    let walks = starts
        .iter()
        .map(|url| walk(&client, url, &identity, &options));
    let chains = tokio::time::timeout(Duration::from_secs(20), futures::future::join_all(walks))
        .await
        .expect("walks finish");

    for (n, chain) in chains.iter().enumerate() {
        assert_eq!(chain.len(), n + 1, "chain starting at /redirect/{}", n);
        assert!(chain.terminal_error.is_none());
    }
    assert_eq!(hits.load(Ordering::Relaxed), (1..=10).sum::<usize>());
}
