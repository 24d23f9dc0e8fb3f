//! Integration tests for `ImpressionTracker`.
//!
//! Covers the at-most-once-per-session dedup contract: one successful
//! recording short-circuits later mounts, a failed recording leaves
//! the marker unset so the next mount retries, and the fire-and-forget
//! entry point never blocks the caller.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trendfront_client::config::ClientConfig;
use trendfront_client::engine::EngineClient;
use trendfront_client::session::{BrowsingSession, SessionStore};
use trendfront_client::tracking::ImpressionTracker;

fn test_tracker(server: &MockServer) -> (ImpressionTracker, BrowsingSession) {
    let config = ClientConfig {
        engine_url: Url::parse(&server.uri()).expect("mock server URI parses"),
        feed_cache_ttl: Duration::from_secs(60),
        request_timeout: Duration::from_secs(5),
    };
    let engine = EngineClient::new(&config).expect("failed to build test EngineClient");
    let session = BrowsingSession::new(SessionStore::new());
    (ImpressionTracker::new(engine, session.clone()), session)
}

fn recorded_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(&json!({"status": "recorded"}))
}

// ---------------------------------------------------------------------------
// Dedup: at most one successful recording per (session, slug)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn two_mounts_produce_exactly_one_request() {
    // Scenario: two sequential mounts of the same detail view, first
    // network call succeeding, must yield exactly one outbound request.
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/products/led-dog-collar/view"))
        .respond_with(recorded_response())
        .expect(1)
        .mount(&server)
        .await;

    let (tracker, session) = test_tracker(&server);

    tracker.record_view_attempt("led-dog-collar").await;
    assert!(session.has_viewed("led-dog-collar"));

    tracker.record_view_attempt("led-dog-collar").await;
    // Mock expectation (exactly one request) is verified on drop.
}

#[tokio::test]
async fn distinct_slugs_are_tracked_independently() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/products/led-dog-collar/view"))
        .respond_with(recorded_response())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin/products/mini-projector/view"))
        .respond_with(recorded_response())
        .expect(1)
        .mount(&server)
        .await;

    let (tracker, session) = test_tracker(&server);

    tracker.record_view_attempt("led-dog-collar").await;
    tracker.record_view_attempt("mini-projector").await;

    assert!(session.has_viewed("led-dog-collar"));
    assert!(session.has_viewed("mini-projector"));
}

#[tokio::test]
async fn request_is_tagged_with_the_stable_session_id() {
    let server = MockServer::start().await;

    let (tracker, session) = test_tracker(&server);
    let session_id = session.session_id();

    Mock::given(method("POST"))
        .and(path("/admin/products/led-dog-collar/view"))
        .and(query_param("session_id", session_id.as_str()))
        .respond_with(recorded_response())
        .expect(1)
        .mount(&server)
        .await;

    tracker.record_view_attempt("led-dog-collar").await;
    assert!(session.has_viewed("led-dog-collar"));
}

// ---------------------------------------------------------------------------
// Failure: marker stays unset, next mount retries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_recording_leaves_marker_unset_and_retries_on_next_mount() {
    let server = MockServer::start().await;

    // First attempt fails; the dedup marker must not be set.
    Mock::given(method("POST"))
        .and(path("/admin/products/led-dog-collar/view"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin/products/led-dog-collar/view"))
        .respond_with(recorded_response())
        .mount(&server)
        .await;

    let (tracker, session) = test_tracker(&server);

    tracker.record_view_attempt("led-dog-collar").await;
    assert!(
        !session.has_viewed("led-dog-collar"),
        "failed attempt must not set the marker"
    );

    // Next mount retries and succeeds.
    tracker.record_view_attempt("led-dog-collar").await;
    assert!(session.has_viewed("led-dog-collar"));
}

// ---------------------------------------------------------------------------
// Fire-and-forget entry point
// ---------------------------------------------------------------------------

#[tokio::test]
async fn record_view_once_completes_on_a_detached_task() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/products/led-dog-collar/view"))
        .respond_with(recorded_response())
        .expect(1)
        .mount(&server)
        .await;

    let (tracker, session) = test_tracker(&server);

    // Returns immediately; completion only shows up via the marker.
    tracker.record_view_once("led-dog-collar");

    let mut waited = Duration::ZERO;
    while !session.has_viewed("led-dog-collar") && waited < Duration::from_secs(2) {
        tokio::time::sleep(Duration::from_millis(10)).await;
        waited += Duration::from_millis(10);
    }
    assert!(
        session.has_viewed("led-dog-collar"),
        "detached recording should have completed"
    );
}
