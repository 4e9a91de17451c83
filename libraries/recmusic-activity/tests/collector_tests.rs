//! HTTP collector tests against a mock server

mod common;

use common::{init_tracing, logged_in_session};
use recmusic_activity::{
    ActivityBatch, ActivityBatcher, ActivityCollector, ActivityConfig, ActivityError,
    FlushOutcome, HttpActivityCollector,
};
use recmusic_core::{ActivityEntry, ActivityKind};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_batch() -> ActivityBatch {
    ActivityBatch {
        user_id: 123,
        activity_logs: vec![
            ActivityEntry {
                kind: ActivityKind::Play,
                timestamp: "2024-03-01T12:30:00.000Z".into(),
                track_id: Some("TR1".into()),
            },
            ActivityEntry {
                kind: ActivityKind::Other("test".into()),
                timestamp: "2024-03-01T12:30:05.000Z".into(),
                track_id: None,
            },
        ],
    }
}

#[tokio::test]
async fn posts_batch_with_bearer_token() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommender/useractivity/"))
        .and(header("Authorization", "Bearer access-123"))
        .and(body_json(json!({
            "user_id": 123,
            "activity_logs": [
                { "type": "play", "timestamp": "2024-03-01T12:30:00.000Z", "songId": "TR1" },
                { "type": "test", "timestamp": "2024-03-01T12:30:05.000Z" }
            ]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let collector = HttpActivityCollector::new(&mock_server.uri()).unwrap();
    let result = collector.submit("access-123", &sample_batch()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn non_success_status_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommender/useractivity/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Token expired"))
        .mount(&mock_server)
        .await;

    let collector = HttpActivityCollector::new(&mock_server.uri()).unwrap();
    let result = collector.submit("stale", &sample_batch()).await;

    match result {
        Err(ActivityError::Rejected { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Token expired");
        }
        other => panic!("Expected Rejected error, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_collector_is_request_error() {
    // Nothing listens on port 1
    let collector = HttpActivityCollector::new("http://127.0.0.1:1").unwrap();
    let result = collector.submit("tok", &sample_batch()).await;

    assert!(matches!(result, Err(ActivityError::Request(_))));
}

#[tokio::test]
async fn batcher_flushes_through_http() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommender/useractivity/"))
        .and(header("Authorization", "Bearer access-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let collector = HttpActivityCollector::new(&mock_server.uri()).unwrap();
    let batcher = ActivityBatcher::new(
        ActivityConfig::default(),
        Arc::new(collector),
        logged_in_session(),
    );

    batcher.record(ActivityKind::Like, Some("TR1"));
    batcher.record(ActivityKind::Unlike, Some("TR1"));

    assert_eq!(batcher.flush().await, FlushOutcome::Delivered(2));
    assert_eq!(batcher.flush().await, FlushOutcome::Empty);
}

#[tokio::test]
async fn server_error_keeps_queue() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommender/useractivity/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let collector = HttpActivityCollector::new(&mock_server.uri()).unwrap();
    let batcher = ActivityBatcher::new(
        ActivityConfig::default(),
        Arc::new(collector),
        logged_in_session(),
    );
    batcher.record(ActivityKind::Skip, Some("TR2"));

    assert_eq!(batcher.flush().await, FlushOutcome::Failed);
    assert_eq!(batcher.pending_len(), 1);
}
