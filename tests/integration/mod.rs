//! Integration tests for the smoke harness and status server.
//!
//! Each test binds a real axum server to an ephemeral local port and runs the
//! smoke runner against it over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use selfcheck::api::{create_router, AppState};
use selfcheck::error::ProbeError;
use selfcheck::report::{CapabilityReport, StatusReport, SUCCESS_INDICATOR};
use selfcheck::reporter::{ReporterConfig, StatusReporter};
use selfcheck::smoke::{Probe, ProbeOutcome, SmokeConfig, SmokeRunner, COMPLETION_MARKER};

/// Serve `router` on 127.0.0.1 and return its base URL.
async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn smoke_config(base_url: String) -> SmokeConfig {
    SmokeConfig {
        base_url,
        startup_delay: Duration::ZERO,
        request_timeout: Duration::from_secs(5),
    }
}

/// A service that answers all three default probes.
fn healthy_service() -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/api/health", get(|| async { Json(json!({ "status": "ok", "db": "up" })) }))
        .route(
            "/api/posts",
            get(|| async {
                let posts: Vec<Value> = (1..=5)
                    .map(|id| json!({ "id": id, "title": format!("post {id}") }))
                    .collect();
                Json(json!({ "posts": posts }))
            }),
        )
}

#[tokio::test]
async fn healthy_service_passes_every_probe() {
    let base = spawn(healthy_service()).await;
    let runner = SmokeRunner::new(smoke_config(base)).unwrap();

    let report = runner.run().await;

    assert!(report.all_passed(), "{:?}", report.lines());
    let lines = report.lines();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].contains("/api/posts"));
    assert!(lines[2].contains('5'));
    assert_eq!(lines[3], COMPLETION_MARKER);

    match &report.results[2].outcome {
        ProbeOutcome::Passed { status, summary } => {
            assert_eq!(*status, 200);
            assert_eq!(summary, "5 posts");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn failures_do_not_stop_the_sequence() {
    let router = Router::new()
        .route("/health", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/api/health", get(|| async { "not json" }))
        .route("/api/posts", get(|| async { Json(json!({ "posts": [1, 2] })) }));
    let base = spawn(router).await;
    let runner = SmokeRunner::new(smoke_config(base)).unwrap();

    let report = runner.run().await;

    assert_eq!(report.results.len(), 3);
    assert!(matches!(
        report.results[0].outcome,
        ProbeOutcome::Failed(ProbeError::Status { status: 500 })
    ));
    assert!(matches!(
        report.results[1].outcome,
        ProbeOutcome::Failed(ProbeError::Parse(_))
    ));
    assert!(report.results[2].passed());
}

#[tokio::test]
async fn missing_routes_report_not_found() {
    let base = spawn(Router::new()).await;
    let runner = SmokeRunner::new(smoke_config(base)).unwrap();

    let report = runner.run().await;

    assert_eq!(report.failed(), 3);
    assert!(report
        .results
        .iter()
        .all(|r| matches!(r.outcome, ProbeOutcome::Failed(ProbeError::Status { status: 404 }))));
}

#[tokio::test]
async fn status_server_answers_over_http() {
    let reporter = StatusReporter::new(ReporterConfig {
        environment: "staging".to_string(),
    });
    let base = spawn(create_router(AppState::new(reporter), "test")).await;
    let http = reqwest::Client::new();

    let status: StatusReport = http
        .get(format!("{base}/api/test"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(status.success);
    assert_eq!(status.environment, "staging");
    assert_eq!(status.auth_endpoints.simple, "/api/auth/simple/signup");

    let caps: CapabilityReport = http
        .get(format!("{base}/api/test/auth"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(caps.endpoints.simple.status.contains(SUCCESS_INDICATOR));
    assert_eq!(caps.endpoints.iter().count(), 3);
}

#[tokio::test]
async fn runner_can_probe_the_status_server() {
    let base = spawn(create_router(AppState::default(), "test")).await;
    let runner = SmokeRunner::new(smoke_config(base))
        .unwrap()
        .with_probes(vec![
            Probe::json("/health"),
            Probe::json("/api/test"),
            Probe::json("/api/test/auth"),
        ]);

    let report = runner.run().await;

    assert!(report.all_passed(), "{:?}", report.lines());
}
