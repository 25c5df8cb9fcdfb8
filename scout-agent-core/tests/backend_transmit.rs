//! Transmitter tests against a local HTTP fixture.
//!
//! The pack has no canned-response HTTP mock in its stack, so the fixture is
//! a minimal axum app bound to an ephemeral port, counting the requests it
//! receives.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use scout_agent_core::backend::{BackendClient, BACKEND_URL_PLACEHOLDER};
use scout_agent_core::contract::{TransmitOutcome, Transmitter};
use scout_agent_core::enrich::RunContext;
use scout_agent_core::model::{AccessType, CandidateModel, SourceKind};
use scout_agent_core::report::build_report;
use scout_agent_core::ScoutError;

#[derive(Clone)]
struct FixtureState {
    hits: Arc<AtomicUsize>,
    respond_with: StatusCode,
    last_headers: Arc<std::sync::Mutex<Option<HeaderMap>>>,
    last_body: Arc<std::sync::Mutex<Option<Value>>>,
}

async fn ingest(
    State(state): State<FixtureState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_headers.lock().unwrap() = Some(headers);
    *state.last_body.lock().unwrap() = Some(body);
    state.respond_with
}

async fn spawn_fixture(respond_with: StatusCode) -> (SocketAddr, FixtureState) {
    let state = FixtureState {
        hits: Arc::new(AtomicUsize::new(0)),
        respond_with,
        last_headers: Arc::new(std::sync::Mutex::new(None)),
        last_body: Arc::new(std::sync::Mutex::new(None)),
    };
    let app = Router::new()
        .route("/api/llms", post(ingest))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

fn sample_report() -> scout_agent_core::model::Report {
    let ctx = RunContext::new();
    build_report(
        vec![CandidateModel {
            name: "llama-3".into(),
            publisher: "meta-llama".into(),
            source: SourceKind::ModelHub,
            source_url: "https://huggingface.co/meta-llama/llama-3".into(),
            access_type: AccessType::OpenSource,
            country: None,
            model_size: None,
            created_at: None,
            discovery_timestamp: Some(ctx.started_at),
            agent_version: Some("0.1.0".into()),
            validation_status: Some("validated".into()),
        }],
        &ctx,
    )
}

#[tokio::test]
async fn placeholder_backend_skips_without_any_network_call() {
    // Bind a fixture anyway to prove no call arrives at any server.
    let (_addr, state) = spawn_fixture(StatusCode::OK).await;
    let client = BackendClient::new(BACKEND_URL_PLACEHOLDER, "unused-token").unwrap();

    let outcome = client.post_report(&sample_report()).await.unwrap();
    assert_eq!(outcome, TransmitOutcome::Skipped);
    assert_eq!(state.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn accepted_report_is_exactly_one_authenticated_post() {
    let (addr, state) = spawn_fixture(StatusCode::OK).await;
    let client = BackendClient::new(format!("http://{addr}"), "secret-token").unwrap();

    let outcome = client.post_report(&sample_report()).await.unwrap();
    assert_eq!(outcome, TransmitOutcome::Delivered { status: 200 });
    assert_eq!(state.hits.load(Ordering::SeqCst), 1);

    let headers = state.last_headers.lock().unwrap().clone().unwrap();
    assert_eq!(
        headers.get("authorization").unwrap(),
        "Bearer secret-token"
    );
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    let user_agent = headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(
        user_agent.starts_with("askme-scout-agent/"),
        "unexpected user agent: {user_agent}"
    );

    let body = state.last_body.lock().unwrap().clone().unwrap();
    assert!(body.get("models").unwrap().is_array());
    assert_eq!(body["metadata"]["totalModels"], 1);
}

#[tokio::test]
async fn rejected_report_surfaces_status_and_body() {
    let (addr, _state) = spawn_fixture(StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = BackendClient::new(format!("http://{addr}"), "secret-token").unwrap();

    let err = client
        .post_report(&sample_report())
        .await
        .expect_err("a 500 must be surfaced, not swallowed");
    match err {
        ScoutError::Backend { status, .. } => assert_eq!(status, 500),
        other => panic!("expected backend rejection, got {other}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Nothing listens here.
    let client = BackendClient::new("http://127.0.0.1:9", "secret-token").unwrap();
    let err = client.post_report(&sample_report()).await.unwrap_err();
    assert!(matches!(err, ScoutError::Http(_)));
}
