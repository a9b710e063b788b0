//! In-process stand-in for the PoseView service, bound to an ephemeral port.

use axum::extract::{Path, State};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const ARTIFACT_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\xffrendered-pose\x00";

#[derive(Debug, Clone, Copy)]
pub enum Scenario {
    /// Job reports "processing" for `pending` status requests, then finishes.
    Success { pending: usize },
    SubmitRejected,
    MalformedSubmit,
    PollRejected,
    UnexpectedStatus,
}

#[derive(Debug, Clone)]
pub struct RecordedSubmit {
    pub body: String,
    pub content_type: Option<String>,
    pub accept: Option<String>,
}

struct MockState {
    base_url: String,
    scenario: Scenario,
    submit: Mutex<Option<RecordedSubmit>>,
    submit_hits: AtomicUsize,
    poll_hits: AtomicUsize,
    artifacts: Mutex<Vec<String>>,
}

pub struct MockService {
    state: Arc<MockState>,
}

impl MockService {
    pub async fn start(scenario: Scenario) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let state = Arc::new(MockState {
            base_url,
            scenario,
            submit: Mutex::new(None),
            submit_hits: AtomicUsize::new(0),
            poll_hits: AtomicUsize::new(0),
            artifacts: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/poseview_rest", post(submit_job))
            .route("/api/poseview_rest/job-1", get(job_status))
            .route("/results/{file}", get(artifact))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { state }
    }

    pub fn base_url(&self) -> &str {
        &self.state.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/poseview_rest", self.state.base_url)
    }

    pub fn job_location(&self) -> String {
        format!("{}/api/poseview_rest/job-1", self.state.base_url)
    }

    pub fn recorded_submit(&self) -> Option<RecordedSubmit> {
        self.state.submit.lock().unwrap().clone()
    }

    pub fn poll_hits(&self) -> usize {
        self.state.poll_hits.load(Ordering::SeqCst)
    }

    pub fn artifact_requests(&self) -> Vec<String> {
        self.state.artifacts.lock().unwrap().clone()
    }

    pub fn total_hits(&self) -> usize {
        self.state.submit_hits.load(Ordering::SeqCst)
            + self.poll_hits()
            + self.state.artifacts.lock().unwrap().len()
    }
}

fn header_value(headers: &HeaderMap, name: axum::http::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn submit_job(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.submit_hits.fetch_add(1, Ordering::SeqCst);
    *state.submit.lock().unwrap() = Some(RecordedSubmit {
        body,
        content_type: header_value(&headers, CONTENT_TYPE),
        accept: header_value(&headers, ACCEPT),
    });

    match state.scenario {
        Scenario::SubmitRejected => Json(json!({
            "status_code": 200,
            "message": "Invalid PDB code",
            "error": "invalid_input",
        }))
        .into_response(),
        Scenario::MalformedSubmit => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => (
            StatusCode::ACCEPTED,
            Json(json!({
                "status_code": 202,
                "message": "Job queued",
                "location": format!("{}/api/poseview_rest/job-1", state.base_url),
            })),
        )
            .into_response(),
    }
}

async fn job_status(State(state): State<Arc<MockState>>) -> Json<Value> {
    let hit = state.poll_hits.fetch_add(1, Ordering::SeqCst) + 1;
    let body = match state.scenario {
        Scenario::PollRejected => json!({
            "status_code": 200,
            "message": "Ligand not found",
            "error": "invalid_ligand",
        }),
        Scenario::UnexpectedStatus => json!({
            "status_code": 500,
            "message": "Renderer crashed",
        }),
        Scenario::Success { pending } if hit <= pending => json!({
            "status_code": 202,
            "message": format!("Job is processing ({hit})"),
        }),
        _ => json!({
            "status_code": 200,
            "message": "Job done",
            "result_png_picture": format!("{}/results/result123.png", state.base_url),
            "result_pdf_picture": format!("{}/results/result123.pdf", state.base_url),
            "result_svg_picture": format!("{}/results/result123.svg", state.base_url),
        }),
    };
    Json(body)
}

async fn artifact(State(state): State<Arc<MockState>>, Path(file): Path<String>) -> Vec<u8> {
    state.artifacts.lock().unwrap().push(file);
    ARTIFACT_BYTES.to_vec()
}

/// Serves one raw HTTP response that announces `declared_len` body bytes but
/// sends only `body` before closing. Returns the base URL.
pub async fn serve_truncated_artifact(declared_len: u64, body: &'static [u8]) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 2048];
        let _ = socket.read(&mut request).await;
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/svg+xml\r\nContent-Length: {declared_len}\r\nConnection: close\r\n\r\n"
        );
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(body).await;
        let _ = socket.shutdown().await;
    });

    base_url
}
